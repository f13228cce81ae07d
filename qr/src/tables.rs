//! Per-version constants for error correction level L, versions 1-20.
//!
//! Values from ISO/IEC 18004:2015 Tables 1 and 9.

/// Block structure of one version at EC level L.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacity {
    /// Total codewords (data + EC) in the symbol.
    pub total_codewords: usize,
    /// EC codewords appended to every block.
    pub ec_per_block: usize,
    /// Number of blocks in group 1.
    pub g1_blocks: usize,
    /// Data codewords per group 1 block.
    pub g1_data: usize,
    /// Number of blocks in group 2 (zero when there is no second group).
    pub g2_blocks: usize,
    /// Data codewords per group 2 block. Always `g1_data + 1` when used.
    pub g2_data: usize,
    /// Zero bits appended after the last codeword.
    pub remainder_bits: usize,
}

impl Capacity {
    const fn new(
        total_codewords: usize,
        ec_per_block: usize,
        (g1_blocks, g1_data): (usize, usize),
        (g2_blocks, g2_data): (usize, usize),
        remainder_bits: usize,
    ) -> Self {
        Self {
            total_codewords,
            ec_per_block,
            g1_blocks,
            g1_data,
            g2_blocks,
            g2_data,
            remainder_bits,
        }
    }

    pub fn total_blocks(&self) -> usize {
        self.g1_blocks + self.g2_blocks
    }

    /// Data codewords the symbol holds: total minus all EC codewords.
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.ec_per_block * self.total_blocks()
    }
}

/// Indexed by `version - 1`.
pub const CAPACITIES: [Capacity; 20] = [
    Capacity::new(26, 7, (1, 19), (0, 0), 0),
    Capacity::new(44, 10, (1, 34), (0, 0), 7),
    Capacity::new(70, 15, (1, 55), (0, 0), 7),
    Capacity::new(100, 20, (1, 80), (0, 0), 7),
    Capacity::new(134, 26, (1, 108), (0, 0), 7),
    Capacity::new(172, 18, (2, 68), (0, 0), 7),
    Capacity::new(196, 20, (2, 78), (0, 0), 0),
    Capacity::new(242, 24, (2, 97), (0, 0), 0),
    Capacity::new(292, 30, (2, 116), (0, 0), 0),
    Capacity::new(346, 18, (2, 68), (2, 69), 0),
    Capacity::new(404, 20, (4, 81), (0, 0), 0),
    Capacity::new(466, 24, (2, 92), (2, 93), 0),
    Capacity::new(532, 26, (4, 107), (0, 0), 0),
    Capacity::new(581, 30, (3, 115), (1, 116), 3),
    Capacity::new(655, 22, (5, 87), (1, 88), 3),
    Capacity::new(733, 24, (5, 98), (1, 99), 3),
    Capacity::new(815, 28, (1, 107), (5, 108), 3),
    Capacity::new(901, 30, (5, 120), (1, 121), 3),
    Capacity::new(991, 28, (3, 113), (4, 114), 3),
    Capacity::new(1085, 28, (3, 107), (5, 108), 3),
];

/// Most alignment centers per axis for versions up to 20.
pub const MAX_ALIGNMENT_CENTERS: usize = 4;

/// Alignment pattern center coordinates (shared by rows and columns).
///
/// `version / 7 + 2` positions, the first at 6 and the last at
/// `4 * version + 10`, the rest spaced evenly by an even step. Version 1 has
/// none.
pub fn alignment_centers(version: u8) -> ([usize; MAX_ALIGNMENT_CENTERS], usize) {
    let mut centers = [0usize; MAX_ALIGNMENT_CENTERS];
    if version < 2 {
        return (centers, 0);
    }

    let count = version as usize / 7 + 2;
    let last = version as usize * 4 + 10;
    let step = (version as usize * 4 + count * 2 + 1) / (count * 2 - 2) * 2;

    centers[0] = 6;
    for (i, center) in centers.iter_mut().enumerate().take(count).skip(1) {
        *center = last - (count - 1 - i) * step;
    }
    (centers, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_sizes_sum_to_data_capacity() {
        for (idx, cap) in CAPACITIES.iter().enumerate() {
            let summed = cap.g1_blocks * cap.g1_data + cap.g2_blocks * cap.g2_data;
            assert_eq!(summed, cap.data_codewords(), "version {}", idx + 1);
            if cap.g2_blocks > 0 {
                assert_eq!(cap.g2_data, cap.g1_data + 1, "version {}", idx + 1);
            }
        }
    }

    #[test]
    fn known_data_capacities() {
        assert_eq!(CAPACITIES[0].data_codewords(), 19);
        assert_eq!(CAPACITIES[9].data_codewords(), 274);
        assert_eq!(CAPACITIES[19].data_codewords(), 861);
    }

    /// Raw module count available for codewords, derived from the symbol
    /// geometry, must equal total codewords * 8 + remainder bits.
    #[test]
    fn capacity_matches_geometry() {
        for version in 1u8..=20 {
            let v = version as usize;
            let mut modules = (16 * v + 128) * v + 64;
            if v >= 2 {
                let num_align = v / 7 + 2;
                modules -= (25 * num_align - 10) * num_align - 55;
                if v >= 7 {
                    modules -= 36;
                }
            }
            let cap = &CAPACITIES[v - 1];
            assert_eq!(
                modules,
                cap.total_codewords * 8 + cap.remainder_bits,
                "version {version}"
            );
        }
    }

    #[test]
    fn alignment_centers_match_iso_table() {
        let expected: [&[usize]; 20] = [
            &[],
            &[6, 18],
            &[6, 22],
            &[6, 26],
            &[6, 30],
            &[6, 34],
            &[6, 22, 38],
            &[6, 24, 42],
            &[6, 26, 46],
            &[6, 28, 50],
            &[6, 30, 54],
            &[6, 32, 58],
            &[6, 34, 62],
            &[6, 26, 46, 66],
            &[6, 26, 48, 70],
            &[6, 26, 50, 74],
            &[6, 30, 54, 78],
            &[6, 30, 56, 82],
            &[6, 30, 58, 86],
            &[6, 34, 62, 90],
        ];
        for (idx, want) in expected.iter().enumerate() {
            let (centers, count) = alignment_centers(idx as u8 + 1);
            assert_eq!(&centers[..count], *want, "version {}", idx + 1);
        }
    }
}
