//! Symbol matrix construction, data placement and masking
//! (ISO/IEC 18004, Sections 6.3, 7.7 and 7.8).
//!
//! The matrix keeps two same-shaped grids addressed by `row * side + col`:
//! the module colours and a "reserved" flag marking function modules
//! (finders, separators, timing, alignment, format and version info, the
//! dark module). Data placement and masking never touch reserved cells.

use crate::tables::alignment_centers;
use crate::version::Version;

/// Module grid under construction.
#[derive(Clone, Debug)]
pub struct Matrix {
    version: Version,
    side: usize,
    /// true = dark
    modules: Vec<bool>,
    reserved: Vec<bool>,
}

impl Matrix {
    /// Allocate the grid and stamp every function pattern.
    ///
    /// Format and version info areas are reserved but left light; they are
    /// filled by [`crate::format`] after masking.
    pub fn new(version: Version) -> Self {
        let side = version.side();
        let mut matrix = Self {
            version,
            side,
            modules: vec![false; side * side],
            reserved: vec![false; side * side],
        };

        matrix.place_timing_patterns();
        matrix.place_finder_pattern(3, 3);
        matrix.place_finder_pattern(3, side - 4);
        matrix.place_finder_pattern(side - 4, 3);
        matrix.place_alignment_patterns();
        matrix.reserve_format_area();
        if version.number() >= 7 {
            matrix.reserve_version_area();
        }

        // Dark module, always set, next to the bottom-left format copy
        matrix.set_function(side - 8, 8, true);

        matrix
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[row * self.side + col]
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[row * self.side + col]
    }

    /// Set a module and mark it as a function module.
    pub fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        let idx = row * self.side + col;
        self.modules[idx] = dark;
        self.reserved[idx] = true;
    }

    fn reserve(&mut self, row: usize, col: usize) {
        self.reserved[row * self.side + col] = true;
    }

    /// Row 6 and column 6, dark on even indices. Finder patterns drawn
    /// afterwards overwrite both ends.
    fn place_timing_patterns(&mut self) {
        for i in 0..self.side {
            let dark = i % 2 == 0;
            self.set_function(6, i, dark);
            self.set_function(i, 6, dark);
        }
    }

    /// Place a 7x7 finder pattern centred at (row, col), together with its
    /// light one-module separator where it falls inside the symbol.
    ///
    /// ```text
    /// #######.
    /// #.....#.
    /// #.###.#.
    /// #.###.#.
    /// #.###.#.
    /// #.....#.
    /// #######.
    /// ........
    /// ```
    fn place_finder_pattern(&mut self, row: usize, col: usize) {
        let side = self.side as isize;
        for dr in -4isize..=4 {
            for dc in -4isize..=4 {
                let r = row as isize + dr;
                let c = col as isize + dc;
                if !(0..side).contains(&r) || !(0..side).contains(&c) {
                    continue;
                }
                // Chebyshev distance: 0-1 core, 2 light ring, 3 dark ring, 4 separator
                let dist = dr.abs().max(dc.abs());
                self.set_function(r as usize, c as usize, dist != 2 && dist != 4);
            }
        }
    }

    /// Place alignment patterns at every pair of centre coordinates, except
    /// the three corners already occupied by finder patterns.
    fn place_alignment_patterns(&mut self) {
        let (centers, count) = alignment_centers(self.version.number());
        let centers = &centers[..count];

        for (i, &row) in centers.iter().enumerate() {
            for (j, &col) in centers.iter().enumerate() {
                let last = count - 1;
                if [(0, 0), (0, last), (last, 0)].contains(&(i, j)) {
                    continue;
                }
                self.place_alignment_pattern(row, col);
            }
        }
    }

    /// 5x5: dark ring, light ring, dark centre.
    fn place_alignment_pattern(&mut self, row: usize, col: usize) {
        for r in row - 2..=row + 2 {
            for c in col - 2..=col + 2 {
                let dist = r.abs_diff(row).max(c.abs_diff(col));
                self.set_function(r, c, dist != 1);
            }
        }
    }

    /// Reserve both copies of the 15-bit format information.
    fn reserve_format_area(&mut self) {
        let side = self.side;

        // Around the top-left finder, skipping the timing pattern
        for i in 0..=8 {
            if i != 6 {
                self.reserve(8, i);
                self.reserve(i, 8);
            }
        }

        // Below the top-right finder and beside the bottom-left finder
        for i in 0..8 {
            self.reserve(8, side - 1 - i);
        }
        for i in 0..7 {
            self.reserve(side - 1 - i, 8);
        }
    }

    /// Reserve the two 6x3 version information blocks.
    fn reserve_version_area(&mut self) {
        let side = self.side;
        for i in 0..6 {
            for j in 0..3 {
                self.reserve(i, side - 11 + j);
                self.reserve(side - 11 + j, i);
            }
        }
    }

    /// Place the interleaved stream with the zigzag traversal.
    ///
    /// Two-column strips from the right edge leftwards, alternating upward
    /// and downward sweeps; within a row the right column comes first.
    /// Column 6 is skipped entirely. Cells left over once the stream runs
    /// out stay light.
    pub fn place_data(&mut self, stream: &[bool]) {
        let side = self.side;
        let mut bits = stream.iter().copied();

        let mut right = side - 1;
        loop {
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;

            for vert in 0..side {
                let row = if upward { side - 1 - vert } else { vert };
                for col in [right, right - 1] {
                    let idx = row * side + col;
                    if !self.reserved[idx] {
                        self.modules[idx] = bits.next().unwrap_or(false);
                    }
                }
            }

            if right < 3 {
                break;
            }
            right -= 2;
        }
    }

    /// Apply mask pattern 0: flip every non-reserved module where
    /// `(row + col) mod 2 == 0`.
    pub fn apply_mask(&mut self) {
        let side = self.side;
        for row in 0..side {
            for col in 0..side {
                let idx = row * side + col;
                if !self.reserved[idx] && (row + col) % 2 == 0 {
                    self.modules[idx] = !self.modules[idx];
                }
            }
        }
    }

    /// Module colours only, row-major.
    pub fn into_modules(self) -> Vec<bool> {
        self.modules
    }
}
