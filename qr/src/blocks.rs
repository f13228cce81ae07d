//! Block splitting and codeword interleaving (ISO/IEC 18004, Section 7.6).
//!
//! ```text
//! Group 1: [D D D ... D] [D D D ... D]          each + EC
//! Group 2: [D D D ... D D] [D D D ... D D]      one data codeword longer
//!
//! Output:  D(b0,0) D(b1,0) ... D(bn,0) D(b0,1) ... | E(b0,0) E(b1,0) ... | remainder
//! ```

use log::debug;

use crate::bits::BitBuffer;
use crate::reed_solomon;
use crate::version::Version;

/// One data block and its EC codewords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub ec: Vec<u8>,
}

/// Split data codewords into the version's block groups and compute EC
/// codewords for each block.
pub fn split(data: &[u8], version: Version) -> Vec<Block> {
    let cap = version.capacity();
    debug_assert_eq!(data.len(), cap.data_codewords());

    let generator = reed_solomon::generator(cap.ec_per_block);
    let sizes = std::iter::repeat_n(cap.g1_data, cap.g1_blocks)
        .chain(std::iter::repeat_n(cap.g2_data, cap.g2_blocks));

    let mut offset = 0;
    let blocks: Vec<Block> = sizes
        .map(|len| {
            let block = &data[offset..offset + len];
            offset += len;
            Block {
                data: block.to_vec(),
                ec: reed_solomon::encode_with(block, &generator),
            }
        })
        .collect();

    debug!(
        "version {}: {} x {} + {} x {} data codewords, {} EC per block",
        version, cap.g1_blocks, cap.g1_data, cap.g2_blocks, cap.g2_data, cap.ec_per_block
    );
    blocks
}

/// Interleave block codewords column by column and append the remainder bits.
pub fn interleave(blocks: &[Block], version: Version) -> BitBuffer {
    let cap = version.capacity();
    let mut bits = BitBuffer::with_capacity(cap.total_codewords * 8 + cap.remainder_bits);

    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..max_data {
        for block in blocks {
            if let Some(&cw) = block.data.get(i) {
                bits.append_byte(cw);
            }
        }
    }

    for i in 0..cap.ec_per_block {
        for block in blocks {
            bits.append_byte(block.ec[i]);
        }
    }

    bits.append_bits(0, cap.remainder_bits);
    bits
}

/// Data codewords in, final placement-ready bit stream out.
pub fn build_stream(data: &[u8], version: Version) -> BitBuffer {
    interleave(&split(data, version), version)
}
