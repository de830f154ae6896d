//! LZ4 block-stream container (`LZ4H`).
//!
//! # Layout
//!
//! ```text
//! +------+------------------+------------+---------+------------+---------+--
//! | tag  | size (BE, 24 bit)| block size | block.. | block size | block.. |
//! +------+------------------+------------+---------+------------+---------+--
//!   4 B         4 B             4 B (BE)             4 B (BE)
//! ```
//!
//! The high byte of the size field is reserved. Blocks are independent LZ4
//! blocks; their outputs are concatenated until the declared size has been
//! produced. Each block is staged in the session's [`Scratch`] buffer before
//! it is decoded.

use super::{read_be32, DecodeError, Scratch};
use crate::block::decode_block;
use crate::config::LZ4H_HEADER_SIZE;

/// Only the low 24 bits of the size field are meaningful.
pub const SIZE_MASK: u32 = 0x00FF_FFFF;

/// Decodes a complete `LZ4H` region into `dst` and returns the declared size.
pub fn decode(src: &[u8], dst: &mut [u8], scratch: &mut Scratch) -> Result<usize, DecodeError> {
    // The tag is skipped; identification is the registry's job.
    let mut ip = LZ4H_HEADER_SIZE - 4;
    let total = (read_be32(src, &mut ip)? & SIZE_MASK) as usize;
    if total > dst.len() {
        return Err(DecodeError::OutputOverrun);
    }

    let mut written = 0usize;
    while written < total {
        let block_size = read_be32(src, &mut ip)? as usize;
        if block_size > Scratch::CAPACITY {
            return Err(DecodeError::Malformed);
        }
        let end = ip.checked_add(block_size).ok_or(DecodeError::InputOverrun)?;
        let block = src.get(ip..end).ok_or(DecodeError::InputOverrun)?;
        ip = end;

        let staged = scratch.stage(block)?;
        let produced = decode_block(staged, &mut dst[written..])?;
        if produced == 0 {
            return Err(DecodeError::Malformed);
        }
        written += produced;
    }

    Ok(total)
}
