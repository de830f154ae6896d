//! Yaz0 decoder.
//!
//! After the 16-byte header the stream is a sequence of groups: one code
//! byte, read MSB first, then eight chunks. A set bit is one literal byte; a
//! clear bit is a back-reference:
//!
//! ```text
//! NR RR        distance = (N & 0xF) << 8 | RR, plus 1
//!              length   = (N >> 4) + 2        when N >> 4 != 0
//! 0R RR NN     length   = NN + 0x12           otherwise
//! ```
//!
//! Decoding stops once the size declared in the header has been produced.

use super::{read_header, DecodeError};
use crate::block::types::{copy_literals, copy_match, read_u8};

pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let (size, data) = read_header(src)?;
    let size = size as usize;
    if size > dst.len() {
        return Err(DecodeError::OutputOverrun);
    }

    let mut ip = 0usize;
    let mut op = 0usize;
    let mut code = 0u8;
    let mut remaining_bits = 0u32;

    while op < size {
        if remaining_bits == 0 {
            code = read_u8(data, &mut ip)?;
            remaining_bits = 8;
        }

        if code & 0x80 != 0 {
            copy_literals(data, &mut ip, dst, &mut op, 1)?;
        } else {
            let b1 = read_u8(data, &mut ip)?;
            let b2 = read_u8(data, &mut ip)?;
            let distance = ((((b1 & 0x0F) as usize) << 8) | b2 as usize) + 1;
            let length = match b1 >> 4 {
                0 => read_u8(data, &mut ip)? as usize + 0x12,
                n => n as usize + 2,
            };
            copy_match(dst, &mut op, distance, length)?;
        }

        code <<= 1;
        remaining_bits -= 1;
    }

    Ok(size)
}
