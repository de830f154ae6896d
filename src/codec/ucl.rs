//! UCL NRV2B decoder (8-bit bit buffer variant).
//!
//! Control bits are pulled MSB first from bytes interleaved with the data;
//! a new control byte is fetched from the stream whenever the previous one is
//! exhausted. Per sequence:
//!
//! - a run of `1` bits, each followed by one literal byte;
//! - a gamma-coded offset high part (`2` reuses the previous offset), then a
//!   low byte; the value `0xFFFF_FFFF` ends the stream;
//! - a two-bit length, or a gamma-coded one when both bits are zero; offsets
//!   above `0xD00` add one.

use super::{read_header, DecodeError};
use crate::block::types::{copy_literals, copy_match, read_u8};

/// End-of-stream marker produced by the offset decoder.
const END_OF_STREAM: u32 = 0xFFFF_FFFF;

/// Offsets above this carry one extra byte of match length.
const FAR_OFFSET: u32 = 0xD00;

pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let (_, data) = read_header(src)?;
    decode_raw(data, dst)
}

/// Decodes a headerless NRV2B stream.
pub fn decode_raw(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut bits = BitBuffer::default();
    let mut ip = 0usize;
    let mut op = 0usize;
    let mut last_offset: u32 = 1;

    loop {
        while bits.next(src, &mut ip)? == 1 {
            copy_literals(src, &mut ip, dst, &mut op, 1)?;
        }

        let mut offset = bits.gamma(src, &mut ip, 1)?;
        if offset == 2 {
            offset = last_offset;
        } else {
            let low = read_u8(src, &mut ip)? as u32;
            offset = (offset - 3)
                .checked_mul(256)
                .and_then(|v| v.checked_add(low))
                .ok_or(DecodeError::Malformed)?;
            if offset == END_OF_STREAM {
                break;
            }
            offset += 1;
            last_offset = offset;
        }

        let mut length = bits.next(src, &mut ip)? as usize;
        length = length * 2 + bits.next(src, &mut ip)? as usize;
        if length == 0 {
            length = bits.gamma(src, &mut ip, 1)? as usize + 2;
        }
        if offset > FAR_OFFSET {
            length += 1;
        }

        copy_match(dst, &mut op, offset as usize, length + 1)?;
    }

    Ok(op)
}

/// Shift register holding the current control byte plus a sentinel bit that
/// marks when the byte is used up.
#[derive(Default)]
struct BitBuffer {
    bb: u32,
}

impl BitBuffer {
    fn next(&mut self, src: &[u8], ip: &mut usize) -> Result<u32, DecodeError> {
        if self.bb & 0x7F != 0 {
            self.bb <<= 1;
        } else {
            self.bb = (read_u8(src, ip)? as u32) * 2 + 1;
        }
        Ok((self.bb >> 8) & 1)
    }

    /// Gamma code: value bits each followed by a stop bit, stop on `1`.
    fn gamma(&mut self, src: &[u8], ip: &mut usize, start: u32) -> Result<u32, DecodeError> {
        let mut value = start;
        loop {
            let bit = self.next(src, ip)?;
            value = value
                .checked_mul(2)
                .and_then(|v| v.checked_add(bit))
                .ok_or(DecodeError::Malformed)?;
            if self.next(src, ip)? == 1 {
                return Ok(value);
            }
        }
    }
}
