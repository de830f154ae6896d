//! aPLib decoder.
//!
//! The first payload byte is a literal. After that, tag bits (MSB first, a
//! fresh tag byte fetched from the stream every eight bits) select:
//!
//! ```text
//! 0      literal byte
//! 111    4-bit offset: copy one byte, or emit a zero byte when the offset is 0
//! 110    one byte: offset = b >> 1, length = 2 + (b & 1); offset 0 ends the stream
//! 10     gamma-coded long match, or a repeat of the previous offset
//! ```
//!
//! `lwm` records whether the previous instruction was a match; it changes
//! how the long-match offset prefix is biased and disables offset repeats.

use super::{read_header, DecodeError};
use crate::block::types::{copy_literals, copy_match, read_u8};

pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let (_, data) = read_header(src)?;
    decode_raw(data, dst)
}

/// Decodes a headerless aPLib stream.
pub fn decode_raw(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut tags = TagBits::default();
    let mut ip = 0usize;
    let mut op = 0usize;
    let mut last_offset = usize::MAX;
    let mut lwm = false;

    copy_literals(src, &mut ip, dst, &mut op, 1)?;

    loop {
        if tags.next(src, &mut ip)? == 0 {
            copy_literals(src, &mut ip, dst, &mut op, 1)?;
            lwm = false;
            continue;
        }

        if tags.next(src, &mut ip)? == 0 {
            // Long match.
            let prefix = tags.gamma(src, &mut ip)?;
            if !lwm && prefix == 2 {
                let length = tags.gamma(src, &mut ip)?;
                copy_match(dst, &mut op, last_offset, length)?;
            } else {
                let high = prefix - if lwm { 2 } else { 3 };
                let low = read_u8(src, &mut ip)? as usize;
                let offset = high
                    .checked_mul(256)
                    .and_then(|v| v.checked_add(low))
                    .ok_or(DecodeError::Malformed)?;
                let mut length = tags.gamma(src, &mut ip)?;
                if offset >= 32000 {
                    length = length.saturating_add(1);
                }
                if offset >= 1280 {
                    length = length.saturating_add(1);
                }
                if offset < 128 {
                    length = length.saturating_add(2);
                }
                copy_match(dst, &mut op, offset, length)?;
                last_offset = offset;
            }
            lwm = true;
        } else if tags.next(src, &mut ip)? == 0 {
            // Short match.
            let b = read_u8(src, &mut ip)?;
            let offset = (b >> 1) as usize;
            if offset == 0 {
                break;
            }
            copy_match(dst, &mut op, offset, 2 + (b & 1) as usize)?;
            last_offset = offset;
            lwm = true;
        } else {
            // Single byte.
            let mut offset = 0usize;
            for _ in 0..4 {
                offset = (offset << 1) + tags.next(src, &mut ip)? as usize;
            }
            if offset != 0 {
                copy_match(dst, &mut op, offset, 1)?;
            } else {
                let out = dst.get_mut(op).ok_or(DecodeError::OutputOverrun)?;
                *out = 0;
                op += 1;
            }
            lwm = false;
        }
    }

    Ok(op)
}

/// Tag byte currently being consumed and how many of its bits remain.
#[derive(Default)]
struct TagBits {
    tag: u8,
    remaining: u32,
}

impl TagBits {
    fn next(&mut self, src: &[u8], ip: &mut usize) -> Result<u32, DecodeError> {
        if self.remaining == 0 {
            self.tag = read_u8(src, ip)?;
            self.remaining = 8;
        }
        self.remaining -= 1;
        let bit = (self.tag >> 7) & 1;
        self.tag <<= 1;
        Ok(bit as u32)
    }

    /// Gamma code: value bits each followed by a continue bit, stop on `0`.
    fn gamma(&mut self, src: &[u8], ip: &mut usize) -> Result<usize, DecodeError> {
        let mut value: usize = 1;
        loop {
            let bit = self.next(src, ip)? as usize;
            value = value
                .checked_mul(2)
                .and_then(|v| v.checked_add(bit))
                .ok_or(DecodeError::Malformed)?;
            if self.next(src, ip)? == 0 {
                return Ok(value);
            }
        }
    }
}
