//! LZO1X decoder.
//!
//! The payload after the 16-byte header is a raw LZO1X stream. Opcodes are
//! told apart by their high bits and by `state`, the number of literals that
//! trailed the previous instruction (4 meaning "a long literal run"):
//!
//! ```text
//! 1LLDDDSS / 01LDDDSS  M2: length 3..8, distance <= 2 KiB, one more byte
//! 001LLLLL             M3: length 2+L (or extended), LE16 distance <= 16 KiB
//! 0001HLLL             M4: length 2+L (or extended), LE16 distance 16..48 KiB
//!                          distance 16 KiB exactly terminates the stream
//! 0000LLLL, state 0    literal run of 3+L (or extended) bytes
//! 0000DDSS, state 1..3 M1: 2 bytes within 1 KiB
//! 0000DDSS, state 4    M1: 3 bytes within 2..3 KiB
//! ```
//!
//! Extended lengths are a run of zero bytes (255 each) and a tail byte.
//! Bytes after the terminator are padding and are ignored.

use super::{read_header, DecodeError};
use crate::block::types::{copy_literals, copy_match, read_le16, read_u8};

/// Upper bound on zero bytes in a length extension before the sum overflows.
const MAX255_COUNT: usize = usize::MAX / 255 - 2;
const M3_MARKER: u8 = 0x20;
const M4_MARKER: u8 = 0x10;

pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let (_, data) = read_header(src)?;
    decode_raw(data, dst)
}

/// Decodes a headerless LZO1X stream.
pub fn decode_raw(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    if src.len() < 3 {
        return Err(DecodeError::InputOverrun);
    }

    let mut ip = 0usize;
    let mut op = 0usize;
    let mut state = 0usize;
    let mut match_length = 0usize;

    // The first byte may open with a literal run.
    let mut inst = read_u8(src, &mut ip)?;
    if inst >= 22 {
        copy_literals(src, &mut ip, dst, &mut op, inst as usize - 17)?;
        state = 4;
    } else if inst >= 18 {
        let run = inst as usize - 17;
        copy_literals(src, &mut ip, dst, &mut op, run)?;
        state = run;
    }

    loop {
        if ip > 1 || state > 0 {
            inst = read_u8(src, &mut ip)?;
        }

        let distance: usize;
        let next_state: usize;

        if inst & 0xC0 != 0 {
            let next = read_u8(src, &mut ip)?;
            distance = ((next as usize) << 3) + ((inst as usize >> 2) & 0x7) + 1;
            match_length = (inst as usize >> 5) + 1;
            next_state = inst as usize & 0x3;
        } else if inst & M3_MARKER != 0 {
            match_length = (inst as usize & 0x1F) + 2;
            if match_length == 2 {
                match_length += extended_length(src, &mut ip, 31)?;
            }
            let raw = read_le16(src, &mut ip)? as usize;
            distance = (raw >> 2) + 1;
            next_state = raw & 0x3;
        } else if inst & M4_MARKER != 0 {
            match_length = (inst as usize & 0x7) + 2;
            if match_length == 2 {
                match_length += extended_length(src, &mut ip, 7)?;
            }
            let raw = read_le16(src, &mut ip)? as usize;
            let base = ((inst as usize & 0x8) << 11) + (raw >> 2);
            if base == 0 {
                break;
            }
            distance = base + 16384;
            next_state = raw & 0x3;
        } else if state == 0 {
            let mut run = inst as usize + 3;
            if run == 3 {
                run += extended_length(src, &mut ip, 15)?;
            }
            copy_literals(src, &mut ip, dst, &mut op, run)?;
            state = 4;
            continue;
        } else if state != 4 {
            let tail = read_u8(src, &mut ip)?;
            distance = (inst as usize >> 2) + ((tail as usize) << 2) + 1;
            match_length = 2;
            next_state = inst as usize & 0x3;
        } else {
            let tail = read_u8(src, &mut ip)?;
            distance = (inst as usize >> 2) + ((tail as usize) << 2) + 2049;
            match_length = 3;
            next_state = inst as usize & 0x3;
        }

        copy_match(dst, &mut op, distance, match_length)?;
        copy_literals(src, &mut ip, dst, &mut op, next_state)?;
        state = next_state;
    }

    // The terminator is an M4 of length 3.
    if match_length != 3 {
        return Err(DecodeError::Malformed);
    }

    Ok(op)
}

/// Reads a zero-run length extension and its tail byte, returning the value
/// to add to the opcode's base length.
fn extended_length(src: &[u8], ip: &mut usize, base: usize) -> Result<usize, DecodeError> {
    let start = *ip;
    while src.get(*ip).copied() == Some(0) {
        *ip += 1;
    }
    let zeros = *ip - start;
    if zeros > MAX255_COUNT {
        return Err(DecodeError::Malformed);
    }
    let tail = read_u8(src, ip)? as usize;
    Ok(zeros * 255 + base + tail)
}
