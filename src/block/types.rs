//! LZ4 block constants and the small read/copy primitives shared by the
//! decoder.
//!
//! All helpers operate on slices with explicit indices; a failed bounds check
//! surfaces as a [`DecodeError`] rather than a panic.

use crate::codec::DecodeError;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in an LZ4 block.
pub const MINMATCH: usize = 4;

/// Bit width of the match-length field in a token.
pub const ML_BITS: u32 = 4;

/// Mask for the match-length nibble of a token.
pub const ML_MASK: u8 = (1 << ML_BITS) - 1;

/// Literal-length nibble value that triggers a length extension.
pub const RUN_MASK: usize = 15;

/// Extension byte value meaning "more bytes follow".
pub const LENGTH_CONTINUE: u8 = 255;

// ─────────────────────────────────────────────────────────────────────────────
// Input primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Read one byte at `*ip` and advance.
#[inline(always)]
pub fn read_u8(src: &[u8], ip: &mut usize) -> Result<u8, DecodeError> {
    let b = src.get(*ip).copied().ok_or(DecodeError::InputOverrun)?;
    *ip += 1;
    Ok(b)
}

/// Read a little-endian `u16` at `*ip` and advance.
#[inline(always)]
pub fn read_le16(src: &[u8], ip: &mut usize) -> Result<u16, DecodeError> {
    let bytes = src.get(*ip..*ip + 2).ok_or(DecodeError::InputOverrun)?;
    *ip += 2;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a base-255 length extension: bytes are summed while each byte equals
/// 255. At least one byte is consumed.
#[inline]
pub fn read_variable_length(src: &[u8], ip: &mut usize) -> Result<usize, DecodeError> {
    let mut length: usize = 0;
    loop {
        let b = read_u8(src, ip)?;
        length = length.checked_add(b as usize).ok_or(DecodeError::Malformed)?;
        if b != LENGTH_CONTINUE {
            return Ok(length);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `len` bytes from `src[*ip..]` to `dst[*op..]` and advance both.
#[inline]
pub fn copy_literals(
    src: &[u8],
    ip: &mut usize,
    dst: &mut [u8],
    op: &mut usize,
    len: usize,
) -> Result<(), DecodeError> {
    let in_end = ip.checked_add(len).ok_or(DecodeError::InputOverrun)?;
    let out_end = op.checked_add(len).ok_or(DecodeError::OutputOverrun)?;
    let input = src.get(*ip..in_end).ok_or(DecodeError::InputOverrun)?;
    let output = dst.get_mut(*op..out_end).ok_or(DecodeError::OutputOverrun)?;
    output.copy_from_slice(input);
    *ip = in_end;
    *op = out_end;
    Ok(())
}

/// Copy `len` bytes starting `offset` bytes behind `*op` within `dst`, then
/// advance `*op`.
///
/// The regions may overlap when `offset < len`; the copy then proceeds byte
/// by byte in forward order so freshly written bytes are re-read, which is
/// what expands a one-byte history into an arbitrarily long run.
#[inline]
pub fn copy_match(
    dst: &mut [u8],
    op: &mut usize,
    offset: usize,
    len: usize,
) -> Result<(), DecodeError> {
    if offset == 0 || offset > *op {
        return Err(DecodeError::OffsetOutOfRange);
    }
    let out_end = op.checked_add(len).ok_or(DecodeError::OutputOverrun)?;
    if out_end > dst.len() {
        return Err(DecodeError::OutputOverrun);
    }
    let start = *op - offset;
    if offset >= len {
        dst.copy_within(start..start + len, *op);
    } else {
        for i in 0..len {
            dst[*op + i] = dst[start + i];
        }
    }
    *op = out_end;
    Ok(())
}
