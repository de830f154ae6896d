//! LZ4 block decompression core.
//!
//! Decodes one self-contained block whose compressed length is known but whose
//! decompressed length is not: decoding stops exactly when every input byte has
//! been consumed, and the number of bytes written is returned.
//!
//! # Sequence layout
//!
//! ```text
//! token | [lit-len ext..] | literals.. | offset (LE16) | [match-len ext..]
//! ```
//!
//! The high token nibble is the literal length, the low nibble the match
//! length minus [`MINMATCH`]. A nibble of 15 is followed by base-255
//! extension bytes. A block may end right after its literals.
//!
//! # Bounds
//!
//! Every read is checked against the input, every write against `dst`, and
//! every back-reference against the history actually available (produced
//! output plus the optional external dictionary). Malformed input returns a
//! [`DecodeError`]; it never panics and never touches memory outside the
//! slices it was given.

use super::types::{
    copy_literals, copy_match, read_le16, read_u8, read_variable_length, MINMATCH, ML_BITS,
    ML_MASK, RUN_MASK,
};
use crate::codec::DecodeError;

/// Decode one LZ4 block from `src` into `dst`.
///
/// Returns the number of bytes written to `dst`.
pub fn decode_block(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    decode_block_with_dict(src, dst, &[])
}

/// Decode one LZ4 block whose back-references may reach past the start of
/// `dst` into `dict`, the data logically preceding the output.
///
/// A match that starts inside `dict` and runs past its end continues from the
/// start of `dst`.
pub fn decode_block_with_dict(
    src: &[u8],
    dst: &mut [u8],
    dict: &[u8],
) -> Result<usize, DecodeError> {
    let mut ip: usize = 0;
    let mut op: usize = 0;

    loop {
        let token = read_u8(src, &mut ip)?;

        // ── Literals ─────────────────────────────────────────────────────────
        let mut lit_length = (token >> ML_BITS) as usize;
        if lit_length == RUN_MASK {
            lit_length += read_variable_length(src, &mut ip)?;
        }
        copy_literals(src, &mut ip, dst, &mut op, lit_length)?;

        // The last sequence of a block carries literals only.
        if ip == src.len() {
            break;
        }

        // ── Match ────────────────────────────────────────────────────────────
        let offset = read_le16(src, &mut ip)? as usize;

        let mut match_length = (token & ML_MASK) as usize;
        if match_length == RUN_MASK {
            match_length += read_variable_length(src, &mut ip)?;
        }
        match_length += MINMATCH;

        if offset == 0 || offset > op + dict.len() {
            return Err(DecodeError::OffsetOutOfRange);
        }

        if offset > op {
            // Starts inside the external dictionary.
            let back = offset - op;
            let dict_start = dict.len() - back;
            let dict_len = back.min(match_length);
            let out = dst
                .get_mut(op..op + dict_len)
                .ok_or(DecodeError::OutputOverrun)?;
            out.copy_from_slice(&dict[dict_start..dict_start + dict_len]);
            op += dict_len;
            match_length -= dict_len;

            // Remainder continues from the start of the output.
            if match_length > 0 {
                let from_start = op;
                copy_match(dst, &mut op, from_start, match_length)?;
            }
        } else {
            copy_match(dst, &mut op, offset, match_length)?;
        }

        if ip == src.len() {
            break;
        }
    }

    Ok(op)
}
