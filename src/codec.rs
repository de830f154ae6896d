//! Codec registry and dispatch.
//!
//! Every compressed region starts with a 4-byte ASCII tag naming its format.
//! [`Codec`] is the closed set of supported formats; each variant knows its
//! operator-facing name, its tag and how to decode itself.
//!
//! | codec   | name    | tag    | layout                                   |
//! |---------|---------|--------|------------------------------------------|
//! | Yaz0    | `yaz`   | `Yaz0` | 16-byte header, Yaz0 groups              |
//! | LZO1X   | `lzo`   | `LZO0` | 16-byte header, LZO1X stream             |
//! | UCL     | `ucl`   | `UCL0` | 16-byte header, NRV2B stream             |
//! | aPLib   | `aplib` | `APL0` | 16-byte header, aPLib stream             |
//! | LZ4     | `lz4hc` | `LZ4H` | 8-byte header, size-prefixed LZ4 blocks  |
//!
//! The 16-byte header is the tag, the big-endian decompressed size and eight
//! reserved bytes.

pub mod aplib;
pub mod lz4hc;
pub mod lzo;
pub mod ucl;
pub mod yaz0;

use std::fmt;
use std::str::FromStr;

use crate::config::{compress_bound, BLOCK_CAP, CODEC_HEADER_SIZE};
use crate::error::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Decode errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure inside a single codec's bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended before the decoder was done with it.
    InputOverrun,
    /// Decoding would write past the end of the destination buffer.
    OutputOverrun,
    /// A back-reference points before the start of the available history.
    OffsetOutOfRange,
    /// The stream is structurally invalid (bad terminator, impossible length).
    Malformed,
}

impl DecodeError {
    fn as_str(&self) -> &'static str {
        match self {
            DecodeError::InputOverrun => "compressed input truncated",
            DecodeError::OutputOverrun => "output buffer overrun",
            DecodeError::OffsetOutOfRange => "back-reference offset out of range",
            DecodeError::Malformed => "malformed stream",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for DecodeError {}

// ─────────────────────────────────────────────────────────────────────────────
// Codec
// ─────────────────────────────────────────────────────────────────────────────

/// A supported compression format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Yaz0,
    Lzo,
    Ucl,
    Aplib,
    Lz4hc,
}

impl Codec {
    /// Registry order; name and tag lookups scan it front to back.
    pub const ALL: [Codec; 5] = [Codec::Yaz0, Codec::Lzo, Codec::Ucl, Codec::Aplib, Codec::Lz4hc];

    /// Name accepted by `--codec`.
    pub fn name(self) -> &'static str {
        match self {
            Codec::Yaz0 => "yaz",
            Codec::Lzo => "lzo",
            Codec::Ucl => "ucl",
            Codec::Aplib => "aplib",
            Codec::Lz4hc => "lz4hc",
        }
    }

    /// Tag found in the first four bytes of a region compressed with this codec.
    pub fn tag(self) -> [u8; 4] {
        match self {
            Codec::Yaz0 => *b"Yaz0",
            Codec::Lzo => *b"LZO0",
            Codec::Ucl => *b"UCL0",
            Codec::Aplib => *b"APL0",
            Codec::Lz4hc => *b"LZ4H",
        }
    }

    /// Looks a codec up by its exact operator-facing name.
    pub fn from_name(name: &str) -> Option<Codec> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Sniffs the leading tag of a compressed region.
    pub fn from_header(region: &[u8]) -> Option<Codec> {
        let tag = region.get(..4)?;
        Self::ALL.iter().copied().find(|c| c.tag() == tag)
    }

    /// Decodes one complete compressed region (header included) into `dst`.
    ///
    /// Returns the decompressed length. `scratch` is only used by the LZ4
    /// block stream but is threaded through so one buffer serves a whole
    /// decode session.
    pub fn decode(
        self,
        src: &[u8],
        dst: &mut [u8],
        scratch: &mut Scratch,
    ) -> Result<usize, DecodeError> {
        match self {
            Codec::Yaz0 => yaz0::decode(src, dst),
            Codec::Lzo => lzo::decode(src, dst),
            Codec::Ucl => ucl::decode(src, dst),
            Codec::Aplib => aplib::decode(src, dst),
            Codec::Lz4hc => lz4hc::decode(src, dst, scratch),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codec::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = Codec::ALL.iter().map(|c| c.name()).collect();
            format!("invalid codec name: {} (expected one of: {})", s, names.join(", "))
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scratch buffer
// ─────────────────────────────────────────────────────────────────────────────

/// Staging buffer for compressed blocks of the LZ4 block stream.
///
/// Owned by a single decode session and reused for every block it stages.
/// Grows on demand up to [`Scratch::CAPACITY`].
#[derive(Debug, Default)]
pub struct Scratch {
    buf: Vec<u8>,
}

impl Scratch {
    /// Largest block the buffer will stage: the compression bound of
    /// [`BLOCK_CAP`].
    pub const CAPACITY: usize = compress_bound(BLOCK_CAP);

    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `block` into the buffer and returns the staged bytes.
    pub fn stage(&mut self, block: &[u8]) -> Result<&[u8], DecodeError> {
        if block.len() > Self::CAPACITY {
            return Err(DecodeError::Malformed);
        }
        self.buf.clear();
        self.buf.extend_from_slice(block);
        Ok(&self.buf)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Splits a 16-byte-header region into its declared size and its payload.
pub(crate) fn read_header(src: &[u8]) -> Result<(u32, &[u8]), DecodeError> {
    if src.len() < CODEC_HEADER_SIZE {
        return Err(DecodeError::InputOverrun);
    }
    let size = u32::from_be_bytes([src[4], src[5], src[6], src[7]]);
    Ok((size, &src[CODEC_HEADER_SIZE..]))
}

/// Reads a big-endian `u32` at `*ip` and advances.
pub(crate) fn read_be32(src: &[u8], ip: &mut usize) -> Result<u32, DecodeError> {
    let bytes = src.get(*ip..*ip + 4).ok_or(DecodeError::InputOverrun)?;
    *ip += 4;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// The first four bytes of `region`, zero-padded when it is shorter.
pub(crate) fn leading_tag(region: &[u8]) -> [u8; 4] {
    let mut tag = [0u8; 4];
    let n = region.len().min(4);
    tag[..n].copy_from_slice(&region[..n]);
    tag
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Decompresses `src` into `dst`, choosing the codec from `codec_override` or,
/// when none is given, from the region's leading tag.
///
/// An override is trusted as-is: the header is not checked against it. With no
/// override, an unrecognised tag is [`Error::UnknownCodec`].
pub fn decompress(
    src: &[u8],
    dst: &mut [u8],
    codec_override: Option<Codec>,
    scratch: &mut Scratch,
) -> Result<usize, Error> {
    let codec = match codec_override {
        Some(codec) => codec,
        None => Codec::from_header(src).ok_or_else(|| Error::UnknownCodec {
            tag: leading_tag(src),
        })?,
    };
    codec
        .decode(src, dst, scratch)
        .map_err(|kind| Error::CorruptBlock { codec, kind })
}

/// Decodes one region with an explicit codec and a fresh scratch buffer.
pub fn decode_block(codec: Codec, src: &[u8], dst: &mut [u8]) -> Result<usize, Error> {
    let mut scratch = Scratch::new();
    codec
        .decode(src, dst, &mut scratch)
        .map_err(|kind| Error::CorruptBlock { codec, kind })
}
