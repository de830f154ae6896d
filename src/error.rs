//! Error type shared by the ROM, individual-file and codec entry points.

use std::fmt;
use std::io;

use crate::codec::{Codec, DecodeError};

/// Reasons a decode operation fails. None of them is recoverable: the caller
/// gets no partial output.
#[derive(Debug)]
pub enum Error {
    /// No override was given and the region's tag matches no known codec.
    UnknownCodec { tag: [u8; 4] },
    /// The image contains no structurally valid dmadata table.
    TableNotFound,
    /// A codec rejected its input.
    CorruptBlock { codec: Codec, kind: DecodeError },
    /// A dmadata entry points outside the source or destination image.
    EntryOutOfBounds { index: usize, start: u32, end: u32 },
    /// Loading or writing a file failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCodec { tag } => {
                write!(f, "compressed file, unknown encoding (header {:02X?})", tag)
            }
            Error::TableNotFound => f.write_str("failed to locate dmadata in rom"),
            Error::CorruptBlock { codec, kind } => {
                write!(f, "corrupt {} data: {}", codec, kind)
            }
            Error::EntryOutOfBounds { index, start, end } => write!(
                f,
                "dmadata entry {} range {:08X}-{:08X} lies outside the image",
                index, start, end
            ),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CorruptBlock { kind, .. } => Some(kind),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
