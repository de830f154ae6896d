// z64dec - decompression of N64 Zelda ROM images and their compressed assets

pub mod block;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod io;
pub mod rom;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use codec::{decode_block, Codec, DecodeError, Scratch};
pub use error::Error;
pub use file::decode_file;
pub use rom::{decode_rom, decode_rom_with, Checksum, N64Checksum};
