//! LZ4 block decompression.
//!
//! The block engine underneath the `LZ4H` block-stream container. Exposed on
//! its own so single blocks can be decoded and tested directly.

pub mod decompress_core;
pub mod types;

pub use decompress_core::{decode_block, decode_block_with_dict};
pub use types::MINMATCH;
