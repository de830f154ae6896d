//! Whole-ROM support: the dmadata table, the decode driver and the header
//! checksum.
//!
//! | Submodule      | Responsibility |
//! |----------------|----------------|
//! | [`dma`]        | `DmaEntry` / `DmaTable`: locating, classifying and rewriting dmadata. |
//! | [`decompress`] | `decode_rom`: sizing the output image and moving every file into it. |
//! | [`checksum`]   | The `Checksum` seam and the N64 CIC checksum engine. |

pub mod checksum;
pub mod decompress;
pub mod dma;

pub use checksum::{Checksum, N64Checksum};
pub use decompress::{decode_rom, decode_rom_with, decompressed_size};
pub use dma::{DmaEntry, DmaTable, EntryKind};
