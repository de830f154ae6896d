// config.rs - Compile-time configuration constants.
//
// Buffer capacities, on-ROM layout strides and codec header sizes shared by the
// codec, ROM and individual-file layers. There is no runtime configuration
// file; the only runtime knobs are the command-line flags in `cli::args`.

pub const MB: usize = 1 << 20;

// Largest single block the LZ4 block-stream container is expected to carry.
// Block-size fields above `compress_bound(BLOCK_CAP)` are rejected.
pub const BLOCK_CAP: usize = 64 * MB;

// Output capacity for individual-file mode. Nothing in a standalone asset
// declares its decompressed size up front, so a generous fixed buffer is used.
pub const FILE_CAPACITY: usize = 8 * MB;

// Bytes per dmadata entry.
pub const DMA_STRIDE: usize = 16;

// dmadata describes itself at this entry index.
pub const DMA_SELF_INDEX: usize = 2;

// Any entry field holding this value marks the entry as deleted.
pub const DMA_DELETED: u32 = 0xFFFF_FFFF;

// Scanning stops this many bytes before the end of the image.
pub const DMA_SCAN_TAIL: usize = 32;

// Tag, big-endian decompressed size and eight reserved bytes.
pub const CODEC_HEADER_SIZE: usize = 16;

// Tag and big-endian decompressed size (low 24 bits) of the LZ4 block stream.
pub const LZ4H_HEADER_SIZE: usize = 8;

/// Maximum compressed size of a `size`-byte block (LZ4 compression bound).
#[inline]
pub const fn compress_bound(size: usize) -> usize {
    size + size / 255 + 16
}
