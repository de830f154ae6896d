//! Whole-ROM decompression.
//!
//! Locates dmadata, sizes and allocates the output image, moves every live
//! file to its virtual address (decoding compressed ones on the way), patches
//! the table to describe the new layout and finally recomputes the header
//! checksum.

use crate::codec::{self, Codec, Scratch};
use crate::displaylevel;
use crate::error::Error;

use super::checksum::{Checksum, N64Checksum};
use super::dma::{DmaEntry, DmaTable, EntryKind};

/// Decompresses every file of `rom` and returns the new image.
///
/// `codec_override` applies to every compressed entry; `None` sniffs each
/// entry's tag. The header checksum is recomputed with [`N64Checksum`].
pub fn decode_rom(rom: &[u8], codec_override: Option<Codec>) -> Result<Vec<u8>, Error> {
    decode_rom_with(rom, codec_override, &mut N64Checksum)
}

/// Same as [`decode_rom`] with a caller-supplied checksum engine.
///
/// `checksum` is invoked exactly once, on the finished image, and only when
/// every entry decoded successfully.
pub fn decode_rom_with<C: Checksum + ?Sized>(
    rom: &[u8],
    codec_override: Option<Codec>,
    checksum: &mut C,
) -> Result<Vec<u8>, Error> {
    let mut table = DmaTable::find(rom).ok_or(Error::TableNotFound)?;
    displaylevel!(
        3,
        "dmadata found at {:08X} ({} entries)\n",
        table.offset,
        table.entries.len()
    );

    let size = decompressed_size(rom.len(), &table.entries);
    displaylevel!(3, "decompressed image size: {} bytes\n", size);

    let mut out = vec![0u8; size];
    let mut scratch = Scratch::new();

    for (index, entry) in table.entries.iter_mut().enumerate() {
        let kind = entry.kind();
        match kind {
            EntryKind::Deleted | EntryKind::Invalid => {
                displaylevel!(4, "entry {:4}: skipped ({:?})\n", index, kind);
                continue;
            }
            EntryKind::Uncompressed => transfer(rom, &mut out, index, entry)?,
            EntryKind::Compressed => {
                let produced = inflate(rom, &mut out, index, entry, codec_override, &mut scratch)?;
                displaylevel!(
                    4,
                    "entry {:4}: {:08X}-{:08X} <- {:08X}-{:08X} ({} bytes)\n",
                    index,
                    entry.virtual_start,
                    entry.virtual_end,
                    entry.physical_start,
                    entry.physical_end,
                    produced
                );
                if produced != entry.virtual_len() {
                    displaylevel!(
                        3,
                        "entry {:4}: decoded {} bytes, table declares {}\n",
                        index,
                        produced,
                        entry.virtual_len()
                    );
                }
            }
        }
        entry.mark_decompressed();
    }

    table.write_into(&mut out)?;
    checksum.recompute(&mut out);
    Ok(out)
}

/// Size of the decompressed image.
///
/// Starts at `rom_len` and doubles once for every live entry whose virtual end
/// lies past the running size. Each entry is checked a single time.
pub fn decompressed_size(rom_len: usize, entries: &[DmaEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.is_live())
        .fold(rom_len, |size, e| {
            if e.virtual_end as usize > size {
                size.saturating_mul(2)
            } else {
                size
            }
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-entry work
// ─────────────────────────────────────────────────────────────────────────────

fn out_of_bounds(index: usize, start: u32, end: u32) -> Error {
    Error::EntryOutOfBounds { index, start, end }
}

/// Copies an uncompressed file from its physical to its virtual address.
fn transfer(rom: &[u8], out: &mut [u8], index: usize, entry: &DmaEntry) -> Result<(), Error> {
    let len = entry.virtual_len();
    let src_start = entry.physical_start as usize;
    let src = src_start
        .checked_add(len)
        .and_then(|end| rom.get(src_start..end))
        .ok_or_else(|| {
            out_of_bounds(index, entry.physical_start, entry.physical_start.saturating_add(len as u32))
        })?;
    let dst = out
        .get_mut(entry.virtual_start as usize..entry.virtual_end as usize)
        .ok_or_else(|| out_of_bounds(index, entry.virtual_start, entry.virtual_end))?;
    dst.copy_from_slice(src);
    Ok(())
}

/// Decodes a compressed file into the image at its virtual address.
fn inflate(
    rom: &[u8],
    out: &mut [u8],
    index: usize,
    entry: &DmaEntry,
    codec_override: Option<Codec>,
    scratch: &mut Scratch,
) -> Result<usize, Error> {
    let src = rom
        .get(entry.physical_start as usize..entry.physical_end as usize)
        .ok_or_else(|| out_of_bounds(index, entry.physical_start, entry.physical_end))?;
    let dst = out
        .get_mut(entry.virtual_start as usize..)
        .ok_or_else(|| out_of_bounds(index, entry.virtual_start, entry.virtual_end))?;
    codec::decompress(src, dst, codec_override, scratch)
}
