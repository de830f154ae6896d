//! dmadata: the ROM's file allocation table.
//!
//! Each 16-byte entry holds four big-endian words: the virtual (decompressed)
//! start and end of a file and the physical (on-cartridge) start and end of
//! its stored bytes. A physical end of zero means the file is stored
//! uncompressed.
//!
//! The table has no header. It is recognised by how it begins (the makerom
//! entry at virtual `0..0x1060` followed by the next file at `0x1060`) and by
//! its own entry, [`DMA_SELF_INDEX`], whose virtual start is the table's
//! offset in the image.

use crate::config::{DMA_DELETED, DMA_SCAN_TAIL, DMA_SELF_INDEX, DMA_STRIDE};
use crate::error::Error;

/// Virtual end of the makerom entry: retail builds, then iQue builds.
const MAKEROM_ENDS: [u32; 2] = [0x1060, 0x1050];

/// Length of the prefix matched at the start of a candidate table: the first
/// entry and the virtual start of the second.
const MAGIC_LEN: usize = 20;

// ─────────────────────────────────────────────────────────────────────────────
// Entries
// ─────────────────────────────────────────────────────────────────────────────

/// What an entry asks the decoder to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A field holds [`DMA_DELETED`].
    Deleted,
    /// Empty or inverted virtual range, or an empty compressed range.
    Invalid,
    /// Stored verbatim at `physical_start`.
    Uncompressed,
    /// Stored compressed in `physical_start..physical_end`.
    Compressed,
}

/// One dmadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaEntry {
    pub virtual_start: u32,
    pub virtual_end: u32,
    pub physical_start: u32,
    pub physical_end: u32,
}

impl DmaEntry {
    /// Parses an entry from the first [`DMA_STRIDE`] bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Option<DmaEntry> {
        let b = bytes.get(..DMA_STRIDE)?;
        Some(DmaEntry {
            virtual_start: be32(b, 0),
            virtual_end: be32(b, 4),
            physical_start: be32(b, 8),
            physical_end: be32(b, 12),
        })
    }

    /// Serialises the entry into `out[..16]`.
    pub fn write(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.virtual_start.to_be_bytes());
        out[4..8].copy_from_slice(&self.virtual_end.to_be_bytes());
        out[8..12].copy_from_slice(&self.physical_start.to_be_bytes());
        out[12..16].copy_from_slice(&self.physical_end.to_be_bytes());
    }

    pub fn kind(&self) -> EntryKind {
        let fields = [
            self.virtual_start,
            self.virtual_end,
            self.physical_start,
            self.physical_end,
        ];
        if fields.contains(&DMA_DELETED) {
            EntryKind::Deleted
        } else if self.virtual_end <= self.virtual_start
            || (self.physical_end != 0 && self.physical_end == self.physical_start)
        {
            EntryKind::Invalid
        } else if self.physical_end == 0 {
            EntryKind::Uncompressed
        } else {
            EntryKind::Compressed
        }
    }

    /// `true` for entries that describe a file to transfer.
    pub fn is_live(&self) -> bool {
        matches!(self.kind(), EntryKind::Uncompressed | EntryKind::Compressed)
    }

    /// Decompressed size of the file.
    pub fn virtual_len(&self) -> usize {
        self.virtual_end.saturating_sub(self.virtual_start) as usize
    }

    /// Rewrites the entry to describe an uncompressed file stored at its
    /// virtual address.
    pub fn mark_decompressed(&mut self) {
        self.physical_start = self.virtual_start;
        self.physical_end = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Table
// ─────────────────────────────────────────────────────────────────────────────

/// The dmadata table and where it lives in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmaTable {
    /// Byte offset of the first entry. The table is never compressed, so this
    /// is both its physical and its virtual address.
    pub offset: usize,
    pub entries: Vec<DmaEntry>,
}

impl DmaTable {
    /// Scans `rom` on 16-byte boundaries and returns the first table that
    /// passes both the prefix match and the self-reference check.
    pub fn find(rom: &[u8]) -> Option<DmaTable> {
        let limit = rom.len().checked_sub(DMA_SCAN_TAIL)?;
        (0..limit)
            .step_by(DMA_STRIDE)
            .find_map(|pos| Self::parse_at(rom, pos))
    }

    /// Validates and parses a candidate table at `pos`.
    ///
    /// Rejects candidates whose prefix does not match, whose self-referencing
    /// entry does not point at `pos`, or whose declared extent runs past the
    /// end of the image.
    pub fn parse_at(rom: &[u8], pos: usize) -> Option<DmaTable> {
        let prefix = rom.get(pos..pos + MAGIC_LEN)?;
        if !is_table_prefix(prefix) {
            return None;
        }

        let own = DmaEntry::parse(rom.get(pos + DMA_SELF_INDEX * DMA_STRIDE..)?)?;
        if own.virtual_start as usize != pos {
            return None;
        }

        let count = (own.virtual_end as usize).checked_sub(pos)? / DMA_STRIDE;
        let bytes = rom.get(pos..pos + count * DMA_STRIDE)?;
        let entries = bytes
            .chunks_exact(DMA_STRIDE)
            .filter_map(DmaEntry::parse)
            .collect();

        Some(DmaTable { offset: pos, entries })
    }

    /// Size of the table in bytes.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * DMA_STRIDE
    }

    /// Writes every entry back to the table's offset in `image`.
    pub fn write_into(&self, image: &mut [u8]) -> Result<(), Error> {
        let end = self.offset + self.byte_len();
        let region = image
            .get_mut(self.offset..end)
            .ok_or(Error::EntryOutOfBounds {
                index: DMA_SELF_INDEX,
                start: self.offset as u32,
                end: end as u32,
            })?;
        for (entry, out) in self.entries.iter().zip(region.chunks_exact_mut(DMA_STRIDE)) {
            entry.write(out);
        }
        Ok(())
    }
}

/// `00000000 XXXXXXXX 00000000 00000000 XXXXXXXX` with `XXXXXXXX` a known
/// makerom end.
fn is_table_prefix(prefix: &[u8]) -> bool {
    let makerom_end = be32(prefix, 4);
    be32(prefix, 0) == 0
        && be32(prefix, 8) == 0
        && be32(prefix, 12) == 0
        && be32(prefix, 16) == makerom_end
        && MAKEROM_ENDS.contains(&makerom_end)
}

#[inline]
fn be32(b: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}
