//! N64 header checksum.
//!
//! The boot code verifies two 32-bit words at `0x10` and `0x14` computed over
//! the first megabyte after the boot code. The seed and final mix depend on
//! the CIC chip the cartridge ships with, which is identified by the CRC-32 of
//! the boot code itself.

use crate::displaylevel;

/// Recomputes the integrity checksum of a finished image in place.
pub trait Checksum {
    fn recompute(&mut self, rom: &mut [u8]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

const HEADER_SIZE: usize = 0x40;
const BOOTCODE_END: usize = 0x1000;
const CRC1_OFFSET: usize = 0x10;
const CRC2_OFFSET: usize = 0x14;
const CHECKSUM_START: usize = 0x1000;
const CHECKSUM_LENGTH: usize = 0x10_0000;

/// Smallest image the checksum can be computed over.
pub const MIN_IMAGE_SIZE: usize = CHECKSUM_START + CHECKSUM_LENGTH;

// ─────────────────────────────────────────────────────────────────────────────
// CIC identification
// ─────────────────────────────────────────────────────────────────────────────

/// Boot chip variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cic {
    Cic6101,
    Cic6102,
    Cic6103,
    Cic6105,
    Cic6106,
}

impl Cic {
    /// Identifies the CIC from the CRC-32 of the boot code (`0x40..0x1000`).
    pub fn detect(rom: &[u8]) -> Option<Cic> {
        let bootcode = rom.get(HEADER_SIZE..BOOTCODE_END)?;
        match crc32(bootcode) {
            0x6170_A4A1 => Some(Cic::Cic6101),
            0x90BB_6CB5 => Some(Cic::Cic6102),
            0x0B05_0EE0 => Some(Cic::Cic6103),
            0x98BC_2C86 => Some(Cic::Cic6105),
            0xACC8_580A => Some(Cic::Cic6106),
            _ => None,
        }
    }

    fn seed(self) -> u32 {
        match self {
            Cic::Cic6101 | Cic::Cic6102 => 0xF8CA_4DDC,
            Cic::Cic6103 => 0xA388_6759,
            Cic::Cic6105 => 0xDF26_F436,
            Cic::Cic6106 => 0x1FEA_617A,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksum
// ─────────────────────────────────────────────────────────────────────────────

/// Computes the two header checksum words for `rom` with the given CIC.
///
/// Returns `None` when the image is shorter than [`MIN_IMAGE_SIZE`].
pub fn calculate(rom: &[u8], cic: Cic) -> Option<[u32; 2]> {
    if rom.len() < MIN_IMAGE_SIZE {
        return None;
    }

    let seed = cic.seed();
    let (mut t1, mut t2, mut t3, mut t4, mut t5, mut t6) = (seed, seed, seed, seed, seed, seed);

    for i in (CHECKSUM_START..CHECKSUM_START + CHECKSUM_LENGTH).step_by(4) {
        let d = be32(rom, i);
        if t6.wrapping_add(d) < t6 {
            t4 = t4.wrapping_add(1);
        }
        t6 = t6.wrapping_add(d);
        t3 ^= d;
        let r = d.rotate_left(d & 0x1F);
        t5 = t5.wrapping_add(r);
        if t2 > d {
            t2 ^= r;
        } else {
            t2 ^= t6 ^ d;
        }

        if cic == Cic::Cic6105 {
            t1 = t1.wrapping_add(be32(rom, HEADER_SIZE + 0x0710 + (i & 0xFF)) ^ d);
        } else {
            t1 = t1.wrapping_add(t5 ^ d);
        }
    }

    Some(match cic {
        Cic::Cic6103 => [(t6 ^ t4).wrapping_add(t3), (t5 ^ t2).wrapping_add(t1)],
        Cic::Cic6106 => [
            t6.wrapping_mul(t4).wrapping_add(t3),
            t5.wrapping_mul(t2).wrapping_add(t1),
        ],
        _ => [t6 ^ t4 ^ t3, t5 ^ t2 ^ t1],
    })
}

/// The checksum engine used for whole-ROM decoding.
///
/// Images with an unrecognised boot chip, or too short to checksum, are left
/// untouched with a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct N64Checksum;

impl Checksum for N64Checksum {
    fn recompute(&mut self, rom: &mut [u8]) {
        let Some(cic) = Cic::detect(rom) else {
            displaylevel!(2, "warning: unknown CIC, checksum not updated\n");
            return;
        };
        let Some([crc1, crc2]) = calculate(rom, cic) else {
            displaylevel!(2, "warning: image too small for checksum, not updated\n");
            return;
        };
        rom[CRC1_OFFSET..CRC1_OFFSET + 4].copy_from_slice(&crc1.to_be_bytes());
        rom[CRC2_OFFSET..CRC2_OFFSET + 4].copy_from_slice(&crc2.to_be_bytes());
        displaylevel!(3, "{:?} checksum: {:08X} {:08X}\n", cic, crc1, crc2);
    }
}

#[inline]
fn be32(b: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 lookup table (reflected polynomial 0xEDB88320).
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0u32;
    while i < 256 {
        let mut crc = i;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i as usize] = crc;
        i += 1;
    }
    table
};

/// CRC-32 of `data`, as used for boot code identification.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc = (crc >> 8) ^ CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize];
    }
    crc ^ 0xFFFF_FFFF
}
