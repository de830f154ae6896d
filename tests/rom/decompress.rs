// Whole-ROM decoding.

use z64dec::rom::{decode_rom_with, decompressed_size, Checksum, DmaTable};
use z64dec::{decode_rom, Codec, DecodeError, Error};

use crate::fixture::{self, build_rom, put_entry, read_entry, ASSET_SOURCE, ASSET_START, BOOT_START, ROM_SIZE, TABLE_OFFSET};

/// Records how often it runs and marks the image so the call is observable.
#[derive(Default)]
struct CountingChecksum {
    calls: usize,
}

impl Checksum for CountingChecksum {
    fn recompute(&mut self, rom: &mut [u8]) {
        self.calls += 1;
        rom[0x10..0x18].copy_from_slice(b"CHECKSUM");
    }
}

#[test]
fn end_to_end() {
    let rom = build_rom();
    let mut checksum = CountingChecksum::default();
    let out = decode_rom_with(&rom, None, &mut checksum).unwrap();

    assert_eq!(checksum.calls, 1);
    assert_eq!(out.len(), ROM_SIZE);
    assert_eq!(&out[0x10..0x18], b"CHECKSUM");

    // Files at their virtual addresses.
    assert_eq!(&out[0x18..BOOT_START], &rom[0x18..BOOT_START]);
    assert_eq!(&out[BOOT_START..BOOT_START + 32], &fixture::boot()[..]);
    assert_eq!(&out[ASSET_START..ASSET_START + 64], &fixture::asset()[..]);

    // Nothing else was carried over.
    assert!(out[ASSET_START + 64..].iter().all(|&b| b == 0));
    assert!(out[TABLE_OFFSET + 0x60..ASSET_START].iter().all(|&b| b == 0));

    // Table rewritten in place.
    assert_eq!(read_entry(&out, 0), [0x0000, 0x1060, 0x0000, 0]);
    assert_eq!(read_entry(&out, 1), [0x1060, 0x1080, 0x1060, 0]);
    assert_eq!(read_entry(&out, 2), [0x1080, 0x10E0, 0x1080, 0]);
    assert_eq!(read_entry(&out, 3), [0x1100, 0x1140, 0x1100, 0]);
    assert_eq!(read_entry(&out, 4), [0xFFFF_FFFF; 4]);
    assert_eq!(read_entry(&out, 5), [0; 4]);
}

#[test]
fn output_is_a_valid_rom() {
    let out = decode_rom_with(&build_rom(), None, &mut CountingChecksum::default()).unwrap();
    let table = DmaTable::find(&out).unwrap();
    assert!(table
        .entries
        .iter()
        .filter(|e| e.is_live())
        .all(|e| e.physical_end == 0 && e.physical_start == e.virtual_start));
    assert_eq!(table.entries[4].physical_end, 0xFFFF_FFFF);

    // Decoding the decoded image again changes nothing but the checksum.
    let again = decode_rom_with(&out, None, &mut CountingChecksum::default()).unwrap();
    assert_eq!(again, out);
}

#[test]
fn codec_override_applies_to_every_entry() {
    let rom = build_rom();
    let out = decode_rom_with(&rom, Some(Codec::Lz4hc), &mut CountingChecksum::default()).unwrap();
    assert_eq!(&out[ASSET_START..ASSET_START + 64], &fixture::asset()[..]);

    let err = decode_rom_with(&rom, Some(Codec::Yaz0), &mut CountingChecksum::default()).unwrap_err();
    assert!(matches!(err, Error::CorruptBlock { codec: Codec::Yaz0, .. }));
}

#[test]
fn missing_table() {
    let mut rom = build_rom();
    put_entry(&mut rom, 2, [0x1090, 0x10E0, 0x1090, 0]);
    let mut checksum = CountingChecksum::default();
    let err = decode_rom_with(&rom, None, &mut checksum).unwrap_err();
    assert!(matches!(err, Error::TableNotFound));
    assert_eq!(err.to_string(), "failed to locate dmadata in rom");
    assert_eq!(checksum.calls, 0);
}

#[test]
fn unknown_codec_aborts() {
    let mut rom = build_rom();
    rom[ASSET_SOURCE..ASSET_SOURCE + 4].copy_from_slice(b"ZZZZ");
    let mut checksum = CountingChecksum::default();
    let err = decode_rom_with(&rom, None, &mut checksum).unwrap_err();
    assert!(matches!(err, Error::UnknownCodec { tag } if &tag == b"ZZZZ"));
    assert_eq!(checksum.calls, 0);
}

#[test]
fn corrupt_entry_aborts() {
    let mut rom = build_rom();
    // Point the match at 5 bytes back with only 4 produced.
    rom[ASSET_SOURCE + 12 + 5] = 0x05;
    let mut checksum = CountingChecksum::default();
    let err = decode_rom_with(&rom, None, &mut checksum).unwrap_err();
    assert!(matches!(
        err,
        Error::CorruptBlock { codec: Codec::Lz4hc, kind: DecodeError::OffsetOutOfRange }
    ));
    assert_eq!(checksum.calls, 0);
}

#[test]
fn source_range_outside_image() {
    let mut rom = build_rom();
    put_entry(&mut rom, 3, [0x1100, 0x1140, 0x1FF0, 0x2010]);
    let err = decode_rom_with(&rom, None, &mut CountingChecksum::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::EntryOutOfBounds { index: 3, start: 0x1FF0, end: 0x2010 }
    ));
}

#[test]
fn uncompressed_source_outside_image() {
    let mut rom = build_rom();
    put_entry(&mut rom, 1, [0x1060, 0x1080, 0x1FF0, 0]);
    let err = decode_rom_with(&rom, None, &mut CountingChecksum::default()).unwrap_err();
    assert!(matches!(err, Error::EntryOutOfBounds { index: 1, .. }));
}

#[test]
fn image_grows_for_late_virtual_end() {
    let mut rom = build_rom();
    // Uncompressed 32 bytes placed at virtual 0x2800, beyond the source size.
    put_entry(&mut rom, 5, [0x2800, 0x2820, BOOT_START as u32, 0]);
    let out = decode_rom_with(&rom, None, &mut CountingChecksum::default()).unwrap();
    assert_eq!(out.len(), 2 * ROM_SIZE);
    assert_eq!(&out[0x2800..0x2820], &fixture::boot()[..]);
    assert_eq!(read_entry(&out, 5), [0x2800, 0x2820, 0x2800, 0]);
}

#[test]
fn single_doubling_can_fall_short() {
    let mut rom = build_rom();
    put_entry(&mut rom, 5, [0x5000, 0x5020, BOOT_START as u32, 0]);
    let table = DmaTable::find(&rom).unwrap();
    assert_eq!(decompressed_size(rom.len(), &table.entries), 2 * ROM_SIZE);

    let err = decode_rom_with(&rom, None, &mut CountingChecksum::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::EntryOutOfBounds { index: 5, start: 0x5000, end: 0x5020 }
    ));
}

#[test]
fn default_checksum_engine_tolerates_unknown_cic() {
    let rom = build_rom();
    let out = decode_rom(&rom, None).unwrap();
    assert_eq!(&out[..0x40], &rom[..0x40]);
}
