//! E2E: whole-ROM decoding through the library entry points, from bytes on
//! disk to bytes on disk.

#[path = "../tests/rom/fixture.rs"]
mod fixture;

use std::fs;

use tempfile::TempDir;
use z64dec::io::{load_file, output_filename, write_file};
use z64dec::rom::DmaTable;
use z64dec::{decode_rom, Codec};

#[test]
fn load_decode_store() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("zelda.z64");
    fs::write(&input, fixture::build_rom()).unwrap();

    let rom = load_file(&input).unwrap();
    let out = decode_rom(&rom, None).unwrap();
    let output = output_filename(&input);
    write_file(&output, &out).unwrap();

    assert_eq!(output, dir.path().join("zelda.decompressed.z64"));
    let written = fs::read(&output).unwrap();
    assert_eq!(written.len(), fixture::ROM_SIZE);
    assert_eq!(
        &written[fixture::ASSET_START..fixture::ASSET_START + 64],
        &fixture::asset()[..]
    );
}

#[test]
fn decoded_table_is_fully_uncompressed() {
    let out = decode_rom(&fixture::build_rom(), Some(Codec::Lz4hc)).unwrap();
    let table = DmaTable::find(&out).unwrap();
    for entry in table.entries.iter().filter(|e| e.is_live()) {
        assert_eq!(entry.physical_start, entry.virtual_start);
        assert_eq!(entry.physical_end, 0);
    }
}

#[test]
fn decoding_is_deterministic() {
    let rom = fixture::build_rom();
    assert_eq!(decode_rom(&rom, None).unwrap(), decode_rom(&rom, None).unwrap());
}
