// e2e/cli_integration.rs - CLI integration tests
//
// Drives the `z64decompress` binary as a black box with std::process::Command:
// argument handling, ROM and individual-file modes, output naming and exit
// codes.

#[path = "../tests/rom/fixture.rs"]
mod fixture;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_z64decompress"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run z64decompress")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn rom_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rom.z64"), fixture::build_rom()).unwrap();
    dir
}

// ── ROM mode ─────────────────────────────────────────────────────────────────

#[test]
fn rom_with_derived_output_name() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let written = fs::read(dir.path().join("rom.decompressed.z64")).unwrap();
    assert_eq!(
        &written[fixture::ASSET_START..fixture::ASSET_START + 64],
        &fixture::asset()[..]
    );

    let log = stderr(&out);
    assert!(log.contains("welcome to z64decompress"));
    assert!(log.contains("decompressed rom 'rom.decompressed.z64' written successfully"));
}

#[test]
fn rom_with_explicit_output_and_codec() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64", "out.z64", "--codec", "lz4hc"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("out.z64")).unwrap().len(), fixture::ROM_SIZE);
}

#[test]
fn dma_ext_is_accepted_for_roms() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64", "out.z64", "-d"]);
    assert!(out.status.success(), "{}", stderr(&out));
}

#[test]
fn quiet_suppresses_progress() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64", "out.z64", "-qq"]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "{}", stderr(&out));
}

#[test]
fn size_mismatch_is_reported_when_verbose() {
    let dir = TempDir::new().unwrap();
    let mut rom = fixture::build_rom();
    let lz4h_len = fixture::asset_lz4h().len() as u32;
    let source = fixture::ASSET_SOURCE as u32;
    // The asset stream still yields 64 bytes, but the table only reserves 32.
    fixture::put_entry(&mut rom, 3, [0x1100, 0x1120, source, source + lz4h_len]);
    fs::write(dir.path().join("rom.z64"), rom).unwrap();

    let out = run(dir.path(), &["rom.z64", "out.z64", "-v"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stderr(&out).contains("entry    3: decoded 64 bytes, table declares 32"));

    let written = fs::read(dir.path().join("out.z64")).unwrap();
    assert_eq!(
        &written[fixture::ASSET_START..fixture::ASSET_START + 64],
        &fixture::asset()[..]
    );
    assert_eq!(fixture::read_entry(&written, 3), [0x1100, 0x1120, 0x1100, 0]);
}

#[test]
fn size_mismatch_is_silent_by_default() {
    let dir = TempDir::new().unwrap();
    let mut rom = fixture::build_rom();
    let lz4h_len = fixture::asset_lz4h().len() as u32;
    let source = fixture::ASSET_SOURCE as u32;
    fixture::put_entry(&mut rom, 3, [0x1100, 0x1120, source, source + lz4h_len]);
    fs::write(dir.path().join("rom.z64"), rom).unwrap();

    let out = run(dir.path(), &["rom.z64", "out.z64"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(!stderr(&out).contains("table declares"));
}

// ── Individual mode ──────────────────────────────────────────────────────────

#[test]
fn individual_file() {
    let dir = TempDir::new().unwrap();
    let mut region = b"Yaz0".to_vec();
    region.extend_from_slice(&4u32.to_be_bytes());
    region.extend_from_slice(&[0u8; 8]);
    region.extend_from_slice(&[0xF0, b'f', b'i', b'l', b'e']);
    fs::write(dir.path().join("asset.yaz"), &region).unwrap();

    let out = run(dir.path(), &["asset.yaz", "asset.bin", "-c", "yaz", "-i"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("asset.bin")).unwrap(), b"file");
}

// ── Failures ─────────────────────────────────────────────────────────────────

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["absent.z64"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("absent.z64"));
    assert!(!dir.path().join("absent.decompressed.z64").exists());
}

#[test]
fn rom_without_table_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("junk.z64"), vec![0x5Au8; 0x4000]).unwrap();
    let out = run(dir.path(), &["junk.z64"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("failed to locate dmadata in rom"));
    assert!(!dir.path().join("junk.decompressed.z64").exists());
}

#[test]
fn unknown_codec_name_is_usage_error() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64", "out.z64", "-c", "zip"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("invalid codec name: zip"));
    assert!(!dir.path().join("out.z64").exists());
}

#[test]
fn dma_ext_with_individual_is_rejected() {
    let dir = rom_dir();
    let out = run(dir.path(), &["rom.z64", "out.bin", "-i", "-d"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("dma-ext can not be used with individual files"));
    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn no_arguments_prints_usage() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Usage"));
}
