//! E2E: error handling and edge cases.
//!
//! Malformed input of every kind must come back as an `Error`, never a panic,
//! and never as a partially decoded image.

#[path = "../tests/rom/fixture.rs"]
mod fixture;

use z64dec::{decode_block, decode_file, decode_rom, Codec, DecodeError, Error};

#[test]
fn empty_inputs() {
    assert!(matches!(decode_rom(&[], None), Err(Error::TableNotFound)));
    assert!(matches!(decode_file(&[], None), Err(Error::UnknownCodec { tag: [0, 0, 0, 0] })));
    for codec in Codec::ALL {
        let mut dst = [0u8; 16];
        assert!(decode_block(codec, &[], &mut dst).is_err());
    }
}

#[test]
fn truncated_rom() {
    let rom = fixture::build_rom();
    // Cut inside the compressed asset: the table is still found, the entry's
    // physical range is not.
    let cut = &rom[..fixture::ASSET_SOURCE + 10];
    assert!(matches!(
        decode_rom(cut, None),
        Err(Error::EntryOutOfBounds { index: 3, .. })
    ));
}

#[test]
fn every_byte_flip_of_the_asset_is_handled() {
    let rom = fixture::build_rom();
    let len = fixture::asset_lz4h().len();
    for i in 0..len {
        for flip in [0x01u8, 0x80, 0xFF] {
            let mut bad = rom.clone();
            bad[fixture::ASSET_SOURCE + i] ^= flip;
            // Either result is acceptable; reaching this line means no panic.
            let _ = decode_rom(&bad, None);
        }
    }
}

#[test]
fn garbage_through_every_codec() {
    let mut state = 0x1234_5678u32;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    for round in 0..200 {
        let len = 16 + (next() % 256) as usize;
        let mut src: Vec<u8> = (0..len).map(|_| next() as u8).collect();
        src[4..8].copy_from_slice(&((next() % 4096) as u32).to_be_bytes());
        for codec in Codec::ALL {
            let mut dst = vec![0u8; 4096];
            if let Ok(n) = decode_block(codec, &src, &mut dst) {
                assert!(n <= dst.len(), "round {round}: {codec} reported {n}");
            }
        }
    }
}

#[test]
fn error_messages_are_single_line() {
    let errors = [
        Error::UnknownCodec { tag: *b"ABCD" },
        Error::TableNotFound,
        Error::CorruptBlock { codec: Codec::Ucl, kind: DecodeError::Malformed },
        Error::EntryOutOfBounds { index: 7, start: 0x1000, end: 0x2000 },
    ];
    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty());
        assert!(!msg.contains('\n'), "{msg}");
    }
    assert_eq!(
        Error::EntryOutOfBounds { index: 7, start: 0x1000, end: 0x2000 }.to_string(),
        "dmadata entry 7 range 00001000-00002000 lies outside the image"
    );
}
