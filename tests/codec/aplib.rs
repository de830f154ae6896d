// aPLib samples. aPLib gamma codes end on a `0` flag bit, and the first byte
// of a stream is always a plain literal.

use z64dec::codec::aplib;
use z64dec::DecodeError;

use crate::bits::{framed, TagWriter};

/// Short match with offset 0.
fn end_of_stream(w: &mut TagWriter) -> &mut TagWriter {
    w.bits(&[1, 1, 0]).byte(0x00)
}

fn region(w: &mut TagWriter, size: u32) -> Vec<u8> {
    framed(b"APL0", size, &end_of_stream(w).finish())
}

#[test]
fn literals_then_end() {
    let mut w = TagWriter::new();
    w.byte(b'a');
    for &b in b"PLib" {
        w.bit(0).byte(b);
    }
    let mut dst = [0u8; 8];
    let n = aplib::decode(&region(&mut w, 5), &mut dst).unwrap();
    assert_eq!(&dst[..n], b"aPLib");
}

#[test]
fn long_match_then_repeat_offset() {
    // "AB"; long match offset 2 (prefix 3, low 2) length gamma 4 + 2;
    // 'C'; repeat of offset 2 (prefix 2) with length gamma 2.
    let mut w = TagWriter::new();
    w.byte(b'A').bit(0).byte(b'B');
    w.bits(&[1, 0]).gamma(3, 0).byte(0x02).gamma(4, 0);
    w.bit(0).byte(b'C');
    w.bits(&[1, 0]).gamma(2, 0).gamma(2, 0);
    let mut dst = [0u8; 16];
    let n = aplib::decode(&region(&mut w, 11), &mut dst).unwrap();
    assert_eq!(&dst[..n], b"ABABABABCBC");
}

#[test]
fn short_match() {
    // "xyz", then offset 3 length 3 (byte 3 << 1 | 1).
    let mut w = TagWriter::new();
    w.byte(b'x').bit(0).byte(b'y').bit(0).byte(b'z');
    w.bits(&[1, 1, 0]).byte(0x07);
    let mut dst = [0u8; 8];
    let n = aplib::decode(&region(&mut w, 6), &mut dst).unwrap();
    assert_eq!(&dst[..n], b"xyzxyz");
}

#[test]
fn single_byte_and_zero_byte() {
    let mut w = TagWriter::new();
    w.byte(b'A').bit(0).byte(b'B');
    w.bits(&[1, 1, 1]).bits(&[0, 0, 1, 0]);
    w.bits(&[1, 1, 1]).bits(&[0, 0, 0, 0]);
    let mut dst = [0xFFu8; 8];
    let n = aplib::decode(&region(&mut w, 4), &mut dst).unwrap();
    assert_eq!(&dst[..n], b"ABA\0");
}

#[test]
fn repeat_without_previous_offset() {
    let mut w = TagWriter::new();
    w.byte(b'A').bits(&[1, 0]).gamma(2, 0).gamma(2, 0);
    let mut dst = [0u8; 8];
    assert_eq!(
        aplib::decode(&region(&mut w, 3), &mut dst),
        Err(DecodeError::OffsetOutOfRange)
    );
}

#[test]
fn empty_payload() {
    let mut dst = [0u8; 8];
    assert_eq!(
        aplib::decode(&framed(b"APL0", 0, &[]), &mut dst),
        Err(DecodeError::InputOverrun)
    );
}
