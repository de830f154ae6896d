// LZ4H block-stream container.

use z64dec::codec::{lz4hc, Scratch};
use z64dec::DecodeError;

fn container(size_field: u32, blocks: &[&[u8]]) -> Vec<u8> {
    let mut out = b"LZ4H".to_vec();
    out.extend_from_slice(&size_field.to_be_bytes());
    for block in blocks {
        out.extend_from_slice(&(block.len() as u32).to_be_bytes());
        out.extend_from_slice(block);
    }
    out
}

const HELLO: &[u8] = &[0x50, b'H', b'e', b'l', b'l', b'o'];
const WORLD: &[u8] = &[0x50, b'W', b'o', b'r', b'l', b'd'];

#[test]
fn single_block() {
    // "ABCD", match offset 4 length 55, then literals "DABCD": 64 bytes.
    let block = [0x4F, b'A', b'B', b'C', b'D', 0x04, 0x00, 36, 0x50, b'D', b'A', b'B', b'C', b'D'];
    let region = container(64, &[&block]);
    let mut dst = vec![0u8; 64];
    assert_eq!(lz4hc::decode(&region, &mut dst, &mut Scratch::new()), Ok(64));
    assert_eq!(dst, b"ABCD".repeat(16));
}

#[test]
fn blocks_are_concatenated() {
    let region = container(10, &[HELLO, WORLD]);
    let mut dst = [0u8; 16];
    assert_eq!(lz4hc::decode(&region, &mut dst, &mut Scratch::new()), Ok(10));
    assert_eq!(&dst[..10], b"HelloWorld");
}

#[test]
fn reserved_size_byte_is_masked() {
    let region = container(0xAB00_000A, &[HELLO, WORLD]);
    let mut dst = [0u8; 10];
    assert_eq!(lz4hc::decode(&region, &mut dst, &mut Scratch::new()), Ok(10));
}

#[test]
fn scratch_is_reused_across_regions() {
    let mut scratch = Scratch::new();
    let mut dst = [0u8; 16];
    lz4hc::decode(&container(5, &[HELLO]), &mut dst, &mut scratch).unwrap();
    lz4hc::decode(&container(5, &[WORLD]), &mut dst, &mut scratch).unwrap();
    assert_eq!(&dst[..5], b"World");
}

#[test]
fn declared_size_exceeds_output() {
    let region = container(32, &[HELLO]);
    let mut dst = [0u8; 16];
    assert_eq!(
        lz4hc::decode(&region, &mut dst, &mut Scratch::new()),
        Err(DecodeError::OutputOverrun)
    );
}

#[test]
fn missing_block() {
    let region = container(10, &[HELLO]);
    let mut dst = [0u8; 16];
    assert_eq!(
        lz4hc::decode(&region, &mut dst, &mut Scratch::new()),
        Err(DecodeError::InputOverrun)
    );
}

#[test]
fn block_shorter_than_its_size_field() {
    let mut region = container(5, &[HELLO]);
    region.truncate(region.len() - 2);
    let mut dst = [0u8; 16];
    assert_eq!(
        lz4hc::decode(&region, &mut dst, &mut Scratch::new()),
        Err(DecodeError::InputOverrun)
    );
}

#[test]
fn empty_block_is_malformed() {
    let region = container(5, &[&[0x00]]);
    let mut dst = [0u8; 16];
    assert_eq!(
        lz4hc::decode(&region, &mut dst, &mut Scratch::new()),
        Err(DecodeError::Malformed)
    );
}

#[test]
fn oversized_block_field_is_malformed() {
    let mut region = b"LZ4H".to_vec();
    region.extend_from_slice(&16u32.to_be_bytes());
    region.extend_from_slice(&u32::MAX.to_be_bytes());
    let mut dst = [0u8; 16];
    assert_eq!(
        lz4hc::decode(&region, &mut dst, &mut Scratch::new()),
        Err(DecodeError::Malformed)
    );
}
