// Codec registry: name and tag lookup, dispatch and error mapping.

use z64dec::codec::{decompress, Codec, Scratch};
use z64dec::{decode_block, DecodeError, Error};

use crate::bits::framed;

#[test]
fn names_resolve_exactly() {
    assert_eq!(Codec::from_name("yaz"), Some(Codec::Yaz0));
    assert_eq!(Codec::from_name("lzo"), Some(Codec::Lzo));
    assert_eq!(Codec::from_name("ucl"), Some(Codec::Ucl));
    assert_eq!(Codec::from_name("aplib"), Some(Codec::Aplib));
    assert_eq!(Codec::from_name("lz4hc"), Some(Codec::Lz4hc));
    assert_eq!(Codec::from_name("yaz0"), None);
    assert_eq!(Codec::from_name("LZO"), None);
    assert_eq!(Codec::from_name(""), None);
}

#[test]
fn tags_resolve_exactly() {
    for codec in Codec::ALL {
        let mut region = codec.tag().to_vec();
        region.extend_from_slice(&[0u8; 12]);
        assert_eq!(Codec::from_header(&region), Some(codec));
    }
    assert_eq!(Codec::from_header(b"yaz0...."), None);
    assert_eq!(Codec::from_header(b"LZ4"), None);
}

#[test]
fn display_and_parse_agree() {
    for codec in Codec::ALL {
        assert_eq!(codec.to_string().parse::<Codec>(), Ok(codec));
    }
}

#[test]
fn parse_error_lists_choices() {
    let err = "zstd".parse::<Codec>().unwrap_err();
    assert!(err.contains("zstd"));
    assert!(err.contains("yaz, lzo, ucl, aplib, lz4hc"));
}

#[test]
fn unknown_tag_without_override() {
    let region = framed(b"ABCD", 4, &[0u8; 8]);
    let mut dst = [0u8; 16];
    let err = decompress(&region, &mut dst, None, &mut Scratch::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownCodec { tag } if &tag == b"ABCD"));
}

#[test]
fn short_region_reports_padded_tag() {
    let mut dst = [0u8; 16];
    let err = decompress(b"Ya", &mut dst, None, &mut Scratch::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownCodec { tag } if tag == [b'Y', b'a', 0, 0]));
}

#[test]
fn override_ignores_header_tag() {
    // Yaz0 stream behind a foreign tag: one literal group.
    let region = framed(b"XXXX", 3, &[0xE0, b'a', b'b', b'c']);
    let mut dst = [0u8; 8];
    let n = decompress(&region, &mut dst, Some(Codec::Yaz0), &mut Scratch::new()).unwrap();
    assert_eq!(&dst[..n], b"abc");
}

#[test]
fn sniffed_tag_selects_codec() {
    let region = framed(b"Yaz0", 3, &[0xE0, b'x', b'y', b'z']);
    let mut dst = [0u8; 8];
    let n = decompress(&region, &mut dst, None, &mut Scratch::new()).unwrap();
    assert_eq!(&dst[..n], b"xyz");
}

#[test]
fn decode_failure_names_codec() {
    // Header only: the LZO stream is missing.
    let region = framed(b"LZO0", 16, &[]);
    let mut dst = [0u8; 16];
    let err = decode_block(Codec::Lzo, &region, &mut dst).unwrap_err();
    assert!(matches!(
        err,
        Error::CorruptBlock { codec: Codec::Lzo, kind: DecodeError::InputOverrun }
    ));
    assert_eq!(err.to_string(), "corrupt lzo data: compressed input truncated");
}

#[test]
fn missing_header_is_truncated_input() {
    let mut dst = [0u8; 16];
    for codec in [Codec::Yaz0, Codec::Lzo, Codec::Ucl, Codec::Aplib, Codec::Lz4hc] {
        let err = decode_block(codec, b"Yaz0", &mut dst).unwrap_err();
        assert!(
            matches!(err, Error::CorruptBlock { kind: DecodeError::InputOverrun, .. }),
            "{codec}: {err:?}"
        );
    }
}
