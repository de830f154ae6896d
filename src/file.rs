//! Individual-file decoding: one compressed asset in, its decompressed bytes
//! out.

use crate::codec::{self, Codec, Scratch};
use crate::config::FILE_CAPACITY;
use crate::displaylevel;
use crate::error::Error;

/// Decodes a single compressed region.
///
/// Output is produced into a zeroed buffer of [`FILE_CAPACITY`] bytes and
/// truncated to the decoded length. Streams that would decode past the
/// capacity fail with `OutputOverrun`.
pub fn decode_file(src: &[u8], codec_override: Option<Codec>) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; FILE_CAPACITY];
    let mut scratch = Scratch::new();
    let len = codec::decompress(src, &mut out, codec_override, &mut scratch)?;
    displaylevel!(3, "decoded {} -> {} bytes\n", src.len(), len);
    out.truncate(len);
    Ok(out)
}
