#![no_main]
use libfuzzer_sys::fuzz_target;
use z64dec::Codec;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through every decoder. Errors are expected; panics and
    // out-of-range writes are not.

    // Raw LZ4 block, empty and 4 KiB outputs.
    {
        let mut dst = vec![0u8; 0];
        let _ = z64dec::block::decode_block(data, &mut dst);
        let mut dst = vec![0u8; 4096];
        if let Ok(n) = z64dec::block::decode_block(data, &mut dst) {
            assert!(n <= dst.len());
        }
    }

    // Every registered codec, with the header taken as-is.
    for codec in Codec::ALL {
        let mut dst = vec![0u8; 64 * 1024];
        if let Ok(n) = z64dec::decode_block(codec, data, &mut dst) {
            assert!(n <= dst.len());
        }
    }
});
