#![no_main]

use libfuzzer_sys::fuzz_target;
use xmplib_decoder::{DecodeError, LibraryDecoder};

// Fuzz target: full library decode from arbitrary bytes.
//
// Catches bugs in:
// - String scanning at end of input
// - Subsong-dependent record length
// - FILETIME conversion of extreme values
// - Section sequencing after a failed record
//
// An in-memory source never fails with I/O errors and the decode never
// leaves a section out of order, so only two error kinds are possible.
fuzz_target!(|data: &[u8]| {
    match LibraryDecoder::decode(data) {
        Ok(decoded) => {
            assert!(decoded.tracks.iter().all(|t| !t.file_name().is_empty()));
            assert!(decoded.watch_dirs.iter().all(|d| !d.path.is_empty()));
        }
        Err(DecodeError::InvalidHeader(_) | DecodeError::Truncated { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
});
