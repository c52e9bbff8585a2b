#![no_main]

use libfuzzer_sys::fuzz_target;
use xmplib_wire::LibraryHeader;

// Fuzz target: LibraryHeader::read_from with arbitrary bytes.
//
// Catches bugs in:
// - Short header handling
// - Version checking
// - Reserved byte enforcement
//
// Any accepted header must report the encoding its flag byte selects.
fuzz_target!(|data: &[u8]| {
    if let Ok(header) = LibraryHeader::read_from(data) {
        assert_ne!(header.version, 0);
        assert_eq!(header.encoding, header.flags.encoding());
    }
});
