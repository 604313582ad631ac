#![no_main]

use libfuzzer_sys::fuzz_target;
use stamps_identity::Principal;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(principal) = Principal::from_text(text) {
        // only the canonical form is accepted
        assert_eq!(principal.to_text(), text);
    }
});
