//! Fuzz target for the litsh parser
//!
//! Parses arbitrary input and renders whatever parses. Errors are fine;
//! panics are not. Anything that renders must parse back to the same tree.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=300

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 100_000 {
            return;
        }

        if input.contains(['\'', '"']) && input.contains(['*', '?']) {
            return;
        }

        for win32 in [false, true] {
            let Ok(node) = litsh::parse(input, win32, false) else {
                continue;
            };
            if let Ok(rendered) = node.to_shell(false) {
                let reparsed = litsh::parse(&rendered, false, false);
                assert_eq!(reparsed.as_ref(), Ok(&node), "rendered: {rendered:?}");
            }
        }
    }
});
