#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = indent_tools::parse_one(s);
        let _ = indent_tools::parse_html(s);
    }
});
