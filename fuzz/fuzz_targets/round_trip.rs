#![no_main]

use indent_tools::{parse_one, Flavor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = parse_one(s) else {
        return;
    };
    let rendered = doc.render(Flavor::Xml);
    let reparsed = match parse_one(&rendered) {
        Ok(reparsed) => reparsed,
        Err(err) => panic!("rendered output failed to parse: {err}\n{rendered}"),
    };
    assert_eq!(reparsed.render(Flavor::Xml), rendered);
});
