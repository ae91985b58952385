#![no_main]
use libfuzzer_sys::fuzz_target;
use rstree::{json, parse_document, Options};

// Whatever parses must survive a trip through its JSON form unchanged.
fuzz_target!(|rst: &str| {
    let Ok(doc) = parse_document("fuzz", rst, &Options::default()) else {
        return;
    };
    let out = json::to_string(&doc).unwrap();
    let back = json::from_str("fuzz", &out).unwrap();
    assert_eq!(json::to_string(&back).unwrap(), out);
});
