#![no_main]
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;
use rstree::{lex, parse_document, Options};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    tab_width: u8,
    max_lookahead: u8,
    rst: &'a str,
}

fuzz_target!(|input: Input| {
    let options = Options {
        tab_width: usize::from(input.tab_width % 16) + 1,
        max_lookahead: usize::from(input.max_lookahead) + 1,
    };
    if let Ok(tokens) = lex("fuzz", input.rst) {
        for pair in tokens.collect::<Vec<_>>().windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }
    let _ = parse_document("fuzz", input.rst, &options);
});
