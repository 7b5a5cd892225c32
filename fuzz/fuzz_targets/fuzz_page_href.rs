#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quizui_core::{page_from_href, page_href};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    page: &'a str,
    extension: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let href = page_href(input.page, input.extension);
    assert_eq!(page_from_href(&href, input.extension), input.page);
});
