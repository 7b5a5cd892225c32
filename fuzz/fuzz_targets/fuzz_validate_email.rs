#![no_main]

use libfuzzer_sys::fuzz_target;
use quizui_core::validate_email;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let verdict = validate_email(&*text);
    if verdict {
        assert_eq!(text.matches('@').count(), 1);
        // U+0085 is Unicode whitespace but allowed by the browser `\s` set.
        assert!(!text.chars().any(|c| c.is_whitespace() && c != '\u{85}'));
        assert!(!text.contains('\u{FEFF}'));
    }
    assert_eq!(verdict, validate_email(&text.to_uppercase()));
});
