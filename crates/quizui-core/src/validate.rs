//! Email format check.
//!
//! A syntactic approximation: something without whitespace or `@`, an `@`,
//! then a dotted tail. Not RFC 5322.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

/// Whitespace as browsers define it for `\s`: ECMAScript WhiteSpace plus
/// LineTerminator. Differs from Unicode `White_Space` on U+0085 and U+FEFF.
const WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let atom = format!("[^{WHITESPACE}@]+");
    Regex::new(&format!(r"^{atom}@{atom}\.{atom}$")).expect("email pattern is a valid regex")
});

/// Whether `email`, rendered to a lowercase string, looks like an address.
///
/// Accepts anything displayable, mirroring how the page coerces arbitrary
/// form values to strings before checking them.
///
/// ```
/// use quizui_core::validate_email;
///
/// assert!(validate_email("a@b.com"));
/// assert!(validate_email("A@B.COM"));
/// assert!(!validate_email("not-an-email"));
/// ```
#[must_use]
pub fn validate_email<T: Display + ?Sized>(email: &T) -> bool {
    EMAIL_PATTERN.is_match(&email.to_string().to_lowercase())
}
