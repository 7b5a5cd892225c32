//! Stable description of the JS-facing API.
//!
//! The version is the contract of the exported functions, distinct from the
//! crate version. Bump it when an export is added, removed or changes shape.

/// Semver of the JS API surface.
pub const QUIZUI_JS_API_VERSION: &str = "1.0.0";

/// Exported JS function names, sorted.
pub const QUIZUI_JS_PUBLIC_METHODS: &[&str] = &[
    "apiContract",
    "apiMethods",
    "configure",
    "debounce",
    "installNavInterception",
    "navigate",
    "showToast",
    "validateEmail",
];

/// `{ apiVersion, packageName, packageVersion, methods }` as JSON.
#[must_use]
pub fn api_contract_json() -> String {
    serde_json::json!({
        "apiVersion": QUIZUI_JS_API_VERSION,
        "packageName": env!("CARGO_PKG_NAME"),
        "packageVersion": env!("CARGO_PKG_VERSION"),
        "methods": QUIZUI_JS_PUBLIC_METHODS,
    })
    .to_string()
}
