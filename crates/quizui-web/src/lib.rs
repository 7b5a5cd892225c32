#![forbid(unsafe_code)]

//! WASM frontend for the QuizMaster client pages.
//!
//! On `wasm32` this crate implements the `quizui-core` host traits over
//! `web-sys` ([`WebHost`]) and exports the page-facing JS API:
//!
//! | JS export | Purpose |
//! |-----------|---------|
//! | `navigate(page)` | go to `page.html` |
//! | `showToast(message, type?)` | transient notification in `#toast-container` |
//! | `debounce(func, wait?)` | trailing-edge debounced wrapper of `func` |
//! | `validateEmail(value)` | syntactic email check |
//! | `installNavInterception()` | route `nav a` clicks through `navigate` |
//! | `configure(json)` | replace the active [`quizui_core::UiConfig`] |
//! | `apiContract()` | JSON description of this API |
//! | `apiMethods()` | sorted names of the exports |
//!
//! Nav-link interception is installed automatically by the module start
//! hook once the document has been parsed.

pub mod api;
pub mod settings;

pub use api::{QUIZUI_JS_API_VERSION, QUIZUI_JS_PUBLIC_METHODS, api_contract_json};

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    WebHost, api_contract, api_methods, configure, debounce, install_nav_interception, navigate,
    show_toast, validate_email,
};
