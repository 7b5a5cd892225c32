#![forbid(unsafe_code)]

//! Core: host-agnostic UI helpers for the QuizMaster web client.
//!
//! Navigation redirects, toast notifications, debouncing, nav-link
//! interception and email checks, expressed over the small host traits in
//! [`host`]. The browser implementation lives in `quizui-web`; tests drive
//! the same code through [`lab::LabHost`].

pub mod config;
pub mod debounce;
pub mod error;
pub mod host;
pub mod lab;
pub mod nav;
pub mod toast;
pub mod validate;

pub use config::UiConfig;
pub use debounce::{Debounced, debounce, debounce_default};
pub use error::{Result, UiError};
pub use nav::{install_link_interception, navigate, page_from_href, page_href, should_intercept};
pub use toast::{Toast, ToastKind, ToastPhase, show_toast};
pub use validate::validate_email;
