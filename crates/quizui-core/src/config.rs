//! Tunables for the UI helpers.
//!
//! Every field has a default matching the stock QuizMaster pages, so an empty
//! JSON object (or no configuration at all) yields the standard behavior.
//!
//! ```
//! use quizui_core::UiConfig;
//!
//! let config = UiConfig::from_json(r#"{ "toast_dismiss_after_ms": 5000 }"#).unwrap();
//! assert_eq!(config.toast_dismiss_after_ms, 5000);
//! assert_eq!(config.debounce_wait_ms, 300);
//! ```

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::Result;

/// Id of the element toasts are appended to.
pub const DEFAULT_TOAST_CONTAINER_ID: &str = "toast-container";
/// Delay before a toast starts fading out.
pub const DEFAULT_TOAST_DISMISS_AFTER_MS: u64 = 3000;
/// Inactivity window of a debounced function when no wait is given.
pub const DEFAULT_DEBOUNCE_WAIT_MS: u64 = 300;
/// Anchors rewired by the link-interception hook.
pub const DEFAULT_NAV_LINK_SELECTOR: &str = "nav a";
/// Suffix appended to page identifiers when navigating.
pub const DEFAULT_PAGE_EXTENSION: &str = ".html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub toast_container_id: String,
    pub toast_dismiss_after_ms: u64,
    pub debounce_wait_ms: u64,
    pub nav_link_selector: String,
    pub page_extension: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_container_id: DEFAULT_TOAST_CONTAINER_ID.to_owned(),
            toast_dismiss_after_ms: DEFAULT_TOAST_DISMISS_AFTER_MS,
            debounce_wait_ms: DEFAULT_DEBOUNCE_WAIT_MS,
            nav_link_selector: DEFAULT_NAV_LINK_SELECTOR.to_owned(),
            page_extension: DEFAULT_PAGE_EXTENSION.to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn toast_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.toast_dismiss_after_ms)
    }

    #[must_use]
    pub fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_wait_ms)
    }
}
