//! The active [`UiConfig`] of this page.
//!
//! One per thread; the JS exports read a snapshot on every call, so a
//! `configure` applies to helpers invoked afterwards. Link handlers and
//! debounced functions keep the config they were created with.

use std::cell::RefCell;

use quizui_core::{Result, UiConfig};
use tracing::debug;

thread_local! {
    static ACTIVE: RefCell<UiConfig> = RefCell::new(UiConfig::default());
}

/// Snapshot of the active config.
#[must_use]
pub fn current() -> UiConfig {
    ACTIVE.with(|active| active.borrow().clone())
}

/// Replace the active config from JSON. On error the active config is kept.
pub fn configure(json: &str) -> Result<()> {
    let config = UiConfig::from_json(json)?;
    debug!(?config, "config replaced");
    ACTIVE.with(|active| *active.borrow_mut() = config);
    Ok(())
}

/// Restore the defaults.
#[cfg(test)]
pub(crate) fn reset() {
    ACTIVE.with(|active| *active.borrow_mut() = UiConfig::default());
}
