//! Host traits: the only way the helpers touch the browser.
//!
//! Each trait covers one slice of the document/window surface. The browser
//! implementation (`quizui-web`) wraps `web-sys`; [`crate::lab::LabHost`]
//! implements all of them in memory with a virtual clock.
//!
//! Hosts are single-threaded. Callbacks are boxed `'static` closures with no
//! `Send` bound, and they run on the host's event loop, never re-entrantly from
//! inside the call that registered them.

use std::fmt;

use web_time::Duration;

use crate::error::Result;

/// Access to the window location.
pub trait Navigator {
    /// Point the window at `href`.
    fn assign(&self, href: &str) -> Result<()>;
}

/// One-shot timers (`setTimeout` / `clearTimeout`).
pub trait TimerQueue {
    type Handle: Copy + fmt::Debug;

    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<Self::Handle>;

    /// Drop a scheduled callback. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: Self::Handle);
}

/// The slice of the document used by toasts.
pub trait ToastHost {
    type Node: Clone + 'static;

    /// Insert `html` at the end of the element with `container_id` and return
    /// the inserted element.
    fn append_html(&self, container_id: &str, html: &str) -> Result<Self::Node>;

    fn add_classes(&self, node: &Self::Node, classes: &[&str]) -> Result<()>;

    /// Run `callback` the next time a CSS transition on `node` ends.
    fn on_transition_end(&self, node: &Self::Node, callback: Box<dyn FnOnce()>) -> Result<()>;

    /// Detach `node` from the document. Detached nodes are ignored.
    fn remove(&self, node: &Self::Node);
}

/// Attributes of an anchor relevant to interception.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttrs {
    /// Raw `href` attribute, as written in the markup.
    pub href: Option<String>,
    /// `target` attribute; an empty string counts as absent.
    pub target: Option<String>,
}

impl LinkAttrs {
    #[must_use]
    pub fn new(href: Option<&str>, target: Option<&str>) -> Self {
        Self {
            href: href.map(str::to_owned),
            target: target.map(str::to_owned),
        }
    }
}

/// A click event as seen by a bound handler.
pub trait ClickEvent {
    fn prevent_default(&self);
}

/// Anchor discovery and click binding.
pub trait LinkHost {
    type Link: Clone + 'static;

    fn query_links(&self, selector: &str) -> Result<Vec<Self::Link>>;

    fn link_attrs(&self, link: &Self::Link) -> LinkAttrs;

    /// Attach `handler` to clicks on `link`. Handlers accumulate; binding
    /// twice runs both.
    fn bind_click(&self, link: &Self::Link, handler: Box<dyn Fn(&dyn ClickEvent)>) -> Result<()>;
}
