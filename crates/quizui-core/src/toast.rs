//! Transient toast notifications.
//!
//! A toast is appended to the container as styled markup, starts fading out
//! after a fixed delay, and detaches itself when the fade transition ends.
//!
//! ```text
//! Visible ──(dismiss delay)──▶ FadingOut ──(transitionend)──▶ Removed
//! ```
//!
//! The returned [`Toast`] owns the node reference; the lifecycle never looks
//! the node up again through the document.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::config::UiConfig;
use crate::error::Result;
use crate::host::{TimerQueue, ToastHost};

/// Classes every toast carries besides its color.
pub const TOAST_BASE_CLASSES: &str = "text-white p-3 rounded-lg shadow-xl mb-3 transition-opacity duration-300 transform translate-y-0 opacity-100";

/// Classes added to start the exit transition.
pub const TOAST_FADE_OUT_CLASSES: [&str; 2] = ["opacity-0", "translate-y-2"];

/// Visual kind of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    /// Anything that is not a success.
    #[default]
    Error,
}

impl ToastKind {
    /// Map a page-supplied type tag: `"success"` or anything else.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == "success" {
            Self::Success
        } else {
            Self::Error
        }
    }

    /// Background color class.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    FadingOut,
    Removed,
}

/// Markup of a toast. The message is HTML-escaped.
#[must_use]
pub fn toast_markup(message: &str, kind: ToastKind) -> String {
    format!(
        r#"<div class="{} {TOAST_BASE_CLASSES}">{}</div>"#,
        kind.color_class(),
        v_htmlescape::escape(message),
    )
}

/// Handle to a shown toast.
#[derive(Debug, Clone)]
pub struct Toast<N> {
    node: N,
    kind: ToastKind,
    phase: Rc<Cell<ToastPhase>>,
}

impl<N> Toast<N> {
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> ToastPhase {
        self.phase.get()
    }
}

/// Append a toast to the configured container and schedule its dismissal.
///
/// Fails with [`crate::UiError::MissingElement`] when the container is not in
/// the document; nothing is scheduled in that case. If the dismissal timer
/// cannot be scheduled the node is removed again before the error returns.
pub fn show_toast<H>(host: &H, config: &UiConfig, message: &str, kind: ToastKind) -> Result<Toast<H::Node>>
where
    H: ToastHost + TimerQueue + Clone + 'static,
{
    let node = host
        .append_html(&config.toast_container_id, &toast_markup(message, kind))
        .inspect_err(|err| warn!(%err, "toast: cannot show notification"))?;
    let phase = Rc::new(Cell::new(ToastPhase::Visible));
    trace!(?kind, "toast: visible");

    let fade_host = host.clone();
    let fade_node = node.clone();
    let fade_phase = Rc::clone(&phase);
    let scheduled = host.schedule(
        config.toast_dismiss_after(),
        Box::new(move || start_fade_out(&fade_host, fade_node, fade_phase)),
    );
    if let Err(err) = scheduled {
        // Without a timer the toast would never leave.
        warn!(%err, "toast: cannot schedule dismissal, removing now");
        host.remove(&node);
        return Err(err);
    }

    Ok(Toast { node, kind, phase })
}

fn start_fade_out<H>(host: &H, node: H::Node, phase: Rc<Cell<ToastPhase>>)
where
    H: ToastHost + Clone + 'static,
{
    if let Err(err) = host.add_classes(&node, &TOAST_FADE_OUT_CLASSES) {
        warn!(%err, "toast: fade-out failed");
        return;
    }
    phase.set(ToastPhase::FadingOut);
    trace!("toast: fading out");

    let remove_host = host.clone();
    let remove_node = node.clone();
    let remove_phase = Rc::clone(&phase);
    let listen = host.on_transition_end(
        &node,
        Box::new(move || {
            remove_host.remove(&remove_node);
            remove_phase.set(ToastPhase::Removed);
            trace!("toast: removed");
        }),
    );
    if let Err(err) = listen {
        warn!(%err, "toast: transitionend listener failed, removing now");
        host.remove(&node);
        phase.set(ToastPhase::Removed);
    }
}
