//! Deterministic in-memory host for tests.
//!
//! [`LabHost`] implements every trait in [`crate::host`] over a tiny document
//! model and a virtual millisecond clock. Nothing happens on its own: timers
//! fire only inside [`LabHost::advance`], and CSS transitions end only inside
//! [`LabHost::finish_transitions`]. Clones share the same state.
//!
//! # Example
//!
//! ```
//! use quizui_core::lab::LabHost;
//! use quizui_core::{ToastKind, UiConfig, show_toast};
//! use web_time::Duration;
//!
//! let host = LabHost::new();
//! host.add_container("toast-container");
//!
//! show_toast(&host, &UiConfig::default(), "Saved", ToastKind::Success).unwrap();
//! assert_eq!(host.children("toast-container").len(), 1);
//!
//! host.advance(Duration::from_millis(3000));
//! host.finish_transitions();
//! assert!(host.children("toast-container").is_empty());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use web_time::Duration;

use crate::config::DEFAULT_NAV_LINK_SELECTOR;
use crate::error::{Result, UiError};
use crate::host::{ClickEvent, LinkAttrs, LinkHost, Navigator, TimerQueue, ToastHost};

/// Timer handle issued by [`LabHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabTimer(u64);

/// Element handle issued by [`LabHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabNode(u64);

/// Anchor handle issued by [`LabHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabLink(usize);

/// Outcome of a simulated click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabClick {
    pub handlers_run: usize,
    pub default_prevented: bool,
}

struct NodeState {
    html: String,
    classes: Vec<String>,
    transition_pending: bool,
    transition_listeners: Vec<Box<dyn FnOnce()>>,
}

struct LinkState {
    selector: String,
    attrs: LinkAttrs,
    handlers: Vec<Rc<dyn Fn(&dyn ClickEvent)>>,
}

#[derive(Default)]
struct LabState {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<(u64, u64), Box<dyn FnOnce()>>,
    timer_due: HashMap<u64, u64>,
    containers: HashMap<String, Vec<LabNode>>,
    nodes: HashMap<LabNode, NodeState>,
    links: Vec<LinkState>,
    navigations: Vec<String>,
    navigation_error: Option<String>,
}

impl LabState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct LabHost {
    state: Rc<RefCell<LabState>>,
}

impl std::fmt::Debug for LabHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LabHost")
            .field("now_ms", &state.now_ms)
            .field("pending_timers", &state.timers.len())
            .field("nodes", &state.nodes.len())
            .field("links", &state.links.len())
            .finish()
    }
}

impl LabHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.state.borrow().now_ms)
    }

    /// Move the clock forward by `delta`, firing due timers in order.
    ///
    /// Timers scheduled by a firing callback run in the same call if they
    /// fall due before the new time. Returns the number of callbacks run.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = {
            let state = self.state.borrow();
            state.now_ms.saturating_add(duration_ms(delta))
        };
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.timers.first_key_value().map(|(&key, _)| key) {
                    Some((due, id)) if due <= target => {
                        state.timer_due.remove(&id);
                        state.now_ms = due;
                        state.timers.remove(&(due, id))
                    }
                    _ => None,
                }
            };
            let Some(callback) = next else { break };
            callback();
            fired += 1;
        }
        self.state.borrow_mut().now_ms = target;
        fired
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    // ── Document ─────────────────────────────────────────────────────

    /// Create an empty element with `id` that toasts can be appended to.
    pub fn add_container(&self, id: &str) {
        self.state
            .borrow_mut()
            .containers
            .entry(id.to_owned())
            .or_default();
    }

    /// Children of the container `id`, oldest first.
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<LabNode> {
        self.state
            .borrow()
            .containers
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Markup the node was created from, if it is still attached.
    #[must_use]
    pub fn node_html(&self, node: LabNode) -> Option<String> {
        self.state.borrow().nodes.get(&node).map(|n| n.html.clone())
    }

    /// Current class list of an attached node.
    #[must_use]
    pub fn node_classes(&self, node: LabNode) -> Vec<String> {
        self.state
            .borrow()
            .nodes
            .get(&node)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_attached(&self, node: LabNode) -> bool {
        self.state.borrow().nodes.contains_key(&node)
    }

    /// End every running transition, firing `transitionend` listeners.
    ///
    /// A transition runs from the moment classes are added to a node until
    /// this call. Returns the number of listeners run.
    pub fn finish_transitions(&self) -> usize {
        let listeners: Vec<Box<dyn FnOnce()>> = {
            let mut state = self.state.borrow_mut();
            state
                .nodes
                .values_mut()
                .filter(|n| n.transition_pending)
                .flat_map(|n| {
                    n.transition_pending = false;
                    std::mem::take(&mut n.transition_listeners)
                })
                .collect()
        };
        let count = listeners.len();
        for listener in listeners {
            listener();
        }
        count
    }

    // ── Links ────────────────────────────────────────────────────────

    /// Add an anchor inside a `<nav>` region.
    pub fn add_nav_link(&self, href: Option<&str>, target: Option<&str>) -> LabLink {
        self.add_link(DEFAULT_NAV_LINK_SELECTOR, href, target)
    }

    /// Add an anchor matched by `selector` only.
    pub fn add_link(&self, selector: &str, href: Option<&str>, target: Option<&str>) -> LabLink {
        let mut state = self.state.borrow_mut();
        state.links.push(LinkState {
            selector: selector.to_owned(),
            attrs: LinkAttrs::new(href, target),
            handlers: Vec::new(),
        });
        LabLink(state.links.len() - 1)
    }

    /// Rewrite the `href` attribute of an existing anchor.
    pub fn set_link_href(&self, link: LabLink, href: &str) {
        if let Some(state) = self.state.borrow_mut().links.get_mut(link.0) {
            state.attrs.href = Some(href.to_owned());
        }
    }

    #[must_use]
    pub fn click_handlers(&self, link: LabLink) -> usize {
        self.state
            .borrow()
            .links
            .get(link.0)
            .map_or(0, |l| l.handlers.len())
    }

    /// Dispatch a click on `link` to every bound handler.
    pub fn click(&self, link: LabLink) -> LabClick {
        let handlers: Vec<Rc<dyn Fn(&dyn ClickEvent)>> = self
            .state
            .borrow()
            .links
            .get(link.0)
            .map(|l| l.handlers.clone())
            .unwrap_or_default();
        let event = LabClickEvent::default();
        for handler in &handlers {
            handler(&event);
        }
        LabClick {
            handlers_run: handlers.len(),
            default_prevented: event.prevented.get(),
        }
    }

    // ── Location ─────────────────────────────────────────────────────

    /// Every href assigned to the location, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    /// Make subsequent location assignments fail with `message`.
    pub fn fail_navigation(&self, message: &str) {
        self.state.borrow_mut().navigation_error = Some(message.to_owned());
    }
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}

fn classes_from_markup(html: &str) -> Vec<String> {
    const ATTR: &str = "class=\"";
    let Some(start) = html.find(ATTR).map(|i| i + ATTR.len()) else {
        return Vec::new();
    };
    let rest = &html[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    rest[..end].split_whitespace().map(str::to_owned).collect()
}

#[derive(Default)]
struct LabClickEvent {
    prevented: Cell<bool>,
}

impl ClickEvent for LabClickEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

impl Navigator for LabHost {
    fn assign(&self, href: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.navigation_error {
            return Err(UiError::host("location.assign", message.clone()));
        }
        state.navigations.push(href.to_owned());
        Ok(())
    }
}

impl TimerQueue for LabHost {
    type Handle = LabTimer;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<LabTimer> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let due = state.now_ms.saturating_add(duration_ms(delay));
        state.timers.insert((due, id), callback);
        state.timer_due.insert(id, due);
        Ok(LabTimer(id))
    }

    fn cancel(&self, handle: LabTimer) {
        let mut state = self.state.borrow_mut();
        if let Some(due) = state.timer_due.remove(&handle.0) {
            state.timers.remove(&(due, handle.0));
        }
    }
}

impl ToastHost for LabHost {
    type Node = LabNode;

    fn append_html(&self, container_id: &str, html: &str) -> Result<LabNode> {
        let mut state = self.state.borrow_mut();
        if !state.containers.contains_key(container_id) {
            return Err(UiError::missing(container_id));
        }
        let node = LabNode(state.next_id());
        state.nodes.insert(
            node,
            NodeState {
                html: html.to_owned(),
                classes: classes_from_markup(html),
                transition_pending: false,
                transition_listeners: Vec::new(),
            },
        );
        if let Some(children) = state.containers.get_mut(container_id) {
            children.push(node);
        }
        Ok(node)
    }

    fn add_classes(&self, node: &LabNode, classes: &[&str]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let Some(entry) = state.nodes.get_mut(node) else {
            return Err(UiError::host("classList.add", "node is detached"));
        };
        for class in classes {
            if !entry.classes.iter().any(|c| c == class) {
                entry.classes.push((*class).to_owned());
            }
        }
        entry.transition_pending = true;
        Ok(())
    }

    fn on_transition_end(&self, node: &LabNode, callback: Box<dyn FnOnce()>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let Some(entry) = state.nodes.get_mut(node) else {
            return Err(UiError::host("addEventListener", "node is detached"));
        };
        entry.transition_listeners.push(callback);
        Ok(())
    }

    fn remove(&self, node: &LabNode) {
        let mut state = self.state.borrow_mut();
        if state.nodes.remove(node).is_none() {
            return;
        }
        for children in state.containers.values_mut() {
            children.retain(|child| child != node);
        }
    }
}

impl LinkHost for LabHost {
    type Link = LabLink;

    fn query_links(&self, selector: &str) -> Result<Vec<LabLink>> {
        Ok(self
            .state
            .borrow()
            .links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.selector == selector)
            .map(|(idx, _)| LabLink(idx))
            .collect())
    }

    fn link_attrs(&self, link: &LabLink) -> LinkAttrs {
        self.state
            .borrow()
            .links
            .get(link.0)
            .map(|l| l.attrs.clone())
            .unwrap_or_default()
    }

    fn bind_click(&self, link: &LabLink, handler: Box<dyn Fn(&dyn ClickEvent)>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let Some(entry) = state.links.get_mut(link.0) else {
            return Err(UiError::host("addEventListener", "unknown link"));
        };
        entry.handlers.push(Rc::from(handler));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_due_order() {
        let host = LabHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (label, ms) in [("c", 30), ("a", 10), ("b", 20)] {
            let log = Rc::clone(&log);
            host.schedule(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(label)),
            )
            .unwrap();
        }
        assert_eq!(host.advance(Duration::from_millis(25)), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(host.pending_timers(), 1);
        assert_eq!(host.now(), Duration::from_millis(25));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let host = LabHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second"] {
            let log = Rc::clone(&log);
            host.schedule(
                Duration::from_millis(5),
                Box::new(move || log.borrow_mut().push(label)),
            )
            .unwrap();
        }
        host.advance(Duration::from_millis(5));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let host = LabHost::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = host
            .schedule(Duration::from_millis(1), Box::new(move || flag.set(true)))
            .unwrap();
        host.cancel(handle);
        host.cancel(handle);
        host.advance(Duration::from_millis(10));
        assert!(!fired.get());
    }

    #[test]
    fn callbacks_may_schedule_more_timers() {
        let host = LabHost::new();
        let fired = Rc::new(Cell::new(0));
        let inner_host = host.clone();
        let counter = Rc::clone(&fired);
        host.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.set(counter.get() + 1);
                let counter = Rc::clone(&counter);
                inner_host
                    .schedule(
                        Duration::from_millis(10),
                        Box::new(move || counter.set(counter.get() + 1)),
                    )
                    .unwrap();
            }),
        )
        .unwrap();
        assert_eq!(host.advance(Duration::from_millis(20)), 2);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn append_requires_container() {
        let host = LabHost::new();
        let err = host.append_html("toast-container", "<div></div>").unwrap_err();
        assert!(matches!(err, UiError::MissingElement { id } if id == "toast-container"));
    }

    #[test]
    fn markup_classes_are_parsed() {
        let host = LabHost::new();
        host.add_container("box");
        let node = host
            .append_html("box", r#"<div class="a  b c">x</div>"#)
            .unwrap();
        assert_eq!(host.node_classes(node), vec!["a", "b", "c"]);
        host.add_classes(&node, &["b", "d"]).unwrap();
        assert_eq!(host.node_classes(node), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn transition_listeners_need_a_running_transition() {
        let host = LabHost::new();
        host.add_container("box");
        let node = host.append_html("box", "<div></div>").unwrap();
        let ended = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ended);
        host.on_transition_end(&node, Box::new(move || flag.set(true)))
            .unwrap();
        assert_eq!(host.finish_transitions(), 0);
        host.add_classes(&node, &["fade"]).unwrap();
        assert_eq!(host.finish_transitions(), 1);
        assert!(ended.get());
    }

    #[test]
    fn query_links_filters_by_selector() {
        let host = LabHost::new();
        let nav = host.add_nav_link(Some("a.html"), None);
        host.add_link("footer a", Some("b.html"), None);
        assert_eq!(host.query_links("nav a").unwrap(), vec![nav]);
    }

    #[test]
    fn failing_navigation_is_reported() {
        let host = LabHost::new();
        host.fail_navigation("blocked");
        assert!(host.assign("x.html").is_err());
        assert!(host.navigations().is_empty());
    }
}
