//! `web-sys` implementation of the `quizui-core` host traits.

use quizui_core::host::{ClickEvent, LinkAttrs, LinkHost, Navigator, TimerQueue, ToastHost};
use quizui_core::{Result, UiError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlAnchorElement, Window};
use web_time::Duration;

/// The browser window and document.
#[derive(Debug, Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global `window` and its document.
    pub fn from_global() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| UiError::host("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::host("window.document", "window has no document"))?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the document is still being parsed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }
}

/// Best-effort text of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

fn host_err(operation: &'static str) -> impl FnOnce(JsValue) -> UiError {
    move |value| UiError::host(operation, js_message(&value))
}

impl Navigator for WebHost {
    fn assign(&self, href: &str) -> Result<()> {
        self.window
            .location()
            .set_href(href)
            .map_err(host_err("location.href"))
    }
}

impl TimerQueue for WebHost {
    type Handle = i32;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<i32> {
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let fire = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), timeout)
            .map_err(host_err("setTimeout"))
    }

    fn cancel(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

impl ToastHost for WebHost {
    type Node = Element;

    fn append_html(&self, container_id: &str, html: &str) -> Result<Element> {
        let container = self
            .document
            .get_element_by_id(container_id)
            .ok_or_else(|| UiError::missing(container_id))?;
        container
            .insert_adjacent_html("beforeend", html)
            .map_err(host_err("insertAdjacentHTML"))?;
        container
            .last_element_child()
            .ok_or_else(|| UiError::host("lastElementChild", "markup produced no element"))
    }

    fn add_classes(&self, node: &Element, classes: &[&str]) -> Result<()> {
        let list = node.class_list();
        for class in classes {
            list.add_1(class).map_err(host_err("classList.add"))?;
        }
        Ok(())
    }

    fn on_transition_end(&self, node: &Element, callback: Box<dyn FnOnce()>) -> Result<()> {
        // Each transitioned property dispatches its own event; only the first
        // may reach a once-closure.
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let listener = Closure::once_into_js(move || callback());
        node.add_event_listener_with_callback_and_add_event_listener_options(
            "transitionend",
            listener.unchecked_ref(),
            &options,
        )
        .map_err(host_err("addEventListener"))
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }
}

struct WebClick(Event);

impl ClickEvent for WebClick {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

impl LinkHost for WebHost {
    type Link = HtmlAnchorElement;

    fn query_links(&self, selector: &str) -> Result<Vec<HtmlAnchorElement>> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(host_err("querySelectorAll"))?;
        Ok((0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlAnchorElement>().ok())
            .collect())
    }

    fn link_attrs(&self, link: &HtmlAnchorElement) -> LinkAttrs {
        LinkAttrs {
            href: link.get_attribute("href"),
            target: Some(link.target()),
        }
    }

    fn bind_click(
        &self,
        link: &HtmlAnchorElement,
        handler: Box<dyn Fn(&dyn ClickEvent)>,
    ) -> Result<()> {
        let listener = Closure::<dyn Fn(Event)>::new(move |event: Event| handler(&WebClick(event)));
        link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(host_err("addEventListener"))?;
        // Lives as long as the page.
        listener.forget();
        Ok(())
    }
}
