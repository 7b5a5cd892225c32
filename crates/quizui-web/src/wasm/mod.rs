//! JS exports and the module start hook.

mod host;

pub use host::WebHost;

use js_sys::{Array, Function, Object};
use quizui_core::{ToastKind, UiError};
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_time::Duration;

use crate::settings;
use host::js_message;

// wasm-bindgen closures take a fixed arity; the rest parameter lives in JS.
// Must not go through `new Function`: pages may forbid 'unsafe-eval'.
#[wasm_bindgen(inline_js = "export function gather(call) { return (...args) => call(args); }")]
extern "C" {
    fn gather(call: &JsValue) -> Function;
}

fn to_js(err: UiError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn web_host() -> Result<WebHost, JsValue> {
    WebHost::from_global().map_err(to_js)
}

/// `String(value)` semantics for any JS value.
fn coerce_to_string(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_undefined() {
        return "undefined".to_owned();
    }
    if value.is_null() {
        return "null".to_owned();
    }
    String::from(value.unchecked_ref::<Object>().to_string())
}

/// Go to `page.html`. Non-string pages are stringified first.
#[wasm_bindgen]
pub fn navigate(page: JsValue) -> Result<(), JsValue> {
    let host = web_host()?;
    quizui_core::navigate(&host, &settings::current(), &coerce_to_string(&page)).map_err(to_js)
}

/// Show a toast; `type` `"success"` is green, anything else red.
///
/// Throws when `#toast-container` is missing.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: JsValue, kind: JsValue) -> Result<(), JsValue> {
    let host = web_host()?;
    let kind = ToastKind::from_tag(&coerce_to_string(&kind));
    quizui_core::show_toast(&host, &settings::current(), &coerce_to_string(&message), kind)
        .map(drop)
        .map_err(to_js)
}

/// Wrap `func` so bursts of calls collapse into one trailing call.
///
/// Returns a plain variadic JS function. `wait` is in milliseconds and
/// defaults to the configured window (300 ms); non-finite or negative waits
/// count as zero, like `setTimeout`. `func` runs with `this` bound to the
/// global object, as it would from a classic page script.
#[wasm_bindgen]
pub fn debounce(func: Function, wait: Option<f64>) -> Result<Function, JsValue> {
    let host = web_host()?;
    let wait = match wait {
        None => settings::current().debounce_wait(),
        Some(ms) if ms.is_finite() && ms > 0.0 => Duration::from_millis(ms as u64),
        Some(_) => Duration::ZERO,
    };
    let receiver = js_sys::global();
    let debounced = quizui_core::debounce(
        host,
        move |args: Array| {
            if let Err(err) = func.apply(&receiver, &args) {
                warn!(error = %js_message(&err), "debounce: wrapped function threw");
            }
        },
        wait,
    );
    let entry = Closure::<dyn Fn(Array)>::new(move |args: Array| debounced.call(args));
    Ok(gather(&entry.into_js_value()))
}

/// Syntactic email check of `String(value)`, case-insensitive.
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(value: JsValue) -> bool {
    quizui_core::validate_email(&coerce_to_string(&value))
}

/// Route clicks on `nav a` links through `navigate`. Returns the number of
/// links bound; calling it again binds them again.
#[wasm_bindgen(js_name = installNavInterception)]
pub fn install_nav_interception() -> Result<u32, JsValue> {
    let host = web_host()?;
    let bound = quizui_core::install_link_interception(&host, &settings::current()).map_err(to_js)?;
    Ok(u32::try_from(bound).unwrap_or(u32::MAX))
}

/// Replace the active configuration from a JSON object.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    settings::configure(json).map_err(to_js)
}

/// JSON description of the exported API.
#[wasm_bindgen(js_name = apiContract)]
pub fn api_contract() -> String {
    crate::api_contract_json()
}

/// Names of the exported functions, sorted.
#[wasm_bindgen(js_name = apiMethods)]
pub fn api_methods() -> Array {
    crate::QUIZUI_JS_PUBLIC_METHODS
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let host = web_host()?;
    if !host.is_loading() {
        // The module loaded after parsing finished; DOMContentLoaded is gone.
        let bound = install_nav_interception()?;
        info!(bound, "start: document already parsed");
        return Ok(());
    }
    let hook = Closure::once_into_js(|| {
        if let Err(err) = install_nav_interception() {
            warn!(error = %js_message(&err), "start: nav interception failed");
        }
    });
    host.document()
        .add_event_listener_with_callback("DOMContentLoaded", hook.unchecked_ref())
}
