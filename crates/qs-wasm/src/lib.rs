//! WASM bindings for qs-core.
//!
//! Exposes the codec, the URL helpers and the address-bar helpers as
//! `#[wasm_bindgen]` functions. Query objects cross the boundary as JSON
//! strings; options are optional camelCase JSON (`{"arrayFormat":"comma"}`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p qs-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/qs-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/qs_wasm.wasm
//! ```
//!
//! The address-bar helpers run against `window.location` and
//! `window.history.replaceState`. Outside a browser those globals are missing
//! and the helpers throw instead of silently doing nothing.

use qs_core::{AddressPort, Location, ParsedUrl, QsError, QueryObject};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = r#"
function hostLocation() {
    if (typeof window === "undefined" || typeof window.location === "undefined") {
        return undefined;
    }
    return window.location;
}

export function host_origin() {
    const location = hostLocation();
    if (location === undefined) {
        return undefined;
    }
    return location.origin === "null" ? location.protocol + "//" + location.host : location.origin;
}

export function host_pathname() {
    const location = hostLocation();
    return location === undefined ? undefined : location.pathname;
}

export function host_search() {
    const location = hostLocation();
    return location === undefined ? undefined : location.search || "";
}

export function host_has_history() {
    return typeof window !== "undefined" && typeof window.history !== "undefined";
}

export function host_replace_state(url) {
    try {
        window.history.replaceState(null, "", url);
        return undefined;
    } catch (e) {
        return String(e);
    }
}
"#)]
extern "C" {
    fn host_origin() -> Option<String>;
    fn host_pathname() -> Option<String>;
    fn host_search() -> Option<String>;
    fn host_has_history() -> bool;
    fn host_replace_state(url: &str) -> Option<String>;
}

/// [`AddressPort`] over the page's `window.location` and `window.history`.
struct BrowserAddress;

impl AddressPort for BrowserAddress {
    fn location(&self) -> Option<Location> {
        Some(Location {
            origin: host_origin()?,
            pathname: host_pathname()?,
            search: host_search()?,
        })
    }

    fn supports_replace(&self) -> bool {
        host_has_history()
    }

    fn replace(&mut self, url: &str) -> qs_core::Result<()> {
        match host_replace_state(url) {
            None => Ok(()),
            Some(reason) => Err(QsError::ReplaceRejected(reason)),
        }
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(js_error)
}

/// Options are optional; `None` or an empty string means all defaults.
fn options<T: DeserializeOwned + Default>(json: Option<String>) -> Result<T, JsValue> {
    match json.as_deref() {
        None | Some("") => Ok(T::default()),
        Some(json) => from_json(json),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// Parse a query string. Returns the query object as JSON.
#[wasm_bindgen]
pub fn parse(query: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let object = qs_core::parse(query, &options(options_json)?);
    to_json(&object)
}

/// Serialize a JSON query object into a query string.
#[wasm_bindgen]
pub fn stringify(object_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let object: QueryObject = from_json(object_json)?;
    Ok(qs_core::stringify(&object, &options(options_json)?))
}

/// Split a URL into `{"url": ..., "query": {...}}` JSON.
#[wasm_bindgen(js_name = parseUrl)]
pub fn parse_url(url: &str, options_json: Option<String>) -> Result<String, JsValue> {
    to_json(&qs_core::parse_url(url, &options(options_json)?))
}

/// Build a URL from `{"url": ..., "query": {...}}` JSON.
#[wasm_bindgen(js_name = stringifyUrl)]
pub fn stringify_url(input_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let parsed: ParsedUrl = from_json(input_json)?;
    Ok(qs_core::stringify_url(&parsed, &options(options_json)?))
}

/// Parse the page's current query. Returns JSON.
#[wasm_bindgen]
pub fn get(options_json: Option<String>) -> Result<String, JsValue> {
    let object = qs_core::get(&BrowserAddress, &options(options_json)?).map_err(js_error)?;
    to_json(&object)
}

/// Replace the page's query with a JSON query object.
#[wasm_bindgen]
pub fn set(object_json: &str, options_json: Option<String>) -> Result<(), JsValue> {
    let object: QueryObject = from_json(object_json)?;
    qs_core::set(&mut BrowserAddress, &object, &options(options_json)?).map_err(js_error)
}

/// Merge a JSON query object over the page's query.
#[wasm_bindgen]
pub fn update(updates_json: &str, options_json: Option<String>) -> Result<(), JsValue> {
    let updates: QueryObject = from_json(updates_json)?;
    qs_core::update(&mut BrowserAddress, &updates, &options(options_json)?).map_err(js_error)
}

/// Drop the page's query and fragment.
#[wasm_bindgen]
pub fn remove() -> Result<(), JsValue> {
    qs_core::remove(&mut BrowserAddress).map_err(js_error)
}

/// Delete keys from the page's query.
#[wasm_bindgen(js_name = removeKeys)]
pub fn remove_keys(keys: Vec<String>, options_json: Option<String>) -> Result<(), JsValue> {
    qs_core::remove_keys(&mut BrowserAddress, keys.as_slice(), &options(options_json)?)
        .map_err(js_error)
}
