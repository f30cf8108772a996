//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, Event, EventTarget, HtmlAnchorElement, Url, Window,
};

use crate::core::error::{BindError, TransferError};
use crate::core::notice::PageLocation;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the page document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Look up an element by id and cast it.
///
/// Returns `None` when the element is absent or of another type.
pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Like [`element_by_id`], for elements the page contract requires.
pub fn require<T: JsCast>(id: &str) -> Result<T, BindError> {
    element_by_id(id).ok_or_else(|| BindError::MissingElement(format!("#{}", id)))
}

/// All elements matching a CSS selector.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Add or remove a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// `data-*` attributes of an element, names without the `data-` prefix.
pub fn data_attributes(element: &Element) -> Vec<(String, String)> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let value = element.get_attribute(&name)?;
            let key = name.strip_prefix("data-")?.to_string();
            Some((key, value))
        })
        .collect()
}

/// Attach an event listener for the lifetime of the page.
///
/// The closure is intentionally leaked: the page script binds once and the
/// listeners live until the next navigation.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Current pathname, query and fragment.
pub fn location() -> Option<PageLocation> {
    let location = window()?.location();
    Some(PageLocation {
        pathname: location.pathname().ok()?,
        search: location.search().unwrap_or_default(),
        hash: location.hash().unwrap_or_default(),
    })
}

/// Replace the visible URL without reloading or adding a history entry.
pub fn replace_url(url: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
    }
}

pub fn reload() {
    if let Some(window) = window() {
        let _ = window.location().reload();
    }
}

pub fn navigate(url: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(url);
    }
}

/// Blocking user notice.
pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

// =============================================================================
// Downloads
// =============================================================================

/// Hand `payload` to the browser as a download named `file_name`.
///
/// Goes through a temporary object URL which is revoked once the save has
/// been triggered.
pub fn save_bytes(file_name: &str, mime: &str, payload: &[u8]) -> Result<(), TransferError> {
    let document = document().ok_or_else(|| TransferError::SaveFailed("no document".into()))?;

    let parts = Array::of1(&Uint8Array::from(payload));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| TransferError::SaveFailed(format!("{:?}", e)))?;
    let href = Url::create_object_url_with_blob(&blob)
        .map_err(|e| TransferError::SaveFailed(format!("{:?}", e)))?;

    let link = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok());
    let result = match link {
        Some(link) => {
            link.set_href(&href);
            link.set_download(file_name);
            link.click();
            Ok(())
        }
        None => Err(TransferError::SaveFailed("cannot create link".into())),
    };

    let _ = Url::revoke_object_url(&href);
    result
}
