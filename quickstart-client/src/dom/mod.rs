/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Browser implementations of the view and document surfaces.
//!
//! Everything here works against the fixed element ids of the quickstart
//! page (see [`crate::constants`]). The media SDK itself is supplied by the
//! host through a [`RoomConnector`](crate::RoomConnector).

mod bindings;
mod document;
mod pdfjs;
mod room_view;

pub use bindings::{bind_document_navigation, bind_session, run_in_page, NavigationBindings, PageBindings};
pub use document::{CanvasSurface, DomDocumentControls, WebTrack};
pub use pdfjs::PdfJsLoader;
pub use room_view::DomRoomView;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

pub(crate) fn element_by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    gloo_utils::document()
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::error!("failed to set {property}: {e:?}");
    }
}

/// Best-effort message of a JS exception.
pub(crate) fn js_message(error: &JsValue) -> String {
    error
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{error:?}"))
}
