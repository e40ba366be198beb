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

//! Wiring of page-level events: leave button, unload, document navigation.

use super::{element_by_id, js_message, set_style, CanvasSurface, DomDocumentControls, DomRoomView, PdfJsLoader};
use crate::config::{ClientConfig, ConnectOptions};
use crate::constants::{LEAVE_ROOM_ID, PDF_NEXT_ID, PDF_PREV_ID, SHOW_PDF_BUTTON_ID};
use crate::document::DocumentViewer;
use crate::logging::init_logging;
use crate::sdk::{Room, RoomConnector};
use crate::session::RoomSession;
use anyhow::anyhow;
use log::{error, info};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Leave-button and unload handlers of a session. Dropping it unregisters
/// them.
pub struct PageBindings {
    leave_button: HtmlElement,
    on_leave: Closure<dyn FnMut()>,
    _on_unload: Closure<dyn FnMut()>,
}

impl Drop for PageBindings {
    fn drop(&mut self) {
        let _ = self
            .leave_button
            .remove_event_listener_with_callback("click", self.on_leave.as_ref().unchecked_ref());
        let window = gloo_utils::window();
        window.set_onbeforeunload(None);
        window.set_onpagehide(None);
    }
}

pub fn bind_session<R: Room + 'static>(session: &Rc<RoomSession<R>>) -> Result<PageBindings, JsValue> {
    let leave_button: HtmlElement = element_by_id(LEAVE_ROOM_ID)?;

    let on_leave = {
        let session = Rc::downgrade(session);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(session) = session.upgrade() {
                session.leave();
            }
        })
    };
    leave_button.add_event_listener_with_callback("click", on_leave.as_ref().unchecked_ref())?;

    let on_unload = {
        let session = Rc::downgrade(session);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(session) = session.upgrade() {
                session.page_unloading();
            }
        })
    };
    let window = gloo_utils::window();
    window.set_onbeforeunload(Some(on_unload.as_ref().unchecked_ref()));
    // iOS Safari fires pagehide instead of beforeunload.
    window.set_onpagehide(Some(on_unload.as_ref().unchecked_ref()));

    Ok(PageBindings {
        leave_button,
        on_leave,
        _on_unload: on_unload,
    })
}

/// Prev/next and "show document" buttons of the viewer.
pub struct NavigationBindings {
    _handlers: Vec<Closure<dyn FnMut()>>,
}

fn on_click(id: &str, handler: impl FnMut() + 'static) -> Result<Closure<dyn FnMut()>, JsValue> {
    let element: HtmlElement = element_by_id(id)?;
    let handler = Closure::<dyn FnMut()>::new(handler);
    element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    Ok(handler)
}

pub fn bind_document_navigation(
    viewer: &Rc<DocumentViewer>,
    document_url: String,
) -> Result<NavigationBindings, JsValue> {
    let previous = {
        let viewer = Rc::clone(viewer);
        on_click(PDF_PREV_ID, move || {
            let viewer = Rc::clone(&viewer);
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewer.previous_page().await;
            });
        })?
    };
    let next = {
        let viewer = Rc::clone(viewer);
        on_click(PDF_NEXT_ID, move || {
            let viewer = Rc::clone(&viewer);
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewer.next_page().await;
            });
        })?
    };
    let show = {
        let viewer = Rc::clone(viewer);
        let button: HtmlElement = element_by_id(SHOW_PDF_BUTTON_ID)?;
        let shown = Cell::new(false);
        on_click(SHOW_PDF_BUTTON_ID, move || {
            if shown.replace(true) {
                return;
            }
            set_style(&button, "display", "none");
            let viewer = Rc::clone(&viewer);
            let url = document_url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewer.show_document(&url).await;
            });
        })?
    };
    Ok(NavigationBindings {
        _handlers: vec![previous, next, show],
    })
}

/// Join from the quickstart page and run until the room disconnects.
pub async fn run_in_page<C: RoomConnector>(
    connector: &C,
    token: &str,
    options: ConnectOptions,
    config: ClientConfig,
) -> anyhow::Result<()> {
    init_logging(config.level_filter());

    let js_err = |e: JsValue| anyhow!(js_message(&e));
    let view = Rc::new(DomRoomView::from_document().map_err(js_err)?);
    let viewer = Rc::new(DocumentViewer::new(
        Rc::new(PdfJsLoader),
        Rc::new(CanvasSurface::from_document().map_err(js_err)?),
        Rc::new(DomDocumentControls::from_document().map_err(js_err)?),
    ));
    let _navigation =
        bind_document_navigation(&viewer, config.sample_document_url.clone()).map_err(js_err)?;

    let session = Rc::new(
        RoomSession::<C::Room>::join(connector, token, options, &config, view, &viewer).await?,
    );
    let bindings = bind_session(&session).map_err(js_err)?;

    let result = session.closed().await;
    drop(bindings);
    match &result {
        Ok(()) => info!("room session ended"),
        Err(e) => error!("room session ended with error: {}", e),
    }
    result.map_err(Into::into)
}
