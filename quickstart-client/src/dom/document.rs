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

use super::{element_by_id, js_message, set_style};
use crate::constants::{
    PAGE_LOADER_ID, PDF_CANVAS_ID, PDF_CONTENTS_ID, PDF_CURRENT_PAGE_ID, PDF_LOADER_ID,
    PDF_NEXT_ID, PDF_PREV_ID, PDF_TOTAL_PAGES_ID,
};
use crate::document::{DocumentControls, RenderSurface};
use crate::error::SessionError;
use crate::sdk::{Track, TrackKind, TrackRef};
use log::error;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlElement, MediaStreamTrack};

/// A browser `MediaStreamTrack` produced locally.
#[derive(Debug)]
pub struct WebTrack {
    id: String,
    kind: TrackKind,
    track: MediaStreamTrack,
}

impl WebTrack {
    pub fn new(track: MediaStreamTrack, kind: TrackKind) -> Self {
        Self {
            id: track.id(),
            kind,
            track,
        }
    }
}

impl Track for WebTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn stop(&self) {
        self.track.stop();
    }

    fn media_stream_track(&self) -> Option<MediaStreamTrack> {
        Some(self.track.clone())
    }
}

/// The `#pdf-canvas` element.
#[derive(Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn from_document() -> Result<Self, JsValue> {
        Ok(Self::new(element_by_id(PDF_CANVAS_ID)?))
    }
}

impl RenderSurface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn set_height(&self, height: u32) {
        self.canvas.set_height(height);
    }

    fn capture_track(&self, frame_rate: u32) -> Result<TrackRef, SessionError> {
        let stream = self
            .canvas
            .capture_stream_with_frame_request_rate(frame_rate as f64)
            .map_err(|e| SessionError::Capture(js_message(&e)))?;
        let track = stream
            .get_video_tracks()
            .get(0)
            .dyn_into::<MediaStreamTrack>()
            .map_err(|_| SessionError::Capture("canvas stream has no video track".to_string()))?;
        Ok(Rc::new(WebTrack::new(track, TrackKind::Video)))
    }

    fn canvas(&self) -> Option<HtmlCanvasElement> {
        Some(self.canvas.clone())
    }
}

/// Loaders, page counters and navigation buttons around the canvas.
#[derive(Debug)]
pub struct DomDocumentControls {
    loader: HtmlElement,
    contents: HtmlElement,
    total_pages: HtmlElement,
    current_page: HtmlElement,
    next: HtmlButtonElement,
    prev: HtmlButtonElement,
    canvas: HtmlElement,
    page_loader: HtmlElement,
}

impl DomDocumentControls {
    pub fn from_document() -> Result<Self, JsValue> {
        Ok(Self {
            loader: element_by_id(PDF_LOADER_ID)?,
            contents: element_by_id(PDF_CONTENTS_ID)?,
            total_pages: element_by_id(PDF_TOTAL_PAGES_ID)?,
            current_page: element_by_id(PDF_CURRENT_PAGE_ID)?,
            next: element_by_id(PDF_NEXT_ID)?,
            prev: element_by_id(PDF_PREV_ID)?,
            canvas: element_by_id(PDF_CANVAS_ID)?,
            page_loader: element_by_id(PAGE_LOADER_ID)?,
        })
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

impl DocumentControls for DomDocumentControls {
    fn set_document_loading(&self, loading: bool) {
        set_style(&self.loader, "display", display(loading));
        if !loading {
            set_style(&self.contents, "display", "block");
        }
    }

    fn set_total_pages(&self, total: u32) {
        self.total_pages.set_inner_text(&total.to_string());
    }

    fn set_current_page(&self, page: u32) {
        self.current_page.set_inner_text(&page.to_string());
    }

    fn set_navigation_enabled(&self, enabled: bool) {
        self.next.set_disabled(!enabled);
        self.prev.set_disabled(!enabled);
    }

    fn set_page_loading(&self, loading: bool) {
        set_style(&self.canvas, "display", display(!loading));
        set_style(&self.page_loader, "display", display(loading));
    }

    fn set_page_loader_height(&self, height: u32) {
        let px = format!("{height}px");
        set_style(&self.page_loader, "height", &px);
        set_style(&self.page_loader, "line-height", &px);
    }

    fn alert(&self, message: &str) {
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            error!("alert failed: {}", js_message(&e));
        }
    }
}
