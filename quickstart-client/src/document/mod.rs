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

//! Paged document viewer whose canvas doubles as a video source.
//!
//! The rasterizer (pdf.js in the browser) sits behind [`DocumentLoader`],
//! [`Document`] and [`DocumentPage`]; the canvas behind [`RenderSurface`];
//! the page chrome (loaders, page counters, prev/next buttons, alerts)
//! behind [`DocumentControls`].

mod viewer;

pub use viewer::DocumentViewer;

use crate::error::{DocumentError, SessionError};
use crate::sdk::TrackRef;
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Page dimensions at a given scale, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

pub trait DocumentLoader {
    fn load<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Rc<dyn Document>, DocumentError>>;
}

pub trait Document {
    fn num_pages(&self) -> u32;

    /// Pages are numbered from 1.
    fn page(&self, number: u32) -> LocalBoxFuture<'_, Result<Rc<dyn DocumentPage>, DocumentError>>;
}

pub trait DocumentPage {
    fn viewport(&self, scale: f64) -> Viewport;

    fn render<'a>(
        &'a self,
        surface: &'a dyn RenderSurface,
        viewport: Viewport,
    ) -> LocalBoxFuture<'a, Result<(), DocumentError>>;
}

/// Fixed-width canvas a page is rendered into.
pub trait RenderSurface {
    fn width(&self) -> u32;

    fn set_height(&self, height: u32);

    /// Capture the canvas as a live video track.
    fn capture_track(&self, frame_rate: u32) -> Result<TrackRef, SessionError>;

    #[cfg(feature = "wasm")]
    fn canvas(&self) -> Option<web_sys::HtmlCanvasElement> {
        None
    }
}

pub trait DocumentControls {
    /// Loader shown while the document loads; contents shown once done.
    fn set_document_loading(&self, loading: bool);

    fn set_total_pages(&self, total: u32);

    fn set_current_page(&self, page: u32);

    fn set_navigation_enabled(&self, enabled: bool);

    /// While loading, the canvas is hidden and the page loader shown.
    fn set_page_loading(&self, loading: bool);

    fn set_page_loader_height(&self, height: u32);

    /// Blocking alert.
    fn alert(&self, message: &str);
}
