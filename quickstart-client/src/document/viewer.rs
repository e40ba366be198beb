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

use super::{Document, DocumentControls, DocumentLoader, RenderSurface};
use crate::error::DocumentError;
use crate::event_bus::emit_view_event;
use crate::events::RoomViewEvent;
use futures::lock::Mutex;
use log::{debug, error, info};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct ViewerState {
    document: Option<Rc<dyn Document>>,
    current_page: u32,
    total_pages: u32,
    rendering: bool,
    // Bumped by every `show_page`; only the latest request owns the controls.
    generation: u64,
}

/// Loads a document and renders one page at a time into the surface.
///
/// Pages are not cached; every navigation renders from the document again.
pub struct DocumentViewer {
    loader: Rc<dyn DocumentLoader>,
    surface: Rc<dyn RenderSurface>,
    controls: Rc<dyn DocumentControls>,
    state: RefCell<ViewerState>,
    // Held while drawing so two renders never share the canvas.
    canvas: Mutex<()>,
}

impl std::fmt::Debug for DocumentViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DocumentViewer")
            .field("current_page", &state.current_page)
            .field("total_pages", &state.total_pages)
            .field("rendering", &state.rendering)
            .finish_non_exhaustive()
    }
}

impl DocumentViewer {
    pub fn new(
        loader: Rc<dyn DocumentLoader>,
        surface: Rc<dyn RenderSurface>,
        controls: Rc<dyn DocumentControls>,
    ) -> Self {
        Self {
            loader,
            surface,
            controls,
            state: RefCell::new(ViewerState::default()),
            canvas: Mutex::new(()),
        }
    }

    pub fn surface(&self) -> &Rc<dyn RenderSurface> {
        &self.surface
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state.borrow().total_pages
    }

    pub fn is_rendering(&self) -> bool {
        self.state.borrow().rendering
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.state.borrow().generation != generation
    }

    /// Load `url` and show its first page.
    pub async fn show_document(&self, url: &str) -> Result<(), DocumentError> {
        info!("loading document {}", url);
        self.controls.set_document_loading(true);

        let document = match self.loader.load(url).await {
            Ok(document) => document,
            Err(e) => {
                error!("{}", e);
                self.controls.alert(&e.to_string());
                return Err(e);
            }
        };

        let total = document.num_pages();
        {
            let mut state = self.state.borrow_mut();
            state.document = Some(document);
            state.total_pages = total;
        }

        self.controls.set_document_loading(false);
        self.controls.set_total_pages(total);
        self.show_page(1).await
    }

    /// Render page `number`. Navigation is disabled for the duration and
    /// re-enabled whether or not rendering succeeded.
    ///
    /// Requests queue on the canvas. A request overtaken by a later one
    /// resolves `Ok` and leaves the controls to the later one; it only draws
    /// if it had already started.
    pub async fn show_page(&self, number: u32) -> Result<(), DocumentError> {
        let (document, generation) = {
            let mut state = self.state.borrow_mut();
            let document = state.document.clone().ok_or(DocumentError::NotLoaded)?;
            state.generation += 1;
            state.rendering = true;
            state.current_page = number;
            (document, state.generation)
        };

        self.controls.set_navigation_enabled(false);
        self.controls.set_page_loading(true);
        self.controls.set_current_page(number);

        let _canvas = self.canvas.lock().await;
        if self.is_superseded(generation) {
            debug!("dropping render of page {}, superseded", number);
            return Ok(());
        }

        let result = self.render_page(&*document, number, generation).await;
        if self.is_superseded(generation) {
            debug!("page {} finished after a newer request", number);
            return Ok(());
        }
        if let Err(e) = &result {
            error!("{}", e);
            self.controls.alert(&e.to_string());
        }

        let total = {
            let mut state = self.state.borrow_mut();
            state.rendering = false;
            state.total_pages
        };
        self.controls.set_navigation_enabled(true);
        self.controls.set_page_loading(false);

        if result.is_ok() {
            debug!("rendered page {}/{}", number, total);
            emit_view_event(RoomViewEvent::PageRendered {
                page: number,
                total,
            });
        }
        result
    }

    async fn render_page(
        &self,
        document: &dyn Document,
        number: u32,
        generation: u64,
    ) -> Result<(), DocumentError> {
        let page = document.page(number).await?;
        if self.is_superseded(generation) {
            return Ok(());
        }

        // The canvas width is fixed, so scale the page to fit it.
        let original_width = page.viewport(1.0).width;
        if original_width <= 0.0 {
            return Err(DocumentError::Render {
                page: number,
                message: "page has no width".to_string(),
            });
        }
        let viewport = page.viewport(self.surface.width() as f64 / original_width);

        let height = viewport.height.round() as u32;
        self.surface.set_height(height);
        self.controls.set_page_loader_height(height);

        page.render(&*self.surface, viewport).await
    }

    /// Show the next page; a no-op on the last page or mid-render.
    pub async fn next_page(&self) -> Result<(), DocumentError> {
        let target = {
            let state = self.state.borrow();
            if state.document.is_none() || state.rendering || state.current_page >= state.total_pages {
                return Ok(());
            }
            state.current_page + 1
        };
        self.show_page(target).await
    }

    /// Show the previous page; a no-op on the first page or mid-render.
    pub async fn previous_page(&self) -> Result<(), DocumentError> {
        let target = {
            let state = self.state.borrow();
            if state.document.is_none() || state.rendering || state.current_page <= 1 {
                return Ok(());
            }
            state.current_page - 1
        };
        self.show_page(target).await
    }
}
