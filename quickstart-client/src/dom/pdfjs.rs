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

//! Bindings to the global `pdfjsLib` (pdf.js) loaded by the page.

use super::js_message;
use crate::document::{Document, DocumentLoader, DocumentPage, RenderSurface, Viewport};
use crate::error::DocumentError;
use futures::future::LocalBoxFuture;
use js_sys::{Object, Promise, Reflect};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = pdfjsLib, js_name = getDocument)]
    fn get_document(source: &JsValue) -> PdfLoadingTask;

    type PdfLoadingTask;

    #[wasm_bindgen(method, getter = promise)]
    fn loading_promise(this: &PdfLoadingTask) -> Promise;

    type PdfDocumentProxy;

    #[wasm_bindgen(method, getter = numPages)]
    fn num_pages(this: &PdfDocumentProxy) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocumentProxy, number: u32) -> Promise;

    type PdfPageProxy;

    #[wasm_bindgen(method, js_name = getViewport)]
    fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> PdfViewport;

    #[wasm_bindgen(method)]
    fn render(this: &PdfPageProxy, params: &JsValue) -> PdfRenderTask;

    #[derive(Clone)]
    type PdfViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PdfViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PdfViewport) -> f64;

    type PdfRenderTask;

    #[wasm_bindgen(method, getter = promise)]
    fn render_promise(this: &PdfRenderTask) -> Promise;
}

#[derive(Serialize)]
struct DocumentSource<'a> {
    url: &'a str,
}

fn object_with(entries: &[(&str, &JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

/// [`DocumentLoader`] backed by pdf.js.
#[derive(Debug, Default)]
pub struct PdfJsLoader;

impl DocumentLoader for PdfJsLoader {
    fn load<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Rc<dyn Document>, DocumentError>> {
        Box::pin(async move {
            let source = serde_wasm_bindgen::to_value(&DocumentSource { url })
                .map_err(|e| DocumentError::Load(e.to_string()))?;
            let proxy = JsFuture::from(get_document(&source).loading_promise())
                .await
                .map_err(|e| DocumentError::Load(js_message(&e)))?;
            Ok(Rc::new(PdfJsDocument {
                proxy: proxy.unchecked_into(),
            }) as Rc<dyn Document>)
        })
    }
}

struct PdfJsDocument {
    proxy: PdfDocumentProxy,
}

impl Document for PdfJsDocument {
    fn num_pages(&self) -> u32 {
        self.proxy.num_pages()
    }

    fn page(&self, number: u32) -> LocalBoxFuture<'_, Result<Rc<dyn DocumentPage>, DocumentError>> {
        Box::pin(async move {
            let proxy = JsFuture::from(self.proxy.get_page(number))
                .await
                .map_err(|e| DocumentError::Page {
                    page: number,
                    message: js_message(&e),
                })?;
            Ok(Rc::new(PdfJsPage {
                number,
                proxy: proxy.unchecked_into(),
            }) as Rc<dyn DocumentPage>)
        })
    }
}

struct PdfJsPage {
    number: u32,
    proxy: PdfPageProxy,
}

impl PdfJsPage {
    fn js_viewport(&self, scale: f64) -> Option<PdfViewport> {
        let params = object_with(&[("scale", &JsValue::from_f64(scale))]).ok()?;
        Some(self.proxy.get_viewport(&params))
    }

    fn render_error(&self, message: String) -> DocumentError {
        DocumentError::Render {
            page: self.number,
            message,
        }
    }
}

impl DocumentPage for PdfJsPage {
    fn viewport(&self, scale: f64) -> Viewport {
        let (width, height) = self
            .js_viewport(scale)
            .map_or((0.0, 0.0), |viewport| (viewport.width(), viewport.height()));
        Viewport {
            width,
            height,
            scale,
        }
    }

    fn render<'a>(
        &'a self,
        surface: &'a dyn RenderSurface,
        viewport: Viewport,
    ) -> LocalBoxFuture<'a, Result<(), DocumentError>> {
        Box::pin(async move {
            let canvas = surface
                .canvas()
                .ok_or_else(|| self.render_error("surface is not a canvas".to_string()))?;
            let options = object_with(&[("alpha", &JsValue::FALSE)])
                .map_err(|e| self.render_error(js_message(&e)))?;
            let context = canvas
                .get_context_with_context_options("2d", &options)
                .map_err(|e| self.render_error(js_message(&e)))?
                .ok_or_else(|| self.render_error("no 2d context".to_string()))?;
            let js_viewport = self
                .js_viewport(viewport.scale)
                .ok_or_else(|| self.render_error("invalid viewport".to_string()))?;
            let params = object_with(&[
                ("canvasContext", &JsValue::from(context)),
                ("viewport", &JsValue::from(js_viewport)),
            ])
            .map_err(|e| self.render_error(js_message(&e)))?;
            JsFuture::from(self.proxy.render(&params).render_promise())
                .await
                .map_err(|e| self.render_error(js_message(&e)))?;
            Ok(())
        })
    }
}
