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
    ACTIVE_CLASS, ACTIVE_PARTICIPANT_ID, MEDIA_SLOTS_PER_KIND, PARTICIPANTS_ID, PINNED_CLASS,
    THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH,
};
use crate::sdk::{TrackKind, TrackRef};
use crate::view::{MediaSlot, RoomView};
use log::{error, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlMediaElement, HtmlVideoElement, MediaStream};

/// [`RoomView`] over the quickstart page's `#participants` list and
/// `#active-participant` main view.
pub struct DomRoomView {
    participants: Element,
    main: Element,
    main_video: HtmlVideoElement,
    click_handlers: RefCell<HashMap<String, Closure<dyn FnMut()>>>,
}

impl std::fmt::Debug for DomRoomView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomRoomView")
            .field("containers", &self.click_handlers.borrow().len())
            .finish()
    }
}

impl DomRoomView {
    pub fn from_document() -> Result<Self, JsValue> {
        let participants: Element = element_by_id(PARTICIPANTS_ID)?;
        let active: Element = element_by_id(ACTIVE_PARTICIPANT_ID)?;
        let main = active
            .query_selector("div.participant.main")?
            .ok_or_else(|| JsValue::from_str("missing main participant view"))?;
        let main_video = main
            .query_selector("video")?
            .ok_or_else(|| JsValue::from_str("missing main video element"))?
            .dyn_into::<HtmlVideoElement>()?;
        Ok(Self {
            participants,
            main,
            main_video,
            click_handlers: RefCell::new(HashMap::new()),
        })
    }

    fn container(&self, sid: &str) -> Option<Element> {
        gloo_utils::document().get_element_by_id(sid)
    }

    fn media_element(&self, slot: &MediaSlot) -> Option<HtmlMediaElement> {
        match slot {
            MediaSlot::Main => Some(self.main_video.clone().unchecked_into()),
            MediaSlot::Thumbnail { sid, kind, index } => self
                .container(sid)?
                .query_selector(&format!("{}[data-slot='{}']", kind.as_str(), index))
                .ok()
                .flatten()
                .and_then(|element| element.dyn_into::<HtmlMediaElement>().ok()),
        }
    }

    fn build_container(
        &self,
        sid: &str,
        identity: &str,
        is_local: bool,
        on_click: Rc<dyn Fn()>,
    ) -> Result<(), JsValue> {
        let document = gloo_utils::document();
        let container = document.create_element("div")?;
        container.set_class_name("participant");
        container.set_id(sid);
        container.set_attribute("data-identity", identity)?;

        for kind in [TrackKind::Audio, TrackKind::Video] {
            for index in 0..MEDIA_SLOTS_PER_KIND {
                let media = document
                    .create_element(kind.as_str())?
                    .dyn_into::<HtmlMediaElement>()?;
                media.set_autoplay(true);
                media.set_attribute("data-slot", &index.to_string())?;
                match kind {
                    TrackKind::Video => {
                        media.set_muted(true);
                        media.set_attribute("playsinline", "")?;
                        media.set_attribute("width", &THUMBNAIL_WIDTH.to_string())?;
                        media.set_attribute("height", &THUMBNAIL_HEIGHT.to_string())?;
                    }
                    // Own audio is never played back.
                    TrackKind::Audio => media.set_muted(is_local),
                }
                set_style(&media, "opacity", "0");
                container.append_child(&media)?;
            }
        }

        let handler = Closure::<dyn FnMut()>::new(move || on_click());
        container.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        self.participants.append_child(&container)?;
        self.click_handlers
            .borrow_mut()
            .insert(sid.to_string(), handler);
        Ok(())
    }
}

fn source_track_id(media: &HtmlMediaElement) -> Option<String> {
    let stream = media.src_object()?;
    let track = stream.get_tracks().get(0);
    track
        .dyn_into::<web_sys::MediaStreamTrack>()
        .ok()
        .map(|track| track.id())
}

impl RoomView for DomRoomView {
    fn create_container(&self, sid: &str, identity: &str, is_local: bool, on_click: Rc<dyn Fn()>) {
        if let Err(e) = self.build_container(sid, identity, is_local, on_click) {
            error!("failed to create container for {}: {}", sid, js_message(&e));
        }
    }

    fn remove_container(&self, sid: &str) {
        if let Some(container) = self.container(sid) {
            container.remove();
        }
        self.click_handlers.borrow_mut().remove(sid);
    }

    fn set_container_state(&self, sid: &str, active: bool, pinned: bool) {
        let Some(container) = self.container(sid) else {
            return;
        };
        let classes = container.class_list();
        let result = classes
            .toggle_with_force(ACTIVE_CLASS, active)
            .and_then(|_| classes.toggle_with_force(PINNED_CLASS, pinned));
        if let Err(e) = result {
            error!("failed to update classes of {}: {}", sid, js_message(&e));
        }
    }

    fn slot_source(&self, slot: &MediaSlot) -> Option<String> {
        self.media_element(slot).and_then(|media| source_track_id(&media))
    }

    fn attach(&self, slot: &MediaSlot, track: &TrackRef) {
        let Some(media) = self.media_element(slot) else {
            warn!("no media element for {:?}", slot);
            return;
        };
        let Some(source) = track.media_stream_track() else {
            warn!("track {} has no browser track to attach", track.id());
            return;
        };
        match MediaStream::new_with_tracks(&js_sys::Array::of1(&source)) {
            Ok(stream) => media.set_src_object(Some(&stream)),
            Err(e) => error!("failed to attach {}: {}", track.id(), js_message(&e)),
        }
    }

    fn detach(&self, slot: &MediaSlot, track: &TrackRef) {
        if let Some(media) = self.media_element(slot) {
            if source_track_id(&media).as_deref() == Some(track.id()) {
                media.set_src_object(None);
            }
        }
    }

    fn set_visible(&self, slot: &MediaSlot, visible: bool) {
        if let Some(media) = self.media_element(slot) {
            set_style(&media, "opacity", if visible { "" } else { "0" });
        }
    }

    fn set_main_identity(&self, identity: &str) {
        if let Err(e) = self.main.set_attribute("data-identity", identity) {
            error!("failed to set identity: {}", js_message(&e));
        }
    }

    fn clear_main(&self) {
        self.main_video.set_src_object(None);
    }
}
