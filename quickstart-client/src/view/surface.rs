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

use crate::sdk::{TrackKind, TrackRef};
use std::rc::Rc;

/// Address of a media element in the room view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MediaSlot {
    /// One of the pre-allocated elements in a participant's container.
    Thumbnail {
        sid: String,
        kind: TrackKind,
        index: usize,
    },
    /// The video element of the main (active participant) view.
    Main,
}

impl MediaSlot {
    pub fn thumbnail(sid: &str, kind: TrackKind, index: usize) -> Self {
        MediaSlot::Thumbnail {
            sid: sid.to_string(),
            kind,
            index,
        }
    }
}

/// The surface the view manager draws on.
///
/// Implementations make no decisions: they create and remove containers,
/// toggle classes and move media sources as told. In the browser this is
/// [`DomRoomView`](crate::dom::DomRoomView).
pub trait RoomView {
    /// Add a container with the pre-allocated media slots. `on_click` fires
    /// on every click on the container.
    fn create_container(&self, sid: &str, identity: &str, is_local: bool, on_click: Rc<dyn Fn()>);

    fn remove_container(&self, sid: &str);

    fn set_container_state(&self, sid: &str, active: bool, pinned: bool);

    /// Id of the track currently feeding `slot`, if any.
    fn slot_source(&self, slot: &MediaSlot) -> Option<String>;

    fn attach(&self, slot: &MediaSlot, track: &TrackRef);

    /// Clears `slot` only if `track` is its current source.
    fn detach(&self, slot: &MediaSlot, track: &TrackRef);

    fn set_visible(&self, slot: &MediaSlot, visible: bool);

    fn set_main_identity(&self, identity: &str);

    /// Drop whatever source the main view holds.
    fn clear_main(&self);
}
