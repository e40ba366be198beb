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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Global event bus for room view events.
//!
//! A broadcast channel any UI layer can subscribe to in order to follow the
//! room view without holding a reference to the session.
//!
//! # Example
//!
//! ```ignore
//! use quickstart_client::{subscribe_view_events, RoomViewEvent};
//!
//! let mut rx = subscribe_view_events();
//! wasm_bindgen_futures::spawn_local(async move {
//!     while let Ok(event) = rx.recv().await {
//!         if let RoomViewEvent::ActiveParticipantChanged { sid, pinned } = event {
//!             // highlight `sid` in a side panel
//!         }
//!     }
//! });
//! ```

use crate::events::RoomViewEvent;
use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};
use once_cell::sync::Lazy;

/// Capacity of the event bus channel
pub const EVENT_BUS_CAPACITY: usize = 256;

struct Bus {
    sender: Sender<RoomViewEvent>,
    // Keeps the channel open while nobody is subscribed.
    _keepalive: InactiveReceiver<RoomViewEvent>,
}

static BUS: Lazy<Bus> = Lazy::new(|| {
    let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
    // Drop the oldest event instead of failing when a subscriber lags.
    sender.set_overflow(true);
    Bus {
        sender,
        _keepalive: receiver.deactivate(),
    }
});

/// Get a sender for emitting view events.
pub fn global_view_sender() -> Sender<RoomViewEvent> {
    BUS.sender.clone()
}

/// Subscribe to view events.
///
/// Returns a receiver for all future events; past events are not replayed.
pub fn subscribe_view_events() -> Receiver<RoomViewEvent> {
    BUS.sender.new_receiver()
}

/// Emit a view event to all subscribers. Never blocks.
pub fn emit_view_event(event: RoomViewEvent) {
    let _ = BUS.sender.try_broadcast(event);
}
