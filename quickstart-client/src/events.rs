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

//! Framework-agnostic view events.
//!
//! These events are emitted via the event bus and can be subscribed to by any
//! frontend that wants to mirror the room view (Yew, Leptos, plain DOM, ...).

/// Events emitted while a room session drives the view.
#[derive(Clone, Debug, PartialEq)]
pub enum RoomViewEvent {
    // === Session Events ===
    /// Connected to the room
    Connected { room: String },

    /// The room was left or dropped; `error` is set when it was not graceful
    Disconnected { error: Option<String> },

    // === Participant Events ===
    /// A participant container was created
    ParticipantAdded { sid: String, identity: String },

    /// A participant container was removed
    ParticipantRemoved { sid: String },

    /// The main view now shows `sid`
    ActiveParticipantChanged { sid: String, pinned: bool },

    // === Document Events ===
    /// A document page finished rendering into the canvas
    PageRendered { page: u32, total: u32 },
}
