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

//! Seams to the real-time media SDK.
//!
//! The SDK owns transport, codecs, signaling and room state; this crate only
//! sees rooms, participants, publications and tracks through these traits and
//! reacts to the events delivered to the listener traits. Everything runs on
//! one thread, so handles are `Rc` and futures are `LocalBoxFuture`.

use crate::config::ConnectOptions;
use crate::error::SessionError;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub type TrackRef = Rc<dyn Track>;
pub type PublicationRef = Rc<dyn TrackPublication>;
pub type ParticipantRef = Rc<dyn Participant>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    /// Tag name of the media element that plays this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscriber-side priority hint. Has no effect in peer-to-peer rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackPriority {
    Low,
    Standard,
    High,
}

/// A live media track.
pub trait Track: fmt::Debug {
    fn id(&self) -> &str;

    fn kind(&self) -> TrackKind;

    /// `None` clears a previously set priority.
    fn set_priority(&self, _priority: Option<TrackPriority>) {}

    fn stop(&self) {}

    /// Underlying browser track, used when attaching to a media element.
    #[cfg(feature = "wasm")]
    fn media_stream_track(&self) -> Option<web_sys::MediaStreamTrack> {
        None
    }
}

pub trait PublicationListener {
    fn on_subscribed(&self, track: TrackRef);
    fn on_unsubscribed(&self, track: TrackRef);
}

/// A track a participant made available; `track()` is `Some` while
/// subscribed.
pub trait TrackPublication: fmt::Debug {
    fn kind(&self) -> TrackKind;

    fn track_name(&self) -> &str;

    fn track(&self) -> Option<TrackRef>;

    fn add_listener(&self, listener: Rc<dyn PublicationListener>);
}

pub trait ParticipantListener {
    fn on_track_published(&self, publication: PublicationRef);
}

pub trait Participant: fmt::Debug {
    /// Unique per session; two handles with the same sid are the same
    /// participant.
    fn sid(&self) -> &str;

    fn identity(&self) -> &str;

    fn publications(&self) -> Vec<PublicationRef>;

    fn add_listener(&self, listener: Rc<dyn ParticipantListener>);

    /// Currently subscribed video tracks, in publication order.
    fn video_tracks(&self) -> Vec<TrackRef> {
        self.publications()
            .iter()
            .filter(|publication| publication.kind() == TrackKind::Video)
            .filter_map(|publication| publication.track())
            .collect()
    }
}

/// Identity comparison for participant handles.
pub fn same_participant(a: &dyn Participant, b: &dyn Participant) -> bool {
    a.sid() == b.sid()
}

pub trait RoomListener {
    fn on_participant_connected(&self, participant: ParticipantRef);
    fn on_participant_disconnected(&self, participant: ParticipantRef);
    fn on_dominant_speaker_changed(&self, speaker: Option<ParticipantRef>);
    /// Fired once; `error` is `None` for a graceful leave.
    fn on_disconnected(&self, error: Option<SessionError>);
}

#[derive(Clone, Debug, PartialEq)]
pub struct PublishOptions {
    pub name: String,
    pub priority: TrackPriority,
}

pub trait Room {
    fn name(&self) -> &str;

    fn local_participant(&self) -> ParticipantRef;

    /// Remote participants currently in the room.
    fn participants(&self) -> Vec<ParticipantRef>;

    fn dominant_speaker(&self) -> Option<ParticipantRef>;

    fn add_listener(&self, listener: Rc<dyn RoomListener>);

    fn publish_track(
        &self,
        track: TrackRef,
        options: PublishOptions,
    ) -> LocalBoxFuture<'_, Result<(), SessionError>>;

    /// Leave the room. The SDK answers with `on_disconnected`.
    fn disconnect(&self);
}

/// Entry point into the SDK.
pub trait RoomConnector {
    type Room: Room + 'static;

    fn connect<'a>(
        &'a self,
        token: &'a str,
        options: &'a ConnectOptions,
    ) -> LocalBoxFuture<'a, Result<Rc<Self::Room>, SessionError>>;
}
