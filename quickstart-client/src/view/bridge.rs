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

//! Moves subscribed tracks in and out of media slots.

use super::manager::SessionView;
use super::surface::MediaSlot;
use crate::constants::MEDIA_SLOTS_PER_KIND;
use crate::sdk::{
    Participant, ParticipantListener, ParticipantRef, PublicationListener, PublicationRef,
    TrackKind, TrackRef,
};
use log::debug;
use std::rc::{Rc, Weak};

impl SessionView {
    /// Attach the publication's track if already subscribed, then follow its
    /// subscription changes.
    pub fn track_published(self: &Rc<Self>, publication: PublicationRef, participant: &ParticipantRef) {
        debug!(
            "{} published {} track '{}'",
            participant.identity(),
            publication.kind(),
            publication.track_name()
        );
        if let Some(track) = publication.track() {
            self.attach_track(&track, &**participant);
        }
        publication.add_listener(Rc::new(SubscriptionListener {
            session: Rc::downgrade(self),
            participant: Rc::downgrade(participant),
        }));
    }

    /// Put `track` into the first free slot of its kind. When both slots are
    /// taken the thumbnail is left as is.
    pub fn attach_track(&self, track: &TrackRef, participant: &dyn Participant) {
        let kind = track.kind();
        let slots = thumbnail_slots(participant.sid(), kind);

        if slots
            .iter()
            .any(|slot| self.view.slot_source(slot).as_deref() == Some(track.id()))
        {
            debug!("track {} already attached for {}", track.id(), participant.sid());
        } else if let Some(slot) = slots
            .iter()
            .find(|slot| self.view.slot_source(slot).is_none())
        {
            self.view.attach(slot, track);
            self.view.set_visible(slot, true);
        } else {
            debug!(
                "no free {} slot for {}, not attaching {}",
                kind,
                participant.sid(),
                track.id()
            );
        }

        if kind == TrackKind::Video && self.is_active(participant) {
            self.view.attach(&MediaSlot::Main, track);
            self.view.set_visible(&MediaSlot::Main, true);
        }
    }

    pub fn detach_track(&self, track: &TrackRef, participant: &dyn Participant) {
        let kind = track.kind();
        for slot in thumbnail_slots(participant.sid(), kind) {
            if self.view.slot_source(&slot).as_deref() == Some(track.id()) {
                self.view.detach(&slot, track);
                self.view.set_visible(&slot, false);
            }
        }

        if kind == TrackKind::Video && self.is_active(participant) {
            self.view.detach(&MediaSlot::Main, track);
            self.view.set_visible(&MediaSlot::Main, false);
        }
    }
}

fn thumbnail_slots(sid: &str, kind: TrackKind) -> Vec<MediaSlot> {
    (0..MEDIA_SLOTS_PER_KIND)
        .map(|index| MediaSlot::thumbnail(sid, kind, index))
        .collect()
}

pub(super) struct TrackPublishedListener {
    session: Weak<SessionView>,
    participant: Weak<dyn Participant>,
}

impl TrackPublishedListener {
    pub(super) fn new(session: Weak<SessionView>, participant: Weak<dyn Participant>) -> Self {
        Self {
            session,
            participant,
        }
    }
}

impl ParticipantListener for TrackPublishedListener {
    fn on_track_published(&self, publication: PublicationRef) {
        if let (Some(session), Some(participant)) =
            (self.session.upgrade(), self.participant.upgrade())
        {
            session.track_published(publication, &participant);
        }
    }
}

struct SubscriptionListener {
    session: Weak<SessionView>,
    participant: Weak<dyn Participant>,
}

impl PublicationListener for SubscriptionListener {
    fn on_subscribed(&self, track: TrackRef) {
        debug!("subscribed to {} track {}", track.kind(), track.id());
        if let (Some(session), Some(participant)) =
            (self.session.upgrade(), self.participant.upgrade())
        {
            session.attach_track(&track, &*participant);
        }
    }

    fn on_unsubscribed(&self, track: TrackRef) {
        debug!("unsubscribed from {} track {}", track.kind(), track.id());
        if let (Some(session), Some(participant)) =
            (self.session.upgrade(), self.participant.upgrade())
        {
            session.detach_track(&track, &*participant);
        }
    }
}
