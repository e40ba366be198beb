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

use crate::sdk::{same_participant, Participant, ParticipantRef};

/// Which participant the main view shows and whether a user pinned it.
///
/// While `pinned` is set the active participant was picked by a click and
/// dominant speaker updates leave it alone.
#[derive(Debug, Default)]
pub struct ActiveSelection {
    active: Option<ParticipantRef>,
    pinned: bool,
}

impl ActiveSelection {
    pub fn active(&self) -> Option<&ParticipantRef> {
        self.active.as_ref()
    }

    pub fn active_sid(&self) -> Option<&str> {
        self.active.as_ref().map(|participant| participant.sid())
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_active(&self, participant: &dyn Participant) -> bool {
        self.active
            .as_deref()
            .is_some_and(|active| same_participant(active, participant))
    }

    pub fn is_pinned_active(&self, participant: &dyn Participant) -> bool {
        self.pinned && self.is_active(participant)
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Make `participant` active, returning the previous one.
    pub fn replace(&mut self, participant: ParticipantRef) -> Option<ParticipantRef> {
        self.active.replace(participant)
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.pinned = false;
    }
}
