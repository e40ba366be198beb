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

use super::bridge::TrackPublishedListener;
use super::selection::ActiveSelection;
use super::surface::{MediaSlot, RoomView};
use crate::event_bus::emit_view_event;
use crate::events::RoomViewEvent;
use crate::sdk::{same_participant, Participant, ParticipantRef, Room, TrackPriority};
use log::{debug, info};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// State shared by every event handler of one room session.
///
/// Handlers read the selection at the time they run; nothing captures the
/// pinned flag. Borrows of the selection are never held while calling into
/// the view or the SDK.
pub struct SessionView {
    pub(super) view: Rc<dyn RoomView>,
    pub(super) selection: RefCell<ActiveSelection>,
    // Sids of the containers this session created.
    containers: RefCell<BTreeSet<String>>,
}

impl std::fmt::Debug for SessionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionView")
            .field("selection", &self.selection)
            .field("containers", &self.containers)
            .finish_non_exhaustive()
    }
}

impl SessionView {
    pub fn new(view: Rc<dyn RoomView>) -> Rc<Self> {
        Rc::new(Self {
            view,
            selection: RefCell::new(ActiveSelection::default()),
            containers: RefCell::new(BTreeSet::new()),
        })
    }

    pub fn active_sid(&self) -> Option<String> {
        self.selection.borrow().active_sid().map(str::to_string)
    }

    pub fn is_pinned(&self) -> bool {
        self.selection.borrow().is_pinned()
    }

    pub(crate) fn is_active(&self, participant: &dyn Participant) -> bool {
        self.selection.borrow().is_active(participant)
    }

    /// Show `participant` in the main view.
    pub fn set_active(&self, participant: ParticipantRef) {
        let (previous, pinned) = {
            let mut selection = self.selection.borrow_mut();
            let previous = selection.replace(Rc::clone(&participant));
            (previous, selection.is_pinned())
        };

        if let Some(previous) = previous {
            self.view.set_container_state(previous.sid(), false, false);
            if let Some(track) = previous.video_tracks().into_iter().next() {
                self.view.detach(&MediaSlot::Main, &track);
            }
        }

        self.view
            .set_container_state(participant.sid(), true, pinned);
        match participant.video_tracks().into_iter().next() {
            Some(track) => {
                self.view.attach(&MediaSlot::Main, &track);
                self.view.set_visible(&MediaSlot::Main, true);
            }
            // Stays blank until the video track is subscribed.
            None => self.view.set_visible(&MediaSlot::Main, false),
        }
        self.view.set_main_identity(participant.identity());

        debug!(
            "active participant is now {} ({}){}",
            participant.identity(),
            participant.sid(),
            if pinned { " [pinned]" } else { "" }
        );
        emit_view_event(RoomViewEvent::ActiveParticipantChanged {
            sid: participant.sid().to_string(),
            pinned,
        });
    }

    /// Dominant speaker, or the local participant when there is none.
    pub fn set_from_room(&self, room: &dyn Room) {
        self.set_active(pick_from_room(room, None));
    }

    /// Click on a container: pin it, or unpin it if it already is the
    /// pinned active participant.
    pub fn toggle_pin(&self, participant: &ParticipantRef, room: &dyn Room) {
        let (unpin, previously_pinned) = {
            let selection = self.selection.borrow();
            let previously_pinned = if selection.is_pinned() {
                selection.active().cloned()
            } else {
                None
            };
            (selection.is_pinned_active(&**participant), previously_pinned)
        };

        if unpin {
            info!("unpinning {}", participant.identity());
            set_video_priority(&**participant, None);
            self.selection.borrow_mut().set_pinned(false);
            self.set_from_room(room);
        } else {
            info!("pinning {}", participant.identity());
            if let Some(previous) = previously_pinned {
                set_video_priority(&*previous, None);
            }
            set_video_priority(&**participant, Some(TrackPriority::High));
            self.selection.borrow_mut().set_pinned(true);
            self.set_active(Rc::clone(participant));
        }
    }

    pub fn on_dominant_speaker_changed(&self, room: &dyn Room) {
        if self.is_pinned() {
            debug!("dominant speaker changed while pinned, keeping selection");
            return;
        }
        self.set_from_room(room);
    }

    /// Create the participant's container and follow its publications.
    pub fn participant_connected(self: &Rc<Self>, participant: ParticipantRef, room: &Rc<dyn Room>) {
        let is_local = same_participant(&*room.local_participant(), &*participant);
        let on_click: Rc<dyn Fn()> = {
            let session = Rc::downgrade(self);
            let room = Rc::downgrade(room);
            let participant = Rc::clone(&participant);
            Rc::new(move || {
                if let (Some(session), Some(room)) = (session.upgrade(), room.upgrade()) {
                    session.toggle_pin(&participant, &*room);
                }
            })
        };
        self.view
            .create_container(participant.sid(), participant.identity(), is_local, on_click);
        self.containers
            .borrow_mut()
            .insert(participant.sid().to_string());
        info!(
            "participant {} ({}) connected",
            participant.identity(),
            participant.sid()
        );
        emit_view_event(RoomViewEvent::ParticipantAdded {
            sid: participant.sid().to_string(),
            identity: participant.identity().to_string(),
        });

        for publication in participant.publications() {
            self.track_published(publication, &participant);
        }
        participant.add_listener(Rc::new(TrackPublishedListener::new(
            Rc::downgrade(self),
            Rc::downgrade(&participant),
        )));
    }

    pub fn participant_disconnected(&self, participant: &ParticipantRef, room: &dyn Room) {
        if self.is_active(&**participant) {
            self.selection.borrow_mut().set_pinned(false);
            self.set_active(pick_from_room(room, Some(participant.sid())));
        }
        self.view.remove_container(participant.sid());
        self.containers.borrow_mut().remove(participant.sid());
        info!(
            "participant {} ({}) disconnected",
            participant.identity(),
            participant.sid()
        );
        emit_view_event(RoomViewEvent::ParticipantRemoved {
            sid: participant.sid().to_string(),
        });
    }

    /// Remove every container this session created and clear the main view.
    pub fn teardown(&self) {
        self.selection.borrow_mut().clear();
        let sids = std::mem::take(&mut *self.containers.borrow_mut());
        for sid in sids {
            self.view.remove_container(&sid);
            emit_view_event(RoomViewEvent::ParticipantRemoved { sid });
        }
        self.view.clear_main();
        self.view.set_visible(&MediaSlot::Main, false);
    }
}

fn pick_from_room(room: &dyn Room, excluding: Option<&str>) -> ParticipantRef {
    room.dominant_speaker()
        .filter(|speaker| Some(speaker.sid()) != excluding)
        .unwrap_or_else(|| room.local_participant())
}

fn set_video_priority(participant: &dyn Participant, priority: Option<TrackPriority>) {
    for track in participant.video_tracks() {
        track.set_priority(priority);
    }
}
