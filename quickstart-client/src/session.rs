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

//! Room session controller.
//!
//! Joining loads the document, connects, publishes the document canvas,
//! builds the participant view and then hands every room event to
//! [`SessionView`]. The session ends when the SDK reports the room
//! disconnected, either because [`RoomSession::leave`] was called or because
//! the connection dropped.

use crate::config::{ClientConfig, ConnectOptions};
use crate::document::DocumentViewer;
use crate::error::SessionError;
use crate::event_bus::emit_view_event;
use crate::events::RoomViewEvent;
use crate::sdk::{
    ParticipantRef, PublishOptions, Room, RoomConnector, RoomListener, TrackPriority,
};
use crate::view::{RoomView, SessionView};
use futures::channel::oneshot;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type DisconnectResult = Option<SessionError>;

/// A joined room.
pub struct RoomSession<R: Room + 'static> {
    room: Rc<R>,
    view: Rc<SessionView>,
    left: Cell<bool>,
    closed: RefCell<Option<oneshot::Receiver<DisconnectResult>>>,
}

impl<R: Room + 'static> std::fmt::Debug for RoomSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomSession")
            .field("room", &self.room.name())
            .field("view", &self.view)
            .field("left", &self.left.get())
            .finish()
    }
}

impl<R: Room + 'static> RoomSession<R> {
    /// Join the room identified by `token`.
    ///
    /// A document that fails to load is alerted by the viewer and the join
    /// goes ahead with a blank canvas.
    pub async fn join<C>(
        connector: &C,
        token: &str,
        options: ConnectOptions,
        config: &ClientConfig,
        view: Rc<dyn RoomView>,
        viewer: &DocumentViewer,
    ) -> Result<Self, SessionError>
    where
        C: RoomConnector<Room = R>,
    {
        if let Err(e) = viewer.show_document(&config.document_url).await {
            warn!("joining without document: {}", e);
        }

        let options = options.for_presentation();
        debug!("connect options: {:?}", options);
        let room = connector.connect(token, &options).await?;
        info!("connected to room {}", room.name());
        emit_view_event(RoomViewEvent::Connected {
            room: room.name().to_string(),
        });

        if let Err(e) = publish_document(&*room, viewer, config).await {
            error!("{}", e);
            room.disconnect();
            return Err(e);
        }

        let session_view = SessionView::new(view);
        let dyn_room: Rc<dyn Room> = room.clone();
        session_view.participant_connected(room.local_participant(), &dyn_room);
        for participant in room.participants() {
            session_view.participant_connected(participant, &dyn_room);
        }

        let (done, closed) = oneshot::channel();
        room.add_listener(Rc::new(SessionListener {
            view: Rc::clone(&session_view),
            room: Rc::downgrade(&dyn_room),
            done: RefCell::new(Some(done)),
        }));
        session_view.set_from_room(&*room);

        Ok(Self {
            room,
            view: session_view,
            left: Cell::new(false),
            closed: RefCell::new(Some(closed)),
        })
    }

    pub fn room(&self) -> &Rc<R> {
        &self.room
    }

    pub fn view(&self) -> &Rc<SessionView> {
        &self.view
    }

    pub fn has_left(&self) -> bool {
        self.left.get()
    }

    /// Leave button. Only the first call disconnects.
    pub fn leave(&self) {
        if self.left.replace(true) {
            return;
        }
        info!("leaving room {}", self.room.name());
        self.room.disconnect();
    }

    /// The page is going away (beforeunload / pagehide).
    pub fn page_unloading(&self) {
        debug!("page unloading");
        self.leave();
    }

    /// Resolves once the room is disconnected: `Ok` when graceful, the
    /// session error otherwise. Later calls resolve immediately.
    pub async fn closed(&self) -> Result<(), SessionError> {
        let receiver = self.closed.borrow_mut().take();
        let Some(receiver) = receiver else {
            return Ok(());
        };
        match receiver.await {
            Ok(None) => Ok(()),
            Ok(Some(e)) => Err(e),
            Err(_) => Err(SessionError::Disconnected {
                code: 0,
                message: "room dropped without a disconnect event".to_string(),
            }),
        }
    }
}

/// Join and wait for the room to disconnect.
pub async fn join_room<C: RoomConnector>(
    connector: &C,
    token: &str,
    options: ConnectOptions,
    config: &ClientConfig,
    view: Rc<dyn RoomView>,
    viewer: &DocumentViewer,
) -> Result<(), SessionError> {
    let session =
        RoomSession::<C::Room>::join(connector, token, options, config, view, viewer).await?;
    session.closed().await
}

async fn publish_document(
    room: &dyn Room,
    viewer: &DocumentViewer,
    config: &ClientConfig,
) -> Result<(), SessionError> {
    let track = viewer.surface().capture_track(config.capture_frame_rate)?;
    info!(
        "publishing document track {} as '{}'",
        track.id(),
        config.document_track_name
    );
    room.publish_track(
        track,
        PublishOptions {
            name: config.document_track_name.clone(),
            priority: TrackPriority::High,
        },
    )
    .await
}

struct SessionListener {
    view: Rc<SessionView>,
    room: Weak<dyn Room>,
    done: RefCell<Option<oneshot::Sender<DisconnectResult>>>,
}

impl RoomListener for SessionListener {
    fn on_participant_connected(&self, participant: ParticipantRef) {
        if let Some(room) = self.room.upgrade() {
            self.view.participant_connected(participant, &room);
        }
    }

    fn on_participant_disconnected(&self, participant: ParticipantRef) {
        if let Some(room) = self.room.upgrade() {
            self.view.participant_disconnected(&participant, &*room);
        }
    }

    fn on_dominant_speaker_changed(&self, speaker: Option<ParticipantRef>) {
        debug!(
            "dominant speaker: {}",
            speaker.as_ref().map_or("none", |speaker| speaker.identity())
        );
        if let Some(room) = self.room.upgrade() {
            self.view.on_dominant_speaker_changed(&*room);
        }
    }

    fn on_disconnected(&self, error: Option<SessionError>) {
        let Some(done) = self.done.borrow_mut().take() else {
            return;
        };
        match &error {
            Some(e) => warn!("disconnected: {}", e),
            None => info!("disconnected"),
        }
        self.view.teardown();
        emit_view_event(RoomViewEvent::Disconnected {
            error: error.as_ref().map(ToString::to_string),
        });
        let _ = done.send(error);
    }
}
