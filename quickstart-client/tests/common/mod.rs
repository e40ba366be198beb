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

//! In-memory stand-ins for the media SDK, the room view and the document
//! library, shared by the integration tests.

#![allow(dead_code)]

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use quickstart_client::{
    ClientConfig, ConnectOptions, Document, DocumentControls, DocumentError, DocumentLoader,
    DocumentPage, DocumentViewer, MediaSlot, Participant, ParticipantListener, ParticipantRef,
    PublicationListener, PublicationRef, PublishOptions, RenderSurface, Room, RoomConnector,
    RoomListener, RoomView, SessionError, SessionView, Track, TrackKind, TrackPriority,
    TrackPublication, TrackRef, Viewport,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

// === Media SDK ===

#[derive(Debug)]
pub struct MockTrack {
    id: String,
    kind: TrackKind,
    pub priority: RefCell<Option<TrackPriority>>,
    pub stopped: Cell<bool>,
}

impl MockTrack {
    pub fn new(id: &str, kind: TrackKind) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            kind,
            priority: RefCell::new(None),
            stopped: Cell::new(false),
        })
    }

    pub fn video(id: &str) -> Rc<Self> {
        Self::new(id, TrackKind::Video)
    }

    pub fn audio(id: &str) -> Rc<Self> {
        Self::new(id, TrackKind::Audio)
    }

    pub fn priority(&self) -> Option<TrackPriority> {
        *self.priority.borrow()
    }
}

impl Track for MockTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn set_priority(&self, priority: Option<TrackPriority>) {
        *self.priority.borrow_mut() = priority;
    }

    fn stop(&self) {
        self.stopped.set(true);
    }
}

#[derive(Default)]
pub struct MockPublication {
    kind: Option<TrackKind>,
    name: String,
    track: RefCell<Option<TrackRef>>,
    listeners: RefCell<Vec<Rc<dyn PublicationListener>>>,
}

impl std::fmt::Debug for MockPublication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPublication")
            .field("name", &self.name)
            .field("track", &self.track.borrow())
            .finish()
    }
}

impl MockPublication {
    pub fn new(name: &str, kind: TrackKind) -> Rc<Self> {
        Rc::new(Self {
            kind: Some(kind),
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// Publication that is already subscribed.
    pub fn with_track(track: Rc<MockTrack>) -> Rc<Self> {
        let publication = Self::new(&format!("{}-pub", track.id()), track.kind());
        *publication.track.borrow_mut() = Some(track as TrackRef);
        publication
    }

    pub fn subscribe(&self, track: Rc<MockTrack>) {
        let track: TrackRef = track;
        *self.track.borrow_mut() = Some(Rc::clone(&track));
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener.on_subscribed(Rc::clone(&track));
        }
    }

    pub fn unsubscribe(&self) {
        let Some(track) = self.track.borrow_mut().take() else {
            return;
        };
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener.on_unsubscribed(Rc::clone(&track));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl TrackPublication for MockPublication {
    fn kind(&self) -> TrackKind {
        self.kind.unwrap_or(TrackKind::Video)
    }

    fn track_name(&self) -> &str {
        &self.name
    }

    fn track(&self) -> Option<TrackRef> {
        self.track.borrow().clone()
    }

    fn add_listener(&self, listener: Rc<dyn PublicationListener>) {
        self.listeners.borrow_mut().push(listener);
    }
}

pub struct MockParticipant {
    sid: String,
    identity: String,
    publications: RefCell<Vec<Rc<MockPublication>>>,
    listeners: RefCell<Vec<Rc<dyn ParticipantListener>>>,
}

impl std::fmt::Debug for MockParticipant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockParticipant")
            .field("sid", &self.sid)
            .field("identity", &self.identity)
            .finish()
    }
}

impl MockParticipant {
    pub fn new(sid: &str, identity: &str) -> Rc<Self> {
        Rc::new(Self {
            sid: sid.to_string(),
            identity: identity.to_string(),
            publications: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Participant with one subscribed video track `<sid>-cam`.
    pub fn with_camera(sid: &str, identity: &str) -> (Rc<Self>, Rc<MockTrack>) {
        let participant = Self::new(sid, identity);
        let camera = MockTrack::video(&format!("{sid}-cam"));
        participant
            .publications
            .borrow_mut()
            .push(MockPublication::with_track(Rc::clone(&camera)));
        (participant, camera)
    }

    /// Add a publication without notifying listeners (present before join).
    pub fn add_publication(&self, publication: Rc<MockPublication>) {
        self.publications.borrow_mut().push(publication);
    }

    /// Publish later, notifying listeners.
    pub fn publish(&self, publication: Rc<MockPublication>) {
        self.publications.borrow_mut().push(Rc::clone(&publication));
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener.on_track_published(Rc::clone(&publication) as PublicationRef);
        }
    }

    pub fn publication(&self, index: usize) -> Rc<MockPublication> {
        Rc::clone(&self.publications.borrow()[index])
    }
}

impl Participant for MockParticipant {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn identity(&self) -> &str {
        &self.identity
    }

    fn publications(&self) -> Vec<PublicationRef> {
        self.publications
            .borrow()
            .iter()
            .map(|publication| Rc::clone(publication) as PublicationRef)
            .collect()
    }

    fn add_listener(&self, listener: Rc<dyn ParticipantListener>) {
        self.listeners.borrow_mut().push(listener);
    }
}

pub struct MockRoom {
    name: String,
    local: Rc<MockParticipant>,
    remotes: RefCell<Vec<Rc<MockParticipant>>>,
    dominant: RefCell<Option<Rc<MockParticipant>>>,
    listeners: RefCell<Vec<Rc<dyn RoomListener>>>,
    pub published: RefCell<Vec<(String, PublishOptions)>>,
    pub fail_publish: Cell<bool>,
    pub disconnect_calls: Cell<u32>,
    disconnected: Cell<bool>,
}

impl MockRoom {
    pub fn new(name: &str, local: Rc<MockParticipant>) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            local,
            remotes: RefCell::new(Vec::new()),
            dominant: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            published: RefCell::new(Vec::new()),
            fail_publish: Cell::new(false),
            disconnect_calls: Cell::new(0),
            disconnected: Cell::new(false),
        })
    }

    pub fn local(&self) -> Rc<MockParticipant> {
        Rc::clone(&self.local)
    }

    /// Remote participant present before join.
    pub fn add_remote(&self, participant: Rc<MockParticipant>) {
        self.remotes.borrow_mut().push(participant);
    }

    /// Drop every remote participant without telling listeners, as an SDK
    /// does when it clears its state before reporting the disconnect.
    pub fn forget_participants(&self) {
        self.remotes.borrow_mut().clear();
        *self.dominant.borrow_mut() = None;
    }

    fn notify(&self, event: impl Fn(&Rc<dyn RoomListener>)) {
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            event(listener);
        }
    }

    pub fn connect_participant(&self, participant: Rc<MockParticipant>) {
        self.remotes.borrow_mut().push(Rc::clone(&participant));
        self.notify(|listener| listener.on_participant_connected(Rc::clone(&participant) as ParticipantRef));
    }

    pub fn disconnect_participant(&self, sid: &str) {
        let removed = {
            let mut remotes = self.remotes.borrow_mut();
            let index = remotes.iter().position(|p| p.sid() == sid);
            index.map(|index| remotes.remove(index))
        };
        if let Some(participant) = removed {
            self.notify(|listener| {
                listener.on_participant_disconnected(Rc::clone(&participant) as ParticipantRef)
            });
        }
    }

    pub fn set_dominant_speaker(&self, speaker: Option<Rc<MockParticipant>>) {
        *self.dominant.borrow_mut() = speaker.clone();
        self.notify(|listener| {
            listener.on_dominant_speaker_changed(speaker.clone().map(|p| p as ParticipantRef))
        });
    }

    /// The SDK dropping the room with an error.
    pub fn fail(&self, error: SessionError) {
        if self.disconnected.replace(true) {
            return;
        }
        self.notify(|listener| listener.on_disconnected(Some(error.clone())));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Room for MockRoom {
    fn name(&self) -> &str {
        &self.name
    }

    fn local_participant(&self) -> ParticipantRef {
        Rc::clone(&self.local) as ParticipantRef
    }

    fn participants(&self) -> Vec<ParticipantRef> {
        self.remotes
            .borrow()
            .iter()
            .map(|participant| Rc::clone(participant) as ParticipantRef)
            .collect()
    }

    fn dominant_speaker(&self) -> Option<ParticipantRef> {
        self.dominant
            .borrow()
            .clone()
            .map(|participant| participant as ParticipantRef)
    }

    fn add_listener(&self, listener: Rc<dyn RoomListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    fn publish_track(
        &self,
        track: TrackRef,
        options: PublishOptions,
    ) -> LocalBoxFuture<'_, Result<(), SessionError>> {
        Box::pin(async move {
            if self.fail_publish.get() {
                return Err(SessionError::Publish("publish rejected".to_string()));
            }
            self.published
                .borrow_mut()
                .push((track.id().to_string(), options));
            Ok(())
        })
    }

    fn disconnect(&self) {
        self.disconnect_calls.set(self.disconnect_calls.get() + 1);
        if self.disconnected.replace(true) {
            return;
        }
        self.notify(|listener| listener.on_disconnected(None));
    }
}

pub struct MockConnector {
    pub room: Rc<MockRoom>,
    pub error: Option<SessionError>,
    pub last_token: RefCell<Option<String>>,
    pub last_options: RefCell<Option<ConnectOptions>>,
}

impl MockConnector {
    pub fn new(room: Rc<MockRoom>) -> Self {
        Self {
            room,
            error: None,
            last_token: RefCell::new(None),
            last_options: RefCell::new(None),
        }
    }

    pub fn failing(room: Rc<MockRoom>, error: SessionError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(room)
        }
    }
}

impl RoomConnector for MockConnector {
    type Room = MockRoom;

    fn connect<'a>(
        &'a self,
        token: &'a str,
        options: &'a ConnectOptions,
    ) -> LocalBoxFuture<'a, Result<Rc<MockRoom>, SessionError>> {
        Box::pin(async move {
            *self.last_token.borrow_mut() = Some(token.to_string());
            *self.last_options.borrow_mut() = Some(options.clone());
            match &self.error {
                Some(e) => Err(e.clone()),
                None => Ok(Rc::clone(&self.room)),
            }
        })
    }
}

// === Room view ===

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerState {
    pub identity: String,
    pub is_local: bool,
    pub active: bool,
    pub pinned: bool,
}

#[derive(Default)]
struct ViewState {
    containers: BTreeMap<String, ContainerState>,
    clicks: HashMap<String, Rc<dyn Fn()>>,
    sources: HashMap<MediaSlot, String>,
    visible: HashMap<MediaSlot, bool>,
    main_identity: Option<String>,
    main_cleared: u32,
}

#[derive(Default)]
pub struct MockView {
    state: RefCell<ViewState>,
}

impl MockView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Click on a container, as the user would.
    pub fn click(&self, sid: &str) {
        let handler = self.state.borrow().clicks.get(sid).cloned();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn container(&self, sid: &str) -> Option<ContainerState> {
        self.state.borrow().containers.get(sid).cloned()
    }

    pub fn container_sids(&self) -> Vec<String> {
        self.state.borrow().containers.keys().cloned().collect()
    }

    pub fn active_sids(&self) -> Vec<String> {
        self.state
            .borrow()
            .containers
            .iter()
            .filter(|(_, state)| state.active)
            .map(|(sid, _)| sid.clone())
            .collect()
    }

    pub fn pinned_sids(&self) -> Vec<String> {
        self.state
            .borrow()
            .containers
            .iter()
            .filter(|(_, state)| state.pinned)
            .map(|(sid, _)| sid.clone())
            .collect()
    }

    pub fn source(&self, slot: &MediaSlot) -> Option<String> {
        self.state.borrow().sources.get(slot).cloned()
    }

    pub fn main_source(&self) -> Option<String> {
        self.source(&MediaSlot::Main)
    }

    pub fn is_visible(&self, slot: &MediaSlot) -> bool {
        self.state.borrow().visible.get(slot).copied().unwrap_or(false)
    }

    pub fn main_identity(&self) -> Option<String> {
        self.state.borrow().main_identity.clone()
    }

    pub fn main_cleared(&self) -> u32 {
        self.state.borrow().main_cleared
    }
}

impl RoomView for MockView {
    fn create_container(&self, sid: &str, identity: &str, is_local: bool, on_click: Rc<dyn Fn()>) {
        let mut state = self.state.borrow_mut();
        state.containers.insert(
            sid.to_string(),
            ContainerState {
                identity: identity.to_string(),
                is_local,
                ..Default::default()
            },
        );
        state.clicks.insert(sid.to_string(), on_click);
    }

    fn remove_container(&self, sid: &str) {
        let mut state = self.state.borrow_mut();
        state.containers.remove(sid);
        state.clicks.remove(sid);
        state.sources.retain(|slot, _| {
            !matches!(slot, MediaSlot::Thumbnail { sid: owner, .. } if owner == sid)
        });
    }

    fn set_container_state(&self, sid: &str, active: bool, pinned: bool) {
        if let Some(container) = self.state.borrow_mut().containers.get_mut(sid) {
            container.active = active;
            container.pinned = pinned;
        }
    }

    fn slot_source(&self, slot: &MediaSlot) -> Option<String> {
        self.source(slot)
    }

    fn attach(&self, slot: &MediaSlot, track: &TrackRef) {
        self.state
            .borrow_mut()
            .sources
            .insert(slot.clone(), track.id().to_string());
    }

    fn detach(&self, slot: &MediaSlot, track: &TrackRef) {
        let mut state = self.state.borrow_mut();
        if state.sources.get(slot).map(String::as_str) == Some(track.id()) {
            state.sources.remove(slot);
        }
    }

    fn set_visible(&self, slot: &MediaSlot, visible: bool) {
        self.state.borrow_mut().visible.insert(slot.clone(), visible);
    }

    fn set_main_identity(&self, identity: &str) {
        self.state.borrow_mut().main_identity = Some(identity.to_string());
    }

    fn clear_main(&self) {
        let mut state = self.state.borrow_mut();
        state.sources.remove(&MediaSlot::Main);
        state.main_cleared += 1;
    }
}

// === Document library ===

/// Page sizes at scale 1 and failure switches for a fake document.
#[derive(Default)]
pub struct MockLibrary {
    pub pages: Vec<(f64, f64)>,
    pub fail_load: Option<String>,
    pub fail_pages: RefCell<HashSet<u32>>,
    pub fail_renders: RefCell<HashSet<u32>>,
    pub rendered: RefCell<Vec<(u32, f64)>>,
    pub loads: Cell<u32>,
    render_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockLibrary {
    pub fn with_pages(count: usize) -> Rc<Self> {
        Rc::new(Self {
            pages: vec![(612.0, 792.0); count],
            ..Default::default()
        })
    }

    pub fn failing_load(message: &str) -> Rc<Self> {
        Rc::new(Self {
            fail_load: Some(message.to_string()),
            ..Default::default()
        })
    }

    /// The next render waits until the returned sender fires.
    pub fn hold_next_render(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.render_gate.borrow_mut() = Some(receiver);
        sender
    }
}

pub struct MockLoader(pub Rc<MockLibrary>);

impl DocumentLoader for MockLoader {
    fn load<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Rc<dyn Document>, DocumentError>> {
        Box::pin(async move {
            self.0.loads.set(self.0.loads.get() + 1);
            if let Some(message) = &self.0.fail_load {
                return Err(DocumentError::Load(format!("{url}: {message}")));
            }
            Ok(Rc::new(MockDocument(Rc::clone(&self.0))) as Rc<dyn Document>)
        })
    }
}

struct MockDocument(Rc<MockLibrary>);

impl Document for MockDocument {
    fn num_pages(&self) -> u32 {
        self.0.pages.len() as u32
    }

    fn page(&self, number: u32) -> LocalBoxFuture<'_, Result<Rc<dyn DocumentPage>, DocumentError>> {
        Box::pin(async move {
            let size = (number as usize)
                .checked_sub(1)
                .and_then(|index| self.0.pages.get(index).copied());
            match size {
                Some(size) if !self.0.fail_pages.borrow().contains(&number) => {
                    Ok(Rc::new(MockPage {
                        number,
                        size,
                        library: Rc::clone(&self.0),
                    }) as Rc<dyn DocumentPage>)
                }
                _ => Err(DocumentError::Page {
                    page: number,
                    message: "Invalid page request".to_string(),
                }),
            }
        })
    }
}

struct MockPage {
    number: u32,
    size: (f64, f64),
    library: Rc<MockLibrary>,
}

impl DocumentPage for MockPage {
    fn viewport(&self, scale: f64) -> Viewport {
        Viewport {
            width: self.size.0 * scale,
            height: self.size.1 * scale,
            scale,
        }
    }

    fn render<'a>(
        &'a self,
        _surface: &'a dyn RenderSurface,
        viewport: Viewport,
    ) -> LocalBoxFuture<'a, Result<(), DocumentError>> {
        Box::pin(async move {
            let gate = self.library.render_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.library.fail_renders.borrow().contains(&self.number) {
                return Err(DocumentError::Render {
                    page: self.number,
                    message: "canvas lost".to_string(),
                });
            }
            self.library
                .rendered
                .borrow_mut()
                .push((self.number, viewport.scale));
            Ok(())
        })
    }
}

pub struct MockSurface {
    pub width: u32,
    pub height: Cell<u32>,
    pub fail_capture: Cell<bool>,
    pub captures: RefCell<Vec<u32>>,
}

impl MockSurface {
    pub fn new(width: u32) -> Rc<Self> {
        Rc::new(Self {
            width,
            height: Cell::new(0),
            fail_capture: Cell::new(false),
            captures: RefCell::new(Vec::new()),
        })
    }
}

impl RenderSurface for MockSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn set_height(&self, height: u32) {
        self.height.set(height);
    }

    fn capture_track(&self, frame_rate: u32) -> Result<TrackRef, SessionError> {
        if self.fail_capture.get() {
            return Err(SessionError::Capture("canvas is tainted".to_string()));
        }
        self.captures.borrow_mut().push(frame_rate);
        Ok(MockTrack::video("document-canvas") as TrackRef)
    }
}

#[derive(Debug, Default)]
pub struct ControlsState {
    pub document_loading: Option<bool>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
    pub navigation_enabled: Option<bool>,
    pub navigation_history: Vec<bool>,
    pub page_loading: Option<bool>,
    pub page_loader_height: Option<u32>,
    pub alerts: Vec<String>,
}

#[derive(Default)]
pub struct MockControls {
    pub state: RefCell<ControlsState>,
}

impl MockControls {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn navigation_enabled(&self) -> Option<bool> {
        self.state.borrow().navigation_enabled
    }
}

impl DocumentControls for MockControls {
    fn set_document_loading(&self, loading: bool) {
        self.state.borrow_mut().document_loading = Some(loading);
    }

    fn set_total_pages(&self, total: u32) {
        self.state.borrow_mut().total_pages = Some(total);
    }

    fn set_current_page(&self, page: u32) {
        self.state.borrow_mut().current_page = Some(page);
    }

    fn set_navigation_enabled(&self, enabled: bool) {
        let mut state = self.state.borrow_mut();
        state.navigation_enabled = Some(enabled);
        state.navigation_history.push(enabled);
    }

    fn set_page_loading(&self, loading: bool) {
        self.state.borrow_mut().page_loading = Some(loading);
    }

    fn set_page_loader_height(&self, height: u32) {
        self.state.borrow_mut().page_loader_height = Some(height);
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}

// === Fixtures ===

/// A view with containers for everybody in `room` and the active participant
/// selected, wired the way a session does it minus the room listener.
pub fn joined_view(room: &Rc<MockRoom>) -> (Rc<SessionView>, Rc<MockView>) {
    let view = MockView::new();
    let session_view = SessionView::new(Rc::clone(&view) as Rc<dyn RoomView>);
    let dyn_room: Rc<dyn Room> = Rc::clone(room) as Rc<dyn Room>;
    session_view.participant_connected(room.local_participant(), &dyn_room);
    for participant in room.participants() {
        session_view.participant_connected(participant, &dyn_room);
    }
    session_view.set_from_room(&**room);
    (session_view, view)
}

pub struct DocumentFixture {
    pub library: Rc<MockLibrary>,
    pub surface: Rc<MockSurface>,
    pub controls: Rc<MockControls>,
    pub viewer: DocumentViewer,
}

pub fn document_fixture(library: Rc<MockLibrary>, canvas_width: u32) -> DocumentFixture {
    let surface = MockSurface::new(canvas_width);
    let controls = MockControls::new();
    let viewer = DocumentViewer::new(
        Rc::new(MockLoader(Rc::clone(&library))),
        Rc::clone(&surface) as Rc<dyn RenderSurface>,
        Rc::clone(&controls) as Rc<dyn DocumentControls>,
    );
    DocumentFixture {
        library,
        surface,
        controls,
        viewer,
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        document_url: "deck.pdf".to_string(),
        ..Default::default()
    }
}
