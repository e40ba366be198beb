//! This crate drives the browser view of a video room joined through a third-party real-time
//! media SDK.  The SDK does all of the media work (transport, codecs, signaling); this crate
//! reacts to its events: one container per participant, a main view showing the active
//! participant (dominant speaker, or whoever the user pinned), track attachment as
//! subscriptions come and go, and a paged document viewer whose canvas is published into the
//! room as a video track.
//!
//! The SDK and the document rasterizer are reached through traits ([`Room`], [`Participant`],
//! [`TrackPublication`], [`Track`], [`RoomConnector`], [`DocumentLoader`]), so the controller
//! logic runs and is tested on native targets.  With the `wasm` feature the [`dom`] module
//! provides the browser side: the participant list and main view, the canvas and its controls,
//! and pdf.js bindings.
//!
//! # Outline of usage
//!
//! ## Joining from the quickstart page:
//! ```ignore
//! let connector = MySdkConnector::new(); // implements RoomConnector
//! let options = ConnectOptions { name: Some("standup".into()), ..Default::default() };
//! dom::run_in_page(&connector, &token, options, ClientConfig::default()).await?;
//! ```
//!
//! ## Joining with custom surfaces:
//! ```ignore
//! let viewer = DocumentViewer::new(loader, surface, controls);
//! let session = RoomSession::join(&connector, &token, options, &config, view, &viewer).await?;
//!
//! // leave button
//! session.leave();
//! session.closed().await?;
//! ```
//!
//! ## Following the view from another component:
//! ```ignore
//! let mut rx = subscribe_view_events();
//! while let Ok(event) = rx.recv().await { /* ... */ }
//! ```

pub mod config;
pub mod constants;
pub mod document;
mod error;
mod event_bus;
mod events;
mod logging;
pub mod sdk;
mod session;
pub mod view;

#[cfg(feature = "wasm")]
pub mod dom;

pub use config::{
    BandwidthProfile, BandwidthProfileMode, ClientConfig, ConnectOptions, ControlMode,
    VideoBandwidthProfile,
};
pub use document::{Document, DocumentControls, DocumentLoader, DocumentPage, DocumentViewer, RenderSurface, Viewport};
pub use error::{DocumentError, SessionError};
pub use event_bus::{emit_view_event, global_view_sender, subscribe_view_events, EVENT_BUS_CAPACITY};
pub use events::RoomViewEvent;
pub use logging::init_logging;
pub use sdk::{
    Participant, ParticipantListener, ParticipantRef, PublicationListener, PublicationRef,
    PublishOptions, Room, RoomConnector, RoomListener, Track, TrackKind, TrackPriority,
    TrackPublication, TrackRef,
};
pub use session::{join_room, RoomSession};
pub use view::{ActiveSelection, MediaSlot, RoomView, SessionView};
