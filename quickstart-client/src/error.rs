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

//! Error types for the room session and the document viewer.

use thiserror::Error;

/// Errors surfaced by the room session.
///
/// A disconnect carrying one of these rejects the join future so the caller
/// can display it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SessionError {
    /// The media SDK refused the connection (bad token, room full, ...).
    #[error("Failed to connect to room: {0}")]
    Connect(String),

    /// Publishing a local track into the room failed.
    #[error("Failed to publish track: {0}")]
    Publish(String),

    /// The document canvas could not be captured as a video track.
    #[error("Failed to capture canvas: {0}")]
    Capture(String),

    /// The room was disconnected with an error.
    #[error("Disconnected ({code}): {message}")]
    Disconnected { code: u32, message: String },
}

/// Errors raised while loading or rendering a paged document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Failed to load document: {0}")]
    Load(String),

    #[error("Failed to load page {page}: {message}")]
    Page { page: u32, message: String },

    #[error("Failed to render page {page}: {message}")]
    Render { page: u32, message: String },

    #[error("No document loaded")]
    NotLoaded,
}
