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

//! Connection and client configuration.
//!
//! [`ConnectOptions`] is handed to the media SDK as-is (camelCase on the wire,
//! matching what the browser SDK expects). [`ClientConfig`] holds the settings
//! this crate itself consumes.

use crate::constants::{
    DEFAULT_CAPTURE_FRAME_RATE, DEFAULT_DOCUMENT_TRACK_NAME, DEFAULT_DOCUMENT_URL,
    DEFAULT_LOG_LEVEL, SAMPLE_DOCUMENT_URL,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandwidthProfileMode {
    #[default]
    Grid,
    Collaboration,
    Presentation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoBandwidthProfile {
    pub mode: BandwidthProfileMode,
    pub client_track_switch_off_control: ControlMode,
    pub content_preferences_mode: ControlMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_subscription_bitrate: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthProfile {
    pub video: VideoBandwidthProfile,
}

/// Options passed to [`RoomConnector::connect`](crate::RoomConnector::connect).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectOptions {
    /// Room name; the token decides when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub audio: bool,
    pub video: bool,
    pub dominant_speaker: bool,
    pub network_quality: bool,
    pub bandwidth_profile: BandwidthProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_audio_bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preferred_video_codecs: Vec<String>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            name: None,
            audio: true,
            video: true,
            dominant_speaker: true,
            network_quality: false,
            bandwidth_profile: BandwidthProfile::default(),
            max_audio_bitrate: None,
            preferred_video_codecs: Vec::new(),
        }
    }
}

impl ConnectOptions {
    /// Presentation mode with manual switch-off and content preferences, so
    /// the published document track keeps its resolution for every
    /// subscriber.
    pub fn for_presentation(mut self) -> Self {
        let video = &mut self.bandwidth_profile.video;
        video.mode = BandwidthProfileMode::Presentation;
        video.client_track_switch_off_control = ControlMode::Manual;
        video.content_preferences_mode = ControlMode::Manual;
        self
    }
}

/// Settings consumed by the session controller and the document viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Document loaded into the viewer before joining
    pub document_url: String,
    /// Document the "show PDF" button swaps in
    pub sample_document_url: String,
    /// Frame rate at which the document canvas is captured
    pub capture_frame_rate: u32,
    /// Name under which the document track is published
    pub document_track_name: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            document_url: DEFAULT_DOCUMENT_URL.to_string(),
            sample_document_url: SAMPLE_DOCUMENT_URL.to_string(),
            capture_frame_rate: DEFAULT_CAPTURE_FRAME_RATE,
            document_track_name: DEFAULT_DOCUMENT_TRACK_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
