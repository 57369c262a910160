// SPDX-License-Identifier: MPL-2.0
//! Capabilities the video player drives but does not implement.
//!
//! The host wraps its media element, its adaptive-streaming library and its
//! subtitle renderer behind these traits. Everything they report back
//! (manifest parsed, metadata loaded, fatal errors, renderer ready) arrives
//! as a [`Message`](super::Message) tagged with the source index it belongs
//! to, so events from a torn-down attempt can be recognized and dropped.

use super::volume::Volume;
use std::fmt::Debug;

/// Default font shipped with the subtitle renderer.
pub const DEFAULT_SUBTITLE_FONT: &str = "../js/libass/default.woff2";

/// Renderer worker script.
pub const SUBTITLE_WORKER: &str = "../js/libass/subtitles-octopus-worker.js";

/// Renderer worker for platforms without WebAssembly.
pub const SUBTITLE_LEGACY_WORKER: &str = "../js/libass/subtitles-octopus-worker-legacy.js";

/// The platform media element.
pub trait MediaElement: Debug {
    fn set_source(&mut self, url: &str);
    fn clear_source(&mut self);
    /// Starts playback. The outcome comes back as
    /// `PlaybackStarted` or `PlaybackRejected`.
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: f64);
    fn set_volume(&mut self, volume: Volume, muted: bool);
    /// Whether the element plays HLS playlists without a streaming back-end.
    fn supports_native_hls(&self) -> bool;
    fn attach_text_track(&mut self, url: &str);
    fn remove_text_tracks(&mut self);
    fn set_text_track_visible(&mut self, visible: bool);
}

/// Adaptive-streaming back-end, one instance per load attempt.
pub trait StreamBackend: Debug {
    fn load_source(&mut self, url: &str);
    fn attach(&mut self, element: &mut dyn MediaElement);
    fn destroy(&mut self);
}

/// Styled subtitle renderer drawing over the media element.
pub trait SubtitleRenderer: Debug {
    fn set_visible(&mut self, visible: bool);
    fn dispose(&mut self);
}

/// Settings for a new subtitle renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleOptions {
    pub subtitle_url: String,
    pub font_assets: Vec<String>,
    pub worker_assets: Vec<String>,
}

impl SubtitleOptions {
    /// Options for `subtitle_url` with the bundled font and workers.
    #[must_use]
    pub fn new(subtitle_url: impl Into<String>) -> Self {
        Self {
            subtitle_url: subtitle_url.into(),
            font_assets: vec![DEFAULT_SUBTITLE_FONT.to_string()],
            worker_assets: vec![
                SUBTITLE_WORKER.to_string(),
                SUBTITLE_LEGACY_WORKER.to_string(),
            ],
        }
    }
}

/// Factory for the media capabilities of one player.
///
/// `create_stream` and `create_subtitles` return `None` when the platform
/// lacks the capability.
pub trait MediaBackends: Debug {
    fn element(&mut self) -> &mut dyn MediaElement;
    fn create_stream(&mut self) -> Option<Box<dyn StreamBackend>>;
    fn create_subtitles(&mut self, options: SubtitleOptions) -> Option<Box<dyn SubtitleRenderer>>;
}

/// Load progress reported by the stream back-end or the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    ManifestParsed,
    MetadataLoaded,
    Error { fatal: bool, detail: String },
}

/// Outcome of starting a subtitle renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleEvent {
    Ready,
    Failed(String),
}
