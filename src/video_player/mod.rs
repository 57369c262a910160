// SPDX-License-Identifier: MPL-2.0
//! Episode video player.
//!
//! The player walks an ordered list of candidate sources, handing HLS
//! playlists to an adaptive-streaming back-end and plain files to the media
//! element, and falls through to the next candidate on every fatal error.
//! Subtitles, volume, seeking, the buffer monitor and the auto-hiding
//! controls sit on top of that chain. Actual decoding and rendering belong
//! to the host, which implements [`MediaBackends`].

pub mod backend;
pub mod buffer;
pub mod sources;
mod state;
pub mod subscription;
pub mod subtitles;
#[cfg(test)]
mod testing;
pub mod time_units;
pub mod volume;

pub use backend::{
    BackendEvent, MediaBackends, MediaElement, StreamBackend, SubtitleEvent, SubtitleOptions,
    SubtitleRenderer,
};
pub use buffer::{PlaybackProgress, ReadyState, TimeRange};
pub use sources::{SourceKind, SourceList, SourceState};
pub use state::{Effect, Message, Overlay, VideoPlayer};
pub use subscription::subscription;
pub use subtitles::CaptionButton;
pub use volume::Volume;
