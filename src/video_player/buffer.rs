// SPDX-License-Identifier: MPL-2.0
//! Progress, buffering and seek math over the element's time ranges.

use crate::config::MIN_BUFFER_AHEAD_SECS;

/// A buffered or seekable interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        self.start <= position && position <= self.end
    }
}

/// How much media the element has, mirroring the platform ready states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    #[default]
    Nothing,
    Metadata,
    CurrentData,
    FutureData,
    EnoughData,
}

/// Snapshot of the element's playback position and buffers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackProgress {
    pub position: f64,
    pub duration: Option<f64>,
    pub buffered: Vec<TimeRange>,
    pub seekable: Vec<TimeRange>,
    pub ready_state: ReadyState,
    pub seeking: bool,
}

impl PlaybackProgress {
    fn known_duration(&self) -> Option<f64> {
        self.duration.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Played fraction of the video, in `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        self.known_duration()
            .map_or(0.0, |d| (self.position / d).clamp(0.0, 1.0) as f32)
    }

    /// End of the buffer bar: the range holding the playhead, else the last one.
    #[must_use]
    pub fn buffer_end(&self) -> Option<f64> {
        self.buffered
            .iter()
            .find(|range| range.contains(self.position))
            .or_else(|| self.buffered.last())
            .map(|range| range.end)
    }

    /// Buffered fraction shown behind the progress bar, capped at 1.
    #[must_use]
    pub fn buffer_fraction(&self) -> f32 {
        match (self.known_duration(), self.buffer_end()) {
            (Some(duration), Some(end)) => (end / duration).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// Seconds buffered past the playhead in the range holding it.
    #[must_use]
    pub fn buffered_ahead(&self) -> f64 {
        self.buffered
            .iter()
            .find(|range| range.contains(self.position))
            .map_or(0.0, |range| range.end - self.position)
    }

    /// Whether a playing video is about to run out of data.
    ///
    /// Elements without current data are still starting up and never count.
    #[must_use]
    pub fn is_stalling(&self) -> bool {
        self.ready_state >= ReadyState::CurrentData
            && self.ready_state < ReadyState::FutureData
            && !self.seeking
            && self.buffered_ahead() < MIN_BUFFER_AHEAD_SECS
    }

    /// Whether enough is buffered ahead to drop a stall indicator.
    #[must_use]
    pub fn has_recovered(&self) -> bool {
        self.buffered_ahead() >= MIN_BUFFER_AHEAD_SECS || self.ready_state >= ReadyState::FutureData
    }

    /// Position for a click at `fraction` of the progress bar.
    ///
    /// `None` when the duration is unknown or the target is not seekable.
    #[must_use]
    pub fn seek_target(&self, fraction: f32) -> Option<f64> {
        let duration = self.known_duration()?;
        let target = f64::from(fraction.clamp(0.0, 1.0)) * duration;
        self.seekable
            .iter()
            .any(|range| range.contains(target))
            .then_some(target)
    }
}
