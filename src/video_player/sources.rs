// SPDX-License-Identifier: MPL-2.0
//! Video source lists and the state of the fallback chain.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Ordered candidate URLs for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceList(Vec<String>);

impl SourceList {
    /// Parses a pipe-delimited URL list. Entries are trimmed and blanks dropped.
    pub fn parse(raw: &str) -> Result<Self> {
        let urls: Vec<String> = raw
            .split('|')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();
        if urls.is_empty() {
            return Err(Error::NoVideoSources);
        }
        Ok(Self(urls))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl FromStr for SourceList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// How a source has to be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// HLS playlist; needs an adaptive-streaming back-end or native support.
    Adaptive,
    /// Plain file the media element plays directly.
    Progressive,
}

impl SourceKind {
    #[must_use]
    pub fn of(url: &str) -> Self {
        if url.contains(".m3u8") {
            SourceKind::Adaptive
        } else {
            SourceKind::Progressive
        }
    }
}

/// Where the player is in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceState {
    #[default]
    Idle,
    Loading { index: usize },
    Ready { index: usize },
    /// Every source failed, or none was given.
    Failed,
}

impl SourceState {
    /// Index of the source currently loading or playing.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            SourceState::Loading { index } | SourceState::Ready { index } => Some(index),
            SourceState::Idle | SourceState::Failed => None,
        }
    }
}

/// Normalizes the subtitle URL handed to the player.
///
/// Blank values and the literal `null` mean the video has no subtitles.
#[must_use]
pub fn subtitle_url(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|url| !url.is_empty() && *url != "null")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_trims_and_drops_blanks() {
        let list = SourceList::parse(" a.mp4 || b.m3u8 |  ").expect("two sources");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some("a.mp4"));
        assert_eq!(list.get(1), Some("b.m3u8"));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn parse_rejects_empty_lists() {
        assert_eq!(SourceList::parse(""), Err(Error::NoVideoSources));
        assert_eq!(" | |".parse::<SourceList>(), Err(Error::NoVideoSources));
    }

    #[test]
    fn playlist_sources_are_adaptive() {
        assert_eq!(SourceKind::of("https://cdn/x/master.m3u8?t=1"), SourceKind::Adaptive);
        assert_eq!(SourceKind::of("https://cdn/x/ep1.mp4"), SourceKind::Progressive);
    }

    #[test]
    fn subtitle_url_treats_null_as_absent() {
        assert_eq!(subtitle_url(None), None);
        assert_eq!(subtitle_url(Some("  ")), None);
        assert_eq!(subtitle_url(Some("null")), None);
        assert_eq!(subtitle_url(Some(" subs.ass ")), Some("subs.ass".to_string()));
    }

    #[test]
    fn state_index() {
        assert_eq!(SourceState::Loading { index: 2 }.index(), Some(2));
        assert_eq!(SourceState::Ready { index: 0 }.index(), Some(0));
        assert_eq!(SourceState::Failed.index(), None);
    }
}
