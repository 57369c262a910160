// SPDX-License-Identifier: MPL-2.0
//! Containers the host page must provide.
//!
//! Each player binds to a fixed set of container identifiers. A missing
//! container disables only the player that needed it.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Containers the manga reader binds to.
pub const READER_CONTAINERS: &[&str] = &[
    "manga-reader-modal",
    "manga-pages-container",
    "close-manga",
    "next-page",
    "prev-page",
    "mode-btn",
    "page-counter",
];

/// Containers the video player binds to.
pub const VIDEO_CONTAINERS: &[&str] = &[
    "video-player-modal",
    "video-container",
    "play-pause",
    "progress-container",
];

/// Host page able to report which containers it provides.
pub trait Shell {
    fn has_container(&self, id: &str) -> bool;
}

/// Shell described by a plain set of container identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticShell {
    containers: HashSet<String>,
}

impl StaticShell {
    /// A shell providing every container both players need.
    #[must_use]
    pub fn complete() -> Self {
        READER_CONTAINERS
            .iter()
            .chain(VIDEO_CONTAINERS)
            .copied()
            .collect()
    }

    /// Removes a container, e.g. to describe a page without the reader.
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.containers.remove(id);
        self
    }
}

impl<'a> FromIterator<&'a str> for StaticShell {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            containers: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl Shell for StaticShell {
    fn has_container(&self, id: &str) -> bool {
        self.containers.contains(id)
    }
}

/// Fails with the first of `ids` the shell does not provide.
pub fn require(shell: &impl Shell, ids: &'static [&'static str]) -> Result<()> {
    match ids.iter().find(|id| !shell.has_container(id)) {
        Some(missing) => Err(Error::MissingContainer(*missing)),
        None => Ok(()),
    }
}
