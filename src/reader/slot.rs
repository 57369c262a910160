// SPDX-License-Identifier: MPL-2.0
//! Per-page image slot with source fallback.
//!
//! Each page owns an ordered list of candidate URLs. The slot starts on the
//! first one and advances on every load failure until it either loads or
//! runs out of candidates, at which point it stays failed for the rest of
//! the session.

use crate::i18n::I18n;
use iced::Size;

/// Load status of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Outcome of reporting a load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Try the next candidate.
    Retry(String),
    /// Every candidate failed.
    Exhausted,
    /// The slot had already failed or loaded; nothing to do.
    Ignored,
}

/// Image slot for a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    sources: Vec<String>,
    cursor: usize,
    status: SlotStatus,
    natural_size: Option<Size>,
}

impl ImageSlot {
    /// Creates a slot over `sources`. An empty list fails immediately.
    #[must_use]
    pub fn new(sources: Vec<String>) -> Self {
        let status = if sources.is_empty() {
            SlotStatus::Failed
        } else {
            SlotStatus::Loading
        };
        Self {
            sources,
            cursor: 0,
            status,
            natural_size: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> SlotStatus {
        self.status
    }

    /// Source currently being loaded or displayed, if any remains.
    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        match self.status {
            SlotStatus::Failed => None,
            _ => self.sources.get(self.cursor).map(String::as_str),
        }
    }

    /// Index of the current candidate.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Natural size of the loaded image.
    #[must_use]
    pub fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    /// Marks the current source as loaded. Returns `false` if the slot was
    /// not waiting for a load.
    pub fn loaded(&mut self, natural_size: Size) -> bool {
        if self.status != SlotStatus::Loading {
            return false;
        }
        self.status = SlotStatus::Loaded;
        self.natural_size = Some(natural_size);
        true
    }

    /// Text of the loading or error indicator drawn over the slot.
    #[must_use]
    pub fn indicator(&self, i18n: &I18n) -> Option<String> {
        match self.status {
            SlotStatus::Loading => Some(i18n.tr("reader-loading")),
            SlotStatus::Failed => Some(i18n.tr("reader-load-error")),
            SlotStatus::Loaded => None,
        }
    }

    /// Alternative text of the image once every source of `page` failed.
    #[must_use]
    pub fn failure_alt(&self, page: usize, i18n: &I18n) -> Option<String> {
        (self.status == SlotStatus::Failed).then(|| {
            i18n.tr_with_args("reader-load-error-page", &[("page", (page + 1).to_string())])
        })
    }

    /// Reports a load failure of the current source.
    pub fn failed(&mut self) -> FailureOutcome {
        if self.status != SlotStatus::Loading {
            return FailureOutcome::Ignored;
        }

        self.cursor += 1;
        match self.sources.get(self.cursor) {
            Some(next) => FailureOutcome::Retry(next.clone()),
            None => {
                self.status = SlotStatus::Failed;
                FailureOutcome::Exhausted
            }
        }
    }
}
