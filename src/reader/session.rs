// SPDX-License-Identifier: MPL-2.0
//! State of an open reading session.

use super::slot::ImageSlot;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How pages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingMode {
    /// One continuous column of pages scrolled vertically.
    #[default]
    Vertical,
    /// Two-page spreads read right to left.
    Horizontal,
}

impl ReadingMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ReadingMode::Vertical => ReadingMode::Horizontal,
            ReadingMode::Horizontal => ReadingMode::Vertical,
        }
    }
}

/// Candidate image URLs for every page, in reading order.
///
/// Serialized as a JSON array of arrays of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSources(Vec<Vec<String>>);

impl PageSources {
    /// Decodes the serialized page list handed to the reader.
    pub fn parse(serialized: &str) -> Result<Self> {
        let pages: Self = serde_json::from_str(serialized)?;
        Ok(pages)
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
    pub fn get(&self, page: usize) -> Option<&[String]> {
        self.0.get(page).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.0.iter().map(Vec::as_slice)
    }
}

impl FromStr for PageSources {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<Vec<String>>> for PageSources {
    fn from(pages: Vec<Vec<String>>) -> Self {
        Self(pages)
    }
}

/// One open manga: its pages, reading position and image slots.
///
/// `current_page` is authoritative in vertical mode, `current_spread` in
/// horizontal mode. Both are resynchronized on every mode switch.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    pages: PageSources,
    mode: ReadingMode,
    current_page: usize,
    current_spread: usize,
    slots: Vec<ImageSlot>,
}

impl ReaderSession {
    #[must_use]
    pub fn new(pages: PageSources, mode: ReadingMode) -> Self {
        let slots = pages.iter().map(|urls| ImageSlot::new(urls.to_vec())).collect();
        Self {
            pages,
            mode,
            current_page: 0,
            current_spread: 0,
            slots,
        }
    }

    #[must_use]
    pub fn pages(&self) -> &PageSources {
        &self.pages
    }

    #[must_use]
    pub fn mode(&self) -> ReadingMode {
        self.mode
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn spread_count(&self) -> usize {
        self.page_count().div_ceil(2)
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn current_spread(&self) -> usize {
        self.current_spread
    }

    /// Number of steps navigation can move through in the current mode.
    #[must_use]
    pub fn position_count(&self) -> usize {
        match self.mode {
            ReadingMode::Vertical => self.page_count(),
            ReadingMode::Horizontal => self.spread_count(),
        }
    }

    /// Index navigation moves in the current mode.
    #[must_use]
    pub fn position(&self) -> usize {
        match self.mode {
            ReadingMode::Vertical => self.current_page,
            ReadingMode::Horizontal => self.current_spread,
        }
    }

    /// Switches mode, mapping the reading position across.
    ///
    /// Entering horizontal mode lands on the spread holding the current page;
    /// either way the page index ends up on the first page of that spread.
    /// Returns `false` if the mode was already active.
    pub fn set_mode(&mut self, mode: ReadingMode) -> bool {
        if self.mode == mode {
            return false;
        }
        if mode == ReadingMode::Horizontal {
            self.current_spread = self.current_page / 2;
        }
        self.current_page = self.current_spread * 2;
        self.mode = mode;
        true
    }

    /// Moves the reading position by `delta` steps in the current mode.
    ///
    /// Moves are clamped to the valid range without wrapping. Returns
    /// `false` when the position did not change.
    pub fn step(&mut self, delta: i32) -> bool {
        let count = self.position_count();
        if count == 0 || delta == 0 {
            return false;
        }

        let current = self.position();
        let target = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            current
                .saturating_add(delta as usize)
                .min(count - 1)
        };
        if target == current {
            return false;
        }

        match self.mode {
            ReadingMode::Vertical => self.current_page = target,
            ReadingMode::Horizontal => {
                self.current_spread = target;
                self.current_page = target * 2;
            }
        }
        true
    }

    /// Records the page the user scrolled to in vertical mode.
    ///
    /// Returns `false` if the page is out of range or already current.
    pub fn set_current_page(&mut self, page: usize) -> bool {
        if page >= self.page_count() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    #[must_use]
    pub fn slot(&self, page: usize) -> Option<&ImageSlot> {
        self.slots.get(page)
    }

    pub fn slot_mut(&mut self, page: usize) -> Option<&mut ImageSlot> {
        self.slots.get_mut(page)
    }

    #[must_use]
    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }
}
