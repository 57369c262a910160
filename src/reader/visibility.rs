// SPDX-License-Identifier: MPL-2.0
//! Visibility tracking for vertical mode.
//!
//! The host reports how much of each observed page is on screen, either as
//! ready-made intersection entries (platforms with a native intersection
//! primitive) or as raw scroll geometry. A tracker turns those reports into
//! "the page the user is looking at".

use crate::config::VISIBILITY_THRESHOLD;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// How much of one page is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub page: usize,
    /// Visible fraction of the page, in `[0, 1]`.
    pub ratio: f32,
    pub is_intersecting: bool,
}

/// Vertical extent of one page inside the scrolled column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageExtent {
    pub page: usize,
    pub top: f32,
    pub height: f32,
}

/// A visibility update from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibilityReport {
    /// Entries from a native intersection observer.
    Entries(Vec<Intersection>),
    /// Scroll position and page layout; ratios are computed here.
    Scrolled {
        offset: f32,
        viewport_height: f32,
        extents: Vec<PageExtent>,
    },
}

/// Tracks which pages are observed and picks the most visible one.
pub trait VisibilityTracker: Debug + Send {
    /// Starts observing `page`.
    fn observe(&mut self, page: usize);

    /// Stops observing everything. Reports arriving afterwards are ignored.
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    /// Returns the most visible observed page in `report`, if any page
    /// crossed the visibility threshold.
    fn most_visible(&self, report: &VisibilityReport) -> Option<usize>;
}

/// Default tracker: a set of observed pages and a visibility threshold.
#[derive(Debug, Clone)]
pub struct PageVisibilityTracker {
    observed: BTreeSet<usize>,
    threshold: f32,
    connected: bool,
}

impl Default for PageVisibilityTracker {
    fn default() -> Self {
        Self::with_threshold(VISIBILITY_THRESHOLD)
    }
}

impl PageVisibilityTracker {
    #[must_use]
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            observed: BTreeSet::new(),
            threshold,
            connected: true,
        }
    }

    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed.len()
    }
}

impl VisibilityTracker for PageVisibilityTracker {
    fn observe(&mut self, page: usize) {
        if self.connected {
            self.observed.insert(page);
        }
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn most_visible(&self, report: &VisibilityReport) -> Option<usize> {
        if !self.connected {
            return None;
        }

        let computed;
        let entries = match report {
            VisibilityReport::Entries(entries) => entries.as_slice(),
            VisibilityReport::Scrolled {
                offset,
                viewport_height,
                extents,
            } => {
                computed = intersections_from_scroll(*offset, *viewport_height, extents, self.threshold);
                computed.as_slice()
            }
        };

        let mut best: Option<&Intersection> = None;
        for entry in entries
            .iter()
            .filter(|e| e.is_intersecting && self.observed.contains(&e.page))
        {
            // Ties keep the earlier entry
            if best.is_none_or(|b| entry.ratio > b.ratio) {
                best = Some(entry);
            }
        }
        best.map(|entry| entry.page)
    }
}

/// Computes intersection entries from scroll geometry.
///
/// A page intersects when at least `threshold` of its height is inside the
/// window `[offset, offset + viewport_height]`.
#[must_use]
pub fn intersections_from_scroll(
    offset: f32,
    viewport_height: f32,
    extents: &[PageExtent],
    threshold: f32,
) -> Vec<Intersection> {
    let window_end = offset + viewport_height;
    extents
        .iter()
        .map(|extent| {
            let visible = (extent.top + extent.height).min(window_end) - extent.top.max(offset);
            let ratio = if extent.height > 0.0 {
                (visible.max(0.0) / extent.height).min(1.0)
            } else {
                0.0
            };
            Intersection {
                page: extent.page,
                ratio,
                is_intersecting: ratio > 0.0 && ratio >= threshold,
            }
        })
        .collect()
}
