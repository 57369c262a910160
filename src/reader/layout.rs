// SPDX-License-Identifier: MPL-2.0
//! Layout of the pages for the active reading mode.
//!
//! Vertical mode is a single column of pages; horizontal mode groups pages
//! into right-to-left spreads. Only one layout exists at a time: switching
//! modes tears the old one down (including its visibility tracker) before
//! the new one is built.

use super::session::{ReaderSession, ReadingMode};
use super::visibility::{PageVisibilityTracker, VisibilityReport, VisibilityTracker};
use iced::Size;

/// Two facing pages. `right` is read first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    pub index: usize,
    pub right: Option<usize>,
    pub left: Option<usize>,
}

impl Spread {
    /// Builds spread `index` for a manga with `page_count` pages.
    #[must_use]
    pub fn new(index: usize, page_count: usize) -> Self {
        let first = index * 2;
        let second = first + 1;
        Self {
            index,
            right: (first < page_count).then_some(first),
            left: (second < page_count).then_some(second),
        }
    }

    /// Pages in reading order.
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.right.into_iter().chain(self.left)
    }
}

/// Built layout for the active mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Empty,
    Vertical { pages: Vec<usize> },
    Horizontal { spreads: Vec<Spread> },
}

/// What to bring into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Page(usize),
    Spread(usize),
}

/// Where the target should end up in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Scroll the least amount that brings the target into view.
    Nearest,
    /// Align the target with the leading edge of the viewport.
    LeadingEdge,
}

/// Scroll instruction for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ScrollTarget,
    pub align: ScrollAlign,
    pub smooth: bool,
}

/// Creates the visibility tracker used for each vertical layout.
pub type TrackerFactory = fn() -> Box<dyn VisibilityTracker>;

fn default_tracker() -> Box<dyn VisibilityTracker> {
    Box::new(PageVisibilityTracker::default())
}

/// Owns the active layout and its visibility tracker.
#[derive(Debug)]
pub struct LayoutModeManager {
    layout: Layout,
    tracker: Option<Box<dyn VisibilityTracker>>,
    tracker_factory: TrackerFactory,
}

impl Default for LayoutModeManager {
    fn default() -> Self {
        Self::with_tracker_factory(default_tracker)
    }
}

impl LayoutModeManager {
    #[must_use]
    pub fn with_tracker_factory(tracker_factory: TrackerFactory) -> Self {
        Self {
            layout: Layout::Empty,
            tracker: None,
            tracker_factory,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether a visibility tracker is currently attached.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracker.as_ref().is_some_and(|t| t.is_connected())
    }

    /// Builds the layout for the session's mode, replacing any previous one.
    pub fn build(&mut self, session: &ReaderSession) {
        self.teardown();
        match session.mode() {
            ReadingMode::Vertical => self.build_vertical(session.page_count()),
            ReadingMode::Horizontal => self.build_horizontal(session.page_count()),
        }
    }

    fn build_vertical(&mut self, page_count: usize) {
        let mut tracker = (self.tracker_factory)();
        for page in 0..page_count {
            tracker.observe(page);
        }
        self.tracker = Some(tracker);
        self.layout = Layout::Vertical {
            pages: (0..page_count).collect(),
        };
    }

    fn build_horizontal(&mut self, page_count: usize) {
        let spreads = (0..page_count.div_ceil(2))
            .map(|index| Spread::new(index, page_count))
            .collect();
        self.layout = Layout::Horizontal { spreads };
    }

    /// Disconnects the tracker and drops the layout.
    pub fn teardown(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.disconnect();
        }
        self.layout = Layout::Empty;
    }

    /// Switches the session to `mode`, rebuilds, and returns where to scroll.
    ///
    /// Returns `None` when `mode` is already active.
    pub fn switch_mode(
        &mut self,
        session: &mut ReaderSession,
        mode: ReadingMode,
    ) -> Option<ScrollRequest> {
        if !session.set_mode(mode) {
            return None;
        }
        self.build(session);
        Some(self.scroll_to_current(session, false))
    }

    /// Scroll request bringing the current page or spread into view.
    #[must_use]
    pub fn scroll_to_current(&self, session: &ReaderSession, smooth: bool) -> ScrollRequest {
        match session.mode() {
            ReadingMode::Vertical => ScrollRequest {
                target: ScrollTarget::Page(session.current_page()),
                align: ScrollAlign::Nearest,
                smooth,
            },
            ReadingMode::Horizontal => ScrollRequest {
                target: ScrollTarget::Spread(session.current_spread()),
                align: ScrollAlign::LeadingEdge,
                smooth,
            },
        }
    }

    /// Updates the current page from a visibility report.
    ///
    /// Only vertical mode tracks visibility; reports for a torn-down layout
    /// are ignored. Returns `true` if the current page changed.
    pub fn on_visibility(&self, session: &mut ReaderSession, report: &VisibilityReport) -> bool {
        if session.mode() != ReadingMode::Vertical {
            return false;
        }
        let Some(tracker) = self.tracker.as_ref() else {
            return false;
        };
        tracker
            .most_visible(report)
            .is_some_and(|page| session.set_current_page(page))
    }

    /// Natural size of the element zoom and pan apply to.
    ///
    /// Vertical mode uses the current page's image, horizontal mode the
    /// spread with both pages side by side. Unknown sizes fall back to the
    /// viewport.
    #[must_use]
    pub fn content_size(&self, session: &ReaderSession, viewport: Size) -> Size {
        let natural = |page: usize| session.slot(page).and_then(|slot| slot.natural_size());

        match session.mode() {
            ReadingMode::Vertical => natural(session.current_page()).unwrap_or(viewport),
            ReadingMode::Horizontal => {
                let spread = Spread::new(session.current_spread(), session.page_count());
                let sizes: Vec<Size> = spread.pages().filter_map(natural).collect();
                if sizes.is_empty() {
                    return viewport;
                }
                Size::new(
                    sizes.iter().map(|s| s.width).sum(),
                    sizes.iter().map(|s| s.height).fold(0.0, f32::max),
                )
            }
        }
    }
}
