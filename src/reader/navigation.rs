// SPDX-License-Identifier: MPL-2.0
//! Page counter and navigation button state.
//!
//! Horizontal mode reads right to left, so the "next" button moves back a
//! spread and "previous" moves forward; their labels are swapped to match
//! the direction the reader perceives.

use super::session::{ReaderSession, ReadingMode};
use crate::i18n::I18n;

/// Text shown in the page counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLabel {
    /// No pages.
    Empty,
    /// Vertical mode: 1-based page out of total.
    Page { current: usize, total: usize },
    /// Horizontal spread with two pages, numbered in visual order.
    Spread {
        left: usize,
        right: usize,
        total: usize,
    },
    /// Horizontal spread holding only the final page.
    Single { page: usize, total: usize },
}

impl CounterLabel {
    /// Computes the counter for the session's current position.
    #[must_use]
    pub fn for_session(session: &ReaderSession) -> Self {
        let total = session.page_count();
        if total == 0 {
            return CounterLabel::Empty;
        }

        match session.mode() {
            ReadingMode::Vertical => CounterLabel::Page {
                current: session.current_page() + 1,
                total,
            },
            ReadingMode::Horizontal => {
                let right = session.current_spread() * 2 + 1;
                if right < total {
                    CounterLabel::Spread {
                        left: right + 1,
                        right,
                        total,
                    }
                } else {
                    CounterLabel::Single { page: right, total }
                }
            }
        }
    }

    /// Renders the counter text in the active locale.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> String {
        match *self {
            CounterLabel::Empty => i18n.tr("reader-counter-empty"),
            CounterLabel::Page { current, total } => i18n.tr_with_args(
                "reader-counter-page",
                &[("current", current.to_string()), ("total", total.to_string())],
            ),
            CounterLabel::Spread { left, right, total } => i18n.tr_with_args(
                "reader-counter-range",
                &[
                    ("first", left.to_string()),
                    ("last", right.to_string()),
                    ("total", total.to_string()),
                ],
            ),
            CounterLabel::Single { page, total } => i18n.tr_with_args(
                "reader-counter-single",
                &[("page", page.to_string()), ("total", total.to_string())],
            ),
        }
    }

    /// Accessible description, only provided in vertical mode.
    #[must_use]
    pub fn aria(&self, i18n: &I18n) -> Option<String> {
        match *self {
            CounterLabel::Page { current, total } => Some(i18n.tr_with_args(
                "reader-counter-page-aria",
                &[("current", current.to_string()), ("total", total.to_string())],
            )),
            _ => None,
        }
    }
}

/// State of one navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButton {
    pub enabled: bool,
    /// Step applied to the reading position when pressed.
    pub delta: i32,
    pub label_key: &'static str,
    pub aria_key: &'static str,
}

/// Accessible label of the container of `page`.
#[must_use]
pub fn page_label(page: usize, i18n: &I18n) -> String {
    i18n.tr_with_args("reader-page-label", &[("page", (page + 1).to_string())])
}

/// Accessible label of the container of `spread`.
#[must_use]
pub fn spread_label(spread: usize, i18n: &I18n) -> String {
    i18n.tr_with_args("reader-spread-label", &[("spread", (spread + 1).to_string())])
}

/// Enabled flags and labels of both navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub previous: NavButton,
    pub next: NavButton,
}

impl NavigationState {
    #[must_use]
    pub fn for_session(session: &ReaderSession) -> Self {
        let count = session.position_count();
        let position = session.position();
        let at_start = position == 0;
        let at_end = count == 0 || position + 1 >= count;

        match session.mode() {
            ReadingMode::Vertical => Self {
                previous: NavButton {
                    enabled: !at_start,
                    delta: -1,
                    label_key: "reader-nav-previous-page",
                    aria_key: "reader-nav-previous-page-aria",
                },
                next: NavButton {
                    enabled: !at_end,
                    delta: 1,
                    label_key: "reader-nav-next-page",
                    aria_key: "reader-nav-next-page-aria",
                },
            },
            ReadingMode::Horizontal => Self {
                previous: NavButton {
                    enabled: !at_end,
                    delta: 1,
                    label_key: "reader-nav-next-spread",
                    aria_key: "reader-nav-next-spread-aria",
                },
                next: NavButton {
                    enabled: !at_start,
                    delta: -1,
                    label_key: "reader-nav-previous-spread",
                    aria_key: "reader-nav-previous-spread-aria",
                },
            },
        }
    }
}
