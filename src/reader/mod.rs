// SPDX-License-Identifier: MPL-2.0
//! Manga reader: vertical and right-to-left paged reading with touch zoom.
//!
//! # Architecture
//!
//! - [`component::MangaReader`] - controller owning all reader state
//! - [`session`] - page list, reading mode and position
//! - [`layout`] - vertical column or horizontal spreads
//! - [`gesture`] - touch classification (tap, swipe, pan, pinch)
//! - [`transform`] - clamped zoom and pan
//! - [`visibility`] - tracking the page in view while scrolling
//! - [`navigation`] - page counter and button state
//! - [`slot`] - per-page image loading with fallback sources

pub mod component;
pub mod gesture;
pub mod layout;
pub mod navigation;
pub mod session;
pub mod slot;
pub mod subscription;
pub mod transform;
pub mod visibility;

pub use component::{Effect, MangaReader, Message};
pub use layout::{LayoutModeManager, ScrollAlign, ScrollRequest, ScrollTarget, Spread};
pub use navigation::{CounterLabel, NavigationState};
pub use session::{PageSources, ReaderSession, ReadingMode};
pub use transform::{ViewportTransform, ZoomLevel};
pub use visibility::{Intersection, PageExtent, VisibilityReport, VisibilityTracker};
