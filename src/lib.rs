// SPDX-License-Identifier: MPL-2.0
//! `manga_lens` drives the two overlays of a manga and anime streaming front
//! end: a manga reader with pinch-zoom and right-to-left spreads, and an
//! episode video player with ordered source fallback.
//!
//! Both are plain state machines fed with Iced input events. They never draw
//! anything themselves; the host renders from their state and carries out
//! the effects they return.
//!
//! # Examples
//!
//! ```
//! use manga_lens::reader::{MangaReader, ReadingMode};
//! use std::time::Instant;
//!
//! let mut reader = MangaReader::default();
//! reader
//!     .open(r#"[["p1.jpg"], ["p2.jpg", "p2-mirror.jpg"], ["p3.jpg"]]"#, Instant::now())
//!     .expect("valid page list");
//!
//! assert_eq!(reader.mode(), ReadingMode::Vertical);
//! assert_eq!(reader.session().map(|s| s.page_count()), Some(3));
//! ```

#![doc(html_root_url = "https://docs.rs/manga_lens/0.3.0")]

pub mod config;
pub mod controls;
pub mod error;
pub mod i18n;
pub mod reader;
pub mod shell;
pub mod video_player;

#[cfg(test)]
mod test_utils;
