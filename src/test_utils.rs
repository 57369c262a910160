// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Geometry and playback math is checked with `approx`'s absolute-difference
//! assertion, which handles floating-point precision issues that
//! `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;
