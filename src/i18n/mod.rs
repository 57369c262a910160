// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Counter labels, navigation button labels and error texts are resolved
//! through Fluent bundles embedded from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale detection from an explicit request, the config file or the OS
//! - Named arguments for counters (`{ $current } / { $total }`)
//! - Fallback to `en-US` when the requested locale is missing

pub mod fluent;

pub use fluent::I18n;
