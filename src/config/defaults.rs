// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the tuning values
//! used by the reader and the video player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Reader zoom bounds and snapping tolerances
//! - **Gestures**: Tap, double-tap and swipe classification
//! - **Scrolling**: Keyboard and wheel scroll steps
//! - **Controls**: Auto-hide delays
//! - **Volume**: Video playback volume
//! - **Playback**: Seek step and buffering thresholds

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Minimum reader zoom factor (identity).
pub const MIN_ZOOM: f32 = 1.0;

/// Maximum reader zoom factor.
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom factor applied by a double-tap on unzoomed content.
pub const DOUBLE_TAP_ZOOM: f32 = 2.0;

/// Tolerance above `MIN_ZOOM` under which a pinch snaps back to identity
/// and the controls are allowed to auto-hide.
pub const ZOOM_SNAP_TOLERANCE: f32 = 0.05;

/// Tolerance above `MIN_ZOOM` for wheel and keyboard "zoomed" checks.
pub const ZOOM_INPUT_TOLERANCE: f32 = 0.01;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Maximum delay between two taps for them to count as a double-tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Minimum travel (pixels, on either axis) for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

// ==========================================================================
// Scrolling Defaults
// ==========================================================================

/// Vertical scroll step for arrow keys (pixels).
pub const KEY_SCROLL_STEP: f32 = 40.0;

/// Fraction of the viewport height scrolled by Page Up/Down.
pub const PAGE_SCROLL_FRACTION: f32 = 0.9;

/// Pixels per wheel "line" when the platform reports line-based deltas.
pub const WHEEL_LINE_PIXELS: f32 = 40.0;

/// Minimum intersection ratio for a page to count as visible.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Auto-hide delay of the reader controls.
pub const READER_CONTROLS_TIMEOUT: Duration = Duration::from_secs(4);

/// Auto-hide delay of the video controls while playing.
pub const VIDEO_CONTROLS_TIMEOUT: Duration = Duration::from_secs(3);

/// Interval of the tick subscription while a hide deadline is armed.
pub const CONTROLS_TICK_INTERVAL: Duration = Duration::from_millis(250);

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default video playback volume (1.0 = 100%).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (10%).
pub const VOLUME_STEP: f32 = 0.1;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Keyboard seek step in seconds (arrow keys).
pub const KEYBOARD_SEEK_STEP_SECS: f64 = 5.0;

/// Buffered-ahead duration under which playback is considered stalled.
pub const MIN_BUFFER_AHEAD_SECS: f64 = 5.0;

/// Interval of the buffer monitor while playing.
pub const BUFFER_MONITOR_INTERVAL: Duration = Duration::from_secs(1);
