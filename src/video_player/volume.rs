// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for video playback.
//!
//! This module provides a type-safe wrapper for volume values,
//! ensuring they are always within the valid range (0.0–1.0).

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, VOLUME_STEP};

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// # Example
///
/// ```
/// use manga_lens::video_player::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// let too_loud = Volume::new(2.0);
/// assert_eq!(too_loud.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// Non-finite input falls back to the default volume.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_finite() {
            Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
        } else {
            Self::default()
        }
    }

    /// Restores a persisted volume, if one was stored.
    #[must_use]
    pub fn from_config(stored: Option<f32>) -> Self {
        stored.map_or_else(Self::default, Self::new)
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Volume as a whole percentage, for the slider's text value.
    #[must_use]
    pub fn percent(self) -> u8 {
        // Clamped to [0, 1], so the product fits in a u8
        (self.0 * 100.0).round() as u8
    }

    /// Returns true if the volume is exactly zero, which also mutes playback.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 <= MIN_VOLUME
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + VOLUME_STEP)
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(self.0 - VOLUME_STEP)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}
