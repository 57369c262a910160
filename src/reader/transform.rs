// SPDX-License-Identifier: MPL-2.0
//! Zoom and pan applied to the element the reader currently focuses.
//!
//! Coordinates are relative to the viewport center: content rests centered,
//! and the rendered position of a content-local point `w` is `pan + w * zoom`.
//! Clamping is always recomputed from the natural (unscaled) content size, so
//! the same `(zoom, pan)` request yields the same transform for the same
//! geometry, and resizes never work from a stale size.

use crate::config::{MAX_ZOOM, MIN_ZOOM};
use iced::{Point, Size, Vector};

/// Zoom factor, guaranteed to be within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Creates a zoom level, clamping to the valid range.
    ///
    /// Non-finite input maps to the identity zoom.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self(MIN_ZOOM)
        }
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether this is the identity zoom.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    /// Returns whether the zoom exceeds the identity by more than `tolerance`.
    #[must_use]
    pub fn exceeds(self, tolerance: f32) -> bool {
        self.0 > MIN_ZOOM + tolerance
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(MIN_ZOOM)
    }
}

/// The `(zoom, pan)` pair rendered on the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportTransform {
    zoom: ZoomLevel,
    pan: Vector,
}

impl ViewportTransform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builds a transform from a requested zoom and pan, clamping both.
    ///
    /// `content` is the natural size of the focused element, `viewport` the
    /// size of the area it is displayed in.
    #[must_use]
    pub fn apply(zoom: f32, pan: Vector, content: Size, viewport: Size) -> Self {
        let zoom = ZoomLevel::new(zoom);
        Self {
            zoom,
            pan: clamp_pan(zoom, pan, content, viewport),
        }
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    /// Returns whether the zoom exceeds the identity by more than `tolerance`.
    #[must_use]
    pub fn is_zoomed(&self, tolerance: f32) -> bool {
        self.zoom.exceeds(tolerance)
    }

    /// Re-applies this transform to new geometry (e.g. after a resize).
    #[must_use]
    pub fn reclamped(&self, content: Size, viewport: Size) -> Self {
        Self::apply(self.zoom.value(), self.pan, content, viewport)
    }

    /// Returns the content-local point rendered at `screen`
    /// (a viewport-centered offset).
    #[must_use]
    pub fn content_point(&self, screen: Vector) -> Vector {
        let zoom = self.zoom.value();
        Vector::new((screen.x - self.pan.x) / zoom, (screen.y - self.pan.y) / zoom)
    }

    /// Returns where the content-local point `content` is rendered.
    #[must_use]
    pub fn screen_point(&self, content: Vector) -> Vector {
        self.pan + content * self.zoom.value()
    }

    /// Zooms to `zoom` keeping the content point `anchor` rendered at `screen`.
    ///
    /// The result is clamped, so the anchor only holds while the content
    /// overflows the viewport far enough.
    #[must_use]
    pub fn anchored(anchor: Vector, screen: Vector, zoom: f32, content: Size, viewport: Size) -> Self {
        let level = ZoomLevel::new(zoom);
        let pan = screen - anchor * level.value();
        Self::apply(level.value(), pan, content, viewport)
    }
}

/// Converts a viewport-local point (top-left origin) into a center-relative offset.
#[must_use]
pub fn centered(point: Point, viewport: Size) -> Vector {
    Vector::new(point.x - viewport.width / 2.0, point.y - viewport.height / 2.0)
}

/// Clamps `pan` so the scaled content never leaves its own edges.
///
/// Each axis is clamped independently: an axis where the scaled content fits
/// in the viewport gets no pan at all, an overflowing axis may move by at
/// most half of the overflow in either direction. The identity zoom never pans.
#[must_use]
pub fn clamp_pan(zoom: ZoomLevel, pan: Vector, content: Size, viewport: Size) -> Vector {
    if zoom.is_identity() {
        return Vector::new(0.0, 0.0);
    }
    let factor = zoom.value();
    Vector::new(
        clamp_axis(pan.x, content.width * factor, viewport.width),
        clamp_axis(pan.y, content.height * factor, viewport.height),
    )
}

fn clamp_axis(pan: f32, scaled: f32, viewport: f32) -> f32 {
    if scaled > viewport && pan.is_finite() {
        let max_pan = (scaled - viewport) / 2.0;
        pan.clamp(-max_pan, max_pan)
    } else {
        0.0
    }
}
