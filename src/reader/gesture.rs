// SPDX-License-Identifier: MPL-2.0
//! Touch gesture recognition for the reader.
//!
//! Classifies raw finger events into taps, swipes, pans and pinches. The
//! tracker never touches the transform itself; it reports what the fingers
//! did and the reader decides what that means for the current mode.

use super::transform::{centered, ViewportTransform, ZoomLevel};
use crate::config::{DOUBLE_TAP_WINDOW, SWIPE_THRESHOLD};
use iced::touch::Finger;
use iced::{Point, Size, Vector};
use std::time::Instant;

/// Current phase of the touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// One finger down on unzoomed content; may become a tap or a swipe.
    Tracking { start: Point, last: Point },
    /// One finger dragging zoomed content.
    Panning {
        start: Point,
        last: Point,
        initial_pan: Vector,
    },
    /// Two fingers scaling the content.
    Pinching {
        initial_distance: f32,
        initial_zoom: ZoomLevel,
        /// Content-local point that stays under the finger midpoint.
        anchor: Vector,
    },
}

/// A transform change requested by a moving finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Pan to `pan` at the current zoom.
    Pan { pan: Vector },
    /// Zoom to `zoom`, keeping `anchor` under `midpoint`.
    Pinch {
        zoom: f32,
        midpoint: Vector,
        anchor: Vector,
    },
}

/// What a lifted finger completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Nothing to act on.
    Ignored,
    /// Short touch at the given viewport-local point.
    Tap { at: Point },
    /// Fast movement past the swipe threshold.
    Swipe { delta: Vector },
    /// A pan finished with visible movement.
    PanEnded,
    /// One of the pinching fingers was lifted.
    PinchEnded,
}

/// Classification of a completed tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

/// Finger tracking and gesture classification.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: GestureState,
    /// Active fingers in press order.
    fingers: Vec<(Finger, Point)>,
    last_tap: Option<Instant>,
}

impl GestureTracker {
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn active_fingers(&self) -> usize {
        self.fingers.len()
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.state, GestureState::Pinching { .. })
    }

    /// Registers a new finger.
    ///
    /// `transform` is the transform at the moment the finger lands and
    /// `viewport` the size the touch positions are relative to.
    pub fn press(
        &mut self,
        finger: Finger,
        position: Point,
        transform: &ViewportTransform,
        viewport: Size,
    ) {
        self.fingers.retain(|(id, _)| *id != finger);
        self.fingers.push((finger, position));

        match self.fingers.len() {
            1 => {
                self.state = if transform.zoom().is_identity() {
                    GestureState::Tracking {
                        start: position,
                        last: position,
                    }
                } else {
                    GestureState::Panning {
                        start: position,
                        last: position,
                        initial_pan: transform.pan(),
                    }
                };
            }
            2 => {
                let (a, b) = (self.fingers[0].1, self.fingers[1].1);
                let midpoint = centered(midpoint(a, b), viewport);
                self.state = GestureState::Pinching {
                    initial_distance: a.distance(b),
                    initial_zoom: transform.zoom(),
                    anchor: transform.content_point(midpoint),
                };
            }
            // Extra fingers keep the current pinch going
            _ => {}
        }
    }

    /// Updates a finger position, returning the transform change it implies.
    pub fn moved(&mut self, finger: Finger, position: Point, viewport: Size) -> Option<Motion> {
        let slot = self.fingers.iter_mut().find(|(id, _)| *id == finger)?;
        slot.1 = position;

        match &mut self.state {
            GestureState::Idle => None,
            GestureState::Tracking { last, .. } => {
                *last = position;
                None
            }
            GestureState::Panning {
                start,
                last,
                initial_pan,
            } => {
                *last = position;
                Some(Motion::Pan {
                    pan: *initial_pan + (position - *start),
                })
            }
            GestureState::Pinching {
                initial_distance,
                initial_zoom,
                anchor,
            } => {
                if self.fingers.len() < 2 || *initial_distance <= f32::EPSILON {
                    return None;
                }
                let (a, b) = (self.fingers[0].1, self.fingers[1].1);
                let ratio = a.distance(b) / *initial_distance;
                Some(Motion::Pinch {
                    zoom: initial_zoom.value() * ratio,
                    midpoint: centered(midpoint(a, b), viewport),
                    anchor: *anchor,
                })
            }
        }
    }

    /// Removes a finger and classifies what its gesture completed.
    pub fn lift(&mut self, finger: Finger, position: Point) -> Release {
        let Some(index) = self.fingers.iter().position(|(id, _)| *id == finger) else {
            return Release::Ignored;
        };
        self.fingers.remove(index);

        let release = match self.state {
            GestureState::Idle => Release::Ignored,
            GestureState::Pinching { .. } => Release::PinchEnded,
            GestureState::Tracking { start, .. } => {
                let delta = position - start;
                if exceeds_threshold(delta) {
                    Release::Swipe { delta }
                } else {
                    Release::Tap { at: position }
                }
            }
            GestureState::Panning { start, .. } => {
                if exceeds_threshold(position - start) {
                    Release::PanEnded
                } else {
                    Release::Tap { at: position }
                }
            }
        };

        // Fingers left over from a pinch never start a new gesture
        self.state = GestureState::Idle;
        release
    }

    /// Drops a finger the platform stopped tracking, cancelling its gesture.
    pub fn cancel(&mut self, finger: Finger) {
        self.fingers.retain(|(id, _)| *id != finger);
        self.state = GestureState::Idle;
    }

    /// Records a completed tap and reports whether it was the second of a pair.
    pub fn register_tap(&mut self, now: Instant) -> TapKind {
        let is_double = self
            .last_tap
            .is_some_and(|t| now.saturating_duration_since(t) < DOUBLE_TAP_WINDOW);

        if is_double {
            self.last_tap = None; // no triple taps
            TapKind::Double
        } else {
            self.last_tap = Some(now);
            TapKind::Single
        }
    }

    /// Forgets every finger and any pending tap.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn exceeds_threshold(delta: Vector) -> bool {
    delta.x.abs() >= SWIPE_THRESHOLD || delta.y.abs() >= SWIPE_THRESHOLD
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;

    const VIEWPORT: Size = Size::new(400.0, 800.0);

    fn zoomed(zoom: f32) -> ViewportTransform {
        ViewportTransform::apply(zoom, Vector::new(0.0, 0.0), VIEWPORT, VIEWPORT)
    }

    #[test]
    fn short_touch_is_a_tap() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(100.0, 100.0), &identity, VIEWPORT);
        tracker.moved(Finger(1), Point::new(110.0, 105.0), VIEWPORT);

        let release = tracker.lift(Finger(1), Point::new(110.0, 105.0));
        assert_eq!(
            release,
            Release::Tap {
                at: Point::new(110.0, 105.0)
            }
        );
        assert_eq!(tracker.state(), GestureState::Idle);
    }

    #[test]
    fn long_horizontal_movement_is_a_swipe() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(300.0, 100.0), &identity, VIEWPORT);

        let release = tracker.lift(Finger(1), Point::new(200.0, 110.0));
        assert_eq!(
            release,
            Release::Swipe {
                delta: Vector::new(-100.0, 10.0)
            }
        );
    }

    #[test]
    fn single_finger_on_zoomed_content_pans() {
        let mut tracker = GestureTracker::default();
        let transform = zoomed(2.0);
        tracker.press(Finger(1), Point::new(100.0, 100.0), &transform, VIEWPORT);
        assert!(matches!(tracker.state(), GestureState::Panning { .. }));

        let motion = tracker.moved(Finger(1), Point::new(130.0, 80.0), VIEWPORT);
        assert_eq!(
            motion,
            Some(Motion::Pan {
                pan: Vector::new(30.0, -20.0)
            })
        );
        assert_eq!(tracker.lift(Finger(1), Point::new(130.0, 80.0)), Release::Tap {
            at: Point::new(130.0, 80.0)
        });
    }

    #[test]
    fn long_pan_is_not_a_tap() {
        let mut tracker = GestureTracker::default();
        let transform = zoomed(2.0);
        tracker.press(Finger(1), Point::new(100.0, 100.0), &transform, VIEWPORT);
        tracker.moved(Finger(1), Point::new(250.0, 100.0), VIEWPORT);
        assert_eq!(
            tracker.lift(Finger(1), Point::new(250.0, 100.0)),
            Release::PanEnded
        );
    }

    #[test]
    fn second_finger_starts_pinch() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(100.0, 400.0), &identity, VIEWPORT);
        tracker.press(Finger(2), Point::new(300.0, 400.0), &identity, VIEWPORT);
        assert!(tracker.is_pinching());

        // Spread the fingers to twice the distance
        let motion = tracker.moved(Finger(2), Point::new(500.0, 400.0), VIEWPORT);
        let Some(Motion::Pinch { zoom, .. }) = motion else {
            panic!("expected pinch motion, got {motion:?}");
        };
        assert_abs_diff_eq!(zoom, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn lifting_pinch_finger_ends_gesture_without_tap() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(100.0, 400.0), &identity, VIEWPORT);
        tracker.press(Finger(2), Point::new(300.0, 400.0), &identity, VIEWPORT);

        assert_eq!(
            tracker.lift(Finger(2), Point::new(300.0, 400.0)),
            Release::PinchEnded
        );
        // Remaining finger neither moves nor taps
        assert_eq!(tracker.moved(Finger(1), Point::new(120.0, 400.0), VIEWPORT), None);
        assert_eq!(
            tracker.lift(Finger(1), Point::new(120.0, 400.0)),
            Release::Ignored
        );
        assert_eq!(tracker.active_fingers(), 0);
    }

    #[test]
    fn coincident_pinch_fingers_do_not_zoom() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(200.0, 400.0), &identity, VIEWPORT);
        tracker.press(Finger(2), Point::new(200.0, 400.0), &identity, VIEWPORT);
        assert_eq!(tracker.moved(Finger(2), Point::new(260.0, 400.0), VIEWPORT), None);
    }

    #[test]
    fn unknown_finger_is_ignored() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.moved(Finger(9), Point::ORIGIN, VIEWPORT), None);
        assert_eq!(tracker.lift(Finger(9), Point::ORIGIN), Release::Ignored);
    }

    #[test]
    fn double_tap_within_window() {
        let mut tracker = GestureTracker::default();
        let start = Instant::now();
        assert_eq!(tracker.register_tap(start), TapKind::Single);
        assert_eq!(
            tracker.register_tap(start + Duration::from_millis(200)),
            TapKind::Double
        );
        // Third tap starts a fresh pair
        assert_eq!(
            tracker.register_tap(start + Duration::from_millis(250)),
            TapKind::Single
        );
    }

    #[test]
    fn slow_taps_stay_single() {
        let mut tracker = GestureTracker::default();
        let start = Instant::now();
        tracker.register_tap(start);
        assert_eq!(
            tracker.register_tap(start + Duration::from_millis(400)),
            TapKind::Single
        );
    }

    #[test]
    fn cancel_resets_to_idle() {
        let mut tracker = GestureTracker::default();
        let identity = ViewportTransform::identity();
        tracker.press(Finger(1), Point::new(10.0, 10.0), &identity, VIEWPORT);
        tracker.cancel(Finger(1));
        assert_eq!(tracker.state(), GestureState::Idle);
        assert_eq!(tracker.active_fingers(), 0);
    }
}
