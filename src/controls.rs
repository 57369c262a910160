// SPDX-License-Identifier: MPL-2.0
//! Auto-hiding controls visibility shared by the reader and the video player.
//!
//! Hiding is driven by a deadline instead of a timer: callers pass `now` in
//! and a periodic tick checks whether the deadline has passed.

use std::time::{Duration, Instant};

/// Visibility of an overlay's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsVisibility {
    visible: bool,
    hide_at: Option<Instant>,
    timeout: Duration,
}

impl ControlsVisibility {
    /// Visible controls that hide `timeout` after the last interaction.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            visible: true,
            hide_at: None,
            timeout,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a hide deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.hide_at.is_some()
    }

    #[must_use]
    pub fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Shows the controls. With `auto_hide`, they hide again after the timeout.
    pub fn show(&mut self, now: Instant, auto_hide: bool) {
        self.visible = true;
        self.hide_at = auto_hide.then(|| now + self.timeout);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    pub fn toggle(&mut self, now: Instant, auto_hide: bool) {
        if self.visible {
            self.hide();
        } else {
            self.show(now, auto_hide);
        }
    }

    /// Restarts the hide countdown of visible controls. Hidden controls stay hidden.
    pub fn keep_alive(&mut self, now: Instant, auto_hide: bool) {
        if self.visible {
            self.show(now, auto_hide);
        }
    }

    /// Cancels a pending hide, leaving the controls as they are.
    pub fn disarm(&mut self) {
        self.hide_at = None;
    }

    /// Hides the controls once the deadline has passed.
    ///
    /// Returns `true` if this call hid them.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline && self.visible => {
                self.hide();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(4);

    #[test]
    fn starts_visible_without_deadline() {
        let controls = ControlsVisibility::new(TIMEOUT);
        assert!(controls.is_visible());
        assert!(!controls.is_armed());
    }

    #[test]
    fn auto_hide_after_timeout() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.show(start, true);

        assert!(!controls.tick(start + Duration::from_secs(3)));
        assert!(controls.is_visible());
        assert!(controls.tick(start + TIMEOUT));
        assert!(!controls.is_visible());
        assert!(!controls.is_armed());
    }

    #[test]
    fn show_without_auto_hide_stays_visible() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.show(start, false);
        assert!(!controls.tick(start + Duration::from_secs(60)));
        assert!(controls.is_visible());
    }

    #[test]
    fn keep_alive_pushes_deadline() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.show(start, true);
        controls.keep_alive(start + Duration::from_secs(3), true);

        assert!(!controls.tick(start + Duration::from_secs(5)));
        assert!(controls.tick(start + Duration::from_secs(7)));
    }

    #[test]
    fn keep_alive_does_not_reveal_hidden_controls() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.hide();
        controls.keep_alive(start, true);
        assert!(!controls.is_visible());
        assert!(!controls.is_armed());
    }

    #[test]
    fn toggle_flips_visibility() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.toggle(start, true);
        assert!(!controls.is_visible());
        controls.toggle(start, true);
        assert!(controls.is_visible());
        assert_eq!(controls.hide_at(), Some(start + TIMEOUT));
    }

    #[test]
    fn disarm_cancels_pending_hide() {
        let start = Instant::now();
        let mut controls = ControlsVisibility::new(TIMEOUT);
        controls.show(start, true);
        controls.disarm();
        assert!(!controls.tick(start + Duration::from_secs(10)));
        assert!(controls.is_visible());
    }
}
