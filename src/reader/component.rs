// SPDX-License-Identifier: MPL-2.0
//! Manga reader component: state and update logic.
//!
//! The component owns the session, the layout, the zoom/pan transform and
//! the gesture tracker. Raw Iced events and shell button presses come in as
//! [`Message`]s; everything the host has to do in response (scrolling,
//! reloading an image, closing the overlay) goes out as an [`Effect`].

use super::gesture::{GestureState, GestureTracker, Motion, Release, TapKind};
use super::layout::{LayoutModeManager, ScrollRequest};
use super::navigation::{CounterLabel, NavigationState};
use super::session::{PageSources, ReaderSession, ReadingMode};
use super::slot::FailureOutcome;
use super::transform::{centered, ViewportTransform};
use super::visibility::VisibilityReport;
use crate::config::{
    DOUBLE_TAP_ZOOM, KEY_SCROLL_STEP, PAGE_SCROLL_FRACTION, READER_CONTROLS_TIMEOUT,
    WHEEL_LINE_PIXELS, ZOOM_INPUT_TOLERANCE, ZOOM_SNAP_TOLERANCE,
};
use crate::controls::ControlsVisibility;
use crate::error::Result;
use crate::shell::{self, Shell};
use iced::{event, keyboard, mouse, touch, window, Point, Size, Vector};
use std::time::Instant;

/// Messages handled by the reader.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open a manga from its serialized page list.
    Open(String),
    /// Native event routed from the subscription.
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    /// The shell's `next-page` button.
    NextPressed,
    /// The shell's `prev-page` button.
    PreviousPressed,
    ModeSelected(ReadingMode),
    CloseRequested,
    /// Visibility of vertical pages changed.
    Visibility(VisibilityReport),
    ImageLoaded {
        page: usize,
        natural_size: Size,
    },
    ImageFailed {
        page: usize,
    },
    /// The reader overlay gained or lost keyboard focus.
    FocusChanged(bool),
    /// A button inside the overlay gained or lost focus.
    ButtonFocusChanged(bool),
    Tick(Instant),
}

/// Effects the host must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The input was not consumed; let the platform handle it natively.
    Unhandled,
    /// Bring the current page or spread into view.
    ScrollTo(ScrollRequest),
    /// Scroll the vertical column by `dy` pixels.
    ScrollBy(f32),
    /// Load `url` into the slot of `page`.
    LoadImage { page: usize, url: String },
    /// Show a localized error.
    ShowError { key: &'static str },
    /// The reader closed; hide the overlay.
    Closed,
}

/// The manga reader.
#[derive(Debug)]
pub struct MangaReader {
    session: Option<ReaderSession>,
    /// Mode restored on the next open.
    preferred_mode: ReadingMode,
    layout: LayoutModeManager,
    transform: ViewportTransform,
    gesture: GestureTracker,
    controls: ControlsVisibility,
    viewport: Size,
    focused: bool,
    button_focused: bool,
}

impl Default for MangaReader {
    fn default() -> Self {
        Self::with_layout(LayoutModeManager::default())
    }
}

impl MangaReader {
    /// Creates a reader with a custom layout manager (e.g. another visibility tracker).
    #[must_use]
    pub fn with_layout(layout: LayoutModeManager) -> Self {
        Self {
            session: None,
            preferred_mode: ReadingMode::default(),
            layout,
            transform: ViewportTransform::identity(),
            gesture: GestureTracker::default(),
            controls: ControlsVisibility::new(READER_CONTROLS_TIMEOUT),
            viewport: Size::ZERO,
            focused: false,
            button_focused: false,
        }
    }

    /// Binds the reader to a shell, failing if a required container is missing.
    pub fn attach(shell: &impl Shell) -> Result<Self> {
        shell::require(shell, shell::READER_CONTAINERS)?;
        Ok(Self::default())
    }

    /// Like [`attach`](Self::attach), but logs the failure and returns `None`,
    /// leaving the reader inert without affecting the rest of the page.
    pub fn try_attach(shell: &impl Shell) -> Option<Self> {
        match Self::attach(shell) {
            Ok(reader) => Some(reader),
            Err(err) => {
                log::error!("Manga reader disabled: {err}");
                None
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&ReaderSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutModeManager {
        &self.layout
    }

    #[must_use]
    pub fn mode(&self) -> ReadingMode {
        self.session
            .as_ref()
            .map_or(self.preferred_mode, ReaderSession::mode)
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current counter label, `None` while closed.
    #[must_use]
    pub fn counter(&self) -> Option<CounterLabel> {
        self.session.as_ref().map(CounterLabel::for_session)
    }

    /// Current navigation button state, `None` while closed.
    #[must_use]
    pub fn navigation(&self) -> Option<NavigationState> {
        self.session.as_ref().map(NavigationState::for_session)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens a manga from its serialized page list.
    ///
    /// On a malformed payload the reader stays as it was. On success the
    /// returned request scrolls to the first page without animation.
    pub fn open(&mut self, serialized: &str, now: Instant) -> Result<ScrollRequest> {
        let pages = PageSources::parse(serialized)?;

        self.reset_interaction();
        let session = ReaderSession::new(pages, self.preferred_mode);
        self.layout.build(&session);
        let request = self.layout.scroll_to_current(&session, false);
        self.session = Some(session);
        self.focused = true;
        self.show_controls(now);

        log::debug!(
            "Opened manga with {} pages in {:?} mode",
            self.session.as_ref().map_or(0, ReaderSession::page_count),
            self.preferred_mode
        );
        Ok(request)
    }

    /// Closes the reader, tearing down the layout and all transient state.
    /// The reading mode is kept for the next open.
    pub fn close(&mut self) -> Effect {
        if self.session.take().is_none() {
            return Effect::None;
        }
        self.layout.teardown();
        self.reset_interaction();
        self.focused = false;
        self.button_focused = false;
        Effect::Closed
    }

    fn reset_interaction(&mut self) {
        self.transform = ViewportTransform::identity();
        self.gesture.reset();
        self.controls.disarm();
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Handles a reader message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Open(serialized) => match self.open(&serialized, now) {
                Ok(request) => Effect::ScrollTo(request),
                Err(err) => {
                    log::error!("Could not open manga: {err}");
                    Effect::ShowError {
                        key: "error-reader-payload",
                    }
                }
            },
            Message::RawEvent { event, .. } => self.handle_raw_event(event, now),
            Message::NextPressed => self.press_button(|nav| nav.next.delta, now),
            Message::PreviousPressed => self.press_button(|nav| nav.previous.delta, now),
            Message::ModeSelected(mode) => self.set_mode(mode, now),
            Message::CloseRequested => self.close(),
            Message::Visibility(report) => {
                if let Some(session) = self.session.as_mut() {
                    self.layout.on_visibility(session, &report);
                }
                Effect::None
            }
            Message::ImageLoaded { page, natural_size } => {
                if let Some(slot) = self.session.as_mut().and_then(|s| s.slot_mut(page)) {
                    if slot.loaded(natural_size) {
                        self.reclamp();
                    }
                }
                Effect::None
            }
            Message::ImageFailed { page } => self.image_failed(page),
            Message::FocusChanged(focused) => {
                self.focused = focused;
                Effect::None
            }
            Message::ButtonFocusChanged(focused) => {
                self.button_focused = focused;
                Effect::None
            }
            Message::Tick(instant) => {
                self.controls.tick(instant);
                Effect::None
            }
        }
    }

    fn handle_raw_event(&mut self, event: event::Event, now: Instant) -> Effect {
        match event {
            event::Event::Window(window::Event::Resized(size)) => {
                self.viewport = size;
                self.reclamp();
                Effect::None
            }
            _ if self.session.is_none() => Effect::Unhandled,
            event::Event::Touch(touch_event) => self.handle_touch(touch_event, now),
            event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                self.handle_wheel(delta, now)
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                self.handle_key(&key, now)
            }
            _ => Effect::Unhandled,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn press_button(&mut self, delta: impl Fn(&NavigationState) -> i32, now: Instant) -> Effect {
        match self.navigation() {
            Some(nav) => self.navigate(delta(&nav), now),
            None => Effect::None,
        }
    }

    /// Moves one step; resets zoom and scrolls smoothly if the position changed.
    fn navigate(&mut self, delta: i32, now: Instant) -> Effect {
        let Some(session) = self.session.as_mut() else {
            return Effect::None;
        };
        if !session.step(delta) {
            return Effect::None;
        }
        let request = self.layout.scroll_to_current(session, true);
        self.transform = ViewportTransform::identity();
        self.show_controls(now);
        Effect::ScrollTo(request)
    }

    fn set_mode(&mut self, mode: ReadingMode, now: Instant) -> Effect {
        self.preferred_mode = mode;
        let Some(session) = self.session.as_mut() else {
            return Effect::None;
        };
        let Some(request) = self.layout.switch_mode(session, mode) else {
            return Effect::None;
        };
        self.gesture.reset();
        self.transform = ViewportTransform::identity();
        self.show_controls(now);
        log::debug!("Switched reading mode to {mode:?}");
        Effect::ScrollTo(request)
    }

    fn image_failed(&mut self, page: usize) -> Effect {
        let Some(slot) = self.session.as_mut().and_then(|s| s.slot_mut(page)) else {
            return Effect::None;
        };
        match slot.failed() {
            FailureOutcome::Retry(url) => {
                log::warn!("Image for page {} failed, trying {url}", page + 1);
                Effect::LoadImage { page, url }
            }
            FailureOutcome::Exhausted => {
                log::warn!("All image sources failed for page {}", page + 1);
                Effect::None
            }
            FailureOutcome::Ignored => Effect::None,
        }
    }

    // =========================================================================
    // Transform
    // =========================================================================

    fn content_size(&self) -> Size {
        self.session
            .as_ref()
            .map_or(self.viewport, |s| self.layout.content_size(s, self.viewport))
    }

    fn apply_transform(&mut self, zoom: f32, pan: Vector) {
        self.transform = ViewportTransform::apply(zoom, pan, self.content_size(), self.viewport);
        if self.transform.is_zoomed(ZOOM_SNAP_TOLERANCE) {
            self.controls.disarm();
        }
    }

    fn reclamp(&mut self) {
        self.transform = self.transform.reclamped(self.content_size(), self.viewport);
    }

    /// Zooms to `zoom`, keeping `anchor` rendered at `screen`.
    fn apply_anchored(&mut self, anchor: Vector, screen: Vector, zoom: f32) {
        self.transform =
            ViewportTransform::anchored(anchor, screen, zoom, self.content_size(), self.viewport);
        if self.transform.is_zoomed(ZOOM_SNAP_TOLERANCE) {
            self.controls.disarm();
        }
    }

    // =========================================================================
    // Touch
    // =========================================================================

    fn handle_touch(&mut self, event: touch::Event, now: Instant) -> Effect {
        match event {
            touch::Event::FingerPressed { id, position } => {
                self.controls.keep_alive(now, self.auto_hide());
                self.gesture
                    .press(id, position, &self.transform, self.viewport);
                self.touch_scroll_effect()
            }
            touch::Event::FingerMoved { id, position } => {
                match self.gesture.moved(id, position, self.viewport) {
                    Some(Motion::Pan { pan }) => {
                        self.apply_transform(self.transform.zoom().value(), pan);
                    }
                    Some(Motion::Pinch {
                        zoom,
                        midpoint,
                        anchor,
                    }) => self.apply_anchored(anchor, midpoint, zoom),
                    None => {}
                }
                self.touch_scroll_effect()
            }
            touch::Event::FingerLifted { id, position } => {
                match self.gesture.lift(id, position) {
                    Release::Tap { at } => self.tap(at, now),
                    Release::Swipe { delta } => self.swipe(delta, now),
                    Release::PinchEnded => {
                        if !self.transform.is_zoomed(ZOOM_SNAP_TOLERANCE) {
                            self.transform = ViewportTransform::identity();
                        }
                        Effect::None
                    }
                    Release::PanEnded | Release::Ignored => Effect::None,
                }
            }
            touch::Event::FingerLost { id, .. } => {
                self.gesture.cancel(id);
                Effect::None
            }
        }
    }

    fn tap(&mut self, at: Point, now: Instant) -> Effect {
        match self.gesture.register_tap(now) {
            TapKind::Single => {
                self.controls.toggle(now, self.auto_hide());
            }
            TapKind::Double => {
                if self.transform.zoom().is_identity() {
                    let screen = centered(at, self.viewport);
                    let anchor = self.transform.content_point(screen);
                    self.apply_anchored(anchor, screen, DOUBLE_TAP_ZOOM);
                } else {
                    self.transform = ViewportTransform::identity();
                }
            }
        }
        Effect::None
    }

    fn swipe(&mut self, delta: Vector, now: Instant) -> Effect {
        let horizontal = self.mode() == ReadingMode::Horizontal;
        if horizontal && delta.x.abs() > delta.y.abs() {
            // Swiping left turns to the next spread
            self.navigate(if delta.x < 0.0 { 1 } else { -1 }, now)
        } else {
            // Left to native scrolling
            Effect::Unhandled
        }
    }

    /// Effect for a press or move that did not zoom or pan.
    ///
    /// Unzoomed one-finger drags in vertical mode scroll the page column
    /// natively.
    fn touch_scroll_effect(&self) -> Effect {
        let tracking = matches!(
            self.gesture.state(),
            GestureState::Idle | GestureState::Tracking { .. }
        );
        if tracking && self.mode() == ReadingMode::Vertical {
            Effect::Unhandled
        } else {
            Effect::None
        }
    }

    // =========================================================================
    // Wheel and keyboard
    // =========================================================================

    fn handle_wheel(&mut self, delta: mouse::ScrollDelta, now: Instant) -> Effect {
        if self.gesture.is_pinching() {
            return Effect::None;
        }
        let delta = scroll_pixels(delta);

        if self.transform.is_zoomed(ZOOM_INPUT_TOLERANCE) {
            let pan = self.transform.pan() - delta;
            self.apply_transform(self.transform.zoom().value(), pan);
            self.show_controls(now);
            return Effect::None;
        }

        self.show_controls(now);
        match self.mode() {
            ReadingMode::Horizontal => {
                let dominant = if delta.x != 0.0 { delta.x } else { delta.y };
                match sign(dominant) {
                    0 => Effect::None,
                    direction => self.navigate(direction, now),
                }
            }
            ReadingMode::Vertical => Effect::Unhandled,
        }
    }

    fn handle_key(&mut self, key: &keyboard::Key, now: Instant) -> Effect {
        use keyboard::key::Named;

        if !self.focused
            || matches!(
                self.gesture.state(),
                GestureState::Panning { .. } | GestureState::Pinching { .. }
            )
        {
            return Effect::Unhandled;
        }
        let keyboard::Key::Named(named) = key else {
            return Effect::Unhandled;
        };
        if self.button_focused && matches!(named, Named::Space | Named::Enter) {
            return Effect::Unhandled;
        }
        if *named == Named::Escape {
            return self.close();
        }
        if self.transform.is_zoomed(ZOOM_INPUT_TOLERANCE) {
            return Effect::Unhandled;
        }

        let vertical = self.mode() == ReadingMode::Vertical;
        let page_step = self.viewport.height * PAGE_SCROLL_FRACTION;
        let effect = match named {
            Named::ArrowDown if vertical => Effect::ScrollBy(KEY_SCROLL_STEP),
            Named::ArrowUp if vertical => Effect::ScrollBy(-KEY_SCROLL_STEP),
            Named::PageDown if vertical => Effect::ScrollBy(page_step),
            Named::PageUp if vertical => Effect::ScrollBy(-page_step),
            // Right to left: the right arrow walks back
            Named::ArrowRight if !vertical => self.navigate(-1, now),
            Named::ArrowLeft if !vertical => self.navigate(1, now),
            Named::PageDown => self.navigate(1, now),
            Named::PageUp => self.navigate(-1, now),
            _ => return Effect::Unhandled,
        };
        self.show_controls(now);
        effect
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Controls auto-hide only while the content is not zoomed.
    fn auto_hide(&self) -> bool {
        !self.transform.is_zoomed(ZOOM_SNAP_TOLERANCE)
    }

    fn show_controls(&mut self, now: Instant) {
        self.controls.show(now, self.auto_hide());
    }
}

/// Converts an Iced wheel delta to pixels in the direction content scrolls
/// (positive y scrolls down).
fn scroll_pixels(delta: mouse::ScrollDelta) -> Vector {
    match delta {
        mouse::ScrollDelta::Lines { x, y } => {
            Vector::new(-x * WHEEL_LINE_PIXELS, -y * WHEEL_LINE_PIXELS)
        }
        mouse::ScrollDelta::Pixels { x, y } => Vector::new(-x, -y),
    }
}

fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
