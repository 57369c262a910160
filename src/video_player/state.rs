// SPDX-License-Identifier: MPL-2.0
//! Video player component: source fallback, playback controls and overlays.
//!
//! The player never touches a media API directly. It drives the host's
//! [`MediaBackends`] and learns about results through [`Message`]s, which
//! keeps the fallback chain a plain state machine:
//!
//! ```text
//! Idle ──open──► Loading{0} ──metadata──► Ready{0}
//!                   │ fatal error
//!                   ▼
//!               Loading{1} ── … ──► Failed (all sources exhausted)
//! ```

use super::backend::{BackendEvent, MediaBackends, StreamBackend, SubtitleEvent};
use super::buffer::PlaybackProgress;
use super::sources::{subtitle_url, SourceKind, SourceList, SourceState};
use super::subtitles::{CaptionButton, Subtitles};
use super::time_units::{clamp_position, format_time};
use super::volume::Volume;
use crate::config::{Config, KEYBOARD_SEEK_STEP_SECS, VIDEO_CONTROLS_TIMEOUT};
use crate::controls::ControlsVisibility;
use crate::error::{Result, VideoError};
use crate::i18n::I18n;
use crate::shell::{self, Shell};
use iced::{event, keyboard, mouse, touch, window};
use std::time::Instant;

/// Messages handled by the video player.
#[derive(Debug, Clone)]
pub enum Message {
    /// Play a pipe-delimited source list with an optional subtitle URL.
    Open {
        sources: String,
        subtitles: Option<String>,
    },
    /// Native event routed from the subscription.
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    /// Load progress for the attempt at `source`.
    Backend { source: usize, event: BackendEvent },
    /// Subtitle renderer report for the attempt at `source`.
    Subtitle { source: usize, event: SubtitleEvent },
    /// The element started playing.
    Played,
    /// The element paused.
    Paused,
    /// The element refused to play.
    PlaybackRejected {
        name: Option<String>,
        message: String,
    },
    /// The element ran out of data.
    Waiting,
    /// The element can play again.
    CanPlay,
    Progress(PlaybackProgress),
    /// Play/pause button, center button or a click on the video surface.
    TogglePlayback,
    /// Seek to a fraction of the progress bar.
    SeekTo(f32),
    /// Keyboard seek on the focused progress bar, in seconds.
    SeekBy(f64),
    SetVolume(f32),
    ToggleMute,
    ToggleSubtitles,
    /// Fullscreen button or a double click on the video surface.
    ToggleFullscreen,
    FullscreenChanged(bool),
    CloseRequested,
    BufferCheck(Instant),
    Tick(Instant),
}

/// Effects the host must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The input was not consumed; let the platform handle it natively.
    Unhandled,
    /// Store the new volume preference.
    PersistVolume(Volume),
    ToggleFullscreen,
    ExitFullscreen,
    /// The player closed; leave fullscreen if needed and hide the overlay.
    Closed,
}

/// Loading indicator over the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Hidden,
    Loading,
    /// Playing, but the buffer is about to run dry.
    Stalled,
    /// Terminal error, as an i18n key.
    Error(&'static str),
}

impl Overlay {
    /// Localization key of the overlay text, if shown.
    #[must_use]
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            Overlay::Hidden => None,
            Overlay::Loading | Overlay::Stalled => Some("video-loading"),
            Overlay::Error(key) => Some(key),
        }
    }
}

/// The episode video player.
#[derive(Debug)]
pub struct VideoPlayer<B: MediaBackends> {
    backends: B,
    open: bool,
    sources: Option<SourceList>,
    subtitle_url: Option<String>,
    source_state: SourceState,
    stream: Option<Box<dyn StreamBackend>>,
    subtitles: Subtitles,
    playing: bool,
    progress: PlaybackProgress,
    volume: Volume,
    muted: bool,
    fullscreen: bool,
    overlay: Overlay,
    controls: ControlsVisibility,
}

impl<B: MediaBackends> VideoPlayer<B> {
    /// Creates a closed player starting at `volume`.
    pub fn new(backends: B, volume: Volume) -> Self {
        Self {
            backends,
            open: false,
            sources: None,
            subtitle_url: None,
            source_state: SourceState::Idle,
            stream: None,
            subtitles: Subtitles::Disabled,
            playing: false,
            progress: PlaybackProgress::default(),
            volume,
            muted: volume.is_silent(),
            fullscreen: false,
            overlay: Overlay::Hidden,
            controls: ControlsVisibility::new(VIDEO_CONTROLS_TIMEOUT),
        }
    }

    /// Binds the player to a shell, restoring the stored volume.
    pub fn attach(shell: &impl Shell, backends: B, config: &Config) -> Result<Self> {
        shell::require(shell, shell::VIDEO_CONTAINERS)?;
        Ok(Self::new(backends, Volume::from_config(config.video.volume)))
    }

    /// Like [`attach`](Self::attach), but logs the failure and returns `None`.
    pub fn try_attach(shell: &impl Shell, backends: B, config: &Config) -> Option<Self> {
        match Self::attach(shell, backends, config) {
            Ok(player) => Some(player),
            Err(err) => {
                log::error!("Video player disabled: {err}");
                None
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn source_state(&self) -> SourceState {
        self.source_state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Value shown by the volume slider: zero while muted.
    #[must_use]
    pub fn slider_volume(&self) -> Volume {
        if self.muted {
            Volume::new(0.0)
        } else {
            self.volume
        }
    }

    /// Accessible text of the volume slider, e.g. "40%".
    #[must_use]
    pub fn volume_text(&self, i18n: &I18n) -> String {
        i18n.tr_with_args(
            "video-volume-text",
            &[("percent", self.slider_volume().percent().to_string())],
        )
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    #[must_use]
    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    #[must_use]
    pub fn progress(&self) -> &PlaybackProgress {
        &self.progress
    }

    #[must_use]
    pub fn current_time_label(&self) -> String {
        format_time(self.progress.position)
    }

    #[must_use]
    pub fn duration_label(&self) -> String {
        format_time(self.progress.duration.unwrap_or(0.0))
    }

    #[must_use]
    pub fn caption_button(&self) -> CaptionButton {
        self.subtitles.caption_button()
    }

    #[must_use]
    pub fn play_label_key(&self) -> &'static str {
        if self.playing {
            "video-pause"
        } else {
            "video-play"
        }
    }

    #[must_use]
    pub fn fullscreen_label_key(&self) -> &'static str {
        if self.fullscreen {
            "video-fullscreen-exit"
        } else {
            "video-fullscreen-enter"
        }
    }

    #[must_use]
    pub fn backends(&self) -> &B {
        &self.backends
    }

    pub fn backends_mut(&mut self) -> &mut B {
        &mut self.backends
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens the player on a pipe-delimited source list.
    ///
    /// An empty list leaves the player open with the error overlay shown.
    pub fn open(&mut self, sources: &str, subtitles: Option<&str>, now: Instant) -> Result<()> {
        self.reset_media();
        self.reset_playback();
        self.open = true;
        self.show_controls(now);

        let list = match SourceList::parse(sources) {
            Ok(list) => list,
            Err(err) => {
                log::error!("Cannot play video: {err}");
                self.sources = None;
                self.source_state = SourceState::Failed;
                self.overlay = Overlay::Error("error-video-no-sources");
                return Err(err);
            }
        };
        log::debug!("Opening video with {} candidate sources", list.len());
        self.sources = Some(list);
        self.subtitle_url = subtitle_url(subtitles);
        self.apply_volume();
        self.try_source(0);
        Ok(())
    }

    /// Stops playback and releases every back-end.
    pub fn close(&mut self) -> Effect {
        if !self.open {
            return Effect::None;
        }
        self.reset_media();
        self.backends.element().pause();
        self.reset_playback();
        self.open = false;
        self.fullscreen = false;
        self.sources = None;
        self.subtitle_url = None;
        Effect::Closed
    }

    fn reset_playback(&mut self) {
        self.source_state = SourceState::Idle;
        self.playing = false;
        self.progress = PlaybackProgress::default();
        self.overlay = Overlay::Hidden;
        self.controls.disarm();
    }

    /// Destroys the stream and subtitles and empties the element.
    fn reset_media(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.destroy();
        }
        self.subtitles.teardown();
        let element = self.backends.element();
        element.remove_text_tracks();
        element.clear_source();
    }

    /// Loads the first playable source from `start` on.
    fn try_source(&mut self, start: usize) {
        let mut index = start;
        loop {
            self.reset_media();
            let Some(url) = self
                .sources
                .as_ref()
                .and_then(|sources| sources.get(index))
                .map(str::to_string)
            else {
                log::error!("All {index} video sources failed");
                self.source_state = SourceState::Failed;
                self.playing = false;
                self.overlay = Overlay::Error(VideoError::SourcesExhausted.i18n_key());
                return;
            };

            self.source_state = SourceState::Loading { index };
            self.overlay = Overlay::Loading;
            self.subtitles = Subtitles::start(self.subtitle_url.as_deref(), &mut self.backends);

            match SourceKind::of(&url) {
                SourceKind::Progressive => {
                    self.backends.element().set_source(&url);
                    return;
                }
                SourceKind::Adaptive => {
                    if let Some(mut stream) = self.backends.create_stream() {
                        stream.load_source(&url);
                        stream.attach(self.backends.element());
                        self.stream = Some(stream);
                        return;
                    }
                    if self.backends.element().supports_native_hls() {
                        self.backends.element().set_source(&url);
                        return;
                    }
                    log::warn!("Skipping video source {index}: HLS is not supported ({url})");
                    index += 1;
                }
            }
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Handles a player message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Open { sources, subtitles } => {
                // A bad list is already reported by the overlay
                let _ = self.open(&sources, subtitles.as_deref(), now);
                Effect::None
            }
            _ if !self.open => Effect::None,
            Message::RawEvent { event, .. } => self.handle_raw_event(event, now),
            Message::Backend { source, event } => {
                self.backend_event(source, event);
                Effect::None
            }
            Message::Subtitle { source, event } => {
                if self.source_state.index() == Some(source) {
                    self.subtitles.on_event(event, &mut self.backends);
                }
                Effect::None
            }
            Message::Played => {
                self.playing = true;
                self.show_controls(now);
                Effect::None
            }
            Message::Paused => {
                self.playing = false;
                if self.overlay == Overlay::Stalled {
                    self.overlay = Overlay::Hidden;
                }
                self.show_controls(now);
                Effect::None
            }
            Message::PlaybackRejected { name, message } => {
                let error = VideoError::from_report(name.as_deref(), &message);
                log::error!("Playback failed: {error}");
                self.playing = false;
                self.overlay = Overlay::Error(error.i18n_key());
                self.show_controls(now);
                Effect::None
            }
            Message::Waiting => {
                if !matches!(self.overlay, Overlay::Error(_)) {
                    self.overlay = Overlay::Loading;
                }
                Effect::None
            }
            Message::CanPlay => {
                if !matches!(self.overlay, Overlay::Error(_)) {
                    self.overlay = Overlay::Hidden;
                }
                Effect::None
            }
            Message::Progress(progress) => {
                self.progress = progress;
                if self.overlay == Overlay::Stalled && self.progress.has_recovered() {
                    self.overlay = Overlay::Hidden;
                }
                Effect::None
            }
            Message::TogglePlayback => {
                self.toggle_playback();
                Effect::None
            }
            Message::SeekTo(fraction) => {
                if let Some(target) = self.progress.seek_target(fraction) {
                    self.seek(target);
                }
                Effect::None
            }
            Message::SeekBy(delta) => {
                self.seek_by(delta);
                Effect::None
            }
            Message::SetVolume(value) => self.set_volume(Volume::new(value)),
            Message::ToggleMute => {
                self.toggle_mute();
                Effect::None
            }
            Message::ToggleSubtitles => {
                self.subtitles.toggle(&mut self.backends);
                Effect::None
            }
            Message::ToggleFullscreen => Effect::ToggleFullscreen,
            Message::FullscreenChanged(fullscreen) => {
                self.fullscreen = fullscreen;
                Effect::None
            }
            Message::CloseRequested => self.close(),
            Message::BufferCheck(_) => {
                self.check_buffer();
                Effect::None
            }
            Message::Tick(instant) => {
                self.controls.tick(instant);
                Effect::None
            }
        }
    }

    fn backend_event(&mut self, source: usize, event: BackendEvent) {
        if self.source_state.index() != Some(source) {
            log::debug!("Ignoring event from abandoned video source {source}");
            return;
        }
        match event {
            BackendEvent::ManifestParsed | BackendEvent::MetadataLoaded => {
                if self.source_state == (SourceState::Loading { index: source }) {
                    self.source_state = SourceState::Ready { index: source };
                    self.start_playback();
                }
            }
            BackendEvent::Error {
                fatal: true,
                detail,
            } => {
                log::warn!("Video source {source} failed: {detail}");
                self.playing = false;
                self.try_source(source + 1);
            }
            BackendEvent::Error {
                fatal: false,
                detail,
            } => log::debug!("Recoverable error on video source {source}: {detail}"),
        }
    }

    fn start_playback(&mut self) {
        self.overlay = Overlay::Hidden;
        self.progress = PlaybackProgress::default();
        self.backends.element().play();
    }

    fn handle_raw_event(&mut self, event: event::Event, now: Instant) -> Effect {
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                self.handle_key(&key, now)
            }
            event::Event::Mouse(mouse::Event::CursorMoved { .. })
            | event::Event::Touch(touch::Event::FingerPressed { .. }) => {
                self.show_controls(now);
                Effect::None
            }
            event::Event::Mouse(mouse::Event::CursorLeft) => {
                if self.playing {
                    self.controls.hide();
                }
                Effect::None
            }
            _ => Effect::Unhandled,
        }
    }

    fn handle_key(&mut self, key: &keyboard::Key, now: Instant) -> Effect {
        use keyboard::key::Named;
        use keyboard::Key;

        match key.as_ref() {
            Key::Named(Named::Space) | Key::Character("k") => self.toggle_playback(),
            Key::Named(Named::ArrowLeft) => self.seek_by(-KEYBOARD_SEEK_STEP_SECS),
            Key::Named(Named::ArrowRight) => self.seek_by(KEYBOARD_SEEK_STEP_SECS),
            Key::Named(Named::ArrowUp) => return self.set_volume(self.volume.increase()),
            Key::Named(Named::ArrowDown) => return self.set_volume(self.volume.decrease()),
            Key::Character("f") => return Effect::ToggleFullscreen,
            Key::Character("c") => {
                self.subtitles.toggle(&mut self.backends);
            }
            Key::Character("m") => self.toggle_mute(),
            Key::Named(Named::Escape) if self.fullscreen => return Effect::ExitFullscreen,
            Key::Named(Named::Escape) => return self.close(),
            _ => return Effect::Unhandled,
        }
        self.show_controls(now);
        Effect::None
    }

    // =========================================================================
    // Playback
    // =========================================================================

    fn toggle_playback(&mut self) {
        if !matches!(self.source_state, SourceState::Ready { .. }) {
            return;
        }
        let element = self.backends.element();
        if self.playing {
            element.pause();
        } else {
            element.play();
        }
    }

    fn seek(&mut self, position: f64) {
        self.progress.position = position;
        self.backends.element().seek(position);
    }

    fn seek_by(&mut self, delta: f64) {
        let target = clamp_position(self.progress.position + delta, self.progress.duration);
        self.seek(target);
    }

    fn set_volume(&mut self, volume: Volume) -> Effect {
        self.volume = volume;
        self.muted = volume.is_silent();
        self.apply_volume();
        Effect::PersistVolume(volume)
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        let (volume, muted) = (self.volume, self.muted);
        self.backends.element().set_volume(volume, muted);
    }

    /// Shows the loading overlay while playback is about to stall.
    fn check_buffer(&mut self) {
        match self.overlay {
            Overlay::Hidden if self.playing && self.progress.is_stalling() => {
                log::debug!(
                    "Buffer running low: {:.1}s ahead",
                    self.progress.buffered_ahead()
                );
                self.overlay = Overlay::Stalled;
            }
            Overlay::Stalled if self.progress.has_recovered() => {
                self.overlay = Overlay::Hidden;
            }
            _ => {}
        }
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Controls auto-hide only while playing.
    fn show_controls(&mut self, now: Instant) {
        self.controls.show(now, self.playing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_player::buffer::{ReadyState, TimeRange};
    use crate::video_player::testing::FakeBackends;
    use crate::config::DEFAULT_VOLUME;
    use crate::shell::StaticShell;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;

    fn player(backends: FakeBackends) -> VideoPlayer<FakeBackends> {
        VideoPlayer::new(backends, Volume::new(0.5))
    }

    fn key_event(key: keyboard::Key) -> Message {
        Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: key.clone(),
                modified_key: key,
                physical_key: keyboard::key::Physical::Unidentified(
                    keyboard::key::NativeCode::Unidentified,
                ),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::default(),
                text: None,
                repeat: false,
            }),
        }
    }

    fn named(named: keyboard::key::Named) -> Message {
        key_event(keyboard::Key::Named(named))
    }

    fn character(c: &str) -> Message {
        key_event(keyboard::Key::Character(c.into()))
    }

    /// Opens `sources` and plays the first one.
    fn playing(sources: &str, now: Instant) -> VideoPlayer<FakeBackends> {
        let mut player = player(FakeBackends::new());
        player.open(sources, None, now).expect("valid sources");
        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::MetadataLoaded,
            },
            now,
        );
        player.handle(Message::Played, now);
        player.backends().log.take();
        player
    }

    fn progress(position: f64, duration: f64) -> PlaybackProgress {
        PlaybackProgress {
            position,
            duration: Some(duration),
            buffered: vec![TimeRange::new(0.0, duration)],
            seekable: vec![TimeRange::new(0.0, duration)],
            ready_state: ReadyState::EnoughData,
            seeking: false,
        }
    }

    fn fatal(source: usize) -> Message {
        Message::Backend {
            source,
            event: BackendEvent::Error {
                fatal: true,
                detail: "manifestLoadError".into(),
            },
        }
    }

    #[test]
    fn attach_restores_stored_volume() {
        let mut config = Config::default();
        config.video.volume = Some(0.25);
        let player = VideoPlayer::attach(&StaticShell::complete(), FakeBackends::new(), &config)
            .expect("complete shell");
        assert_abs_diff_eq!(player.volume().value(), 0.25);

        let player = VideoPlayer::new(FakeBackends::new(), Volume::from_config(None));
        assert_abs_diff_eq!(player.volume().value(), DEFAULT_VOLUME);
    }

    #[test]
    fn attach_fails_without_container() {
        let shell = StaticShell::complete().without("progress-container");
        assert!(VideoPlayer::try_attach(&shell, FakeBackends::new(), &Config::default()).is_none());
    }

    #[test]
    fn progressive_source_plays_after_metadata() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player.open("ep1.mp4", None, now).expect("valid sources");

        assert_eq!(player.source_state(), SourceState::Loading { index: 0 });
        assert_eq!(player.overlay(), Overlay::Loading);
        assert!(player.backends().log.contains("set_source:ep1.mp4"));

        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::MetadataLoaded,
            },
            now,
        );
        assert_eq!(player.source_state(), SourceState::Ready { index: 0 });
        assert_eq!(player.overlay(), Overlay::Hidden);
        assert!(player.backends().log.contains("play"));
    }

    #[test]
    fn adaptive_source_uses_stream_backend() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player.open("master.m3u8", None, now).expect("valid sources");

        let calls = player.backends().log.take();
        assert!(calls.contains(&"stream_load:master.m3u8".to_string()));
        assert!(calls.contains(&"stream_attach".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("set_source")));

        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::ManifestParsed,
            },
            now,
        );
        assert_eq!(player.source_state(), SourceState::Ready { index: 0 });
    }

    #[test]
    fn adaptive_source_falls_back_to_native_hls() {
        let mut player = player(FakeBackends::new().without_streams().with_native_hls());
        player.open("master.m3u8", None, Instant::now()).expect("valid sources");
        assert!(player.backends().log.contains("set_source:master.m3u8"));
    }

    #[test]
    fn unsupported_hls_skips_to_next_source() {
        let mut player = player(FakeBackends::new().without_streams());
        player
            .open("master.m3u8|backup.mp4", None, Instant::now())
            .expect("valid sources");
        assert_eq!(player.source_state(), SourceState::Loading { index: 1 });
        assert!(player.backends().log.contains("set_source:backup.mp4"));
    }

    #[test]
    fn fatal_errors_walk_the_chain_then_fail() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player.open("a.m3u8 | b.mp4", None, now).expect("valid sources");

        player.handle(fatal(0), now);
        assert_eq!(player.source_state(), SourceState::Loading { index: 1 });
        assert!(player.backends().log.contains("stream_destroy"));

        player.handle(fatal(1), now);
        assert_eq!(player.source_state(), SourceState::Failed);
        assert_eq!(player.overlay(), Overlay::Error("error-video-sources-exhausted"));
    }

    #[test]
    fn stale_events_are_ignored() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player.open("a.mp4|b.mp4", None, now).expect("valid sources");
        player.handle(fatal(0), now);

        // A late report from the abandoned first attempt
        player.handle(fatal(0), now);
        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::MetadataLoaded,
            },
            now,
        );
        assert_eq!(player.source_state(), SourceState::Loading { index: 1 });
    }

    #[test]
    fn recoverable_errors_do_not_advance() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player.open("a.m3u8|b.mp4", None, now).expect("valid sources");
        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::Error {
                    fatal: false,
                    detail: "fragLoadError".into(),
                },
            },
            now,
        );
        assert_eq!(player.source_state(), SourceState::Loading { index: 0 });
    }

    #[test]
    fn empty_source_list_shows_error() {
        let mut player = player(FakeBackends::new());
        let result = player.open(" | ", None, Instant::now());
        assert_eq!(result, Err(crate::error::Error::NoVideoSources));
        assert!(player.is_open());
        assert_eq!(player.source_state(), SourceState::Failed);
        assert_eq!(
            player.overlay().message_key(),
            Some("error-video-no-sources")
        );
    }

    #[test]
    fn rejected_play_shows_classified_error() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        player.handle(
            Message::PlaybackRejected {
                name: Some("NotAllowedError".into()),
                message: "net::NETWORK_ERR".into(),
            },
            now,
        );
        assert!(!player.is_playing());
        assert_eq!(player.overlay(), Overlay::Error("error-video-network"));
    }

    #[test]
    fn subtitles_start_with_each_source() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player
            .open("a.mp4|b.mp4", Some("ep.ass"), now)
            .expect("valid sources");
        player.handle(fatal(0), now);

        let calls = player.backends().log.take();
        let created = calls.iter().filter(|c| *c == "subs_create:ep.ass").count();
        assert_eq!(created, 2);
        assert!(calls.contains(&"subs_dispose".to_string()));

        player.handle(
            Message::Subtitle {
                source: 1,
                event: SubtitleEvent::Ready,
            },
            now,
        );
        assert!(player.caption_button().active);

        player.handle(character("c"), now);
        assert!(!player.caption_button().active);
        assert!(player.caption_button().visible);
    }

    #[test]
    fn null_subtitle_url_hides_caption_button() {
        let mut player = player(FakeBackends::new());
        player.open("a.mp4", Some("null"), Instant::now()).expect("valid sources");
        assert!(!player.caption_button().visible);
        assert!(!player.backends().log.take().iter().any(|c| c.starts_with("subs")));
    }

    #[test]
    fn space_and_k_toggle_playback() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);

        assert_eq!(player.handle(named(keyboard::key::Named::Space), now), Effect::None);
        assert_eq!(player.backends().log.take(), vec!["pause"]);
        player.handle(Message::Paused, now);
        assert_eq!(player.play_label_key(), "video-play");

        player.handle(character("k"), now);
        assert_eq!(player.backends().log.take(), vec!["play"]);
    }

    #[test]
    fn arrows_seek_within_duration() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        player.handle(Message::Progress(progress(3.0, 100.0)), now);

        player.handle(named(keyboard::key::Named::ArrowLeft), now);
        assert_abs_diff_eq!(player.progress().position, 0.0);

        player.handle(Message::Progress(progress(98.0, 100.0)), now);
        player.handle(named(keyboard::key::Named::ArrowRight), now);
        assert_abs_diff_eq!(player.progress().position, 100.0);
        assert_eq!(player.backends().log.take(), vec!["seek:0", "seek:100"]);
    }

    #[test]
    fn click_seek_requires_seekable_target() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        let mut p = progress(0.0, 200.0);
        p.seekable = vec![TimeRange::new(0.0, 60.0)];
        player.handle(Message::Progress(p), now);

        player.handle(Message::SeekTo(0.25), now);
        assert_abs_diff_eq!(player.progress().position, 50.0);
        player.handle(Message::SeekTo(0.75), now);
        assert_abs_diff_eq!(player.progress().position, 50.0);
    }

    #[test]
    fn volume_keys_step_and_persist() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);

        let effect = player.handle(named(keyboard::key::Named::ArrowUp), now);
        match effect {
            Effect::PersistVolume(volume) => assert_abs_diff_eq!(volume.value(), 0.6, epsilon = 1e-6),
            other => panic!("expected volume to persist, got {other:?}"),
        }

        player.handle(Message::SetVolume(0.0), now);
        assert!(player.is_muted());
        assert_eq!(player.volume_text(&I18n::default()), "0%");
    }

    #[test]
    fn mute_toggle_is_not_persisted() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        assert_eq!(player.handle(character("m"), now), Effect::None);
        assert!(player.is_muted());
        assert_abs_diff_eq!(player.slider_volume().value(), 0.0);
        assert_abs_diff_eq!(player.volume().value(), 0.5);
        assert_eq!(player.backends().log.take(), vec!["volume:50:true"]);
    }

    #[test]
    fn escape_leaves_fullscreen_before_closing() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        assert_eq!(player.handle(character("f"), now), Effect::ToggleFullscreen);
        player.handle(Message::FullscreenChanged(true), now);
        assert_eq!(player.fullscreen_label_key(), "video-fullscreen-exit");

        assert_eq!(
            player.handle(named(keyboard::key::Named::Escape), now),
            Effect::ExitFullscreen
        );
        player.handle(Message::FullscreenChanged(false), now);
        assert_eq!(
            player.handle(named(keyboard::key::Named::Escape), now),
            Effect::Closed
        );
        assert!(!player.is_open());
    }

    #[test]
    fn controls_auto_hide_only_while_playing() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        assert!(player.controls().is_armed());
        player.handle(Message::Tick(now + Duration::from_secs(3)), now);
        assert!(!player.controls().is_visible());

        let moved = Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::CursorMoved {
                position: iced::Point::ORIGIN,
            }),
        };
        player.handle(moved, now);
        assert!(player.controls().is_visible());

        player.handle(Message::Paused, now);
        assert!(!player.controls().is_armed());
        player.handle(Message::Tick(now + Duration::from_secs(60)), now);
        assert!(player.controls().is_visible());
    }

    #[test]
    fn leaving_the_surface_hides_controls_while_playing() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        let left = Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::CursorLeft),
        };
        player.handle(left.clone(), now);
        assert!(!player.controls().is_visible());

        player.handle(Message::Paused, now);
        player.handle(left, now);
        assert!(player.controls().is_visible());
    }

    #[test]
    fn buffer_check_flags_and_clears_stalls() {
        let now = Instant::now();
        let mut player = playing("a.mp4", now);
        let mut low = progress(10.0, 100.0);
        low.buffered = vec![TimeRange::new(0.0, 12.0)];
        low.ready_state = ReadyState::CurrentData;
        player.handle(Message::Progress(low), now);

        player.handle(Message::BufferCheck(now), now);
        assert_eq!(player.overlay(), Overlay::Stalled);
        assert_eq!(player.overlay().message_key(), Some("video-loading"));

        player.handle(Message::Progress(progress(10.0, 100.0)), now);
        assert_eq!(player.overlay(), Overlay::Hidden);
    }

    #[test]
    fn close_resets_everything() {
        let now = Instant::now();
        let mut player = player(FakeBackends::new());
        player
            .open("a.m3u8", Some("ep.ass"), now)
            .expect("valid sources");
        player.handle(
            Message::Backend {
                source: 0,
                event: BackendEvent::ManifestParsed,
            },
            now,
        );
        player.handle(Message::Progress(progress(42.0, 100.0)), now);
        player.backends().log.take();

        assert_eq!(player.handle(Message::CloseRequested, now), Effect::Closed);
        let calls = player.backends().log.take();
        assert_eq!(
            calls,
            vec![
                "stream_destroy",
                "subs_dispose",
                "remove_tracks",
                "clear_source",
                "pause"
            ]
        );
        assert_eq!(player.current_time_label(), "00:00");
        assert_eq!(player.duration_label(), "00:00");
        assert_eq!(player.source_state(), SourceState::Idle);
        assert!(!player.controls().is_armed());

        // Closed players ignore everything but a new open
        assert_eq!(player.handle(Message::TogglePlayback, now), Effect::None);
        assert!(player.backends().log.take().is_empty());
    }
}
