// SPDX-License-Identifier: MPL-2.0
//! Subtitle display: styled renderer first, native text track as fallback.

use super::backend::{MediaBackends, SubtitleEvent, SubtitleOptions, SubtitleRenderer};

/// What the CC button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptionButton {
    pub visible: bool,
    pub active: bool,
}

/// Subtitle pipeline for the current source.
#[derive(Debug, Default)]
pub enum Subtitles {
    /// No subtitle URL.
    #[default]
    Disabled,
    /// Renderer created, waiting for it to report ready.
    Starting {
        url: String,
        renderer: Box<dyn SubtitleRenderer>,
    },
    Rendering {
        renderer: Box<dyn SubtitleRenderer>,
        visible: bool,
    },
    /// Native text track on the media element.
    Native { visible: bool },
}

impl Subtitles {
    /// Starts subtitles for `url`, falling back to a native track when no
    /// renderer is available.
    pub fn start<B: MediaBackends>(url: Option<&str>, backends: &mut B) -> Self {
        let Some(url) = url else {
            return Subtitles::Disabled;
        };
        match backends.create_subtitles(SubtitleOptions::new(url)) {
            Some(renderer) => Subtitles::Starting {
                url: url.to_string(),
                renderer,
            },
            None => {
                log::warn!("Subtitle renderer unavailable, using native track");
                Self::native(url, backends)
            }
        }
    }

    fn native<B: MediaBackends>(url: &str, backends: &mut B) -> Self {
        let element = backends.element();
        element.remove_text_tracks();
        element.attach_text_track(url);
        element.set_text_track_visible(true);
        Subtitles::Native { visible: true }
    }

    /// Applies a renderer report.
    pub fn on_event<B: MediaBackends>(&mut self, event: SubtitleEvent, backends: &mut B) {
        match (std::mem::take(self), event) {
            (Subtitles::Starting { mut renderer, .. }, SubtitleEvent::Ready) => {
                renderer.set_visible(true);
                *self = Subtitles::Rendering {
                    renderer,
                    visible: true,
                };
            }
            (Subtitles::Starting { url, mut renderer }, SubtitleEvent::Failed(reason)) => {
                log::warn!("Subtitle renderer failed, using native track: {reason}");
                renderer.dispose();
                *self = Self::native(&url, backends);
            }
            (state, _) => *self = state,
        }
    }

    /// Flips subtitle visibility. Returns false when there is nothing to toggle.
    pub fn toggle<B: MediaBackends>(&mut self, backends: &mut B) -> bool {
        match self {
            Subtitles::Rendering { renderer, visible } => {
                *visible = !*visible;
                renderer.set_visible(*visible);
                true
            }
            Subtitles::Native { visible } => {
                *visible = !*visible;
                backends.element().set_text_track_visible(*visible);
                true
            }
            Subtitles::Disabled | Subtitles::Starting { .. } => false,
        }
    }

    /// Disposes the renderer, if any. Native tracks go with the element source.
    pub fn teardown(&mut self) {
        match std::mem::take(self) {
            Subtitles::Starting { mut renderer, .. } | Subtitles::Rendering { mut renderer, .. } => {
                renderer.dispose();
            }
            Subtitles::Disabled | Subtitles::Native { .. } => {}
        }
    }

    #[must_use]
    pub fn caption_button(&self) -> CaptionButton {
        match self {
            Subtitles::Disabled | Subtitles::Starting { .. } => CaptionButton::default(),
            Subtitles::Rendering { visible, .. } | Subtitles::Native { visible } => CaptionButton {
                visible: true,
                active: *visible,
            },
        }
    }
}
