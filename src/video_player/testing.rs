// SPDX-License-Identifier: MPL-2.0
//! Recording media back-ends for unit tests.

use super::backend::{MediaBackends, MediaElement, StreamBackend, SubtitleOptions, SubtitleRenderer};
use super::volume::Volume;
use std::cell::RefCell;
use std::rc::Rc;

/// Calls made on any of the fakes, in order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    /// Returns and clears the recorded calls.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn contains(&self, call: &str) -> bool {
        self.0.borrow().iter().any(|c| c == call)
    }
}

#[derive(Debug)]
pub struct FakeElement {
    log: CallLog,
    native_hls: bool,
}

impl MediaElement for FakeElement {
    fn set_source(&mut self, url: &str) {
        self.log.push(format!("set_source:{url}"));
    }
    fn clear_source(&mut self) {
        self.log.push("clear_source");
    }
    fn play(&mut self) {
        self.log.push("play");
    }
    fn pause(&mut self) {
        self.log.push("pause");
    }
    fn seek(&mut self, position: f64) {
        self.log.push(format!("seek:{position}"));
    }
    fn set_volume(&mut self, volume: Volume, muted: bool) {
        self.log.push(format!("volume:{}:{muted}", volume.percent()));
    }
    fn supports_native_hls(&self) -> bool {
        self.native_hls
    }
    fn attach_text_track(&mut self, url: &str) {
        self.log.push(format!("track:{url}"));
    }
    fn remove_text_tracks(&mut self) {
        self.log.push("remove_tracks");
    }
    fn set_text_track_visible(&mut self, visible: bool) {
        self.log.push(format!("track_visible:{visible}"));
    }
}

#[derive(Debug)]
struct FakeStream(CallLog);

impl StreamBackend for FakeStream {
    fn load_source(&mut self, url: &str) {
        self.0.push(format!("stream_load:{url}"));
    }
    fn attach(&mut self, _element: &mut dyn MediaElement) {
        self.0.push("stream_attach");
    }
    fn destroy(&mut self) {
        self.0.push("stream_destroy");
    }
}

#[derive(Debug)]
struct FakeRenderer(CallLog);

impl SubtitleRenderer for FakeRenderer {
    fn set_visible(&mut self, visible: bool) {
        self.0.push(format!("subs_visible:{visible}"));
    }
    fn dispose(&mut self) {
        self.0.push("subs_dispose");
    }
}

#[derive(Debug)]
pub struct FakeBackends {
    pub log: CallLog,
    element: FakeElement,
    streams: bool,
    renderer: bool,
}

impl FakeBackends {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            element: FakeElement {
                log: log.clone(),
                native_hls: false,
            },
            log,
            streams: true,
            renderer: true,
        }
    }

    pub fn without_streams(mut self) -> Self {
        self.streams = false;
        self
    }

    pub fn without_renderer(mut self) -> Self {
        self.renderer = false;
        self
    }

    pub fn with_native_hls(mut self) -> Self {
        self.element.native_hls = true;
        self
    }
}

impl MediaBackends for FakeBackends {
    fn element(&mut self) -> &mut dyn MediaElement {
        &mut self.element
    }

    fn create_stream(&mut self) -> Option<Box<dyn StreamBackend>> {
        self.streams
            .then(|| Box::new(FakeStream(self.log.clone())) as Box<dyn StreamBackend>)
    }

    fn create_subtitles(&mut self, options: SubtitleOptions) -> Option<Box<dyn SubtitleRenderer>> {
        if !self.renderer {
            return None;
        }
        self.log.push(format!("subs_create:{}", options.subtitle_url));
        Some(Box::new(FakeRenderer(self.log.clone())))
    }
}
