// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for the video player.
//!
//! Keyboard shortcuts, pointer activity and the two periodic checks: the
//! controls hide deadline (only while armed) and the buffer monitor (only
//! while playing).

use super::backend::MediaBackends;
use super::state::{Message, VideoPlayer};
use crate::config::{BUFFER_MONITOR_INTERVAL, CONTROLS_TICK_INTERVAL};
use iced::{event, mouse, time, touch, Subscription};

/// Creates the player subscription for its current state.
pub fn subscription<B: MediaBackends>(player: &VideoPlayer<B>) -> Subscription<Message> {
    if !player.is_open() {
        return Subscription::none();
    }

    let events = event::listen_with(route_event);
    let ticks = if player.controls().is_armed() {
        time::every(CONTROLS_TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    };
    let monitor = if player.is_playing() {
        time::every(BUFFER_MONITOR_INTERVAL).map(Message::BufferCheck)
    } else {
        Subscription::none()
    };

    Subscription::batch([events, ticks, monitor])
}

fn route_event(
    event: event::Event,
    status: event::Status,
    window: iced::window::Id,
) -> Option<Message> {
    let pointer = matches!(
        event,
        event::Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft)
            | event::Event::Touch(touch::Event::FingerPressed { .. })
    );
    let key_press = matches!(
        event,
        event::Event::Keyboard(iced::keyboard::Event::KeyPressed { .. })
    );

    if pointer || (key_press && status == event::Status::Ignored) {
        Some(Message::RawEvent { window, event })
    } else {
        None
    }
}
