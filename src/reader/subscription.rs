// SPDX-License-Identifier: MPL-2.0
//! Event subscription for the manga reader.
//!
//! Routes touch, wheel, keyboard and resize events to the reader while it is
//! open, and ticks the controls timer only while a hide deadline is pending.

use super::component::{MangaReader, Message};
use crate::config::CONTROLS_TICK_INTERVAL;
use iced::{event, time, Subscription};

/// Creates the reader subscription for its current state.
pub fn subscription(reader: &MangaReader) -> Subscription<Message> {
    if !reader.is_open() {
        // Resizes still matter so the first open starts with the right viewport
        return event::listen_with(|event, _status, window| {
            matches!(event, event::Event::Window(iced::window::Event::Resized(_)))
                .then_some(Message::RawEvent { window, event })
        });
    }

    let events = event::listen_with(route_event);
    let ticks = if reader.controls().is_armed() {
        time::every(CONTROLS_TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    };

    Subscription::batch([events, ticks])
}

fn route_event(
    event: event::Event,
    status: event::Status,
    window: iced::window::Id,
) -> Option<Message> {
    // Touch and wheel are routed even when a widget captured them
    let always = matches!(
        event,
        event::Event::Touch(_)
            | event::Event::Mouse(iced::mouse::Event::WheelScrolled { .. })
            | event::Event::Window(iced::window::Event::Resized(_))
    );
    let key_press = matches!(
        event,
        event::Event::Keyboard(iced::keyboard::Event::KeyPressed { .. })
    );

    if always || (key_press && status == event::Status::Ignored) {
        Some(Message::RawEvent { window, event })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{touch, Point, Size};

    #[test]
    fn touch_is_routed_even_when_captured() {
        let event = event::Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(0),
            position: Point::ORIGIN,
        });
        let routed = route_event(event, event::Status::Captured, iced::window::Id::unique());
        assert!(matches!(routed, Some(Message::RawEvent { .. })));
    }

    #[test]
    fn captured_keys_are_dropped() {
        let event = event::Event::Keyboard(iced::keyboard::Event::KeyPressed {
            key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
            modified_key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
            physical_key: iced::keyboard::key::Physical::Code(iced::keyboard::key::Code::Escape),
            location: iced::keyboard::Location::Standard,
            modifiers: iced::keyboard::Modifiers::default(),
            text: None,
            repeat: false,
        });
        let window = iced::window::Id::unique();
        assert!(route_event(event.clone(), event::Status::Captured, window).is_none());
        assert!(route_event(event, event::Status::Ignored, window).is_some());
    }

    #[test]
    fn resize_is_routed() {
        let event = event::Event::Window(iced::window::Event::Resized(Size::new(10.0, 20.0)));
        assert!(route_event(event, event::Status::Ignored, iced::window::Id::unique()).is_some());
    }
}
