use std::cell::RefCell;
use std::rc::Rc;

use red_flag::backend::headless::HeadlessEvents;
use red_flag::window::{close_on_escape, Action, Event, Key, Window};

mod support;

#[test]
fn escape_closes() {
    let mut window = Window::new(support::escape_pressed_at(2));
    window.set_key_callback(close_on_escape);

    window.poll_events();
    assert!(!window.should_close());
    window.poll_events();
    assert!(!window.should_close());
    window.poll_events();
    assert!(window.should_close());
}

#[test]
fn close_flag_never_resets() {
    let events = support::escape_pressed_at(0)
        .with_event(1, support::key(Key::Escape, Action::Release))
        .with_event(2, support::key(Key::Other(30), Action::Press));
    let mut window = Window::new(events);
    window.set_key_callback(close_on_escape);

    for _ in 0..5 {
        window.poll_events();
        assert!(window.should_close());
    }
}

#[test]
fn other_keys_ignored() {
    let events = HeadlessEvents::new()
        .with_event(0, support::key(Key::Other(30), Action::Press))
        .with_event(1, support::key(Key::Escape, Action::Release));
    let mut window = Window::new(events);
    window.set_key_callback(close_on_escape);

    window.poll_events();
    window.poll_events();
    assert!(!window.should_close());
}

#[test]
fn escape_without_callback() {
    let mut window = Window::new(support::escape_pressed_at(0));
    window.poll_events();
    assert!(!window.should_close());
}

#[test]
fn close_requested_by_platform() {
    let mut window = Window::new(HeadlessEvents::new().with_event(0, Event::CloseRequested));
    assert!(!window.should_close());
    window.poll_events();
    assert!(window.should_close());
}

#[test]
fn callback_sees_every_key_event() {
    let seen = Rc::new(RefCell::new(Vec::new()));

    let events = support::escape_pressed_at(0)
        .with_event(0, support::key(Key::Escape, Action::Release))
        .with_event(3, support::key(Key::Other(57), Action::Press));
    let mut window = Window::new(events);
    {
        let seen = seen.clone();
        window.set_key_callback(move |_, event| seen.borrow_mut().push(*event));
    }

    for _ in 0..4 {
        window.poll_events();
    }

    assert_eq!(window.events().polls(), 4);
    assert_eq!(seen.borrow().len(), 3);
    // the callback didn't ask for it
    assert!(!window.should_close());
}
