/*!
Window events and the close flag.

A `Window` pulls events from an `EventSource` and keeps track of whether the window should close.
The close flag is set when the platform reports a close request, or when the key callback asks
for it. It is never cleared.

```
use red_flag::backend::headless::HeadlessEvents;
use red_flag::window::{close_on_escape, Action, Event, Key, KeyEvent, Window};

let escape = KeyEvent { key: Key::Escape, action: Action::Press };
let mut window = Window::new(HeadlessEvents::new().with_event(1, Event::Key(escape)));
window.set_key_callback(close_on_escape);

window.poll_events();
assert!(!window.should_close());
window.poll_events();
assert!(window.should_close());
```
*/
use std::cell::Cell;

/// A key of the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// Any other key, identified by its platform scancode.
    Other(u32),
}

/// What happened to a key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// The key went down.
    Press,
    /// The key went up.
    Release,
}

/// A keyboard event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key concerned.
    pub key: Key,
    /// Whether it was pressed or released.
    pub action: Action,
}

/// Events the demo reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// The user asked the platform to close the window.
    CloseRequested,
    /// A key was pressed or released while the window had focus.
    Key(KeyEvent),
}

/// Something that produces window events.
pub trait EventSource {
    /// Appends every pending event to `sink`. Must not block.
    fn poll(&mut self, sink: &mut Vec<Event>);
}

/// The close flag of a window, handed to the key callback.
#[derive(Debug, Default)]
pub struct CloseFlag(Cell<bool>);

impl CloseFlag {
    /// Asks for the window to close.
    #[inline]
    pub fn request_close(&self) {
        self.0.set(true);
    }

    /// Returns true if closing has been requested.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

type KeyCallback = Box<dyn FnMut(&CloseFlag, &KeyEvent)>;

/// A window as seen by the render loop.
pub struct Window<E> {
    events: E,
    close: CloseFlag,
    key_callback: Option<KeyCallback>,
    pending: Vec<Event>,
}

impl<E> Window<E> where E: EventSource {
    /// Wraps an event source. No key callback is installed.
    pub fn new(events: E) -> Window<E> {
        Window {
            events,
            close: CloseFlag::default(),
            key_callback: None,
            pending: Vec::new(),
        }
    }

    /// Installs the callback receiving every key event, replacing the previous one.
    pub fn set_key_callback<F>(&mut self, callback: F)
        where F: FnMut(&CloseFlag, &KeyEvent) + 'static
    {
        self.key_callback = Some(Box::new(callback));
    }

    /// Processes every pending event without waiting for new ones.
    pub fn poll_events(&mut self) {
        self.events.poll(&mut self.pending);

        for event in self.pending.drain(..) {
            match event {
                Event::CloseRequested => {
                    log::debug!("close requested by the platform");
                    self.close.request_close();
                },
                Event::Key(ref key) => {
                    if let Some(callback) = self.key_callback.as_mut() {
                        callback(&self.close, key);
                    }
                },
            }
        }
    }

    /// Returns true once the window has been asked to close.
    #[inline]
    pub fn should_close(&self) -> bool {
        self.close.is_set()
    }

    /// Asks for the window to close.
    #[inline]
    pub fn set_should_close(&self) {
        self.close.request_close();
    }

    /// Returns the event source.
    #[inline]
    pub fn events(&self) -> &E {
        &self.events
    }
}

/// Key callback closing the window when Escape is pressed.
pub fn close_on_escape(window: &CloseFlag, event: &KeyEvent) {
    if event.key == Key::Escape && event.action == Action::Press {
        log::debug!("escape pressed, closing");
        window.request_close();
    }
}
