/*!
Test supports module.

*/

#![allow(dead_code)]

use std::rc::Rc;

use red_flag::backend::headless::{Headless, HeadlessEvents};
use red_flag::window::{Action, Event, Key, KeyEvent};
use red_flag::Context;

/// `glClear` mask for the color buffer.
pub const COLOR_BUFFER_BIT: u32 = 0x4000;
/// `GL_TRIANGLES`.
pub const TRIANGLES: u32 = 0x0004;
/// `GL_UNSIGNED_INT`.
pub const UNSIGNED_INT: u32 = 0x1405;

/// Builds a headless OpenGL 3.3 context, returning the implementation alongside so that the
/// calls can be inspected.
pub fn build_context() -> (Headless, Rc<Context>) {
    let headless = Headless::new();
    let context = Context::with_commands(headless.backend(), headless.commands()).unwrap();
    (headless, context)
}

/// Builds an event source delivering an Escape press during the poll of index `poll`.
pub fn escape_pressed_at(poll: u64) -> HeadlessEvents {
    HeadlessEvents::new().with_event(poll, key(Key::Escape, Action::Press))
}

/// Builds a key event.
pub fn key(key: Key, action: Action) -> Event {
    Event::Key(KeyEvent { key, action })
}
