/*!

Backend implementation for the glutin library

# Features

Only available if the 'glutin_backend' feature is enabled.

*/
use std::error::Error;
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;

use ::glutin::context::PossiblyCurrentContext;
use ::glutin::display::GetGlDisplay;
use ::glutin::error::ErrorKind;
use ::glutin::prelude::*;
use ::glutin::surface::{Surface, WindowSurface};
use winit::event::{ElementState, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;

use crate::backend::Backend;
use crate::window::{Action, Event, EventSource, Key, KeyEvent};
use crate::SwapBuffersError;

pub use self::window_builder::WindowBuilder;

mod window_builder;

/// Error that can happen while creating the window and its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCreationError {
    /// The platform couldn't open the window.
    WindowCreationFailed(String),
    /// No suitable OpenGL context or surface could be created for the window.
    ContextCreationFailed(String),
}

impl fmt::Display for DisplayCreationError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DisplayCreationError::WindowCreationFailed(ref err) =>
                write!(fmt, "error while creating the window: {}", err),
            DisplayCreationError::ContextCreationFailed(ref err) =>
                write!(fmt, "error while creating the OpenGL context: {}", err),
        }
    }
}

impl Error for DisplayCreationError {}

/// An implementation of the `Backend` trait for glutin.
pub struct GlutinBackend {
    // fields drop in order: context, then the surface, then the window they were created for
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: winit::window::Window,
}

unsafe impl Backend for GlutinBackend {
    fn swap_buffers(&self) -> Result<(), SwapBuffersError> {
        self.surface.swap_buffers(&self.context).map_err(|err| match err.error_kind() {
            ErrorKind::ContextLost => SwapBuffersError::ContextLost,
            _ => SwapBuffersError::Failed(err.to_string()),
        })
    }

    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void {
        match CString::new(symbol) {
            Ok(symbol) => self.context.display().get_proc_address(&symbol) as *const _,
            Err(_) => ptr::null(),
        }
    }

    #[inline]
    fn get_framebuffer_dimensions(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }

    #[inline]
    fn is_current(&self) -> bool {
        self.context.is_current()
    }

    unsafe fn make_current(&self) {
        if let Err(err) = self.context.make_current(&self.surface) {
            log::error!("failed to make the OpenGL context current: {}", err);
        }
    }
}

/// The winit event loop, pumped once per poll.
pub struct GlutinEvents {
    event_loop: EventLoop<()>,
}

impl EventSource for GlutinEvents {
    fn poll(&mut self, sink: &mut Vec<Event>) {
        self.event_loop.run_return(|event, _, control_flow| {
            control_flow.set_poll();

            match event {
                winit::event::Event::WindowEvent { event, .. } => {
                    if let Some(event) = translate_window_event(&event) {
                        sink.push(event);
                    }
                },
                // everything queued so far has been delivered
                winit::event::Event::MainEventsCleared => control_flow.set_exit(),
                _ => (),
            }
        });
    }
}

fn translate_window_event(event: &WindowEvent<'_>) -> Option<Event> {
    match *event {
        WindowEvent::CloseRequested => Some(Event::CloseRequested),
        WindowEvent::KeyboardInput { ref input, .. } => {
            let key = match input.virtual_keycode {
                Some(VirtualKeyCode::Escape) => Key::Escape,
                _ => Key::Other(input.scancode),
            };
            let action = match input.state {
                ElementState::Pressed => Action::Press,
                ElementState::Released => Action::Release,
            };
            Some(Event::Key(KeyEvent { key, action }))
        },
        _ => None,
    }
}
