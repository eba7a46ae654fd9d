/*!
A minimal OpenGL 3.3 demo that draws the five stars of a flag emblem.

The demo opens a 900x600 window, compiles a pass-through vertex shader and a single-color
fragment shader, uploads the five stars as indexed triangle meshes, and then clears and draws
every frame until the window is closed or Escape is pressed.

# Structure

Every OpenGL call goes through the [`Commands`](backend::Commands) trait, and the window and
context are hidden behind the [`Backend`](backend::Backend) and
[`EventSource`](window::EventSource) traits. The `glutin` backend drives a real window;
the [`headless`](backend::headless) backend simulates the handful of GL objects the demo uses so
that the whole pipeline runs in tests.

```
use red_flag::backend::headless::{Headless, HeadlessEvents};
use red_flag::context::Context;
use red_flag::demo::{self, Scene};
use red_flag::window::{Action, Event, Key, KeyEvent, Window};
use red_flag::Config;

let headless = Headless::new();
let context = Context::with_commands(headless.backend(), headless.commands()).unwrap();
let scene = Scene::new(&context).unwrap();

// Escape is pressed during the third poll
let events = HeadlessEvents::new()
    .with_event(2, Event::Key(KeyEvent { key: Key::Escape, action: Action::Press }));
let mut window = Window::new(events);
window.set_key_callback(red_flag::window::close_on_escape);

let frames = demo::run_loop(&mut window, &context, &scene, &Config::default()).unwrap();
assert_eq!(frames, 3);
```

# Features

- `glutin_backend` (default): the window, context and event loop built on glutin and winit.
  Required by the `red-flag` binary.

*/
#![warn(missing_docs)]

use std::error::Error as StdError;
use std::fmt;

pub use crate::config::Config;
pub use crate::context::{Context, IncompatibleOpenGl};
pub use crate::frame::Frame;
pub use crate::geometry::{Geometry, GeometryError};
pub use crate::program::{Program, ProgramCreationError, Shader, ShaderType};
pub use crate::version::{Api, Version};

pub mod backend;
pub mod config;
pub mod context;
pub mod demo;
pub mod emblem;
pub mod frame;
pub mod geometry;
pub mod program;
pub mod version;
pub mod window;

#[cfg(feature = "glutin_backend")]
pub use crate::backend::glutin::DisplayCreationError;
#[cfg(feature = "glutin_backend")]
pub use crate::demo::run;

#[allow(missing_docs, non_camel_case_types, non_snake_case, non_upper_case_globals, clippy::all, unused)]
mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

/// Trait for objects that are OpenGL objects.
pub trait GlObject {
    /// The type of identifier for this object.
    type Id;

    /// Returns the id of the object.
    fn get_id(&self) -> Self::Id;
}

/// Error that can happen when swapping buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapBuffersError {
    /// The OpenGL context has been lost, along with every buffer, vertex array and program
    /// created from it.
    ContextLost,
    /// The platform refused to present the frame.
    Failed(String),
}

impl fmt::Display for SwapBuffersError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SwapBuffersError::ContextLost => fmt.write_str("the OpenGL context has been lost"),
            SwapBuffersError::Failed(ref err) => write!(fmt, "failed to present the frame: {}", err),
        }
    }
}

impl StdError for SwapBuffersError {}

/// Anything that can stop the demo.
#[derive(Debug)]
pub enum Error {
    /// The window or its OpenGL context couldn't be created.
    #[cfg(feature = "glutin_backend")]
    DisplayCreation(DisplayCreationError),
    /// The context doesn't provide OpenGL 3.3.
    IncompatibleOpenGl(IncompatibleOpenGl),
    /// The shaders didn't compile or link.
    ProgramCreation(ProgramCreationError),
    /// One of the meshes is malformed.
    Geometry(GeometryError),
    /// A frame couldn't be presented.
    SwapBuffers(SwapBuffersError),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            #[cfg(feature = "glutin_backend")]
            Error::DisplayCreation(ref err) => fmt::Display::fmt(err, fmt),
            Error::IncompatibleOpenGl(ref err) => fmt::Display::fmt(err, fmt),
            Error::ProgramCreation(ref err) => fmt::Display::fmt(err, fmt),
            Error::Geometry(ref err) => fmt::Display::fmt(err, fmt),
            Error::SwapBuffers(ref err) => fmt::Display::fmt(err, fmt),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            #[cfg(feature = "glutin_backend")]
            Error::DisplayCreation(ref err) => Some(err),
            Error::IncompatibleOpenGl(ref err) => Some(err),
            Error::ProgramCreation(ref err) => Some(err),
            Error::Geometry(ref err) => Some(err),
            Error::SwapBuffers(ref err) => Some(err),
        }
    }
}

#[cfg(feature = "glutin_backend")]
impl From<DisplayCreationError> for Error {
    #[inline]
    fn from(err: DisplayCreationError) -> Error {
        Error::DisplayCreation(err)
    }
}

impl From<IncompatibleOpenGl> for Error {
    #[inline]
    fn from(err: IncompatibleOpenGl) -> Error {
        Error::IncompatibleOpenGl(err)
    }
}

impl From<ProgramCreationError> for Error {
    #[inline]
    fn from(err: ProgramCreationError) -> Error {
        Error::ProgramCreation(err)
    }
}

impl From<GeometryError> for Error {
    #[inline]
    fn from(err: GeometryError) -> Error {
        Error::Geometry(err)
    }
}

impl From<SwapBuffersError> for Error {
    #[inline]
    fn from(err: SwapBuffersError) -> Error {
        Error::SwapBuffers(err)
    }
}
