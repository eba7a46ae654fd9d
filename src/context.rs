/*!
The OpenGL context every GL object of the demo is created from.

A context is built from a [`Backend`](crate::backend::Backend) and checked to run at least
OpenGL 3.3 core before anything else touches it.
*/
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, Commands, GlCommands};
use crate::frame::Frame;
use crate::version::{self, Api, Version};
use crate::SwapBuffersError;

/// The minimal version the demo runs on.
const REQUIRED_VERSION: Version = Version(Api::Gl, 3, 3);

/// Returned during context creation if the OpenGL implementation is too old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleOpenGl(pub String);

impl fmt::Display for IncompatibleOpenGl {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "the OpenGL implementation is too old to run the demo: {}", self.0)
    }
}

impl Error for IncompatibleOpenGl {}

/// An OpenGL context: the backend owning it, the function table and the detected version.
///
/// Every GL object of the demo keeps an `Rc<Context>` and releases itself through it when
/// dropped, so the context outlives all of them.
pub struct Context {
    commands: Box<dyn Commands>,
    backend: Box<dyn Backend>,
    version: Version,
}

impl Context {
    /// Builds a context on top of a backend, loading the OpenGL functions through it.
    ///
    /// # Safety
    ///
    /// The backend must stay usable from this thread for as long as the context exists.
    pub unsafe fn new<B>(backend: B) -> Result<Rc<Context>, IncompatibleOpenGl>
        where B: Backend + 'static
    {
        backend.make_current();
        let commands = GlCommands::load(&backend);
        Context::with_commands(backend, commands)
    }

    /// Builds a context from a backend and an already loaded command table.
    ///
    /// Fails if the version reported by the commands can't be parsed or is below OpenGL 3.3.
    pub fn with_commands<B, C>(backend: B, commands: C) -> Result<Rc<Context>, IncompatibleOpenGl>
        where B: Backend + 'static, C: Commands + 'static
    {
        unsafe { backend.make_current() };

        let version_string = commands.version_string();
        let version = match version::parse_version(&version_string) {
            Some(v) => v,
            None => return Err(IncompatibleOpenGl(
                format!("unrecognized GL_VERSION string {:?}", version_string)
            )),
        };

        check_gl_compatibility(&version)?;
        log::info!("running on {} ({})", version, version_string);

        Ok(Rc::new(Context {
            commands: Box::new(commands),
            backend: Box::new(backend),
            version,
        }))
    }

    /// Returns the command table, making the context current first if needed.
    pub(crate) fn commands(&self) -> &dyn Commands {
        if !self.backend.is_current() {
            unsafe { self.backend.make_current() };
        }
        &*self.commands
    }

    /// Returns the version of OpenGL the context runs.
    #[inline]
    pub fn get_version(&self) -> &Version {
        &self.version
    }

    /// Returns the dimensions of the default framebuffer.
    #[inline]
    pub fn get_framebuffer_dimensions(&self) -> (u32, u32) {
        self.backend.get_framebuffer_dimensions()
    }

    /// Sets the viewport to cover the whole default framebuffer, as it is sized right now.
    pub fn set_viewport_to_framebuffer(&self) {
        let (width, height) = self.get_framebuffer_dimensions();
        log::debug!("viewport set to {}x{}", width, height);
        self.commands().viewport(0, 0, width as i32, height as i32);
    }

    /// Starts drawing on the default framebuffer.
    ///
    /// The returned `Frame` must be finished with `finish()`, which presents it.
    #[inline]
    pub fn draw(self: &Rc<Self>) -> Frame {
        Frame::new(self.clone())
    }

    /// Presents the default framebuffer.
    #[inline]
    pub(crate) fn swap_buffers(&self) -> Result<(), SwapBuffersError> {
        self.backend.swap_buffers()
    }
}

fn check_gl_compatibility(version: &Version) -> Result<(), IncompatibleOpenGl> {
    match version.partial_cmp(&REQUIRED_VERSION) {
        Some(std::cmp::Ordering::Less) | None => Err(IncompatibleOpenGl(
            format!("{} was reported, {} core is required", version, REQUIRED_VERSION)
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::Context;
    use crate::backend::headless::Headless;

    #[test]
    fn accepts_newer_versions() {
        let headless = Headless::with_version("4.6.0 NVIDIA 535.54.03");
        let context = Context::with_commands(headless.backend(), headless.commands()).unwrap();
        assert_eq!(context.get_version().1, 4);
    }

    #[test]
    fn rejects_old_and_es_versions() {
        for version in &["2.1 Mesa 23.1.4", "3.2.0", "OpenGL ES 3.2", "not a version"] {
            let headless = Headless::with_version(version);
            assert!(Context::with_commands(headless.backend(), headless.commands()).is_err(),
                    "{} was accepted", version);
        }
    }

    #[test]
    fn viewport_covers_framebuffer() {
        use crate::backend::headless::Call;

        let headless = Headless::new().with_framebuffer_dimensions(1800, 1200);
        let context = Context::with_commands(headless.backend(), headless.commands()).unwrap();
        context.set_viewport_to_framebuffer();
        assert_eq!(headless.calls(), vec![Call::Viewport(0, 0, 1800, 1200)]);
    }
}
