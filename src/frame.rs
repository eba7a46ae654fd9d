/*!
Drawing on the default framebuffer.

The viewport is set once when the demo starts, so a frame only clears, draws and presents.
*/
use std::rc::Rc;
use std::thread;

use crate::context::Context;
use crate::geometry::Geometry;
use crate::gl;
use crate::program::Program;
use crate::{GlObject, SwapBuffersError};

/// Implementation of a drawing surface for the default framebuffer.
///
/// A `Frame` is obtained from `Context::draw`. When you have finished drawing, call `finish()`
/// to present it.
pub struct Frame {
    context: Rc<Context>,
    destroyed: bool,
}

impl Frame {
    /// Builds a new `Frame`. Use `Context::draw` instead.
    #[inline]
    pub(crate) fn new(context: Rc<Context>) -> Frame {
        Frame {
            context,
            destroyed: false,
        }
    }

    /// Clears the color buffer.
    pub fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        let ctxt = self.context.commands();
        ctxt.clear_color(red, green, blue, alpha);
        ctxt.clear(gl::COLOR_BUFFER_BIT);
    }

    /// Binds `program` once, then draws every geometry in order.
    pub fn draw<'a, I>(&mut self, program: &Program, geometries: I)
        where I: IntoIterator<Item = &'a Geometry>
    {
        self.context.commands().use_program(program.get_id());

        for geometry in geometries {
            geometry.draw();
        }
    }

    /// Stop drawing, and swap the buffers.
    pub fn finish(mut self) -> Result<(), SwapBuffersError> {
        self.destroyed = true;
        self.context.swap_buffers()
    }
}

impl Drop for Frame {
    #[inline]
    fn drop(&mut self) {
        if !thread::panicking() {
            assert!(self.destroyed, "The `Frame` object must be explicitly destroyed \
                                     by calling `.finish()`");
        }
    }
}
