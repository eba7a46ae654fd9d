/*!

The `backend` module allows one to link the demo with any window or context provider.

Two traits live here. A `Backend` is the thing that owns the OpenGL context: it presents frames,
resolves function pointers and reports the framebuffer size. `Commands` is the narrow set of
OpenGL calls the demo issues. The real implementation of `Commands` is the generated `gl::Gl`
function table; the `headless` module provides a recording one for tests.

*/
use std::ffi::CStr;
use std::os::raw::c_void;
use std::rc::Rc;
use std::ops::Deref;

use crate::gl;
use crate::SwapBuffersError;

pub use self::commands::GlCommands;

mod commands;
pub mod headless;

#[cfg(feature = "glutin_backend")]
pub mod glutin;

/// Trait for types that can be used as a backend for a `Context`.
///
/// # Safety
///
/// The implementation must report the current-ness of the context truthfully, and
/// `get_proc_address` must return function pointers valid for this context.
pub unsafe trait Backend {
    /// Swaps buffers at the end of a frame.
    fn swap_buffers(&self) -> Result<(), SwapBuffersError>;

    /// Returns the address of an OpenGL function.
    ///
    /// Must be called in the same thread and after the backend has been made current
    /// with `make_current`.
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void;

    /// Returns the dimensions of the window, or screen, etc.
    fn get_framebuffer_dimensions(&self) -> (u32, u32);

    /// Returns true if the OpenGL context is the current one in the thread.
    fn is_current(&self) -> bool;

    /// Makes the OpenGL context the current context in the current thread.
    unsafe fn make_current(&self);
}

unsafe impl<T> Backend for Rc<T> where T: Backend {
    #[inline]
    fn swap_buffers(&self) -> Result<(), SwapBuffersError> {
        self.deref().swap_buffers()
    }

    #[inline]
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.deref().get_proc_address(symbol)
    }

    #[inline]
    fn get_framebuffer_dimensions(&self) -> (u32, u32) {
        self.deref().get_framebuffer_dimensions()
    }

    #[inline]
    fn is_current(&self) -> bool {
        self.deref().is_current()
    }

    #[inline]
    unsafe fn make_current(&self) {
        self.deref().make_current();
    }
}

/// Type of a buffer binding point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferType {
    /// `GL_ARRAY_BUFFER`, vertex attributes.
    ArrayBuffer,
    /// `GL_ELEMENT_ARRAY_BUFFER`, indices. Part of the vertex array object state.
    ElementArrayBuffer,
}

impl BufferType {
    /// Returns the OpenGL binding point.
    #[inline]
    pub fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            BufferType::ArrayBuffer => gl::ARRAY_BUFFER,
            BufferType::ElementArrayBuffer => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// The OpenGL calls issued by the demo.
///
/// The methods mirror their OpenGL counterparts one to one. Object names are plain `GLuint`s and
/// `0` means "no object", as in OpenGL. Implementations assume that their context is current.
pub trait Commands {
    /// `glGetString(GL_VERSION)`.
    fn version_string(&self) -> String;

    /// `glViewport`.
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// `glCreateShader`. Returns `0` on failure.
    fn create_shader(&self, shader_type: gl::types::GLenum) -> gl::types::GLuint;

    /// `glShaderSource` with a single string.
    fn shader_source(&self, shader: gl::types::GLuint, source: &CStr);

    /// `glCompileShader`.
    fn compile_shader(&self, shader: gl::types::GLuint);

    /// `glGetShaderiv`.
    fn get_shader_iv(&self, shader: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint;

    /// `glGetShaderInfoLog`, sized with `GL_INFO_LOG_LENGTH`.
    fn get_shader_info_log(&self, shader: gl::types::GLuint) -> String;

    /// `glDeleteShader`.
    fn delete_shader(&self, shader: gl::types::GLuint);

    /// `glCreateProgram`. Returns `0` on failure.
    fn create_program(&self) -> gl::types::GLuint;

    /// `glAttachShader`.
    fn attach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint);

    /// `glDetachShader`.
    fn detach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint);

    /// `glLinkProgram`.
    fn link_program(&self, program: gl::types::GLuint);

    /// `glGetProgramiv`.
    fn get_program_iv(&self, program: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint;

    /// `glGetProgramInfoLog`, sized with `GL_INFO_LOG_LENGTH`.
    fn get_program_info_log(&self, program: gl::types::GLuint) -> String;

    /// `glUseProgram`.
    fn use_program(&self, program: gl::types::GLuint);

    /// `glDeleteProgram`.
    fn delete_program(&self, program: gl::types::GLuint);

    /// `glGenVertexArrays` for a single array.
    fn gen_vertex_array(&self) -> gl::types::GLuint;

    /// `glBindVertexArray`.
    fn bind_vertex_array(&self, array: gl::types::GLuint);

    /// `glDeleteVertexArrays` for a single array.
    fn delete_vertex_array(&self, array: gl::types::GLuint);

    /// `glGenBuffers` for a single buffer.
    fn gen_buffer(&self) -> gl::types::GLuint;

    /// `glBindBuffer`.
    fn bind_buffer(&self, ty: BufferType, buffer: gl::types::GLuint);

    /// `glBufferData` with `GL_STATIC_DRAW` usage.
    fn buffer_data(&self, ty: BufferType, data: &[u8]);

    /// `glGetBufferSubData` starting at offset 0, filling the whole of `out`.
    fn get_buffer_sub_data(&self, ty: BufferType, out: &mut [u8]);

    /// `glDeleteBuffers` for a single buffer.
    fn delete_buffer(&self, buffer: gl::types::GLuint);

    /// `glVertexAttribPointer` for non-normalized floats.
    fn vertex_attrib_pointer(&self, index: gl::types::GLuint, size: gl::types::GLint,
                             stride: gl::types::GLsizei, offset: usize);

    /// `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, index: gl::types::GLuint);

    /// `glClearColor`.
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);

    /// `glClear`.
    fn clear(&self, mask: gl::types::GLbitfield);

    /// `glDrawElements` reading indices from the bound element buffer.
    fn draw_elements(&self, mode: gl::types::GLenum, count: gl::types::GLsizei,
                     index_type: gl::types::GLenum, offset: usize);
}
