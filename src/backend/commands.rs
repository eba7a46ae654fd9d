use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;

use crate::backend::{Backend, BufferType, Commands};
use crate::gl;

/// The OpenGL function table, loaded from a `Backend`.
pub struct GlCommands {
    gl: gl::Gl,
}

impl GlCommands {
    /// Loads every function pointer through the backend.
    ///
    /// # Safety
    ///
    /// The backend's context must be current, and must stay current whenever a method of the
    /// returned object is called.
    pub unsafe fn load<B: ?Sized>(backend: &B) -> GlCommands where B: Backend {
        GlCommands {
            gl: gl::Gl::load_with(|symbol| backend.get_proc_address(symbol) as *const _),
        }
    }
}

/// Reads an info log whose size is reported by `GL_INFO_LOG_LENGTH`.
fn read_info_log<F>(len: gl::types::GLint, read: F) -> String
    where F: FnOnce(gl::types::GLsizei, *mut gl::types::GLsizei, *mut gl::types::GLchar)
{
    if len <= 0 {
        return String::new();
    }

    let mut buffer: Vec<u8> = vec![0; len as usize];
    let mut written: gl::types::GLsizei = 0;
    read(len, &mut written, buffer.as_mut_ptr() as *mut gl::types::GLchar);
    buffer.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buffer).into_owned()
}

impl Commands for GlCommands {
    fn version_string(&self) -> String {
        unsafe {
            let version = self.gl.GetString(gl::VERSION);
            if version.is_null() {
                return String::new();
            }
            CStr::from_ptr(version as *const _).to_string_lossy().into_owned()
        }
    }

    #[inline]
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.Viewport(x, y, width, height) }
    }

    #[inline]
    fn create_shader(&self, shader_type: gl::types::GLenum) -> gl::types::GLuint {
        unsafe { self.gl.CreateShader(shader_type) }
    }

    #[inline]
    fn shader_source(&self, shader: gl::types::GLuint, source: &CStr) {
        unsafe { self.gl.ShaderSource(shader, 1, [source.as_ptr()].as_ptr(), ptr::null()) }
    }

    #[inline]
    fn compile_shader(&self, shader: gl::types::GLuint) {
        unsafe { self.gl.CompileShader(shader) }
    }

    fn get_shader_iv(&self, shader: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint {
        let mut value = 0;
        unsafe { self.gl.GetShaderiv(shader, pname, &mut value) };
        value
    }

    fn get_shader_info_log(&self, shader: gl::types::GLuint) -> String {
        let len = self.get_shader_iv(shader, gl::INFO_LOG_LENGTH);
        read_info_log(len, |size, written, out| unsafe {
            self.gl.GetShaderInfoLog(shader, size, written, out)
        })
    }

    #[inline]
    fn delete_shader(&self, shader: gl::types::GLuint) {
        unsafe { self.gl.DeleteShader(shader) }
    }

    #[inline]
    fn create_program(&self) -> gl::types::GLuint {
        unsafe { self.gl.CreateProgram() }
    }

    #[inline]
    fn attach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint) {
        unsafe { self.gl.AttachShader(program, shader) }
    }

    #[inline]
    fn detach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint) {
        unsafe { self.gl.DetachShader(program, shader) }
    }

    #[inline]
    fn link_program(&self, program: gl::types::GLuint) {
        unsafe { self.gl.LinkProgram(program) }
    }

    fn get_program_iv(&self, program: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint {
        let mut value = 0;
        unsafe { self.gl.GetProgramiv(program, pname, &mut value) };
        value
    }

    fn get_program_info_log(&self, program: gl::types::GLuint) -> String {
        let len = self.get_program_iv(program, gl::INFO_LOG_LENGTH);
        read_info_log(len, |size, written, out| unsafe {
            self.gl.GetProgramInfoLog(program, size, written, out)
        })
    }

    #[inline]
    fn use_program(&self, program: gl::types::GLuint) {
        unsafe { self.gl.UseProgram(program) }
    }

    #[inline]
    fn delete_program(&self, program: gl::types::GLuint) {
        unsafe { self.gl.DeleteProgram(program) }
    }

    fn gen_vertex_array(&self) -> gl::types::GLuint {
        let mut id = 0;
        unsafe { self.gl.GenVertexArrays(1, &mut id) };
        id
    }

    #[inline]
    fn bind_vertex_array(&self, array: gl::types::GLuint) {
        unsafe { self.gl.BindVertexArray(array) }
    }

    #[inline]
    fn delete_vertex_array(&self, array: gl::types::GLuint) {
        unsafe { self.gl.DeleteVertexArrays(1, &array) }
    }

    fn gen_buffer(&self) -> gl::types::GLuint {
        let mut id = 0;
        unsafe { self.gl.GenBuffers(1, &mut id) };
        id
    }

    #[inline]
    fn bind_buffer(&self, ty: BufferType, buffer: gl::types::GLuint) {
        unsafe { self.gl.BindBuffer(ty.to_glenum(), buffer) }
    }

    fn buffer_data(&self, ty: BufferType, data: &[u8]) {
        unsafe {
            self.gl.BufferData(ty.to_glenum(), data.len() as gl::types::GLsizeiptr,
                               data.as_ptr() as *const c_void, gl::STATIC_DRAW)
        }
    }

    fn get_buffer_sub_data(&self, ty: BufferType, out: &mut [u8]) {
        unsafe {
            self.gl.GetBufferSubData(ty.to_glenum(), 0, out.len() as gl::types::GLsizeiptr,
                                     out.as_mut_ptr() as *mut c_void)
        }
    }

    #[inline]
    fn delete_buffer(&self, buffer: gl::types::GLuint) {
        unsafe { self.gl.DeleteBuffers(1, &buffer) }
    }

    fn vertex_attrib_pointer(&self, index: gl::types::GLuint, size: gl::types::GLint,
                             stride: gl::types::GLsizei, offset: usize)
    {
        unsafe {
            self.gl.VertexAttribPointer(index, size, gl::FLOAT, gl::FALSE, stride,
                                        offset as *const c_void)
        }
    }

    #[inline]
    fn enable_vertex_attrib_array(&self, index: gl::types::GLuint) {
        unsafe { self.gl.EnableVertexAttribArray(index) }
    }

    #[inline]
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.ClearColor(red, green, blue, alpha) }
    }

    #[inline]
    fn clear(&self, mask: gl::types::GLbitfield) {
        unsafe { self.gl.Clear(mask) }
    }

    fn draw_elements(&self, mode: gl::types::GLenum, count: gl::types::GLsizei,
                     index_type: gl::types::GLenum, offset: usize)
    {
        unsafe { self.gl.DrawElements(mode, count, index_type, offset as *const c_void) }
    }
}
