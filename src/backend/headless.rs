/*!

Backend that doesn't need a window nor a driver.

`Headless` simulates the small part of OpenGL the demo uses: shader and program objects with a
rudimentary GLSL check, buffers that keep their content, vertex array objects with their element
buffer binding and attribute pointers. Every call is appended to a log, and misuse that a real
driver would answer with `GL_INVALID_OPERATION` or `GL_INVALID_VALUE` is collected as an error
instead of being silently ignored.

```
use std::rc::Rc;
use red_flag::backend::headless::Headless;
use red_flag::context::Context;

let headless = Headless::new();
let context = Context::with_commands(headless.backend(), headless.commands()).unwrap();
assert_eq!(context.get_framebuffer_dimensions(), (900, 600));
# let _: Rc<Context> = context;
```

*/
use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::backend::{Backend, BufferType, Commands};
use crate::gl;
use crate::window::{Event, EventSource};
use crate::SwapBuffersError;

/// A recorded call, named after the OpenGL function.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    CreateShader(gl::types::GLuint),
    CompileShader(gl::types::GLuint),
    DeleteShader(gl::types::GLuint),
    CreateProgram(gl::types::GLuint),
    AttachShader { program: gl::types::GLuint, shader: gl::types::GLuint },
    DetachShader { program: gl::types::GLuint, shader: gl::types::GLuint },
    LinkProgram(gl::types::GLuint),
    UseProgram(gl::types::GLuint),
    DeleteProgram(gl::types::GLuint),
    GenVertexArray(gl::types::GLuint),
    BindVertexArray(gl::types::GLuint),
    DeleteVertexArray(gl::types::GLuint),
    GenBuffer(gl::types::GLuint),
    BindBuffer(BufferType, gl::types::GLuint),
    BufferData(BufferType, usize),
    DeleteBuffer(gl::types::GLuint),
    VertexAttribPointer { index: gl::types::GLuint, size: i32, stride: i32, offset: usize },
    EnableVertexAttribArray(gl::types::GLuint),
    ClearColor([f32; 4]),
    Clear(gl::types::GLbitfield),
    DrawElements { mode: gl::types::GLenum, count: i32, index_type: gl::types::GLenum, offset: usize },
    SwapBuffers,
}

struct ShaderObject {
    ty: gl::types::GLenum,
    source: String,
    compiled: bool,
    log: String,
    delete_pending: bool,
}

struct ProgramObject {
    attached: SmallVec<[gl::types::GLuint; 2]>,
    linked: bool,
    log: String,
}

#[derive(Copy, Clone)]
struct AttribPointer {
    buffer: gl::types::GLuint,
    size: i32,
    stride: i32,
    offset: usize,
}

#[derive(Default)]
struct VertexArrayObject {
    element_buffer: gl::types::GLuint,
    attribs: FnvHashMap<gl::types::GLuint, AttribPointer>,
    enabled: SmallVec<[gl::types::GLuint; 4]>,
}

struct State {
    version: String,
    framebuffer_dimensions: (u32, u32),
    framebuffer_queries: u64,
    calls: Vec<Call>,
    errors: Vec<String>,
    next_id: gl::types::GLuint,
    shaders: FnvHashMap<gl::types::GLuint, ShaderObject>,
    programs: FnvHashMap<gl::types::GLuint, ProgramObject>,
    buffers: FnvHashMap<gl::types::GLuint, Vec<u8>>,
    vertex_arrays: FnvHashMap<gl::types::GLuint, VertexArrayObject>,
    array_buffer: gl::types::GLuint,
    vertex_array: gl::types::GLuint,
    program: gl::types::GLuint,
}

impl State {
    fn gen_id(&mut self) -> gl::types::GLuint {
        self.next_id += 1;
        self.next_id
    }

    fn error(&mut self, message: String) {
        log::trace!("headless GL error: {}", message);
        self.errors.push(message);
    }

    fn bound_buffer(&self, ty: BufferType) -> gl::types::GLuint {
        match ty {
            BufferType::ArrayBuffer => self.array_buffer,
            BufferType::ElementArrayBuffer => self.vertex_arrays.get(&self.vertex_array)
                                                  .map(|vao| vao.element_buffer).unwrap_or(0),
        }
    }

    fn release_shader_if_unused(&mut self, shader: gl::types::GLuint) {
        let pending = self.shaders.get(&shader).map(|s| s.delete_pending).unwrap_or(false);
        let attached = self.programs.values().any(|p| p.attached.contains(&shader));
        if pending && !attached {
            self.shaders.remove(&shader);
        }
    }

    fn link(&mut self, program: gl::types::GLuint) -> Result<(), String> {
        let attached = match self.programs.get(&program) {
            Some(p) => p.attached.clone(),
            None => return Err(String::new()),
        };

        let mut vertex = 0;
        let mut fragment = 0;

        for shader in attached {
            let shader = match self.shaders.get(&shader) {
                Some(s) => s,
                None => continue,
            };

            if !shader.compiled {
                return Err("error: linking with uncompiled/unspecialized shader".to_owned());
            }

            let stage = match shader.ty {
                gl::VERTEX_SHADER => { vertex += 1; "vertex" },
                gl::FRAGMENT_SHADER => { fragment += 1; "fragment" },
                _ => "geometry",
            };

            if !shader.source.contains("main(") {
                return Err(format!("error: {} shader lacks `main'", stage));
            }
        }

        if vertex == 0 {
            return Err("error: program lacks a vertex shader".to_owned());
        }
        if fragment == 0 {
            return Err("error: program lacks a fragment shader".to_owned());
        }

        Ok(())
    }

    fn validate_draw(&self, count: i32, index_type: gl::types::GLenum, offset: usize)
                     -> Result<(), String>
    {
        match self.programs.get(&self.program) {
            Some(p) if p.linked => (),
            Some(_) => return Err("GL_INVALID_OPERATION: current program is not linked".to_owned()),
            None => return Err("GL_INVALID_OPERATION: no program in use".to_owned()),
        }

        let vao = match self.vertex_arrays.get(&self.vertex_array) {
            Some(vao) => vao,
            None => return Err("GL_INVALID_OPERATION: no vertex array bound".to_owned()),
        };

        if index_type != gl::UNSIGNED_INT {
            return Err("headless backend only reads GL_UNSIGNED_INT indices".to_owned());
        }
        if count < 0 {
            return Err("GL_INVALID_VALUE: negative count".to_owned());
        }

        let indices = match self.buffers.get(&vao.element_buffer) {
            Some(data) if vao.element_buffer != 0 => data,
            _ => return Err("GL_INVALID_OPERATION: no element buffer bound".to_owned()),
        };
        let end = offset + count as usize * 4;
        if indices.len() < end {
            return Err("GL_INVALID_OPERATION: element buffer too small".to_owned());
        }

        let attrib = match (vao.enabled.contains(&0), vao.attribs.get(&0)) {
            (true, Some(attrib)) => *attrib,
            _ => return Err("GL_INVALID_OPERATION: attribute 0 is not enabled".to_owned()),
        };
        let vertex_data = self.buffers.get(&attrib.buffer).map(|b| b.len()).unwrap_or(0);
        let stride = if attrib.stride == 0 { attrib.size as usize * 4 } else { attrib.stride as usize };
        let vertex_count = vertex_data.saturating_sub(attrib.offset) / stride;

        for chunk in indices[offset..end].chunks_exact(4) {
            let index = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if index as usize >= vertex_count {
                return Err(format!("index {} out of range of {} vertices", index, vertex_count));
            }
        }

        Ok(())
    }
}

/// A simulated OpenGL implementation. Cloning it shares the same state.
#[derive(Clone)]
pub struct Headless {
    state: Rc<RefCell<State>>,
}

impl Headless {
    /// Builds an implementation reporting OpenGL 3.3 and a 900x600 framebuffer.
    pub fn new() -> Headless {
        Headless::with_version("3.3.0 Headless")
    }

    /// Builds an implementation reporting the given `GL_VERSION` string.
    pub fn with_version(version: &str) -> Headless {
        Headless {
            state: Rc::new(RefCell::new(State {
                version: version.to_owned(),
                framebuffer_dimensions: (900, 600),
                framebuffer_queries: 0,
                calls: Vec::new(),
                errors: Vec::new(),
                next_id: 0,
                shaders: FnvHashMap::default(),
                programs: FnvHashMap::default(),
                buffers: FnvHashMap::default(),
                vertex_arrays: FnvHashMap::default(),
                array_buffer: 0,
                vertex_array: 0,
                program: 0,
            })),
        }
    }

    /// Changes the reported framebuffer dimensions.
    pub fn with_framebuffer_dimensions(self, width: u32, height: u32) -> Headless {
        self.state.borrow_mut().framebuffer_dimensions = (width, height);
        self
    }

    /// Number of times the backend was asked for the framebuffer dimensions.
    pub fn framebuffer_queries(&self) -> u64 {
        self.state.borrow().framebuffer_queries
    }

    /// Returns a backend sharing this state.
    pub fn backend(&self) -> HeadlessBackend {
        HeadlessBackend { state: self.state.clone(), current: Cell::new(false) }
    }

    /// Returns a command table sharing this state.
    pub fn commands(&self) -> HeadlessCommands {
        HeadlessCommands { state: self.state.clone() }
    }

    /// Returns every call recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Returns the errors a driver would have raised.
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    /// Number of shader objects that still exist.
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Number of program objects that still exist.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Number of buffer objects that still exist.
    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    /// Number of vertex array objects that still exist.
    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }
}

impl Default for Headless {
    fn default() -> Headless {
        Headless::new()
    }
}

/// `Backend` half of a `Headless` implementation.
pub struct HeadlessBackend {
    state: Rc<RefCell<State>>,
    current: Cell<bool>,
}

unsafe impl Backend for HeadlessBackend {
    fn swap_buffers(&self) -> Result<(), SwapBuffersError> {
        self.state.borrow_mut().calls.push(Call::SwapBuffers);
        Ok(())
    }

    #[inline]
    unsafe fn get_proc_address(&self, _: &str) -> *const c_void {
        ptr::null()
    }

    #[inline]
    fn get_framebuffer_dimensions(&self) -> (u32, u32) {
        let mut state = self.state.borrow_mut();
        state.framebuffer_queries += 1;
        state.framebuffer_dimensions
    }

    #[inline]
    fn is_current(&self) -> bool {
        self.current.get()
    }

    #[inline]
    unsafe fn make_current(&self) {
        self.current.set(true);
    }
}

/// `Commands` half of a `Headless` implementation.
pub struct HeadlessCommands {
    state: Rc<RefCell<State>>,
}

/// Very small subset of what a GLSL compiler rejects: a missing or too recent `#version`
/// directive and unbalanced delimiters.
fn check_glsl(source: &str) -> Result<(), String> {
    let directive = source.lines().map(str::trim).find(|line| !line.is_empty());
    let version = directive.and_then(|line| line.strip_prefix("#version"))
                           .and_then(|rest| rest.split_whitespace().next())
                           .and_then(|number| number.parse::<u32>().ok());
    match version {
        Some(v) if v <= 330 => (),
        Some(v) => return Err(format!("0:1(10): error: GLSL {} is not supported", v)),
        None => return Err("0:1(1): error: missing or invalid #version directive".to_owned()),
    }

    let mut open: Vec<(char, usize)> = Vec::new();
    for (line, text) in source.lines().enumerate() {
        for c in text.chars() {
            let expected = match c {
                '{' | '(' => { open.push((c, line + 1)); continue; },
                '}' => '{',
                ')' => '(',
                _ => continue,
            };

            match open.pop() {
                Some((o, _)) if o == expected => (),
                _ => return Err(format!("0:{}(1): error: syntax error, unexpected '{}'", line + 1, c)),
            }
        }
    }

    if let Some((c, line)) = open.pop() {
        return Err(format!("0:{}(1): error: syntax error, unexpected end of file, \
                            unclosed '{}'", line, c));
    }

    Ok(())
}

impl HeadlessCommands {
    fn record(&self, call: Call) -> std::cell::RefMut<'_, State> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
    }
}

impl Commands for HeadlessCommands {
    fn version_string(&self) -> String {
        self.state.borrow().version.clone()
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        let mut state = self.record(Call::Viewport(x, y, width, height));
        if width < 0 || height < 0 {
            state.error("GL_INVALID_VALUE: negative viewport size".to_owned());
        }
    }

    fn create_shader(&self, shader_type: gl::types::GLenum) -> gl::types::GLuint {
        let mut state = self.state.borrow_mut();
        match shader_type {
            gl::VERTEX_SHADER | gl::FRAGMENT_SHADER | gl::GEOMETRY_SHADER => (),
            _ => {
                state.error(format!("GL_INVALID_ENUM: shader type {:#x}", shader_type));
                return 0;
            },
        }

        let id = state.gen_id();
        state.shaders.insert(id, ShaderObject {
            ty: shader_type,
            source: String::new(),
            compiled: false,
            log: String::new(),
            delete_pending: false,
        });
        state.calls.push(Call::CreateShader(id));
        id
    }

    fn shader_source(&self, shader: gl::types::GLuint, source: &CStr) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader) {
            Some(s) => s.source = source.to_string_lossy().into_owned(),
            None => state.error(format!("GL_INVALID_VALUE: no shader {}", shader)),
        }
    }

    fn compile_shader(&self, shader: gl::types::GLuint) {
        let mut state = self.record(Call::CompileShader(shader));
        match state.shaders.get_mut(&shader) {
            Some(s) => match check_glsl(&s.source) {
                Ok(()) => { s.compiled = true; s.log.clear(); },
                Err(log) => { s.compiled = false; s.log = log; },
            },
            None => state.error(format!("GL_INVALID_VALUE: no shader {}", shader)),
        }
    }

    fn get_shader_iv(&self, shader: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint {
        let mut state = self.state.borrow_mut();
        let value = match state.shaders.get(&shader) {
            Some(s) => match pname {
                gl::COMPILE_STATUS => Some(s.compiled as gl::types::GLint),
                gl::SHADER_TYPE => Some(s.ty as gl::types::GLint),
                gl::DELETE_STATUS => Some(s.delete_pending as gl::types::GLint),
                gl::INFO_LOG_LENGTH if s.log.is_empty() => Some(0),
                gl::INFO_LOG_LENGTH => Some(s.log.len() as gl::types::GLint + 1),
                _ => None,
            },
            None => None,
        };

        value.unwrap_or_else(|| {
            state.error(format!("glGetShaderiv({}, {:#x}) is invalid", shader, pname));
            0
        })
    }

    fn get_shader_info_log(&self, shader: gl::types::GLuint) -> String {
        self.state.borrow().shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: gl::types::GLuint) {
        let mut state = self.record(Call::DeleteShader(shader));
        if shader == 0 {
            return;
        }
        match state.shaders.get_mut(&shader) {
            Some(s) => s.delete_pending = true,
            None => return state.error(format!("GL_INVALID_VALUE: no shader {}", shader)),
        }
        state.release_shader_if_unused(shader);
    }

    fn create_program(&self) -> gl::types::GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.gen_id();
        state.programs.insert(id, ProgramObject {
            attached: SmallVec::new(),
            linked: false,
            log: String::new(),
        });
        state.calls.push(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint) {
        let mut state = self.record(Call::AttachShader { program, shader });
        if !state.shaders.contains_key(&shader) {
            return state.error(format!("GL_INVALID_VALUE: no shader {}", shader));
        }
        match state.programs.get_mut(&program) {
            Some(p) if p.attached.contains(&shader) => {
                state.error(format!("GL_INVALID_OPERATION: shader {} already attached", shader))
            },
            Some(p) => p.attached.push(shader),
            None => state.error(format!("GL_INVALID_VALUE: no program {}", program)),
        }
    }

    fn detach_shader(&self, program: gl::types::GLuint, shader: gl::types::GLuint) {
        let mut state = self.record(Call::DetachShader { program, shader });
        let detached = match state.programs.get_mut(&program) {
            Some(p) => match p.attached.iter().position(|&s| s == shader) {
                Some(pos) => { p.attached.remove(pos); true },
                None => false,
            },
            None => false,
        };

        if detached {
            state.release_shader_if_unused(shader);
        } else {
            state.error(format!("GL_INVALID_OPERATION: shader {} not attached to {}", shader, program));
        }
    }

    fn link_program(&self, program: gl::types::GLuint) {
        let mut state = self.record(Call::LinkProgram(program));
        if !state.programs.contains_key(&program) {
            return state.error(format!("GL_INVALID_VALUE: no program {}", program));
        }

        let result = state.link(program);
        if let Some(p) = state.programs.get_mut(&program) {
            match result {
                Ok(()) => { p.linked = true; p.log.clear(); },
                Err(log) => { p.linked = false; p.log = log; },
            }
        }
    }

    fn get_program_iv(&self, program: gl::types::GLuint, pname: gl::types::GLenum) -> gl::types::GLint {
        let mut state = self.state.borrow_mut();
        let value = match state.programs.get(&program) {
            Some(p) => match pname {
                gl::LINK_STATUS => Some(p.linked as gl::types::GLint),
                gl::ATTACHED_SHADERS => Some(p.attached.len() as gl::types::GLint),
                gl::INFO_LOG_LENGTH if p.log.is_empty() => Some(0),
                gl::INFO_LOG_LENGTH => Some(p.log.len() as gl::types::GLint + 1),
                _ => None,
            },
            None => None,
        };

        value.unwrap_or_else(|| {
            state.error(format!("glGetProgramiv({}, {:#x}) is invalid", program, pname));
            0
        })
    }

    fn get_program_info_log(&self, program: gl::types::GLuint) -> String {
        self.state.borrow().programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&self, program: gl::types::GLuint) {
        let mut state = self.record(Call::UseProgram(program));
        match state.programs.get(&program) {
            _ if program == 0 => state.program = 0,
            Some(p) if p.linked => state.program = program,
            Some(_) => state.error(format!("GL_INVALID_OPERATION: program {} is not linked", program)),
            None => state.error(format!("GL_INVALID_VALUE: no program {}", program)),
        }
    }

    fn delete_program(&self, program: gl::types::GLuint) {
        let mut state = self.record(Call::DeleteProgram(program));
        if program == 0 {
            return;
        }
        match state.programs.remove(&program) {
            Some(p) => {
                if state.program == program {
                    state.program = 0;
                }
                for shader in p.attached {
                    state.release_shader_if_unused(shader);
                }
            },
            None => state.error(format!("GL_INVALID_VALUE: no program {}", program)),
        }
    }

    fn gen_vertex_array(&self) -> gl::types::GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.gen_id();
        state.vertex_arrays.insert(id, VertexArrayObject::default());
        state.calls.push(Call::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, array: gl::types::GLuint) {
        let mut state = self.record(Call::BindVertexArray(array));
        if array != 0 && !state.vertex_arrays.contains_key(&array) {
            return state.error(format!("GL_INVALID_OPERATION: no vertex array {}", array));
        }
        state.vertex_array = array;
    }

    fn delete_vertex_array(&self, array: gl::types::GLuint) {
        let mut state = self.record(Call::DeleteVertexArray(array));
        if state.vertex_arrays.remove(&array).is_none() {
            return state.error(format!("deleting unknown vertex array {}", array));
        }
        if state.vertex_array == array {
            state.vertex_array = 0;
        }
    }

    fn gen_buffer(&self) -> gl::types::GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.gen_id();
        state.buffers.insert(id, Vec::new());
        state.calls.push(Call::GenBuffer(id));
        id
    }

    fn bind_buffer(&self, ty: BufferType, buffer: gl::types::GLuint) {
        let mut state = self.record(Call::BindBuffer(ty, buffer));
        if buffer != 0 && !state.buffers.contains_key(&buffer) {
            return state.error(format!("GL_INVALID_OPERATION: no buffer {}", buffer));
        }

        match ty {
            BufferType::ArrayBuffer => state.array_buffer = buffer,
            BufferType::ElementArrayBuffer => {
                let bound = state.vertex_array;
                match state.vertex_arrays.get_mut(&bound) {
                    Some(vao) => vao.element_buffer = buffer,
                    None => state.error("GL_INVALID_OPERATION: element buffer bound \
                                         without a vertex array".to_owned()),
                }
            },
        }
    }

    fn buffer_data(&self, ty: BufferType, data: &[u8]) {
        let mut state = self.record(Call::BufferData(ty, data.len()));
        let bound = state.bound_buffer(ty);
        match state.buffers.get_mut(&bound) {
            Some(content) if bound != 0 => *content = data.to_vec(),
            _ => state.error(format!("GL_INVALID_OPERATION: no buffer bound to {:?}", ty)),
        }
    }

    fn get_buffer_sub_data(&self, ty: BufferType, out: &mut [u8]) {
        let mut state = self.state.borrow_mut();
        let bound = state.bound_buffer(ty);
        match state.buffers.get(&bound) {
            Some(content) if bound != 0 && content.len() >= out.len() => {
                out.copy_from_slice(&content[..out.len()])
            },
            Some(_) if bound != 0 => state.error("GL_INVALID_VALUE: read past the end of \
                                                  the buffer".to_owned()),
            _ => state.error(format!("GL_INVALID_OPERATION: no buffer bound to {:?}", ty)),
        }
    }

    fn delete_buffer(&self, buffer: gl::types::GLuint) {
        let mut state = self.record(Call::DeleteBuffer(buffer));
        if state.buffers.remove(&buffer).is_none() {
            return state.error(format!("deleting unknown buffer {}", buffer));
        }
        if state.array_buffer == buffer {
            state.array_buffer = 0;
        }
        let bound = state.vertex_array;
        if let Some(vao) = state.vertex_arrays.get_mut(&bound) {
            if vao.element_buffer == buffer {
                vao.element_buffer = 0;
            }
        }
    }

    fn vertex_attrib_pointer(&self, index: gl::types::GLuint, size: gl::types::GLint,
                             stride: gl::types::GLsizei, offset: usize)
    {
        let mut state = self.record(Call::VertexAttribPointer { index, size, stride, offset });
        let buffer = state.array_buffer;
        if buffer == 0 {
            return state.error("GL_INVALID_OPERATION: no array buffer bound".to_owned());
        }
        if !(1..=4).contains(&size) || stride < 0 {
            return state.error("GL_INVALID_VALUE: bad attribute layout".to_owned());
        }

        let bound = state.vertex_array;
        match state.vertex_arrays.get_mut(&bound) {
            Some(vao) => { vao.attribs.insert(index, AttribPointer { buffer, size, stride, offset }); },
            None => state.error("GL_INVALID_OPERATION: no vertex array bound".to_owned()),
        }
    }

    fn enable_vertex_attrib_array(&self, index: gl::types::GLuint) {
        let mut state = self.record(Call::EnableVertexAttribArray(index));
        let bound = state.vertex_array;
        match state.vertex_arrays.get_mut(&bound) {
            Some(vao) => if !vao.enabled.contains(&index) { vao.enabled.push(index) },
            None => state.error("GL_INVALID_OPERATION: no vertex array bound".to_owned()),
        }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: gl::types::GLbitfield) {
        self.record(Call::Clear(mask));
    }

    fn draw_elements(&self, mode: gl::types::GLenum, count: gl::types::GLsizei,
                     index_type: gl::types::GLenum, offset: usize)
    {
        let mut state = self.record(Call::DrawElements { mode, count, index_type, offset });
        if let Err(err) = state.validate_draw(count, index_type, offset) {
            state.error(err);
        }
    }
}

/// Event source replaying a script, one batch of events per poll.
#[derive(Default)]
pub struct HeadlessEvents {
    script: FnvHashMap<u64, Vec<Event>>,
    polls: u64,
}

impl HeadlessEvents {
    /// Builds a source that never produces any event.
    pub fn new() -> HeadlessEvents {
        HeadlessEvents::default()
    }

    /// Schedules `event` to be delivered by the poll with the given zero-based index.
    pub fn with_event(mut self, poll: u64, event: Event) -> HeadlessEvents {
        self.script.entry(poll).or_insert_with(Vec::new).push(event);
        self
    }

    /// Number of polls so far.
    #[inline]
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl EventSource for HeadlessEvents {
    fn poll(&mut self, sink: &mut Vec<Event>) {
        if let Some(events) = self.script.remove(&self.polls) {
            sink.extend(events);
        }
        self.polls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::check_glsl;

    #[test]
    fn accepts_pass_through_shader() {
        let source = "#version 330 core\n\
                      layout (location = 0) in vec3 position;\n\
                      void main()\n\
                      {\n\
                      gl_Position = vec4(position.x, position.y, position.z, 1.0);\n\
                      }\n";
        assert_eq!(check_glsl(source), Ok(()));
    }

    #[test]
    fn rejects_unclosed_block() {
        let err = check_glsl("#version 330 core\nvoid main() {\n").unwrap_err();
        assert!(err.contains("unexpected end of file"), "{}", err);
    }

    #[test]
    fn rejects_stray_delimiter() {
        let err = check_glsl("#version 330 core\nvoid main() { } }\n").unwrap_err();
        assert!(err.starts_with("0:2(1)"), "{}", err);
    }

    #[test]
    fn rejects_missing_or_newer_version() {
        assert!(check_glsl("void main() {}").is_err());
        assert!(check_glsl("#version 450\nvoid main() {}").is_err());
    }
}
