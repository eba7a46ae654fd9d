use std::rc::Rc;

use crate::context::Context;
use crate::gl;
use crate::program::{ProgramCreationError, Shader, ShaderType};
use crate::GlObject;

/// A combination of a vertex and a fragment shader, linked together.
///
/// The shader objects are detached and released as soon as linking succeeds; only the program
/// object is kept.
pub struct Program {
    context: Rc<Context>,
    id: gl::types::GLuint,
}

impl Program {
    /// Compiles both sources and links them.
    pub fn from_source(context: &Rc<Context>, vertex_shader: &str, fragment_shader: &str)
                       -> Result<Program, ProgramCreationError>
    {
        let vertex = Shader::compile(context, ShaderType::Vertex, vertex_shader)?;
        let fragment = Shader::compile(context, ShaderType::Fragment, fragment_shader)?;
        Program::link(vertex, fragment)
    }

    /// Links a vertex and a fragment shader into a program.
    ///
    /// Both shaders are consumed: whatever the outcome, their objects are released before this
    /// function returns.
    pub fn link(vertex: Shader, fragment: Shader) -> Result<Program, ProgramCreationError> {
        if vertex.stage() != ShaderType::Vertex || fragment.stage() != ShaderType::Fragment {
            return Err(ProgramCreationError::ProgramLinkFailed {
                log: format!("expected a vertex and a fragment shader, got {} and {}",
                             vertex.stage(), fragment.stage()),
            });
        }

        if !Rc::ptr_eq(vertex.context(), fragment.context()) {
            return Err(ProgramCreationError::ProgramLinkFailed {
                log: "the shaders belong to different contexts".to_owned(),
            });
        }

        let context = vertex.context().clone();
        let ctxt = context.commands();

        let id = ctxt.create_program();
        if id == 0 {
            return Err(ProgramCreationError::ProgramLinkFailed {
                log: "glCreateProgram returned 0".to_owned(),
            });
        }

        let program = Program { context: context.clone(), id };

        for shader in [&vertex, &fragment] {
            ctxt.attach_shader(id, shader.get_id());
        }

        ctxt.link_program(id);

        for shader in [&vertex, &fragment] {
            ctxt.detach_shader(id, shader.get_id());
        }

        if ctxt.get_program_iv(id, gl::LINK_STATUS) == gl::TRUE as gl::types::GLint {
            log::debug!("linked program {}", id);
            Ok(program)
        } else {
            let log = ctxt.get_program_info_log(id);
            log::error!("program linking failed:\n{}", log);
            Err(ProgramCreationError::ProgramLinkFailed { log })
        }
    }

    /// Returns the number of shader objects still attached to the program.
    ///
    /// Always `0` for a program built by `link`.
    pub fn attached_shader_count(&self) -> u32 {
        self.context.commands().get_program_iv(self.id, gl::ATTACHED_SHADERS) as u32
    }
}

impl GlObject for Program {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.id
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        self.context.commands().delete_program(self.id);
    }
}
