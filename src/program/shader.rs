use std::ffi::CString;
use std::rc::Rc;

use crate::context::Context;
use crate::gl;
use crate::program::{ProgramCreationError, ShaderType};
use crate::GlObject;

/// A single, compiled but unlinked, shader.
pub struct Shader {
    context: Rc<Context>,
    id: gl::types::GLuint,
    stage: ShaderType,
}

impl Shader {
    /// Compiles `source` as a shader of the given stage.
    ///
    /// On failure the shader object is released and the compiler's log is returned.
    pub fn compile(context: &Rc<Context>, stage: ShaderType, source: &str)
                   -> Result<Shader, ProgramCreationError>
    {
        let source = match CString::new(source) {
            Ok(s) => s,
            Err(err) => return Err(ProgramCreationError::ShaderCompileFailed {
                stage,
                log: format!("source contains a nul byte at offset {}", err.nul_position()),
            }),
        };

        let ctxt = context.commands();

        let id = ctxt.create_shader(stage.to_opengl_type());
        if id == 0 {
            return Err(ProgramCreationError::ShaderCompileFailed {
                stage,
                log: "glCreateShader returned 0".to_owned(),
            });
        }

        // dropping this releases the object on the error path
        let shader = Shader { context: context.clone(), id, stage };

        ctxt.shader_source(id, &source);
        ctxt.compile_shader(id);

        if ctxt.get_shader_iv(id, gl::COMPILE_STATUS) == gl::TRUE as gl::types::GLint {
            log::debug!("compiled {} shader {}", stage, id);
            Ok(shader)
        } else {
            let log = ctxt.get_shader_info_log(id);
            log::error!("{} shader compilation failed:\n{}", stage, log);
            Err(ProgramCreationError::ShaderCompileFailed { stage, log })
        }
    }

    /// Returns the stage this shader was compiled for.
    #[inline]
    pub fn stage(&self) -> ShaderType {
        self.stage
    }

    #[inline]
    pub(crate) fn context(&self) -> &Rc<Context> {
        &self.context
    }
}

impl GlObject for Shader {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.id
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.context.commands().delete_shader(self.id);
    }
}
