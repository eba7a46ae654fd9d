/*!
Shaders and the program linking them.

```no_run
# fn example(context: &std::rc::Rc<red_flag::Context>) -> Result<(), red_flag::ProgramCreationError> {
use red_flag::{Program, Shader, ShaderType};

let vertex = Shader::compile(context, ShaderType::Vertex, red_flag::demo::VERTEX_SHADER_SRC)?;
let fragment = Shader::compile(context, ShaderType::Fragment, red_flag::demo::FRAGMENT_SHADER_SRC)?;
let program = Program::link(vertex, fragment)?;
assert_eq!(program.attached_shader_count(), 0);
# Ok(())
# }
```
*/
use std::error::Error;
use std::fmt;

use crate::gl;

pub use self::program::Program;
pub use self::shader::Shader;

mod program;
mod shader;

/// Type of shader.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderType {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per covered pixel.
    Fragment,
}

impl ShaderType {
    /// Returns the OpenGL enum corresponding to this shader stage.
    #[inline]
    pub fn to_opengl_type(self) -> gl::types::GLenum {
        match self {
            ShaderType::Vertex => gl::VERTEX_SHADER,
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderType::Vertex => fmt.write_str("vertex"),
            ShaderType::Fragment => fmt.write_str("fragment"),
        }
    }
}

/// Error that can be triggered when creating a `Program`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramCreationError {
    /// Error while compiling one of the shaders.
    ShaderCompileFailed {
        /// The stage that failed.
        stage: ShaderType,
        /// The compiler's info log.
        log: String,
    },

    /// Error while linking the program.
    ProgramLinkFailed {
        /// The linker's info log.
        log: String,
    },
}

impl fmt::Display for ProgramCreationError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ProgramCreationError::ShaderCompileFailed { stage, ref log } =>
                write!(fmt, "compilation error in the {} shader: {}", stage, log),
            ProgramCreationError::ProgramLinkFailed { ref log } =>
                write!(fmt, "error while linking shaders together: {}", log),
        }
    }
}

impl Error for ProgramCreationError {}
