use red_flag::backend::headless::Call;
use red_flag::demo::{FRAGMENT_SHADER_SRC, VERTEX_SHADER_SRC};
use red_flag::{GlObject, Program, ProgramCreationError, Shader, ShaderType};

mod support;

#[test]
fn program_creation() {
    let (headless, context) = support::build_context();

    let program = Program::from_source(&context, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC).unwrap();

    assert!(program.get_id() != 0);
    assert!(headless.errors().is_empty(), "{:?}", headless.errors());
}

#[test]
fn shaders_released_after_link() {
    let (headless, context) = support::build_context();

    let program = Program::from_source(&context, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC).unwrap();

    assert_eq!(program.attached_shader_count(), 0);
    assert_eq!(headless.live_shaders(), 0);
    assert_eq!(headless.live_programs(), 1);
}

#[test]
fn syntax_error() {
    let (headless, context) = support::build_context();

    let source = "
        #version 330 core
        layout (location = 0) in vec3 position;
        void main() {
            gl_Position = vec4(position, 1.0);
    ";

    match Shader::compile(&context, ShaderType::Vertex, source) {
        Err(ProgramCreationError::ShaderCompileFailed { stage, log }) => {
            assert_eq!(stage, ShaderType::Vertex);
            assert!(!log.is_empty());
        },
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("a broken shader compiled"),
    }

    // the failed shader object doesn't outlive the call
    assert_eq!(headless.live_shaders(), 0);
}

#[test]
fn syntax_error_in_fragment_shader_aborts_program() {
    let (headless, context) = support::build_context();

    let fragment = "
        #version 330 core
        out vec4 color;
        void main() {
            color = vec4(1.0, 0.0, 0.0, 1.0));
        }
    ";

    match Program::from_source(&context, VERTEX_SHADER_SRC, fragment) {
        Err(ProgramCreationError::ShaderCompileFailed { stage: ShaderType::Fragment, .. }) => (),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("a broken shader compiled"),
    }

    assert!(!headless.calls().iter().any(|c| matches!(c, Call::CreateProgram(_))));
    assert_eq!(headless.live_shaders(), 0);
}

#[test]
fn nul_byte_in_source() {
    let (headless, context) = support::build_context();

    let result = Shader::compile(&context, ShaderType::Vertex, "#version 330 core\0void main() {}");

    assert!(matches!(result, Err(ProgramCreationError::ShaderCompileFailed { .. })));
    assert!(headless.calls().is_empty());
}

#[test]
fn link_error() {
    let (headless, context) = support::build_context();

    let fragment = "
        #version 330 core
        out vec4 color;
    ";

    match Program::from_source(&context, VERTEX_SHADER_SRC, fragment) {
        Err(ProgramCreationError::ProgramLinkFailed { log }) => assert!(log.contains("main")),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("a program without fragment entry point linked"),
    }

    assert_eq!(headless.live_programs(), 0);
    assert_eq!(headless.live_shaders(), 0);
}

#[test]
fn link_rejects_swapped_stages() {
    let (_headless, context) = support::build_context();

    let vertex = Shader::compile(&context, ShaderType::Vertex, VERTEX_SHADER_SRC).unwrap();
    let fragment = Shader::compile(&context, ShaderType::Fragment, FRAGMENT_SHADER_SRC).unwrap();

    match Program::link(fragment, vertex) {
        Err(ProgramCreationError::ProgramLinkFailed { .. }) => (),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("stages were not checked"),
    }
}

#[test]
fn program_released_on_drop() {
    let (headless, context) = support::build_context();

    let program = Program::from_source(&context, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC).unwrap();
    let id = program.get_id();
    drop(program);

    assert_eq!(headless.calls().last(), Some(&Call::DeleteProgram(id)));
    assert_eq!(headless.live_programs(), 0);
}

#[test]
fn error_messages() {
    let err = ProgramCreationError::ShaderCompileFailed {
        stage: ShaderType::Fragment,
        log: "0:3(1): error: syntax error".to_owned(),
    };
    assert_eq!(err.to_string(),
               "compilation error in the fragment shader: 0:3(1): error: syntax error");

    let err = ProgramCreationError::ProgramLinkFailed { log: "oops".to_owned() };
    assert_eq!(err.to_string(), "error while linking shaders together: oops");
}
