//! The demo itself: shader sources, the scene, and the render loop.

use std::rc::Rc;

use crate::config::Config;
use crate::context::Context;
use crate::emblem::Emblem;
use crate::program::Program;
use crate::window::{EventSource, Window};
use crate::{Error, SwapBuffersError};

/// Passes the position through unchanged.
pub const VERTEX_SHADER_SRC: &str = "\
#version 330 core
layout (location = 0) in vec3 position;
void main()
{
    gl_Position = vec4(position.x, position.y, position.z, 1.0);
}
";

/// Paints every fragment in the emblem's yellow.
pub const FRAGMENT_SHADER_SRC: &str = "\
#version 330 core
out vec4 color;
void main()
{
    color = vec4(1.0f, 0.870588f, 0.0f, 1.0f);
}
";

/// Everything that is drawn: the program and the emblem.
///
/// Dropping the scene releases the geometry first, then the program.
pub struct Scene {
    emblem: Emblem,
    program: Program,
}

impl Scene {
    /// Builds the program and uploads the emblem.
    pub fn new(context: &Rc<Context>) -> Result<Scene, Error> {
        let program = Program::from_source(context, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)?;
        let emblem = Emblem::upload(context)?;

        Ok(Scene { emblem, program })
    }

    /// Returns the linked program.
    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the uploaded emblem.
    #[inline]
    pub fn emblem(&self) -> &Emblem {
        &self.emblem
    }
}

/// Draws frames until the window should close. Returns the number of presented frames.
///
/// Each iteration polls the events, clears to `config.clear_color`, draws the scene and presents
/// the result. The close flag is only checked at the start of an iteration, so the frame during
/// which Escape is pressed is still drawn.
pub fn run_loop<E>(window: &mut Window<E>, context: &Rc<Context>, scene: &Scene, config: &Config)
                   -> Result<u64, SwapBuffersError>
    where E: EventSource
{
    let [red, green, blue, alpha] = config.clear_color;
    let mut frames = 0;

    while !window.should_close() {
        window.poll_events();

        let mut target = context.draw();
        target.clear_color(red, green, blue, alpha);
        target.draw(scene.program(), scene.emblem().stars());
        target.finish()?;

        frames += 1;
        log::trace!("frame {} presented", frames);
    }

    Ok(frames)
}

/// Opens the window and runs the demo until it is closed.
#[cfg(feature = "glutin_backend")]
pub fn run(config: &Config) -> Result<(), Error> {
    use crate::backend::glutin::WindowBuilder;
    use crate::window::close_on_escape;

    let (backend, events) = WindowBuilder::from_config(config).build()?;

    // declared before the context so that the event loop outlives the window it drives
    let mut window = Window::new(events);
    window.set_key_callback(close_on_escape);

    let context = unsafe { Context::new(backend)? };
    context.set_viewport_to_framebuffer();

    let scene = Scene::new(&context)?;
    let frames = run_loop(&mut window, &context, &scene, config)?;

    log::info!("window closed after {} frames", frames);
    Ok(())
}
