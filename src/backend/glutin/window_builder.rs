/*!

A utility to create the demo's window, context and event loop with glutin.

*/
use std::num::NonZeroU32;

use ::glutin::config::ConfigTemplateBuilder;
use ::glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use ::glutin::display::GetGlDisplay;
use ::glutin::prelude::*;
use ::glutin::surface::{SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::event_loop::EventLoop;

use super::{DisplayCreationError, GlutinBackend, GlutinEvents};
use crate::config::Config;

/// Builder for the window and its OpenGL core context.
pub struct WindowBuilder {
    window_builder: winit::window::WindowBuilder,
    config_template_builder: ConfigTemplateBuilder,
    gl_version: (u8, u8),
    vsync: bool,
}

impl WindowBuilder {
    /// Initializes a builder from a configuration. The window is never resizable.
    pub fn from_config(config: &Config) -> Self {
        Self {
            window_builder: winit::window::WindowBuilder::new()
                .with_title(config.title.as_str())
                .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
                .with_resizable(false),
            config_template_builder: ConfigTemplateBuilder::new(),
            gl_version: config.gl_version,
            vsync: config.vsync,
        }
    }

    /// Create the event loop, the window and its current OpenGL context.
    pub fn build(self) -> Result<(GlutinBackend, GlutinEvents), DisplayCreationError> {
        let event_loop = EventLoop::new();

        // First we start by opening a new Window
        let display_builder = DisplayBuilder::new().with_window_builder(Some(self.window_builder));
        let (window, gl_config) = display_builder
            .build(&event_loop, self.config_template_builder, |mut configs| {
                // configs are listed by the platform's preference
                configs.next().expect("glutin only calls the picker with matching configs")
            })
            .map_err(|err| DisplayCreationError::ContextCreationFailed(err.to_string()))?;
        let window = window.ok_or_else(|| {
            DisplayCreationError::WindowCreationFailed("no window was created".to_owned())
        })?;
        let raw_window_handle = window.raw_window_handle();

        // Then the context, always a core profile of the requested version
        let (major, minor) = self.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));
        let not_current_context = unsafe {
            gl_config.display().create_context(&gl_config, &context_attributes)
        }.map_err(|err| DisplayCreationError::ContextCreationFailed(err.to_string()))?;

        // Now we get the window size to use as the initial size of the Surface
        let (width, height): (u32, u32) = window.inner_size().into();
        let (surface_width, surface_height) = match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(DisplayCreationError::WindowCreationFailed(
                format!("the window has an empty inner size of {}x{}", width, height)
            )),
        };
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new()
            .build(raw_window_handle, surface_width, surface_height);
        let surface = unsafe {
            gl_config.display().create_window_surface(&gl_config, &attrs)
        }.map_err(|err| DisplayCreationError::ContextCreationFailed(err.to_string()))?;

        let context = not_current_context.make_current(&surface)
            .map_err(|err| DisplayCreationError::ContextCreationFailed(err.to_string()))?;

        let swap_interval = match (self.vsync, NonZeroU32::new(1)) {
            (true, Some(one)) => SwapInterval::Wait(one),
            _ => SwapInterval::DontWait,
        };
        if let Err(err) = surface.set_swap_interval(&context, swap_interval) {
            log::warn!("couldn't set the swap interval: {}", err);
        }

        log::info!("opened a {}x{} window", width, height);

        Ok((
            GlutinBackend { context, surface, window },
            GlutinEvents { event_loop },
        ))
    }
}

