//! Fixed parameters of the demo.

/// Window, context and frame parameters.
///
/// `Config::default()` is what the binary runs with; nothing is read from the command line or
/// from files.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Inner width of the window, in physical pixels.
    pub width: u32,
    /// Inner height of the window, in physical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Requested OpenGL version. A core profile is always requested.
    pub gl_version: (u8, u8),
    /// Whether presenting waits for the vertical blank.
    pub vsync: bool,
    /// Color the framebuffer is cleared to at the start of every frame.
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: 900,
            height: 600,
            title: "LearnOpenGL".to_owned(),
            gl_version: (3, 3),
            vsync: true,
            clear_color: [1.0, 0.0, 0.0, 1.0],
        }
    }
}
