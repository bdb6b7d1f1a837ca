/// Color every frame is cleared to before anything is drawn.
pub const BACKGROUND: [f32; 4] = [0.20, 0.26, 0.30, 1.0];

pub const DEFAULT_TITLE: &str = "Learn OpenGL";
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_GL_VERSION: (u8, u8) = (3, 3);

/// Everything needed to open a window and its GL context. The context always uses the core
/// profile. There's no global settings namespace; a config is built once in `main` and handed to
/// the surface when it's created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    /// Whether presenting a frame waits for the display's refresh.
    pub vsync: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: String::from(DEFAULT_TITLE),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gl_version: DEFAULT_GL_VERSION,
            vsync: true
        }
    }
}

impl SurfaceConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = String::from(title);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    /// The swap interval is fixed when the context is created, so this has to be decided before
    /// the surface exists.
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_demo_window() {
        let config = SurfaceConfig::default();

        assert_eq!(config.title, "Learn OpenGL");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gl_version, (3, 3));
        assert!(config.vsync);
    }

    #[test]
    fn builder_methods_only_touch_their_own_field() {
        let config = SurfaceConfig::default()
            .with_size(1024, 768)
            .with_vsync(false);

        assert_eq!((config.width, config.height), (1024, 768));
        assert!(!config.vsync);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.gl_version, DEFAULT_GL_VERSION);
    }

    #[test]
    fn title_and_version_can_be_changed_before_the_window_opens() {
        let config = SurfaceConfig::default()
            .with_title("Learn OpenGL: textured quad")
            .with_gl_version(4, 1);

        assert_eq!(config.title, "Learn OpenGL: textured quad");
        assert_eq!(config.gl_version, (4, 1));
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert!(config.vsync);
    }
}
