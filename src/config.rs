//! Runtime configuration for the widget window
//!
//! The keypad layout itself is fixed; the only configurable surface is
//! the window's logical size and the UI scale, populated from CLI flags
//! by the binary and validated here before the window is created.

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Window size {width}x{height} outside {min_width}x{min_height}..{max_width}x{max_height}")]
    InvalidSize {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("UI scale {scale} outside {min}..{max}")]
    InvalidScale { scale: f32, min: f32, max: f32 },
}

/// Window size and scale settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    /// Client area width in logical pixels
    pub width: u32,
    /// Client area height in logical pixels
    pub height: u32,
    /// User UI scale multiplier on top of the monitor DPI scale
    pub scale: f32,
}

impl WindowConfig {
    pub const MIN_WIDTH: u32 = 200;
    pub const MIN_HEIGHT: u32 = 300;
    pub const MAX_WIDTH: u32 = 2000;
    pub const MAX_HEIGHT: u32 = 3000;
    pub const MIN_SCALE: f32 = 0.5;
    pub const MAX_SCALE: f32 = 4.0;

    /// Checks the configuration against the supported ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let width_ok = (Self::MIN_WIDTH..=Self::MAX_WIDTH).contains(&self.width);
        let height_ok = (Self::MIN_HEIGHT..=Self::MAX_HEIGHT).contains(&self.height);
        if !width_ok || !height_ok {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
                min_width: Self::MIN_WIDTH,
                min_height: Self::MIN_HEIGHT,
                max_width: Self::MAX_WIDTH,
                max_height: Self::MAX_HEIGHT,
            });
        }

        if !(Self::MIN_SCALE..=Self::MAX_SCALE).contains(&self.scale) {
            return Err(ConfigError::InvalidScale {
                scale: self.scale,
                min: Self::MIN_SCALE,
                max: Self::MAX_SCALE,
            });
        }

        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 480,
            scale: 1.0,
        }
    }
}
