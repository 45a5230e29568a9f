use serde::{Deserialize, Serialize};

/// Default window width in logical pixels
pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;

/// Default window height in logical pixels
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;

/// Smallest window dimension accepted from the config
pub const MIN_WINDOW_DIMENSION: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDefaultSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowDefaultSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowDefaultSize {
    /// Enforce the minimum window dimension
    pub fn normalized(self) -> Self {
        Self {
            width: self.width.max(MIN_WINDOW_DIMENSION),
            height: self.height.max(MIN_WINDOW_DIMENSION),
        }
    }
}

/// Configuration for the main window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Size used when no size has been stored yet
    pub default_size: WindowDefaultSize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tripane".to_string(),
            default_size: WindowDefaultSize::default(),
        }
    }
}
