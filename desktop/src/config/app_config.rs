use serde::{Deserialize, Serialize};

mod paned_config;
mod persistence_config;
mod window_config;

pub use paned_config::{PanedConfig, DEFAULT_BOTTOM_EXTENT, DEFAULT_MIN_CHILD_EXTENT};
pub use persistence_config::{PersistenceConfig, SaveMode, DEFAULT_SAVE_DEBOUNCE_MS};
pub use window_config::{WindowConfig, WindowDefaultSize, MIN_WINDOW_DIMENSION};

/// Global application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub window: WindowConfig,
    pub paned: PanedConfig,
    pub persistence: PersistenceConfig,
}
