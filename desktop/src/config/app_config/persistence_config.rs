use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default debounce for continuous saving
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 200;

/// When the layout file is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SaveMode {
    /// Write once, when the window closes
    #[default]
    OnClose,
    /// Write after every change (debounced) and when the window closes
    OnChange,
}

/// Configuration for layout persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistenceConfig {
    /// When to write the layout file: "onClose" or "onChange"
    pub save_mode: SaveMode,
    /// Layout file location; the local data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
    /// Debounce for "onChange" saves in milliseconds
    pub debounce_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_mode: SaveMode::default(),
            state_file: None,
            debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
        }
    }
}
