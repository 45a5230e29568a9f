use serde::{Deserialize, Serialize};

/// Height kept for the bottom pane when no divider position is stored
pub const DEFAULT_BOTTOM_EXTENT: f64 = 200.0;

/// Smallest extent a pane can be dragged down to
pub const DEFAULT_MIN_CHILD_EXTENT: f64 = 50.0;

/// Configuration for the split containers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanedConfig {
    /// Initial height of the bottom pane in pixels
    pub default_bottom_extent: f64,
    /// Minimum width/height of any pane while dragging a divider
    pub min_child_extent: f64,
}

impl Default for PanedConfig {
    fn default() -> Self {
        Self {
            default_bottom_extent: DEFAULT_BOTTOM_EXTENT,
            min_child_extent: DEFAULT_MIN_CHILD_EXTENT,
        }
    }
}
