pub mod main;
pub mod metrics;
pub mod tracker;

use crate::state::{Position, Size};

// ============================================================================
// Window-manager state
// ============================================================================

/// Window-manager flags reported for the native window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    /// The window is hidden (not mapped)
    pub withdrawn: bool,
    /// The window is minimized
    pub iconified: bool,
    pub maximized: bool,
    pub fullscreen: bool,
}

impl WindowFlags {
    /// Raw geometry is only worth restoring from a normal, visible window.
    ///
    /// A maximized or fullscreen window reports the screen's geometry and a
    /// minimized or hidden one reports stale or bogus values.
    pub fn is_restorable(&self) -> bool {
        !(self.withdrawn || self.iconified || self.maximized || self.fullscreen)
    }

    /// Whether the maximized flag itself is meaningful
    pub fn is_mapped(&self) -> bool {
        !(self.withdrawn || self.iconified)
    }
}

/// A snapshot of the native window geometry and state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowMetrics {
    /// Outer position; `None` where the platform cannot report it (Wayland)
    pub position: Option<Position>,
    /// Inner (content) size
    pub size: Size,
    pub flags: WindowFlags,
}

pub use main::{create_main_window_config, CreateMainWindowConfigParams};
pub use metrics::capture_window_metrics;
pub use tracker::{save_due, LayoutTracker, SaveTrigger};
