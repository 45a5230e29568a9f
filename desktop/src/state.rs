// State module - layout persistence and per-window state

mod app_state;
pub use app_state::{AppState, SaveStatus};

mod layout;
pub use layout::{LayoutState, PanedKind, Position, Size};

mod persistence;
pub use persistence::LayoutFile;
