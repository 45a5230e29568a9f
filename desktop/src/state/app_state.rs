use dioxus::prelude::*;
use std::path::PathBuf;

use super::{LayoutFile, LayoutState, PanedKind};
use crate::config::SaveMode;
use crate::window::{save_due, LayoutTracker, SaveTrigger};

/// Outcome of the most recent layout save, shown in the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saved,
    Failed,
}

/// Per-window application state.
///
/// All fields are `Signal<T>`, so the struct is `Copy` and can be moved into
/// event handlers and async blocks freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppState {
    pub tracker: Signal<LayoutTracker>,
    pub layout_file: Signal<LayoutFile>,
    pub save_mode: Signal<SaveMode>,
    pub save_status: Signal<SaveStatus>,
    /// Live divider offsets in pixels (updated while dragging)
    pub vertical_position: Signal<f64>,
    pub horizontal_position: Signal<f64>,
    /// Set once the close snapshot has been written
    pub closed: Signal<bool>,
}

impl AppState {
    pub fn new(
        layout_file: LayoutFile,
        layout: LayoutState,
        save_mode: SaveMode,
        vertical_position: f64,
        horizontal_position: f64,
    ) -> Self {
        Self {
            tracker: Signal::new(LayoutTracker::new(layout)),
            layout_file: Signal::new(layout_file),
            save_mode: Signal::new(save_mode),
            save_status: Signal::new(SaveStatus::default()),
            vertical_position: Signal::new(vertical_position),
            horizontal_position: Signal::new(horizontal_position),
            closed: Signal::new(false),
        }
    }

    pub fn layout_path(&self) -> PathBuf {
        self.layout_file.read().path().to_path_buf()
    }

    pub fn paned_position(&self, kind: PanedKind) -> Signal<f64> {
        match kind {
            PanedKind::Vertical => self.vertical_position,
            PanedKind::Horizontal => self.horizontal_position,
        }
    }

    /// Whether a save prompted by `trigger` would write anything
    pub fn is_save_due(&self, trigger: SaveTrigger) -> bool {
        save_due(
            *self.save_mode.peek(),
            trigger,
            self.tracker.peek().is_dirty(),
            *self.closed.peek(),
        )
    }

    /// Write the tracked layout to disk when a save is due for `trigger`
    pub fn save(&mut self, trigger: SaveTrigger) {
        if !self.is_save_due(trigger) {
            return;
        }
        self.tracker.write().take_dirty();
        let layout = *self.tracker.read().layout();
        let saved = self.layout_file.write().store_and_save(&layout);
        self.save_status.set(if saved {
            SaveStatus::Saved
        } else {
            SaveStatus::Failed
        });
    }
}
