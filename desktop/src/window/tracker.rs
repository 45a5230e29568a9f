use crate::config::SaveMode;
use crate::state::{LayoutState, PanedKind};

use super::WindowMetrics;

/// Records window and divider changes into a [`LayoutState`].
///
/// Geometry is only taken while the window is in a restorable state, so the
/// stored position and size are always those of the last normal window even
/// after it has been maximized, minimized or made fullscreen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTracker {
    layout: LayoutState,
    dirty: bool,
}

impl LayoutTracker {
    pub fn new(layout: LayoutState) -> Self {
        Self {
            layout,
            dirty: false,
        }
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Window moved, resized or changed window-manager state.
    ///
    /// Returns whether the layout changed.
    pub fn on_window_state(&mut self, metrics: &WindowMetrics) -> bool {
        let mut changed = false;

        if metrics.flags.is_restorable() {
            changed |= self.record_geometry(metrics);
        }
        if metrics.flags.is_mapped() {
            changed |= replace(&mut self.layout.maximized, metrics.flags.maximized);
        }

        self.dirty |= changed;
        changed
    }

    /// A divider drag finished at `position`.
    pub fn on_paned_moved(&mut self, kind: PanedKind, position: i32) -> bool {
        let changed = self.layout.paned(kind) != Some(position);
        if changed {
            self.layout.set_paned(kind, position);
        }
        self.dirty |= changed;
        changed
    }

    /// The window is about to close: take the final snapshot.
    ///
    /// The maximized flag is stored unconditionally; geometry only when the
    /// window is restorable.
    pub fn on_close(&mut self, metrics: &WindowMetrics, vertical: i32, horizontal: i32) {
        self.layout.maximized = Some(metrics.flags.maximized);
        if metrics.flags.is_restorable() {
            self.record_geometry(metrics);
        }
        self.layout.vertical_paned = Some(vertical);
        self.layout.horizontal_paned = Some(horizontal);
        self.dirty = true;
    }

    fn record_geometry(&mut self, metrics: &WindowMetrics) -> bool {
        let mut changed = false;
        if let Some(position) = metrics.position {
            changed |= replace(&mut self.layout.window_position, position);
        }
        if metrics.size.width > 0 && metrics.size.height > 0 {
            changed |= replace(&mut self.layout.window_size, metrics.size);
        }
        changed
    }
}

/// What prompted a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    /// The layout changed while the window is open
    Changed,
    /// The window is closing
    Closing,
}

/// Whether the layout file should be written now.
///
/// Nothing is written once the close snapshot has been saved or while the
/// tracker holds no unsaved change. Changes are only written as they happen
/// in [`SaveMode::OnChange`]; closing always writes.
pub fn save_due(mode: SaveMode, trigger: SaveTrigger, dirty: bool, closed: bool) -> bool {
    if closed || !dirty {
        return false;
    }
    match trigger {
        SaveTrigger::Changed => mode == SaveMode::OnChange,
        SaveTrigger::Closing => true,
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Size};
    use crate::window::WindowFlags;

    fn normal(x: i32, y: i32, width: u32, height: u32) -> WindowMetrics {
        WindowMetrics {
            position: Some(Position::new(x, y)),
            size: Size::new(width, height),
            flags: WindowFlags::default(),
        }
    }

    fn with_flags(metrics: WindowMetrics, flags: WindowFlags) -> WindowMetrics {
        WindowMetrics { flags, ..metrics }
    }

    #[test]
    fn test_records_geometry_of_normal_window() {
        let mut tracker = LayoutTracker::default();
        assert!(tracker.on_window_state(&normal(10, 20, 800, 600)));

        let layout = tracker.layout();
        assert_eq!(layout.window_position, Some(Position::new(10, 20)));
        assert_eq!(layout.window_size, Some(Size::new(800, 600)));
        assert_eq!(layout.maximized, Some(false));
        assert!(tracker.take_dirty());
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_maximize_keeps_last_restorable_geometry() {
        let mut tracker = LayoutTracker::default();
        tracker.on_window_state(&normal(10, 20, 800, 600));
        tracker.take_dirty();

        let maximized = with_flags(
            normal(0, 0, 1920, 1080),
            WindowFlags {
                maximized: true,
                ..Default::default()
            },
        );
        assert!(tracker.on_window_state(&maximized));

        let layout = tracker.layout();
        assert_eq!(layout.window_position, Some(Position::new(10, 20)));
        assert_eq!(layout.window_size, Some(Size::new(800, 600)));
        assert_eq!(layout.maximized, Some(true));
    }

    #[test]
    fn test_minimized_and_hidden_windows_change_nothing() {
        let mut tracker = LayoutTracker::new(LayoutState {
            maximized: Some(true),
            ..Default::default()
        });

        for flags in [
            WindowFlags {
                iconified: true,
                ..Default::default()
            },
            WindowFlags {
                withdrawn: true,
                ..Default::default()
            },
        ] {
            assert!(!tracker.on_window_state(&with_flags(normal(-32000, -32000, 160, 28), flags)));
        }
        assert_eq!(tracker.layout().window_position, None);
        assert_eq!(tracker.layout().maximized, Some(true));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_fullscreen_geometry_is_ignored() {
        let mut tracker = LayoutTracker::default();
        let fullscreen = with_flags(
            normal(0, 0, 2560, 1440),
            WindowFlags {
                fullscreen: true,
                ..Default::default()
            },
        );
        tracker.on_window_state(&fullscreen);
        assert_eq!(tracker.layout().window_size, None);
    }

    #[test]
    fn test_unchanged_geometry_is_not_dirty() {
        let mut tracker = LayoutTracker::default();
        tracker.on_window_state(&normal(1, 2, 300, 200));
        tracker.take_dirty();
        assert!(!tracker.on_window_state(&normal(1, 2, 300, 200)));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_missing_position_keeps_stored_one() {
        let mut tracker = LayoutTracker::new(LayoutState {
            window_position: Some(Position::new(5, 5)),
            ..Default::default()
        });
        let metrics = WindowMetrics {
            position: None,
            ..normal(0, 0, 640, 480)
        };
        tracker.on_window_state(&metrics);
        assert_eq!(tracker.layout().window_position, Some(Position::new(5, 5)));
        assert_eq!(tracker.layout().window_size, Some(Size::new(640, 480)));
    }

    #[test]
    fn test_paned_moves() {
        let mut tracker = LayoutTracker::default();
        assert!(tracker.on_paned_moved(PanedKind::Horizontal, 300));
        assert!(!tracker.on_paned_moved(PanedKind::Horizontal, 300));
        assert!(tracker.on_paned_moved(PanedKind::Vertical, 400));
        assert_eq!(tracker.layout().horizontal_paned, Some(300));
        assert_eq!(tracker.layout().vertical_paned, Some(400));
    }

    #[test]
    fn test_close_while_maximized() {
        let mut tracker = LayoutTracker::default();
        tracker.on_window_state(&normal(10, 20, 800, 600));
        tracker.take_dirty();

        let maximized = with_flags(
            normal(0, 0, 1920, 1080),
            WindowFlags {
                maximized: true,
                ..Default::default()
            },
        );
        tracker.on_close(&maximized, 700, 900);

        let layout = tracker.layout();
        assert_eq!(layout.maximized, Some(true));
        assert_eq!(layout.window_size, Some(Size::new(800, 600)));
        assert_eq!(layout.vertical_paned, Some(700));
        assert_eq!(layout.horizontal_paned, Some(900));
        assert!(tracker.is_dirty());
    }

    #[test]
    fn test_on_close_mode_writes_only_when_closing() {
        assert!(!save_due(SaveMode::OnClose, SaveTrigger::Changed, true, false));
        assert!(save_due(SaveMode::OnClose, SaveTrigger::Closing, true, false));
    }

    #[test]
    fn test_on_change_mode_writes_on_change_and_close() {
        assert!(save_due(SaveMode::OnChange, SaveTrigger::Changed, true, false));
        assert!(save_due(SaveMode::OnChange, SaveTrigger::Closing, true, false));
    }

    #[test]
    fn test_nothing_written_after_close() {
        for mode in [SaveMode::OnClose, SaveMode::OnChange] {
            for trigger in [SaveTrigger::Changed, SaveTrigger::Closing] {
                assert!(!save_due(mode, trigger, true, true));
            }
        }
    }

    #[test]
    fn test_clean_tracker_is_not_written() {
        let mut tracker = LayoutTracker::default();
        tracker.on_paned_moved(PanedKind::Vertical, 400);
        assert!(save_due(
            SaveMode::OnChange,
            SaveTrigger::Changed,
            tracker.is_dirty(),
            false
        ));

        tracker.take_dirty();
        for mode in [SaveMode::OnClose, SaveMode::OnChange] {
            for trigger in [SaveTrigger::Changed, SaveTrigger::Closing] {
                assert!(!save_due(mode, trigger, tracker.is_dirty(), false));
            }
        }
    }

    #[test]
    fn test_close_snapshot_is_always_due() {
        let mut tracker = LayoutTracker::default();
        tracker.on_close(&normal(0, 0, 640, 480), 300, 320);
        assert!(save_due(
            SaveMode::OnClose,
            SaveTrigger::Closing,
            tracker.is_dirty(),
            false
        ));
    }

    #[test]
    fn test_close_from_normal_window() {
        let mut tracker = LayoutTracker::new(LayoutState {
            maximized: Some(true),
            ..Default::default()
        });
        tracker.on_close(&normal(3, 4, 1280, 720), 520, 640);

        let layout = tracker.layout();
        assert_eq!(layout.maximized, Some(false));
        assert_eq!(layout.window_position, Some(Position::new(3, 4)));
        assert_eq!(layout.window_size, Some(Size::new(1280, 720)));
    }
}
