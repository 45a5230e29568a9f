use dioxus::desktop::tao::event::{Event as TaoEvent, WindowEvent};
use dioxus::desktop::{use_wry_event_handler, window};
use dioxus::prelude::*;
use std::time::Duration;

use super::header::{Header, HEADER_HEIGHT};
use super::paned::{clamp_position, Orientation, Paned, HANDLE_SIZE};
use super::text_pane::TextPane;
use crate::config::{PanedConfig, SaveMode, CONFIG};
use crate::state::{AppState, LayoutFile, LayoutState, PanedKind, Size};
use crate::window::{capture_window_metrics, SaveTrigger};

/// Schedules a layout save after a quiet period; newer requests supersede older ones
#[derive(Clone, Copy)]
struct DebouncedSaver {
    token: Signal<u64>,
}

impl DebouncedSaver {
    fn schedule(&mut self, mut state: AppState, delay: Duration) {
        let token = self.token.read().wrapping_add(1);
        self.token.set(token);
        let token_signal = self.token;
        spawn(async move {
            tokio::time::sleep(delay).await;
            if *token_signal.read() != token {
                return;
            }
            state.save(SaveTrigger::Changed);
        });
    }
}

/// Divider offsets used when none are stored, derived from the window inner size.
///
/// The editors share the width evenly and the bottom pane keeps
/// `default_bottom_extent` pixels below the header.
pub fn initial_divider_positions(
    layout: &LayoutState,
    window_size: Size,
    config: &PanedConfig,
) -> (f64, f64) {
    let width = f64::from(window_size.width);
    let height = f64::from(window_size.height) - HEADER_HEIGHT;
    let min = config.min_child_extent;

    let vertical = layout.vertical_paned.map(f64::from).unwrap_or_else(|| {
        clamp_position(
            height - HANDLE_SIZE - config.default_bottom_extent,
            height,
            min,
        )
    });
    let horizontal = layout
        .horizontal_paned
        .map(f64::from)
        .unwrap_or_else(|| clamp_position((width - HANDLE_SIZE) / 2.0, width, min));

    (vertical, horizontal)
}

#[component]
pub fn App(layout_file: LayoutFile, save_mode: SaveMode) -> Element {
    let state = use_context_provider(|| {
        let layout = layout_file.layout();
        let metrics = capture_window_metrics(&window().window);
        let (vertical, horizontal) =
            initial_divider_positions(&layout, metrics.size, &CONFIG.read().paned);
        tracing::debug!(?layout, ?metrics, vertical, horizontal, "Restoring layout");
        AppState::new(layout_file, layout, save_mode, vertical, horizontal)
    });

    let mut saver = DebouncedSaver {
        token: use_signal(|| 0_u64),
    };

    // Handle window events
    use_wry_event_handler(move |event, _| {
        let TaoEvent::WindowEvent {
            event, window_id, ..
        } = event
        else {
            return;
        };
        let desktop = window();
        if window_id != &desktop.id() {
            return;
        }

        match event {
            WindowEvent::Resized(_) | WindowEvent::Moved(_) => {
                let metrics = capture_window_metrics(&desktop.window);
                let mut tracker = state.tracker;
                if tracker.write().on_window_state(&metrics) {
                    tracing::trace!(?metrics, "Window geometry recorded");
                    schedule_save(state, &mut saver);
                }
            }
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                save_on_close(state);
            }
            _ => {}
        }
    });

    // Fallback when the window goes away without a close request
    use_drop(move || {
        save_on_close(state);
    });

    let min_child_extent = CONFIG.read().paned.min_child_extent;
    let on_paned_moved = move |kind: PanedKind, position: f64| {
        let mut tracker = state.tracker;
        if tracker.write().on_paned_moved(kind, position.round() as i32) {
            tracing::debug!(?kind, position, "Divider moved");
            schedule_save(state, &mut saver);
        }
    };
    let mut on_paned_moved_vertical = on_paned_moved;
    let mut on_paned_moved_horizontal = on_paned_moved;

    rsx! {
        div {
            class: "app-container",

            Header {}

            Paned {
                id: "vertical-paned",
                orientation: Orientation::Vertical,
                position: state.paned_position(PanedKind::Vertical),
                min_child_extent,
                on_moved: move |position| on_paned_moved_vertical(PanedKind::Vertical, position),
                first: rsx! {
                    Paned {
                        id: "horizontal-paned",
                        orientation: Orientation::Horizontal,
                        position: state.paned_position(PanedKind::Horizontal),
                        min_child_extent,
                        on_moved: move |position| on_paned_moved_horizontal(PanedKind::Horizontal, position),
                        first: rsx! {
                            TextPane { id: "left-text-view", label: "Left pane", autofocus: true }
                        },
                        second: rsx! {
                            TextPane { id: "right-text-view", label: "Right pane" }
                        },
                    }
                },
                second: rsx! {
                    TextPane { id: "bottom-text-view", label: "Bottom pane" }
                },
            }
        }
    }
}

/// Save a change right away or after the debounce, if the save mode wants it
fn schedule_save(mut state: AppState, saver: &mut DebouncedSaver) {
    if !state.is_save_due(SaveTrigger::Changed) {
        return;
    }
    let delay = Duration::from_millis(CONFIG.read().persistence.debounce_ms);
    if delay.is_zero() {
        state.save(SaveTrigger::Changed);
    } else {
        saver.schedule(state, delay);
    }
}

/// Take the final layout snapshot and write it, once per window
fn save_on_close(mut state: AppState) {
    if *state.closed.peek() {
        return;
    }

    let metrics = capture_window_metrics(&window().window);
    let vertical = state.vertical_position.peek().round() as i32;
    let horizontal = state.horizontal_position.peek().round() as i32;
    tracing::debug!(?metrics, vertical, horizontal, "Window closing, saving layout");

    state
        .tracker
        .write()
        .on_close(&metrics, vertical, horizontal);
    state.save(SaveTrigger::Closing);
    state.closed.set(true);
}
