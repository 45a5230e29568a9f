use dioxus::prelude::*;

use crate::config::CONFIG;
use crate::state::{AppState, SaveStatus};

/// Height of the header bar in pixels (matches `.header-bar` in main.css)
pub const HEADER_HEIGHT: f64 = 38.0;

#[component]
pub fn Header() -> Element {
    let state = use_context::<AppState>();

    let title = CONFIG.read().window.title.clone();
    let layout_path = state.layout_path();
    let layout_path = layout_path.display();
    let status = match *state.save_status.read() {
        SaveStatus::Idle => "",
        SaveStatus::Saved => "Layout saved",
        SaveStatus::Failed => "Failed to save layout",
    };

    rsx! {
        header {
            class: "header-bar",
            span { class: "header-title", "{title}" }
            span {
                class: "header-subtitle",
                class: if *state.save_status.read() == SaveStatus::Failed { "error" },
                title: "{layout_path}",
                "{status}"
            }
        }
    }
}
