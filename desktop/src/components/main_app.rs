use dioxus::prelude::*;
use std::sync::OnceLock;

use crate::config::{SaveMode, CONFIG};
use crate::state::LayoutFile;

/// Startup values resolved in main.rs before the event loop starts
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub layout_file: LayoutFile,
    pub save_mode: SaveMode,
}

static LAUNCH_CONTEXT: OnceLock<LaunchContext> = OnceLock::new();

/// Hand the resolved layout file and save mode over to [`MainApp`].
///
/// Only the first call takes effect.
pub fn set_launch_context(context: LaunchContext) {
    if LAUNCH_CONTEXT.set(context).is_err() {
        tracing::warn!("Launch context already set, ignoring");
    }
}

/// Root component of the main window
#[component]
pub fn MainApp() -> Element {
    let context = use_hook(|| match LAUNCH_CONTEXT.get() {
        Some(context) => context.clone(),
        None => {
            tracing::debug!("No launch context, using the default layout file");
            LaunchContext {
                layout_file: LayoutFile::open(LayoutFile::default_path()),
                save_mode: CONFIG.read().persistence.save_mode,
            }
        }
    });

    rsx! {
        crate::components::app::App {
            layout_file: context.layout_file,
            save_mode: context.save_mode,
        }
    }
}
