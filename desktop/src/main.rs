mod assets;
mod components;
mod config;
mod keyfile;
mod state;
mod window;

use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::components::main_app::{set_launch_context, LaunchContext, MainApp};
use crate::config::{SaveMode, CONFIG};
use crate::state::LayoutFile;

const VERSION: &str = concat!(
    env!("TRIPANE_BUILD_VERSION"),
    " (",
    compile_time::datetime_str!(),
    ")",
);

/// tripane: three text panes that remember their layout
#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about,
    long_about = "tripane: three text panes that remember their layout\n\n\
        The window geometry, the maximized flag and both divider positions\n\
        are stored in a GKeyFile-style ui.ini and restored on the next start.",
    after_long_help = "Examples:\n\
        \x20 tripane                          Use the layout file in the data directory\n\
        \x20 tripane --state-file ui.ini      Keep the layout next to the working directory\n\
        \x20 tripane --save-mode on-change    Save after every change, not only on close\n\
        \x20 tripane --reset-layout           Start from the default layout"
)]
struct Cli {
    /// Layout file to read and write (default: ui.ini in the data directory)
    #[arg(long, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// When to write the layout file
    #[arg(long, value_enum)]
    save_mode: Option<SaveMode>,

    /// Configuration file to use instead of the default config.json
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore the stored layout; it is overwritten on the next save
    #[arg(long)]
    reset_layout: bool,
}

const DEFAULT_LOGLEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first (before any other initialization)
    let cli = Cli::parse();

    // Load environment variables from .env file
    if let Ok(dotenv) = dotenvy::dotenv() {
        println!("Loaded .env file from: {}", dotenv.display());
    }
    init_tracing();
    tracing::info!(version = VERSION, "Starting tripane");

    config::init_config(cli.config.as_deref()).context("Failed to load configuration")?;

    // Command line wins over config.json, which wins over the defaults
    let (state_file, save_mode) = {
        let config = CONFIG.read();
        let state_file = cli
            .state_file
            .or_else(|| config.persistence.state_file.clone())
            .unwrap_or_else(LayoutFile::default_path);
        let save_mode = cli.save_mode.unwrap_or(config.persistence.save_mode);
        (state_file, save_mode)
    };

    let mut layout_file = LayoutFile::open(state_file);
    if cli.reset_layout {
        tracing::info!(path = %layout_file.path().display(), "Ignoring stored layout");
        layout_file.reset();
    }
    tracing::debug!(path = %layout_file.path().display(), ?save_mode, "Layout file resolved");

    let params = window::CreateMainWindowConfigParams::from_layout(
        &layout_file.layout(),
        &CONFIG.read().window,
    );
    let config = window::create_main_window_config(&params);

    set_launch_context(LaunchContext {
        layout_file,
        save_mode,
    });

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(MainApp);

    Ok(())
}

fn init_tracing() {
    let silence_filter = tracing_subscriber::filter::filter_fn(|metadata| {
        // Filter out specific error from dioxus_core::properties:136
        // Known issue: https://github.com/DioxusLabs/dioxus/issues/3872
        metadata.target() != "dioxus_core::properties::__component_called_as_function"
    });

    let env_filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGLEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(silence_filter.clone());

    let registry = tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(fmt_layer);

    // On macOS, log to Console.app via oslog
    #[cfg(target_os = "macos")]
    let registry = registry
        .with(tracing_oslog::OsLogger::new("dev.tripane", "default").with_filter(silence_filter));

    registry.init();
}
