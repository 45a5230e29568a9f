use dioxus::desktop::tao::dpi::{LogicalPosition, LogicalSize};
use dioxus::desktop::{Config, WindowBuilder};

use crate::assets::MAIN_STYLE;
use crate::config::WindowConfig;
use crate::state::LayoutState;

/// Create the main window config from parameters
pub fn create_main_window_config(params: &CreateMainWindowConfigParams) -> Config {
    let mut builder = WindowBuilder::new()
        .with_title(params.title.as_str())
        .with_inner_size(params.size)
        .with_maximized(params.maximized);
    // Without a stored position the window system picks one
    if let Some(position) = params.position {
        builder = builder.with_position(position);
    }

    Config::new()
        .with_window(builder)
        .with_menu(None)
        // Inline the stylesheet so the first frame is already styled
        .with_custom_head(indoc::formatdoc! {r#"<style>{MAIN_STYLE}</style>"#})
}

/// Parameters for creating the main window
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMainWindowConfigParams {
    pub title: String,
    pub size: LogicalSize<u32>,
    pub position: Option<LogicalPosition<i32>>,
    pub maximized: bool,
}

impl CreateMainWindowConfigParams {
    /// Restore the stored layout, falling back to the configured defaults
    pub fn from_layout(layout: &LayoutState, config: &WindowConfig) -> Self {
        let size = match layout.window_size {
            Some(size) => LogicalSize::new(size.width, size.height),
            None => {
                let size = config.default_size.normalized();
                LogicalSize::new(size.width, size.height)
            }
        };

        Self {
            title: config.title.clone(),
            size,
            position: layout
                .window_position
                .map(|position| LogicalPosition::new(position.x, position.y)),
            maximized: layout.maximized.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowDefaultSize;
    use crate::state::{Position, Size};

    #[test]
    fn test_from_empty_layout_uses_defaults() {
        let params = CreateMainWindowConfigParams::from_layout(
            &LayoutState::default(),
            &WindowConfig::default(),
        );
        assert_eq!(params.title, "tripane");
        assert_eq!(params.size, LogicalSize::new(1280, 720));
        assert_eq!(params.position, None);
        assert!(!params.maximized);
    }

    #[test]
    fn test_from_stored_layout() {
        let layout = LayoutState {
            window_position: Some(Position::new(-100, 40)),
            window_size: Some(Size::new(900, 650)),
            maximized: Some(true),
            ..Default::default()
        };
        let params = CreateMainWindowConfigParams::from_layout(&layout, &WindowConfig::default());
        assert_eq!(params.size, LogicalSize::new(900, 650));
        assert_eq!(params.position, Some(LogicalPosition::new(-100, 40)));
        assert!(params.maximized);
    }

    #[test]
    fn test_configured_default_size_is_normalized() {
        let config = WindowConfig {
            default_size: WindowDefaultSize {
                width: 20,
                height: 800,
            },
            ..Default::default()
        };
        let params = CreateMainWindowConfigParams::from_layout(&LayoutState::default(), &config);
        assert_eq!(params.size, LogicalSize::new(100, 800));
    }
}
