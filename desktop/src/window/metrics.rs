use dioxus::desktop::tao::window::Window;

use crate::state::{Position, Size};

use super::{WindowFlags, WindowMetrics};

pub fn capture_window_flags(window: &Window) -> WindowFlags {
    WindowFlags {
        withdrawn: !window.is_visible(),
        iconified: window.is_minimized(),
        maximized: window.is_maximized(),
        fullscreen: window.fullscreen().is_some(),
    }
}

pub fn capture_window_metrics(window: &Window) -> WindowMetrics {
    let scale = window.scale_factor();
    let position = match window.outer_position() {
        Ok(position) => {
            let position = position.to_logical::<i32>(scale);
            Some(Position::new(position.x, position.y))
        }
        Err(e) => {
            tracing::trace!(%e, "Window position is not available");
            None
        }
    };
    let size = window.inner_size().to_logical::<u32>(scale);

    WindowMetrics {
        position,
        size: Size::new(size.width, size.height),
        flags: capture_window_flags(window),
    }
}
