use crate::keyfile::{KeyFile, KeyFileError};

pub const WINDOW_GROUP: &str = "window";
pub const VERTICAL_PANED_GROUP: &str = "vertical_paned";
pub const HORIZONTAL_PANED_GROUP: &str = "horizontal_paned";

const POSITION_KEY: &str = "position";
const SIZE_KEY: &str = "size";
const MAXIMIZED_KEY: &str = "maximized";

/// Window position in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window inner size in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Which split container a divider offset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanedKind {
    /// Splits the editors (top) from the bottom pane
    Vertical,
    /// Splits the left and right editors
    Horizontal,
}

impl PanedKind {
    pub fn group(self) -> &'static str {
        match self {
            Self::Vertical => VERTICAL_PANED_GROUP,
            Self::Horizontal => HORIZONTAL_PANED_GROUP,
        }
    }
}

/// The persisted window and divider layout.
///
/// Every field is optional: `None` means "not stored", in which case the window
/// keeps its default for that value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub window_position: Option<Position>,
    pub window_size: Option<Size>,
    pub maximized: Option<bool>,
    pub vertical_paned: Option<i32>,
    pub horizontal_paned: Option<i32>,
}

impl LayoutState {
    /// Read every layout key that is present and well formed.
    ///
    /// Keys are read independently, so one bad value never discards the others.
    pub fn from_key_file(key_file: &KeyFile) -> Self {
        let window_position = read_pair(key_file, WINDOW_GROUP, POSITION_KEY)
            .map(|[x, y]| Position::new(x, y));
        let window_size = read_pair(key_file, WINDOW_GROUP, SIZE_KEY).and_then(|[w, h]| {
            match (u32::try_from(w), u32::try_from(h)) {
                (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                    Some(Size::new(width, height))
                }
                _ => {
                    tracing::debug!(width = w, height = h, "Ignoring non-positive window size");
                    None
                }
            }
        });
        let maximized = ok_or_log(
            key_file.get_boolean(WINDOW_GROUP, MAXIMIZED_KEY),
            WINDOW_GROUP,
            MAXIMIZED_KEY,
        );
        let vertical_paned = ok_or_log(
            key_file.get_integer(VERTICAL_PANED_GROUP, POSITION_KEY),
            VERTICAL_PANED_GROUP,
            POSITION_KEY,
        );
        let horizontal_paned = ok_or_log(
            key_file.get_integer(HORIZONTAL_PANED_GROUP, POSITION_KEY),
            HORIZONTAL_PANED_GROUP,
            POSITION_KEY,
        );

        Self {
            window_position,
            window_size,
            maximized,
            vertical_paned,
            horizontal_paned,
        }
    }

    /// Write the stored fields into `key_file`, leaving everything else intact.
    pub fn write_to(&self, key_file: &mut KeyFile) {
        if let Some(position) = self.window_position {
            key_file.set_integer_list(WINDOW_GROUP, POSITION_KEY, &[position.x, position.y]);
        }
        if let Some(size) = self.window_size {
            key_file.set_integer_list(
                WINDOW_GROUP,
                SIZE_KEY,
                &[clamp_to_i32(size.width), clamp_to_i32(size.height)],
            );
        }
        if let Some(maximized) = self.maximized {
            key_file.set_boolean(WINDOW_GROUP, MAXIMIZED_KEY, maximized);
        }
        if let Some(position) = self.vertical_paned {
            key_file.set_integer(VERTICAL_PANED_GROUP, POSITION_KEY, position);
        }
        if let Some(position) = self.horizontal_paned {
            key_file.set_integer(HORIZONTAL_PANED_GROUP, POSITION_KEY, position);
        }
    }

    /// Remove every layout key from `key_file`; unrelated content stays.
    pub fn clear(key_file: &mut KeyFile) {
        for key in [POSITION_KEY, SIZE_KEY, MAXIMIZED_KEY] {
            key_file.remove_key(WINDOW_GROUP, key);
        }
        // The divider groups hold nothing else
        key_file.remove_group(VERTICAL_PANED_GROUP);
        key_file.remove_group(HORIZONTAL_PANED_GROUP);
    }

    pub fn paned(&self, kind: PanedKind) -> Option<i32> {
        match kind {
            PanedKind::Vertical => self.vertical_paned,
            PanedKind::Horizontal => self.horizontal_paned,
        }
    }

    pub fn set_paned(&mut self, kind: PanedKind, position: i32) {
        match kind {
            PanedKind::Vertical => self.vertical_paned = Some(position),
            PanedKind::Horizontal => self.horizontal_paned = Some(position),
        }
    }
}

/// Two-element integer list; any other length is ignored
fn read_pair(key_file: &KeyFile, group: &str, key: &str) -> Option<[i32; 2]> {
    let values = ok_or_log(key_file.get_integer_list(group, key), group, key)?;
    match values.as_slice() {
        [a, b] => Some([*a, *b]),
        _ => {
            tracing::debug!(group, key, len = values.len(), "Ignoring list without two items");
            None
        }
    }
}

fn ok_or_log<T>(result: Result<T, KeyFileError>, group: &str, key: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e @ (KeyFileError::GroupNotFound(_) | KeyFileError::KeyNotFound { .. })) => {
            tracing::debug!(group, key, %e, "Layout key not stored");
            None
        }
        Err(e) => {
            tracing::warn!(group, key, %e, "Ignoring malformed layout key");
            None
        }
    }
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
