//! Sectioned key-value text format used for the layout file.
//!
//! The format follows the freedesktop "key file" conventions:
//!
//! ```text
//! # comment
//! [window]
//! position=120;80;
//! size=1280;720;
//! maximized=false
//! ```
//!
//! Comments and blank lines are kept and written back untouched, and group/key
//! order survives a load/save cycle. Only the value types the application needs
//! are supported: integers, booleans and integer lists.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LIST_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("Failed to access key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Group [{0}] not found")]
    GroupNotFound(String),
    #[error("Key '{key}' not found in group [{group}]")]
    KeyNotFound { group: String, key: String },
    #[error("Value '{value}' of {group}.{key} is not a valid {expected}")]
    InvalidValue {
        group: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl KeyFileError {
    /// True when the error is an I/O error caused by a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type KeyFileResult<T> = Result<T, KeyFileError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// Comment and blank lines directly above the entry
    comments: Vec<String>,
    key: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    /// Comment and blank lines directly above the group header
    comments: Vec<String>,
    name: String,
    entries: Vec<Entry>,
    /// Comment and blank lines after the last entry
    trailing: Vec<String>,
}

impl Group {
    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// In-memory key file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    /// Lines above the first group
    header: Vec<String>,
    groups: Vec<Group>,
}

impl KeyFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse key file text.
    pub fn parse(text: &str) -> KeyFileResult<Self> {
        let mut key_file = Self::default();
        let mut pending: Vec<String> = Vec::new();
        let mut current: Option<usize> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim_start();

            if line.is_empty() || line.starts_with('#') {
                pending.push(raw.to_string());
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest
                    .trim_end()
                    .strip_suffix(']')
                    .ok_or_else(|| KeyFileError::parse(line_no, "unterminated group header"))?;
                if !is_valid_group_name(name) {
                    return Err(KeyFileError::parse(
                        line_no,
                        format!("invalid group name '{name}'"),
                    ));
                }

                if current.is_none() {
                    key_file.header = std::mem::take(&mut pending);
                }
                // A repeated group header reopens the existing group; comments
                // above it stay with the group they were written in
                current = Some(match key_file.position(name) {
                    Some(position) => {
                        if let Some(previous) = current {
                            key_file.groups[previous].trailing.append(&mut pending);
                        }
                        position
                    }
                    None => {
                        key_file.groups.push(Group {
                            comments: std::mem::take(&mut pending),
                            name: name.to_string(),
                            entries: Vec::new(),
                            trailing: Vec::new(),
                        });
                        key_file.groups.len() - 1
                    }
                });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(KeyFileError::parse(
                    line_no,
                    "expected 'key=value', a group header or a comment",
                ));
            };
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(KeyFileError::parse(line_no, format!("invalid key '{key}'")));
            }
            let Some(group_index) = current else {
                return Err(KeyFileError::parse(
                    line_no,
                    format!("key '{key}' appears before any group"),
                ));
            };

            let group = &mut key_file.groups[group_index];
            let comments = std::mem::take(&mut pending);
            let value = value.trim().to_string();
            match group.entries.iter_mut().find(|e| e.key == key) {
                Some(entry) => {
                    entry.value = value;
                    entry.comments.extend(comments);
                }
                None => group.entries.push(Entry {
                    comments,
                    key: key.to_string(),
                    value,
                }),
            }
        }

        match current {
            Some(index) => key_file.groups[index].trailing.append(&mut pending),
            None => key_file.header = pending,
        }
        Ok(key_file)
    }

    /// Read and parse a key file from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> KeyFileResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| KeyFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Write the key file to disk.
    ///
    /// The parent directory is created when missing. The text goes to a sibling
    /// temporary file first and is renamed over `path`, so a crash mid-write
    /// leaves the previous file intact.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> KeyFileResult<()> {
        let path = path.as_ref();
        let io_error = |source| KeyFileError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
        fs::write(&temp_path, self.to_string()).map_err(io_error)?;
        fs::rename(&temp_path, path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            io_error(source)
        })
    }

    /// Remove a key; returns whether it existed.
    pub fn remove_key(&mut self, group: &str, key: &str) -> bool {
        let Some(position) = self.position(group) else {
            return false;
        };
        let entries = &mut self.groups[position].entries;
        let before = entries.len();
        entries.retain(|e| e.key != key);
        entries.len() != before
    }

    /// Remove a whole group; returns whether it existed.
    pub fn remove_group(&mut self, group: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.name != group);
        self.groups.len() != before
    }

    #[cfg(test)]
    pub fn has_group(&self, group: &str) -> bool {
        self.position(group).is_some()
    }

    #[cfg(test)]
    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.position(group)
            .is_some_and(|position| self.groups[position].entry(key).is_some())
    }

    pub fn get_integer(&self, group: &str, key: &str) -> KeyFileResult<i32> {
        let raw = self.get_raw(group, key)?;
        parse_integer(raw).ok_or_else(|| invalid(group, key, raw, "integer"))
    }

    pub fn get_boolean(&self, group: &str, key: &str) -> KeyFileResult<bool> {
        let raw = self.get_raw(group, key)?;
        match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(group, key, raw, "boolean")),
        }
    }

    /// Read a `;` separated integer list. A trailing separator is accepted and
    /// an empty value is an empty list.
    pub fn get_integer_list(&self, group: &str, key: &str) -> KeyFileResult<Vec<i32>> {
        let raw = self.get_raw(group, key)?;
        let body = raw.strip_suffix(LIST_SEPARATOR).unwrap_or(raw);
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        body.split(LIST_SEPARATOR)
            .map(|item| parse_integer(item).ok_or_else(|| invalid(group, key, raw, "integer list")))
            .collect()
    }

    pub fn set_integer(&mut self, group: &str, key: &str, value: i32) {
        self.set_raw(group, key, value.to_string());
    }

    pub fn set_boolean(&mut self, group: &str, key: &str, value: bool) {
        self.set_raw(group, key, value.to_string());
    }

    pub fn set_integer_list(&mut self, group: &str, key: &str, values: &[i32]) {
        let value: String = values
            .iter()
            .map(|v| format!("{v}{LIST_SEPARATOR}"))
            .collect();
        self.set_raw(group, key, value);
    }

    fn position(&self, group: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == group)
    }

    fn get_raw(&self, group: &str, key: &str) -> KeyFileResult<&str> {
        self.groups
            .iter()
            .find(|g| g.name == group)
            .ok_or_else(|| KeyFileError::GroupNotFound(group.to_string()))?
            .entry(key)
            .map(|e| e.value.as_str())
            .ok_or_else(|| KeyFileError::KeyNotFound {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    fn set_raw(&mut self, group: &str, key: &str, value: String) {
        debug_assert!(is_valid_group_name(group), "invalid group name {group:?}");
        debug_assert!(is_valid_key(key), "invalid key {key:?}");

        let position = match self.position(group) {
            Some(position) => position,
            None => {
                // Keep a blank line between groups
                let comments = if self.groups.is_empty() {
                    Vec::new()
                } else {
                    vec![String::new()]
                };
                self.groups.push(Group {
                    comments,
                    name: group.to_string(),
                    entries: Vec::new(),
                    trailing: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        let entries = &mut self.groups[position].entries;
        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => entries.push(Entry {
                comments: Vec::new(),
                key: key.to_string(),
                value,
            }),
        }
    }
}

impl fmt::Display for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            writeln!(f, "{line}")?;
        }
        for group in &self.groups {
            for line in &group.comments {
                writeln!(f, "{line}")?;
            }
            writeln!(f, "[{}]", group.name)?;
            for entry in &group.entries {
                for line in &entry.comments {
                    writeln!(f, "{line}")?;
                }
                writeln!(f, "{}={}", entry.key, entry.value)?;
            }
            for line in &group.trailing {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

fn is_valid_group_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c == '[' || c == ']' || c.is_control())
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(|c| c == '=' || c.is_control())
}

fn parse_integer(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn invalid(group: &str, key: &str, value: &str, expected: &'static str) -> KeyFileError {
    KeyFileError::InvalidValue {
        group: group.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    const LAYOUT: &str = indoc! {"
        # Saved by tripane
        [window]
        position=120;80;
        size=1280;720;
        maximized=false

        [vertical_paned]
        # divider offset from the top
        position=520

        [horizontal_paned]
        position=640
    "};

    #[test]
    fn test_parse_reads_typed_values() {
        let key_file = KeyFile::parse(LAYOUT).unwrap();

        assert_eq!(
            key_file.get_integer_list("window", "position").unwrap(),
            vec![120, 80]
        );
        assert_eq!(
            key_file.get_integer_list("window", "size").unwrap(),
            vec![1280, 720]
        );
        assert!(!key_file.get_boolean("window", "maximized").unwrap());
        assert_eq!(key_file.get_integer("vertical_paned", "position").unwrap(), 520);
        assert_eq!(
            key_file.get_integer("horizontal_paned", "position").unwrap(),
            640
        );
    }

    #[test]
    fn test_round_trip_preserves_comments_and_order() {
        let key_file = KeyFile::parse(LAYOUT).unwrap();
        assert_eq!(key_file.to_string(), LAYOUT);
    }

    #[test]
    fn test_set_replaces_in_place_and_keeps_comments() {
        let mut key_file = KeyFile::parse(LAYOUT).unwrap();
        key_file.set_integer("vertical_paned", "position", 400);
        key_file.set_boolean("window", "maximized", true);

        let text = key_file.to_string();
        assert!(text.contains("# divider offset from the top\nposition=400\n"));
        assert!(text.contains("maximized=true\n"));
        assert!(text.starts_with("# Saved by tripane\n[window]\n"));
    }

    #[test]
    fn test_set_creates_groups_separated_by_blank_line() {
        let mut key_file = KeyFile::new();
        key_file.set_integer_list("window", "size", &[800, 600]);
        key_file.set_integer("horizontal_paned", "position", 300);

        assert_eq!(
            key_file.to_string(),
            "[window]\nsize=800;600;\n\n[horizontal_paned]\nposition=300\n"
        );
    }

    #[test]
    fn test_missing_group_and_key_are_distinct_errors() {
        let key_file = KeyFile::parse(LAYOUT).unwrap();

        assert!(matches!(
            key_file.get_integer("toolbar", "position"),
            Err(KeyFileError::GroupNotFound(group)) if group == "toolbar"
        ));
        assert!(matches!(
            key_file.get_integer("window", "zoom"),
            Err(KeyFileError::KeyNotFound { key, .. }) if key == "zoom"
        ));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let key_file = KeyFile::parse(indoc! {"
            [window]
            position=12;abc;
            maximized=yes
            size=99999999999
        "})
        .unwrap();

        assert!(matches!(
            key_file.get_integer_list("window", "position"),
            Err(KeyFileError::InvalidValue { expected: "integer list", .. })
        ));
        assert!(matches!(
            key_file.get_boolean("window", "maximized"),
            Err(KeyFileError::InvalidValue { expected: "boolean", .. })
        ));
        assert!(matches!(
            key_file.get_integer("window", "size"),
            Err(KeyFileError::InvalidValue { expected: "integer", .. })
        ));
    }

    #[test]
    fn test_integer_list_forms() {
        let key_file = KeyFile::parse(indoc! {"
            [lists]
            trailing=1;2;
            bare=-3;4
            spaced= 5 ; 6 ;
            empty=
        "})
        .unwrap();

        assert_eq!(key_file.get_integer_list("lists", "trailing").unwrap(), vec![1, 2]);
        assert_eq!(key_file.get_integer_list("lists", "bare").unwrap(), vec![-3, 4]);
        assert_eq!(key_file.get_integer_list("lists", "spaced").unwrap(), vec![5, 6]);
        assert!(key_file.get_integer_list("lists", "empty").unwrap().is_empty());
    }

    #[test]
    fn test_boolean_accepts_numeric_forms() {
        let key_file = KeyFile::parse("[flags]\na=1\nb=0\n").unwrap();
        assert!(key_file.get_boolean("flags", "a").unwrap());
        assert!(!key_file.get_boolean("flags", "b").unwrap());
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = KeyFile::parse("position=1\n").unwrap_err();
        assert!(matches!(err, KeyFileError::Parse { line: 1, .. }));

        let err = KeyFile::parse("[window]\nsize 1 2\n").unwrap_err();
        assert!(matches!(err, KeyFileError::Parse { line: 2, .. }));

        let err = KeyFile::parse("# header\n[window\n").unwrap_err();
        assert!(matches!(err, KeyFileError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_group_and_key_merge() {
        let key_file = KeyFile::parse(indoc! {"
            [window]
            size=1;2;
            [other]
            x=1
            [window]
            size=3;4;
            maximized=true
        "})
        .unwrap();

        assert_eq!(key_file.get_integer_list("window", "size").unwrap(), vec![3, 4]);
        assert_eq!(
            key_file.to_string(),
            "[window]\nsize=3;4;\nmaximized=true\n[other]\nx=1\n"
        );
    }

    #[test]
    fn test_trailing_comments_stay_in_their_group() {
        let mut key_file = KeyFile::parse("[a]\nx=1\n# about a\n").unwrap();
        key_file.set_integer("b", "y", 2);
        assert_eq!(key_file.to_string(), "[a]\nx=1\n# about a\n\n[b]\ny=2\n");
    }

    #[test]
    fn test_comments_above_reopened_group_stay_in_place() {
        let key_file = KeyFile::parse(indoc! {"
            [a]
            x=1
            [b]
            z=3
            # about a again
            [a]
            y=2
        "})
        .unwrap();
        assert_eq!(
            key_file.to_string(),
            "[a]\nx=1\ny=2\n[b]\nz=3\n# about a again\n"
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let key_file = KeyFile::parse("[window]\r\nmaximized=true\r\n").unwrap();
        assert!(key_file.get_boolean("window", "maximized").unwrap());
    }

    #[test]
    fn test_remove_key_and_group() {
        let mut key_file = KeyFile::parse(LAYOUT).unwrap();
        assert!(key_file.remove_key("window", "maximized"));
        assert!(!key_file.remove_key("window", "maximized"));
        assert!(matches!(
            key_file.get_boolean("window", "maximized"),
            Err(KeyFileError::KeyNotFound { .. })
        ));
        assert!(!key_file.remove_key("toolbar", "visible"));

        assert!(key_file.remove_group("horizontal_paned"));
        assert!(!key_file.remove_group("horizontal_paned"));
        assert!(matches!(
            key_file.get_integer("horizontal_paned", "position"),
            Err(KeyFileError::GroupNotFound(_))
        ));
        assert!(key_file
            .to_string()
            .ends_with("[vertical_paned]\n# divider offset from the top\nposition=520\n"));
    }

    #[test]
    fn test_save_and_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ui.ini");

        let mut key_file = KeyFile::parse(LAYOUT).unwrap();
        key_file.set_integer_list("window", "size", &[1024, 768]);
        key_file.save_to_file(&path).unwrap();

        let loaded = KeyFile::load_from_file(&path).unwrap();
        assert_eq!(loaded, key_file);
        assert_eq!(
            loaded.get_integer_list("window", "size").unwrap(),
            vec![1024, 768]
        );
        // No temporary file left behind
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = KeyFile::load_from_file(temp_dir.path().join("absent.ini")).unwrap_err();
        assert!(err.is_not_found());
    }
}
