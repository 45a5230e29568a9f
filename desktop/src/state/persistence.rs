use std::path::{Path, PathBuf};

use crate::keyfile::{KeyFile, KeyFileResult};

use super::LayoutState;

/// The on-disk layout file (`ui.ini`).
///
/// Unrelated groups, keys and comments found in the file are kept and written
/// back on save; only the layout keys are touched.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFile {
    path: PathBuf,
    key_file: KeyFile,
}

impl LayoutFile {
    /// Get the default layout file path (ui.ini in local data directory)
    pub fn default_path() -> PathBuf {
        const FILENAME: &str = "ui.ini";
        if let Some(mut path) = dirs::data_local_dir() {
            path.push("tripane");
            path.push(FILENAME);
            return path;
        }

        // Fallback to home directory
        if let Some(mut path) = dirs::home_dir() {
            path.push(".tripane");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    /// Load the layout file, falling back to an empty one.
    ///
    /// A missing file is the normal first-run case. A broken file is logged
    /// and replaced on the next save rather than keeping the app from starting.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key_file = match KeyFile::load_from_file(&path) {
            Ok(key_file) => {
                tracing::debug!(path = %path.display(), "Loaded layout file");
                key_file
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "No layout file yet, using defaults");
                KeyFile::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load layout file, using defaults");
                KeyFile::new()
            }
        };
        Self { path, key_file }
    }

    /// Forget the stored layout, keeping unrelated content for the next save
    pub fn reset(&mut self) {
        tracing::debug!(path = %self.path.display(), "Clearing stored layout");
        LayoutState::clear(&mut self.key_file);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> LayoutState {
        LayoutState::from_key_file(&self.key_file)
    }

    pub fn store(&mut self, layout: &LayoutState) {
        layout.write_to(&mut self.key_file);
    }

    /// Write the file to disk
    pub fn save(&self) -> KeyFileResult<()> {
        tracing::debug!(path = %self.path.display(), "Saving layout file");
        self.key_file.save_to_file(&self.path)
    }

    /// Store `layout` and write the file, logging failures.
    ///
    /// Returns whether the file was written.
    pub fn store_and_save(&mut self, layout: &LayoutState) -> bool {
        self.store(layout);
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(path = %self.path.display(), %e, "Failed to save layout file");
                false
            }
        }
    }
}
