//! Persisted display preferences.
//!
//! A small JSON file holding the preferred on-screen tile size, independent
//! of the tile lists. Lives in the platform config directory by default.

use crate::config::{APP_DIR_NAME, PREFERENCES_FILE};
use crate::error::{Result, StoreError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Preferred on-screen tile dimensions, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferredSize {
    #[serde(rename = "imageWidth")]
    pub width: f64,
    #[serde(rename = "imageHeight")]
    pub height: f64,
}

/// Handle to the process-wide preferences file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    /// Opens the preferences file at the platform default location:
    ///
    /// - Linux: `~/.config/ar-tile-store/preferences.json`
    /// - macOS: `~/Library/Application Support/ar-tile-store/preferences.json`
    /// - Windows: `%APPDATA%\ar-tile-store\preferences.json`
    pub fn open_default() -> Self {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR_NAME);
        path.push(PREFERENCES_FILE);
        Self { path }
    }

    /// Opens the preferences file at an explicit location.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored preferred tile size, or `None` when no size has
    /// been saved yet. Read failures are logged and reported as `None`.
    pub fn preferred_size(&self) -> Option<PreferredSize> {
        match self.read() {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Failed to read preferences: {}", e);
                None
            }
        }
    }

    fn read(&self) -> Result<Option<PreferredSize>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data =
            fs::read_to_string(&self.path).map_err(|e| StoreError::Preferences(e.to_string()))?;
        let size = serde_json::from_str(&data)?;
        Ok(Some(size))
    }

    /// Stores the preferred tile size, creating the parent directory if
    /// needed.
    pub fn set_preferred_size(&self, width: f64, height: f64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Preferences(e.to_string()))?;
        }
        let size = PreferredSize { width, height };
        let data = serde_json::to_string_pretty(&size)?;
        fs::write(&self.path, data).map_err(|e| StoreError::Preferences(e.to_string()))?;
        debug!("Saved preferred tile size {}x{}", width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::with_path(dir.path().join("preferences.json"));
        assert_eq!(prefs.preferred_size(), None);
    }

    #[test]
    fn preferred_size_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::with_path(dir.path().join("preferences.json"));

        prefs.set_preferred_size(120.0, 90.5).unwrap();
        assert_eq!(
            prefs.preferred_size(),
            Some(PreferredSize {
                width: 120.0,
                height: 90.5,
            })
        );
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::with_path(dir.path().join("nested/prefs.json"));
        prefs.set_preferred_size(1.0, 2.0).unwrap();
        assert!(prefs.path().exists());
    }

    #[test]
    fn json_uses_external_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::with_path(dir.path().join("preferences.json"));
        prefs.set_preferred_size(64.0, 48.0).unwrap();

        let raw = std::fs::read_to_string(prefs.path()).unwrap();
        assert!(raw.contains("\"imageWidth\""));
        assert!(raw.contains("\"imageHeight\""));
    }

    #[test]
    fn rewrite_overwrites_previous_size() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::with_path(dir.path().join("preferences.json"));
        prefs.set_preferred_size(10.0, 10.0).unwrap();
        prefs.set_preferred_size(20.0, 30.0).unwrap();

        let size = prefs.preferred_size().unwrap();
        assert_eq!(size.width, 20.0);
        assert_eq!(size.height, 30.0);
    }
}
