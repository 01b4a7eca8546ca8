//! Storage utilities for the topside console
//!
//! Handles the preference store, the config directory and the error type
//! shared by everything that touches disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Directory name used under the platform config root.
pub const APP_NAME: &str = "topside";

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no `paths.cam` section in {0}")]
    MissingCamPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Keys the console keeps in its preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Name of the selected UI theme.
    GuiTheme,
    /// Last saved camera stream address.
    StreamIp,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::GuiTheme => "gui-theme",
            PreferenceKey::StreamIp => "stream-ip",
        }
    }
}

/// String key/value store that survives restarts.
pub trait PreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<String>;
    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<()>;
}

/// Preference store backed by a pretty-printed JSON object on disk.
///
/// Every `set` rewrites the file. A missing file is an empty store; an
/// unreadable one is logged and treated as empty so the form still opens.
#[derive(Debug)]
pub struct JsonPreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferences {
    /// Open (or start) the store in `dir`.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(PREFERENCES_FILE);
        let values = match Self::load(&path) {
            Ok(values) => values,
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<()> {
        self.values.insert(key.as_str().to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store, for tests and for running without a writable config dir.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<&'static str, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: PreferenceKey, value: &str) -> Self {
        self.values.insert(key.as_str(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<()> {
        self.values.insert(key.as_str(), value.to_string());
        Ok(())
    }
}

/// Get the config directory for an app
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("org", "rov", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonPreferences::open(dir.path());
        assert_eq!(prefs.get(PreferenceKey::GuiTheme), None);
        assert_eq!(prefs.get(PreferenceKey::StreamIp), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = JsonPreferences::open(dir.path());
        prefs.set(PreferenceKey::GuiTheme, "ocean").unwrap();
        prefs.set(PreferenceKey::StreamIp, "192.168.1.50").unwrap();

        let reopened = JsonPreferences::open(dir.path());
        assert_eq!(reopened.get(PreferenceKey::GuiTheme).as_deref(), Some("ocean"));
        assert_eq!(reopened.get(PreferenceKey::StreamIp).as_deref(), Some("192.168.1.50"));

        let raw = std::fs::read_to_string(reopened.path()).unwrap();
        assert!(raw.contains("\"gui-theme\""));
        assert!(raw.contains("\"stream-ip\""));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut prefs = JsonPreferences::open(&nested);
        prefs.set(PreferenceKey::StreamIp, "10.0.0.2").unwrap();
        assert!(nested.join(PREFERENCES_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE), "{ not json").unwrap();
        let mut prefs = JsonPreferences::open(dir.path());
        assert_eq!(prefs.get(PreferenceKey::GuiTheme), None);
        prefs.set(PreferenceKey::GuiTheme, "dark").unwrap();
        let reopened = JsonPreferences::open(dir.path());
        assert_eq!(reopened.get(PreferenceKey::GuiTheme).as_deref(), Some("dark"));
    }

    #[test]
    fn test_memory_store() {
        let mut prefs = MemoryPreferences::new().with(PreferenceKey::StreamIp, "1.2.3.4");
        assert_eq!(prefs.get(PreferenceKey::StreamIp).as_deref(), Some("1.2.3.4"));
        prefs.set(PreferenceKey::StreamIp, "").unwrap();
        assert_eq!(prefs.get(PreferenceKey::StreamIp).as_deref(), Some(""));
    }
}
