//! JSON document store on the local filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::engine::models::Statistics;
use crate::store::{SettingsStore, StoreError, StoredSettings};

/// Persists [`StoredSettings`] as a single JSON file.
///
/// Every save re-reads the document, updates one key and rewrites the whole
/// file through a sibling temp file + rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file is an empty document.
    pub fn read(&self) -> Result<StoredSettings, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSettings::default()),
            Err(e) => return Err(self.io_err(e)),
        };
        if content.trim().is_empty() {
            return Ok(StoredSettings::default());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, settings: &StoredSettings) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let json = serde_json::to_string_pretty(settings).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        tracing::debug!(path = %self.path.display(), "store written");
        Ok(())
    }

    /// A document that no longer parses is replaced, not preserved.
    fn update(&self, apply: impl FnOnce(&mut StoredSettings)) -> Result<(), StoreError> {
        let mut settings = match self.read() {
            Ok(s) => s,
            Err(e @ StoreError::Parse { .. }) => {
                tracing::warn!(error = %e, "overwriting unreadable store document");
                StoredSettings::default()
            }
            Err(e) => return Err(e),
        };
        apply(&mut settings);
        self.write(&settings)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl SettingsStore for FileStore {
    fn load_counters(&self) -> Result<Statistics, StoreError> {
        Ok(self.read()?.counters)
    }

    fn save_counters(&mut self, stats: &Statistics) -> Result<(), StoreError> {
        self.update(|s| s.counters = *stats)
    }

    fn load_theme_preference(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.dark_theme)
    }

    fn save_theme_preference(&mut self, dark: bool) -> Result<(), StoreError> {
        self.update(|s| s.dark_theme = dark)
    }
}
