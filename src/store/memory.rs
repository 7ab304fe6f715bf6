use crate::engine::models::Statistics;
use crate::store::{SettingsStore, StoreError, StoredSettings};

/// In-process store. Lives as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: StoredSettings,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: StoredSettings) -> Self {
        Self { settings, saves: 0 }
    }

    pub fn settings(&self) -> StoredSettings {
        self.settings
    }

    /// Number of successful save calls, counters and theme combined.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemoryStore {
    fn load_counters(&self) -> Result<Statistics, StoreError> {
        Ok(self.settings.counters)
    }

    fn save_counters(&mut self, stats: &Statistics) -> Result<(), StoreError> {
        self.settings.counters = *stats;
        self.saves += 1;
        Ok(())
    }

    fn load_theme_preference(&self) -> Result<bool, StoreError> {
        Ok(self.settings.dark_theme)
    }

    fn save_theme_preference(&mut self, dark: bool) -> Result<(), StoreError> {
        self.settings.dark_theme = dark;
        self.saves += 1;
        Ok(())
    }
}
