//! Statistics & settings persistence.
//!
//! The session reads counters and the theme flag once at startup and writes
//! them back after every change. Stores only need read-then-write semantics:
//! there is a single session per process.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::engine::models::Statistics;

/// Durable key-value collaborator injected into the game session.
pub trait SettingsStore {
    fn load_counters(&self) -> Result<Statistics, StoreError>;
    fn save_counters(&mut self, stats: &Statistics) -> Result<(), StoreError>;
    fn load_theme_preference(&self) -> Result<bool, StoreError>;
    fn save_theme_preference(&mut self, dark: bool) -> Result<(), StoreError>;
}

/// The whole persisted document: the `GameStats` counters group and the
/// `isDarkTheme` flag. Absent keys read as zero/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(rename = "GameStats", default)]
    pub counters: Statistics,
    #[serde(rename = "isDarkTheme", default)]
    pub dark_theme: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_fixed_keys() {
        let doc = StoredSettings {
            counters: Statistics { x_wins: 2, o_wins: 0, draws: 1 },
            dark_theme: true,
        };
        let json = serde_json::to_value(doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "GameStats": {"XWins": 2, "OWins": 0, "Draws": 1},
                "isDarkTheme": true,
            })
        );
    }

    #[test]
    fn test_missing_keys_default() {
        let doc: StoredSettings = serde_json::from_str(r#"{"GameStats": {"OWins": 4}}"#).unwrap();
        assert_eq!(doc.counters, Statistics { x_wins: 0, o_wins: 4, draws: 0 });
        assert!(!doc.dark_theme);
    }
}
