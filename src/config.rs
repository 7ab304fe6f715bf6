//! Front-end configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::models::Mode;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// JSON statistics file. None keeps statistics in memory only.
    pub store_path: Option<PathBuf>,
    pub mode: Mode,
    /// Seed for the bot RNG. None draws from OS entropy.
    pub bot_seed: Option<u64>,
}

/// Load config from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try well-known paths, returning defaults if none is found or loadable.
pub fn load_default_config() -> EngineConfig {
    let candidates = ["tictac.toml", "../tictac.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load config");
                }
            }
        }
    }
    tracing::info!("no tictac.toml found, using built-in defaults");
    EngineConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tictac.toml");
        std::fs::write(
            &path,
            "store_path = \"/tmp/stats.json\"\nmode = \"human_vs_bot\"\nbot_seed = 42\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/stats.json")));
        assert_eq!(config.mode, Mode::HumanVsBot);
        assert_eq!(config.bot_seed, Some(42));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.mode, Mode::HumanVsHuman);
    }

    #[test]
    fn test_bad_mode_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tictac.toml");
        std::fs::write(&path, "mode = \"bot_vs_bot\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.contains("Failed to parse"), "{}", err);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_config(Path::new("/nonexistent/tictac.toml")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }
}
