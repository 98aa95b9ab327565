//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tl_core::SortOrder;

/// Fence info string that marks a time-log block.
pub const DEFAULT_BLOCK_LANGUAGE: &str = "time-log";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Info string of the fenced blocks to operate on.
    pub block_language: String,

    /// Default listing order for weeks and days.
    pub order: SortOrder,

    /// File locked for the duration of a read/modify/write cycle.
    pub lock_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = dirs_state_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            block_language: DEFAULT_BLOCK_LANGUAGE.to_string(),
            order: SortOrder::default(),
            lock_path: state_dir.join(".lock"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Sources merge in order: defaults, the user config file, `config_path`,
    /// then `TL_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}

/// Returns the platform-specific state directory for tl.
///
/// On Linux: `~/.local/state/tl`
pub fn dirs_state_path() -> Option<PathBuf> {
    dirs::state_dir().map(|p| p.join("tl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.block_language, "time-log");
        assert_eq!(config.order, SortOrder::Descending);
        assert_eq!(config.lock_path.file_name().unwrap(), ".lock");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "block_language = \"hours\"\norder = \"ascending\"\nlock_path = \"/tmp/tl.lock\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.block_language, "hours");
        assert_eq!(config.order, SortOrder::Ascending);
        assert_eq!(config.lock_path, PathBuf::from("/tmp/tl.lock"));
    }

    #[test]
    fn test_missing_explicit_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.block_language, DEFAULT_BLOCK_LANGUAGE);
    }

    #[test]
    fn test_dirs_state_path_ends_with_tl() {
        if let Some(path) = dirs_state_path() {
            assert_eq!(path.file_name().unwrap(), "tl");
        }
    }
}
