//! Configuration file support for medlogs.
//!
//! Loads `medlogs.toml` from `--config` or the platform config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use medlogs_archive::ArchiveConfig;

/// User configuration loaded from `medlogs.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory the browser extension downloads exports into
    pub download_dir: Option<PathBuf>,
    /// Directory exports and backups are kept in
    pub storage_dir: Option<PathBuf>,
    /// File name prefix of exports
    pub file_prefix: Option<String>,
    /// Number of newest exports kept in storage
    pub keep_files: Option<usize>,
    /// Backup interval, e.g. "30days"
    #[serde(default, with = "humantime_serde")]
    pub backup_after: Option<Duration>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "medlogs.toml";

impl Config {
    /// `None` when there is no file at `path`. A file that exists but does
    /// not parse is an error, never silently ignored.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text)
            .map(Some)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// `<config dir>/medlogs/medlogs.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("medlogs").join(CONFIG_FILE_NAME))
    }

    /// Archive settings with unset keys taken from [`ArchiveConfig::default`].
    pub fn archive_config(&self) -> ArchiveConfig {
        let defaults = ArchiveConfig::default();
        ArchiveConfig {
            download_dir: self.download_dir.clone().unwrap_or(defaults.download_dir),
            storage_dir: self.storage_dir.clone().unwrap_or(defaults.storage_dir),
            file_prefix: self.file_prefix.clone().unwrap_or(defaults.file_prefix),
            keep_files: self.keep_files.unwrap_or(defaults.keep_files),
            backup_after: self.backup_after.unwrap_or(defaults.backup_after),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap(), None);
    }

    #[test]
    fn parses_all_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
download_dir = "/home/me/Downloads"
storage_dir = "/home/me/Dropbox/data/tergar"
keep_files = 3
backup_after = "14days"
log_level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap().unwrap();
        let archive = config.archive_config();
        assert_eq!(archive.download_dir, PathBuf::from("/home/me/Downloads"));
        assert_eq!(archive.storage_dir, PathBuf::from("/home/me/Dropbox/data/tergar"));
        assert_eq!(archive.keep_files, 3);
        assert_eq!(archive.backup_after, Duration::from_secs(14 * 24 * 60 * 60));
        assert_eq!(archive.file_prefix, "tergar-meditation-logs");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn unset_keys_use_defaults() {
        let archive = Config::default().archive_config();
        assert_eq!(archive.keep_files, 2);
        assert_eq!(archive.backup_after, Duration::from_secs(30 * 24 * 60 * 60));
        assert_eq!(Config::default().log_level(), "warn");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "backup_days = 30\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
