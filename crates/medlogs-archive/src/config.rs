use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FILE_PREFIX: &str = "tergar-meditation-logs";

/// Where exports arrive, where they are kept, and how they are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    pub download_dir: PathBuf,
    pub storage_dir: PathBuf,
    pub file_prefix: String,
    /// Number of newest exports `prune` keeps.
    pub keep_files: usize,
    /// Minimum age of the newest backup before another is taken.
    pub backup_after: Duration,
}

impl ArchiveConfig {
    pub fn new(download_dir: PathBuf, storage_dir: PathBuf) -> Self {
        Self {
            download_dir,
            storage_dir,
            ..Self::default()
        }
    }

    /// Prefix of backup copies, e.g. `tergar-meditation-logs-backup`.
    pub fn backup_prefix(&self) -> String {
        format!("{}-backup", self.file_prefix)
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        let download_dir = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."));
        let storage_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medlogs");

        Self {
            download_dir,
            storage_dir,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            keep_files: 2,
            backup_after: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}
