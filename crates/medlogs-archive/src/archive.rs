use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ArchiveConfig;
use crate::error::ArchiveError;

lazy_static! {
    static ref FILENAME_TIMESTAMP: Regex =
        Regex::new(r"(\d{4}.*)-\d\d\.\d\d\.json$").expect("valid file name pattern");
}

/// An export moved from the downloads directory into storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub source: PathBuf,
    pub backup: PathBuf,
}

/// Local timestamp encoded in an export or backup file name, e.g.
/// `tergar-meditation-logs-2022-03-21T10.15.30-07.00.json`.
pub fn timestamp_from_filename(path: &Path) -> Option<NaiveDateTime> {
    let name = path.file_name()?.to_str()?;
    let stamp = FILENAME_TIMESTAMP.captures(name)?.get(1)?.as_str();
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H.%M.%S").ok()
}

/// File operations over the configured download and storage directories.
pub struct LogArchive {
    config: ArchiveConfig,
}

impl LogArchive {
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Move every downloaded export into the storage directory.
    pub fn move_downloads(&self) -> Result<Vec<MovedFile>, ArchiveError> {
        let downloads = self.list(&self.config.download_dir, &self.export_prefix())?;
        if downloads.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.config.storage_dir)
            .map_err(ArchiveError::io("create", &self.config.storage_dir))?;

        let mut moved = Vec::with_capacity(downloads.len());
        for from in downloads {
            let Some(name) = from.file_name() else {
                continue;
            };
            let to = self.config.storage_dir.join(name);
            fs::rename(&from, &to).map_err(ArchiveError::io("move", &from))?;
            tracing::info!(from = %from.display(), to = %to.display(), "Moved downloaded log");
            moved.push(MovedFile { from, to });
        }
        Ok(moved)
    }

    /// Stored exports, oldest first.
    pub fn stored_files(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        self.list(&self.config.storage_dir, &self.export_prefix())
    }

    /// Backup copies, oldest first.
    pub fn backup_files(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        self.list(
            &self.config.storage_dir,
            &format!("{}-", self.config.backup_prefix()),
        )
    }

    /// The newest stored export.
    pub fn latest(&self) -> Result<Option<PathBuf>, ArchiveError> {
        Ok(self.stored_files()?.pop())
    }

    /// Delete all but the `keep_files` newest exports. Returns how many were removed.
    pub fn prune(&self) -> Result<usize, ArchiveError> {
        let stored = self.stored_files()?;
        let excess = stored.len().saturating_sub(self.config.keep_files);

        for path in &stored[..excess] {
            fs::remove_file(path).map_err(ArchiveError::io("remove", path))?;
            tracing::debug!(path = %path.display(), "Removed old log");
        }
        Ok(excess)
    }

    /// Copy the newest export to a backup name when the newest backup is at
    /// least `backup_after` old, or when there is no backup yet.
    pub fn backup_if_due(&self, now: NaiveDateTime) -> Result<Option<Backup>, ArchiveError> {
        let Some(source) = self.latest()? else {
            return Ok(None);
        };

        if let Some(last_backup) = self.backup_files()?.pop() {
            let taken = timestamp_from_filename(&last_backup)
                .ok_or_else(|| ArchiveError::UnrecognisedName(last_backup.clone()))?;
            let age = now.signed_duration_since(taken);
            if age.to_std().map_or(true, |age| age < self.config.backup_after) {
                return Ok(None);
            }
        }

        let backup = self.backup_path(&source);
        fs::copy(&source, &backup).map_err(ArchiveError::io("copy", &source))?;
        tracing::info!(backup = %backup.display(), "Backed up meditation log");
        Ok(Some(Backup { source, backup }))
    }

    fn export_prefix(&self) -> String {
        format!("{}-20", self.config.file_prefix)
    }

    fn backup_path(&self, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .replacen(&self.config.file_prefix, &self.config.backup_prefix(), 1);
        source.with_file_name(name)
    }

    /// `*.json` files in `dir` whose name starts with `prefix`, sorted by name.
    fn list(&self, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, ArchiveError> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(ArchiveError::io("read", dir))? {
            let path = entry.map_err(ArchiveError::io("read", dir))?.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            };
            if name.starts_with(prefix) && name.ends_with(".json") && path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_timestamp_from_export_and_backup_names() {
        let stamp = timestamp_from_filename(Path::new(
            "/data/tergar-meditation-logs-backup-2022-03-21T10.15.30-07.00.json",
        ))
        .unwrap();
        assert_eq!(stamp.to_string(), "2022-03-21 10:15:30");
    }

    #[test]
    fn rejects_names_without_timestamp() {
        assert!(timestamp_from_filename(Path::new("tergar-meditation-logs-backup.json")).is_none());
    }
}
