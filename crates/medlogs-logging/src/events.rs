use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// Structured events for log file housekeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    /// A freshly downloaded export was moved into storage
    FileMoved { from: PathBuf, to: PathBuf },
    /// Older exports were deleted, keeping the newest `kept`
    FilesPruned { removed: usize, kept: usize },
    BackupCreated {
        source: PathBuf,
        backup: PathBuf,
        interval_days: u64,
    },
    LogSelected { path: PathBuf },
    NoLogFound {
        storage_dir: PathBuf,
        download_dir: PathBuf,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Writes housekeeping events to stderr so stdout stays reserved for reports.
pub struct Logger {
    format: LogFormat,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    pub fn log(&self, event: &LogEvent) {
        let _ = writeln!(std::io::stderr(), "{}", self.render(event));
    }

    /// Render an event as a single line (pretty output may span several).
    pub fn render(&self, event: &LogEvent) -> String {
        match self.format {
            LogFormat::Json => event.with_timestamp().to_string(),
            LogFormat::Pretty => Self::render_pretty(event),
            LogFormat::Compact => Self::render_compact(event),
        }
    }

    fn render_pretty(event: &LogEvent) -> String {
        match event {
            LogEvent::FileMoved { from, to } => format!(
                "{} moving file from {} to {}",
                "→".bright_blue(),
                from.display(),
                to.display()
            ),
            LogEvent::FilesPruned { removed, kept } => format!(
                "{} removed old files: {} (kept {})",
                "✗".bright_yellow(),
                removed,
                kept
            ),
            LogEvent::BackupCreated {
                source,
                backup,
                interval_days,
            } => format!(
                "{} last backup older than {} days, backing up:\n{} ->\n{}\n",
                "⚠".bright_yellow(),
                interval_days,
                source.display(),
                backup.display()
            ),
            LogEvent::LogSelected { path } => {
                format!("{} {}\n", "meditation log file:".dimmed(), path.display())
            }
            LogEvent::NoLogFound {
                storage_dir,
                download_dir,
            } => format!(
                "{} No downloaded meditation logs in {} or {}",
                "✗".bright_red(),
                storage_dir.display(),
                download_dir.display()
            ),
        }
    }

    fn render_compact(event: &LogEvent) -> String {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        match event {
            LogEvent::FileMoved { to, .. } => format!("[{}] file:moved {}", timestamp, to.display()),
            LogEvent::FilesPruned { removed, .. } => {
                format!("[{}] file:pruned {}", timestamp, removed)
            }
            LogEvent::BackupCreated { backup, .. } => {
                format!("[{}] backup:created {}", timestamp, backup.display())
            }
            LogEvent::LogSelected { path } => {
                format!("[{}] log:selected {}", timestamp, path.display())
            }
            LogEvent::NoLogFound { .. } => format!("[{}] log:none", timestamp),
        }
    }
}
