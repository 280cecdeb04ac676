//! # medlogs-archive
//!
//! Keeps exported meditation logs organised on disk.
//!
//! ## Overview
//!
//! The app's browser extension drops exports named
//! `tergar-meditation-logs-<timestamp>.json` into the downloads directory.
//! [`LogArchive`] moves them into a storage directory, prunes old exports,
//! and periodically copies the newest one to a `-backup-` name. File names
//! sort chronologically, so "newest" means "last by name".
//!
//! ## Key Types
//!
//! - [`LogArchive`] - File operations over the configured directories
//! - [`ArchiveConfig`] - Directories, file prefix, retention and backup interval
//! - [`ArchiveError`] - I/O and file name errors

mod archive;
mod config;
mod error;

pub use archive::{timestamp_from_filename, Backup, LogArchive, MovedFile};
pub use config::ArchiveConfig;
pub use error::ArchiveError;
