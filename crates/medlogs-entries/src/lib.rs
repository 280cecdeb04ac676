//! # medlogs-entries
//!
//! Loads exported meditation session logs, sorts them, and classifies every
//! session into a fixed set of named, possibly overlapping buckets.
//!
//! ## Key Types
//!
//! - [`EntryStore`] - Immutable, chronologically sorted sessions plus their buckets
//! - [`SessionEntry`] - One logged session
//! - [`Aggregate`] - Session count and total elapsed seconds
//! - [`SearchQuery`] - Regex search over notes, optionally scoped and date-limited
//! - [`Reports`] - The standard summary tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medlogs_entries::{EntryStore, SearchQuery};
//!
//! let store = EntryStore::open(&path)?;
//! let jol3 = store.aggregate("jol3")?;
//! let hits = store.search(&SearchQuery::new("insight").in_bucket("fully-being-v2"))?;
//! ```
//!
//! Buckets are derived once, eagerly, from the table in [`taxonomy`].

mod aggregate;
mod buckets;
mod date_range;
mod duration;
mod error;
mod parser;
mod report;
mod search;
mod store;
pub mod taxonomy;
mod types;

pub use aggregate::Aggregate;
pub use buckets::{Bucket, Buckets, Section};
pub use date_range::DateRange;
pub use duration::{format_duration, hours_minutes_seconds};
pub use error::{DateRangeError, LoadError, QueryError};
pub use parser::{load_entries, parse_entries};
pub use report::{Report, ReportRow, Reports};
pub use search::SearchQuery;
pub use store::EntryStore;
pub use types::{Course, SessionEntry};
