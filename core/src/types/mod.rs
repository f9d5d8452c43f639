//! Core type definitions for report dataset building
//!
//! This module provides the fundamental types used throughout the radsum library:
//! - [`Split`]: Requestable dataset partitions (train, dev, test)
//! - [`CorpusFormat`]: Report corpus format detected from the file name
//! - [`StudyKey`]: Study/subject identifier pair of one report
//! - [`ReportRecord`]: One dataset example as written to JSON
//! - [`SplitAssignment`]: Split name to identifier pairs, read from a split file
//! - [`ExportConfig`]: Output files requested for a run

mod assignment;
mod config;
mod enums;
mod record;

pub use assignment::SplitAssignment;
pub use config::ExportConfig;
pub use enums::{CorpusFormat, Split, ALL_SPLITS};
pub use record::{ReportRecord, StudyKey};
