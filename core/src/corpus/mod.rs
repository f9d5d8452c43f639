//! Loading of split files and report corpora
//!
//! A report corpus comes in one of two shapes:
//! - a pre-sectioned CSV (optionally gzip-compressed), see [`SectionedReports`]
//! - a ZIP archive of free-text reports, see [`ArchiveReports`]
//!
//! Both resolve identifier pairs to [`ReportRecord`]s through [`ReportSource`].

mod archive;
mod sectioned;
mod split_file;

pub use archive::{extract_record, ArchiveReports};
pub use sectioned::{SectionedReports, SectionedRow};
pub use split_file::{read_split_csv, read_split_file};

use crate::error::Result;
use crate::extraction::SectionParser;
use crate::types::{CorpusFormat, ReportRecord, StudyKey};
use std::path::Path;

/// Resolves identifier pairs to dataset records
pub trait ReportSource {
    /// Returns the record of a study
    ///
    /// # Errors
    ///
    /// Returns [`crate::RadsumError::ReportNotFound`] when the study is unknown.
    fn record(&self, key: &StudyKey) -> Result<ReportRecord>;

    /// Number of loaded reports
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded report corpus of either shape
#[derive(Debug, Clone)]
pub enum ReportCorpus {
    Sectioned(SectionedReports),
    Archive(ArchiveReports),
}

impl ReportCorpus {
    /// Loads a corpus, choosing the loader from the file extension
    ///
    /// `keys` and `parser` are only used for archives, where reports are
    /// extracted on demand.
    pub fn load<'k, P>(
        path: &Path,
        keys: impl IntoIterator<Item = &'k StudyKey>,
        parser: &P,
    ) -> Result<Self>
    where
        P: SectionParser + ?Sized,
    {
        match CorpusFormat::from_path(path)? {
            CorpusFormat::Csv | CorpusFormat::GzipCsv => {
                Ok(ReportCorpus::Sectioned(SectionedReports::from_path(path)?))
            }
            CorpusFormat::Archive => Ok(ReportCorpus::Archive(ArchiveReports::load(
                path, keys, parser,
            )?)),
        }
    }

    /// Returns the format this corpus was loaded from
    pub fn format_name(&self) -> &'static str {
        match self {
            ReportCorpus::Sectioned(_) => "sectioned csv",
            ReportCorpus::Archive(_) => "report archive",
        }
    }
}

impl ReportSource for ReportCorpus {
    fn record(&self, key: &StudyKey) -> Result<ReportRecord> {
        match self {
            ReportCorpus::Sectioned(reports) => reports.record(key),
            ReportCorpus::Archive(reports) => reports.record(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            ReportCorpus::Sectioned(reports) => reports.len(),
            ReportCorpus::Archive(reports) => reports.len(),
        }
    }
}
