use crate::error::{RadsumError, Result};
use std::fmt;
use std::path::Path;

/// Dataset partition that can be requested as an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Split {
    Train,
    Dev,
    Test,
}

/// All requestable splits, in the order they are written
pub const ALL_SPLITS: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

impl Split {
    /// Returns the name used for this split in the split file
    pub fn simple_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// On-disk format of the report corpus, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// Pre-sectioned CSV
    Csv,
    /// Gzip-compressed pre-sectioned CSV
    GzipCsv,
    /// ZIP archive of free-text reports
    Archive,
}

impl CorpusFormat {
    /// Detects the corpus format from a file name
    ///
    /// # Errors
    ///
    /// Returns [`RadsumError::UnsupportedFormat`] for anything other than
    /// `.csv`, `.csv.gz` or `.zip`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".csv.gz") {
            Ok(CorpusFormat::GzipCsv)
        } else if name.ends_with(".csv") {
            Ok(CorpusFormat::Csv)
        } else if name.ends_with(".zip") {
            Ok(CorpusFormat::Archive)
        } else {
            Err(RadsumError::UnsupportedFormat(format!(
                "report corpus must be a .csv, .csv.gz or .zip file, but found: {}",
                path.display()
            )))
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            CorpusFormat::Csv => "csv",
            CorpusFormat::GzipCsv => "csv.gz",
            CorpusFormat::Archive => "zip",
        }
    }
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
