use thiserror::Error;

/// Result type for radsum operations
pub type Result<T> = std::result::Result<T, RadsumError>;

/// Error types for radsum operations
///
/// Every variant is terminal for a run: nothing is retried and no partial
/// output is kept.
#[derive(Error, Debug)]
pub enum RadsumError {
    /// Invalid run configuration (e.g. no output file requested)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input file with an unrecognized extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Identifier pair without a matching report
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// Report text without a required section
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Malformed or unreadable ZIP archive
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// Report bytes that are not valid UTF-8
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<csv::Error> for RadsumError {
    fn from(e: csv::Error) -> Self {
        RadsumError::CsvError(format!("{}", e))
    }
}

impl From<zip::result::ZipError> for RadsumError {
    fn from(e: zip::result::ZipError) -> Self {
        RadsumError::ArchiveError(format!("{}", e))
    }
}

impl From<serde_json::Error> for RadsumError {
    fn from(e: serde_json::Error) -> Self {
        RadsumError::JsonError(format!("{}", e))
    }
}

impl From<std::string::FromUtf8Error> for RadsumError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        RadsumError::DecodeError(format!("{}", e))
    }
}
