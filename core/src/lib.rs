pub mod api;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod extraction;
pub mod types;
pub mod writer;

pub use api::{BuildSummary, DatasetBuilder, OutputSummary};
pub use cli::report::TextReport;
pub use corpus::{ArchiveReports, ReportCorpus, ReportSource, SectionedReports};
pub use error::{RadsumError, Result};
pub use types::*;
pub use writer::{write_split, WriteOutcome};
