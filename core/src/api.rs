use crate::corpus::{read_split_file, ReportCorpus, ReportSource};
use crate::error::Result;
use crate::extraction::{MimicSectionParser, SectionParser};
use crate::types::{CorpusFormat, ExportConfig, Split, SplitAssignment};
use crate::writer::{write_split, WriteOutcome};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Builds summarization datasets from a report corpus and a split file
///
/// Runs the whole pipeline: read the split file, load the corpus (format
/// chosen by extension), then write each requested split in train, dev,
/// test order.
///
/// # Example
///
/// ```no_run
/// use radsum_core::{DatasetBuilder, ExportConfig, Split};
/// use std::path::Path;
///
/// let config = ExportConfig::default()
///     .with_output(Split::Train, "train.json")
///     .with_output(Split::Dev, "dev.json");
///
/// let summary = DatasetBuilder::new()
///     .build(
///         Path::new("mimic_cxr_sectioned.csv.gz"),
///         Path::new("mimic_split.csv"),
///         &config,
///     )
///     .unwrap();
///
/// println!("{} rows in the split file", summary.assignment.total());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder<P = MimicSectionParser> {
    parser: P,
}

impl DatasetBuilder {
    /// Creates a builder using the MIMIC-CXR section parser
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SectionParser> DatasetBuilder<P> {
    /// Replaces the section parser used for report archives
    pub fn with_parser<Q: SectionParser>(self, parser: Q) -> DatasetBuilder<Q> {
        DatasetBuilder { parser }
    }

    /// Runs the pipeline
    ///
    /// The output configuration and the corpus format are checked before
    /// any file is read. Nothing is retried; the first error aborts the run.
    ///
    /// # Errors
    ///
    /// - [`crate::RadsumError::ConfigError`] if no output is requested
    /// - [`crate::RadsumError::UnsupportedFormat`] for an unknown corpus or
    ///   split file extension
    /// - lookup, parse and I/O errors from loading and writing
    pub fn build(
        &self,
        reports_path: &Path,
        split_path: &Path,
        config: &ExportConfig,
    ) -> Result<BuildSummary> {
        config.validate()?;
        let format = CorpusFormat::from_path(reports_path)?;

        info!(
            "Reading the official split file from {}...",
            split_path.display()
        );
        let assignment = read_split_file(split_path)?;
        debug!("{} entries in the split file", assignment.total());

        info!(
            "Reading the {} report corpus from {}...",
            format,
            reports_path.display()
        );
        let keys = assignment.unique_keys(&config.requested_splits());
        let corpus = ReportCorpus::load(reports_path, &keys, &self.parser)?;
        info!("Loaded {} reports ({})", corpus.len(), corpus.format_name());

        let mut outputs = Vec::new();
        for (split, path) in config.outputs() {
            info!("Writing {} data to file at {}...", split, path.display());
            let outcome = write_split(split, &assignment, &corpus, path)?;
            outputs.push(OutputSummary {
                split,
                path: path.to_path_buf(),
                outcome,
            });
        }

        Ok(BuildSummary {
            assignment,
            outputs,
        })
    }
}

/// Outcome of one requested output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub split: Split,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Assignment read from the split file
    pub assignment: SplitAssignment,

    /// Requested outputs, in processing order
    pub outputs: Vec<OutputSummary>,
}

impl BuildSummary {
    /// Total number of records written across all outputs
    pub fn records_written(&self) -> usize {
        self.outputs
            .iter()
            .map(|output| match output.outcome {
                WriteOutcome::Written { count } => count,
                WriteOutcome::Skipped => 0,
            })
            .sum()
    }
}
