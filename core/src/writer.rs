use crate::corpus::ReportSource;
use crate::error::Result;
use crate::types::{ReportRecord, Split, SplitAssignment, StudyKey};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Result of writing one split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The split file was written with this many records
    Written { count: usize },
    /// The split has no ids; no file was created
    Skipped,
}

/// Resolves every pair to its record, in order
///
/// # Errors
///
/// Fails on the first pair without a report.
pub fn collect_records<S>(ids: &[StudyKey], reports: &S) -> Result<Vec<ReportRecord>>
where
    S: ReportSource + ?Sized,
{
    ids.iter().map(|key| reports.record(key)).collect()
}

/// Writes one split of the dataset as a JSON array
///
/// Records follow the order of the split file. A split without ids is
/// skipped and leaves `path` untouched; otherwise `path` is overwritten.
/// All records are resolved before the file is created.
pub fn write_split<S>(
    split: Split,
    assignment: &SplitAssignment,
    reports: &S,
    path: &Path,
) -> Result<WriteOutcome>
where
    S: ReportSource + ?Sized,
{
    let ids = assignment.split_ids(split);
    if ids.is_empty() {
        info!("No id is found for {} split. Skipping...", split);
        return Ok(WriteOutcome::Skipped);
    }

    let records = collect_records(ids, reports)?;
    write_json(&records, path)?;
    info!(
        "{} total examples written to file {}.",
        records.len(),
        path.display()
    );

    Ok(WriteOutcome::Written {
        count: records.len(),
    })
}

/// Serializes records to `path` as a single JSON array
pub fn write_json(records: &[ReportRecord], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
