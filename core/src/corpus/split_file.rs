use crate::error::{RadsumError, Result};
use crate::types::{SplitAssignment, StudyKey};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of an official split file
#[derive(Debug, Deserialize)]
struct SplitRow {
    split: String,
    study_id: String,
    subject_id: String,
}

/// Reads an official split file
///
/// The file is a CSV with columns `split`, `study_id` and `subject_id`;
/// other columns are ignored. Rows keep their file order within a split
/// and duplicates are not removed.
///
/// # Errors
///
/// Returns [`RadsumError::UnsupportedFormat`] if the path does not end in
/// `.csv`, or a CSV/IO error if the file cannot be read.
pub fn read_split_file(path: &Path) -> Result<SplitAssignment> {
    if !path.to_string_lossy().ends_with(".csv") {
        return Err(RadsumError::UnsupportedFormat(format!(
            "Split file must be in .csv format, but found: {}",
            path.display()
        )));
    }

    let assignment = read_split_csv(File::open(path)?)?;
    debug!(
        "Read {} rows from split file {}",
        assignment.total(),
        path.display()
    );
    Ok(assignment)
}

/// Reads split rows from any CSV source
pub fn read_split_csv<R: Read>(reader: R) -> Result<SplitAssignment> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut assignment = SplitAssignment::new();

    for row in rdr.deserialize() {
        let row: SplitRow = row?;
        assignment.push(row.split, StudyKey::new(row.study_id, row.subject_id));
    }

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Split;
    use std::fs;
    use tempfile::TempDir;

    const SPLIT_CSV: &str = "\
subject_id,study_id,split
10000032,50414267,train
10000032,53189527,train
10000764,57375967,test
10000898,50771383,dev
10000032,50414267,train
";

    #[test]
    fn test_read_split_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("split.csv");
        fs::write(&path, SPLIT_CSV).unwrap();

        let assignment = read_split_file(&path).unwrap();
        assert_eq!(assignment.total(), 5);
        assert_eq!(assignment.split_ids(Split::Train).len(), 3);
        assert_eq!(assignment.split_ids(Split::Dev).len(), 1);
        assert_eq!(
            assignment.split_ids(Split::Test),
            &[StudyKey::new("57375967", "10000764")]
        );
    }

    #[test]
    fn test_split_counts_sum_to_rows() {
        let assignment = read_split_csv(SPLIT_CSV.as_bytes()).unwrap();
        let sum: usize = assignment.iter().map(|(_, ids)| ids.len()).sum();
        assert_eq!(sum, assignment.total());
    }

    #[test]
    fn test_rejects_non_csv_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("split.tsv");
        fs::write(&path, SPLIT_CSV).unwrap();

        let err = read_split_file(&path).unwrap_err();
        assert!(matches!(err, RadsumError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let err = read_split_csv("study_id,split\n1,train\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RadsumError::CsvError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_split_file(&temp_dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, RadsumError::IoError(_)));
    }
}
