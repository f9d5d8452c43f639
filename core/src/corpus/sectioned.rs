use super::ReportSource;
use crate::error::{RadsumError, Result};
use crate::extraction::strip_newlines;
use crate::types::{CorpusFormat, ReportRecord, StudyKey};
use flate2::read::MultiGzDecoder;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Row of the MIMIC-CXR sectioned file, keyed by `study`
///
/// Text is kept as read; newlines are removed only when a record is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionedRow {
    pub study: String,
    pub findings: String,
    pub impression: String,
    pub comparison: String,
}

/// Reports loaded from a pre-sectioned CSV (`mimic_cxr_sectioned.csv[.gz]`)
#[derive(Debug, Clone, Default)]
pub struct SectionedReports {
    rows: HashMap<String, SectionedRow>,
}

impl SectionedReports {
    /// Loads a `.csv` or `.csv.gz` sectioned file
    ///
    /// Concatenated gzip members are read through to the end.
    ///
    /// # Errors
    ///
    /// Returns [`RadsumError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let reports = match CorpusFormat::from_path(path) {
            Ok(CorpusFormat::Csv) => Self::from_reader(File::open(path)?)?,
            Ok(CorpusFormat::GzipCsv) => {
                Self::from_reader(MultiGzDecoder::new(File::open(path)?))?
            }
            _ => {
                return Err(RadsumError::UnsupportedFormat(format!(
                    "MIMIC-CXR sectioned file must be either a .csv file or a .csv.gz file, \
                     but found: {}",
                    path.display()
                )))
            }
        };

        debug!(
            "Loaded {} sectioned reports from {}",
            reports.len(),
            path.display()
        );
        Ok(reports)
    }

    /// Loads sectioned rows from any CSV source
    ///
    /// A study listed twice keeps its last row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut rows = HashMap::new();

        for row in rdr.deserialize() {
            let row: SectionedRow = row?;
            rows.insert(row.study.clone(), row);
        }

        Ok(Self { rows })
    }

    /// Returns the raw row of a study
    pub fn get(&self, study: &str) -> Option<&SectionedRow> {
        self.rows.get(study)
    }
}

impl ReportSource for SectionedReports {
    /// Builds the record of a study, taking the ids from `key`
    ///
    /// `background` is the comparison field.
    fn record(&self, key: &StudyKey) -> Result<ReportRecord> {
        let row = self.get(&key.study_id).ok_or_else(|| {
            RadsumError::ReportNotFound(format!("{} is not in the sectioned file", key))
        })?;

        Ok(ReportRecord::new(
            key,
            strip_newlines(&row.findings),
            strip_newlines(&row.impression),
            strip_newlines(&row.comparison),
        ))
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const SECTIONED_CSV: &str = "\
study,impression,findings,last_paragraph,comparison
s50414267,\"No acute process.\n\",\"PA and lateral views.\nLungs are clear.\",,\"None.\"
s53189527,\"Stable.\",\"Unchanged\n cardiomegaly.\",,
";

    #[test]
    fn test_from_reader() {
        let reports = SectionedReports::from_reader(SECTIONED_CSV.as_bytes()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(!reports.is_empty());

        let row = reports.get("s50414267").unwrap();
        assert_eq!(row.findings, "PA and lateral views.\nLungs are clear.");
        assert_eq!(row.comparison, "None.");
    }

    #[test]
    fn test_record_strips_newlines_and_injects_ids() {
        let reports = SectionedReports::from_reader(SECTIONED_CSV.as_bytes()).unwrap();
        let key = StudyKey::new("s53189527", "10000032");

        let record = reports.record(&key).unwrap();
        assert_eq!(record.study_id, "s53189527");
        assert_eq!(record.subject_id, "10000032");
        assert_eq!(record.findings, "Unchanged cardiomegaly.");
        assert_eq!(record.impression, "Stable.");
        assert_eq!(record.background, "");

        let record = reports
            .record(&StudyKey::new("s50414267", "10000032"))
            .unwrap();
        assert_eq!(record.findings, "PA and lateral views.Lungs are clear.");
        assert_eq!(record.impression, "No acute process.");
    }

    #[test]
    fn test_missing_study_is_lookup_error() {
        let reports = SectionedReports::from_reader(SECTIONED_CSV.as_bytes()).unwrap();
        let err = reports
            .record(&StudyKey::new("s99999999", "10000032"))
            .unwrap_err();
        assert!(matches!(err, RadsumError::ReportNotFound(_)));
    }

    #[test]
    fn test_last_duplicate_row_wins() {
        let csv = "study,findings,impression,comparison\ns1,a,b,c\ns1,d,e,f\n";
        let reports = SectionedReports::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports.get("s1").unwrap().findings, "d");
    }

    #[test]
    fn test_from_path_gzip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mimic_cxr_sectioned.csv.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SECTIONED_CSV.as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let reports = SectionedReports::from_path(&path).unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_from_path_multi_member_gzip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mimic_cxr_sectioned.csv.gz");

        let mut bytes = Vec::new();
        for chunk in [
            "study,findings,impression,comparison\ns1,a,b,c\n",
            "s2,d,e,f\n",
        ] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(chunk.as_bytes()).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        fs::write(&path, bytes).unwrap();

        let reports = SectionedReports::from_path(&path).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.get("s2").unwrap().impression, "e");
    }

    #[test]
    fn test_record_strips_crlf() {
        let csv = "study,findings,impression,comparison\r\ns1,\"Lungs\r\n clear.\",\"Normal.\r\n\",\r\n";
        let reports = SectionedReports::from_reader(csv.as_bytes()).unwrap();

        let record = reports.record(&StudyKey::new("s1", "10000032")).unwrap();
        assert_eq!(record.findings, "Lungs clear.");
        assert_eq!(record.impression, "Normal.");
    }

    #[test]
    fn test_from_path_plain_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mimic_cxr_sectioned.csv");
        fs::write(&path, SECTIONED_CSV).unwrap();

        let reports = SectionedReports::from_path(&path).unwrap();
        assert!(reports.get("s53189527").is_some());
    }

    #[test]
    fn test_from_path_rejects_other_formats() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["reports.zip", "reports.txt"] {
            let path = temp_dir.path().join(name);
            fs::write(&path, SECTIONED_CSV).unwrap();
            let err = SectionedReports::from_path(&path).unwrap_err();
            assert!(matches!(err, RadsumError::UnsupportedFormat(_)));
        }
    }
}
