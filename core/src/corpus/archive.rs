use super::ReportSource;
use crate::error::{RadsumError, Result};
use crate::extraction::sections::{FINDINGS, IMPRESSION};
use crate::extraction::{
    clean_background, clean_findings, clean_impression, find_section, SectionParser,
};
use crate::types::{ReportRecord, StudyKey};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Reports extracted from a ZIP archive of MIMIC-CXR free-text reports
#[derive(Debug, Clone, Default)]
pub struct ArchiveReports {
    records: HashMap<StudyKey, ReportRecord>,
}

impl ArchiveReports {
    /// Opens a report archive and extracts the reports of `keys`
    ///
    /// # Errors
    ///
    /// Fails on the first study whose report is missing, is not UTF-8, or
    /// lacks a findings or impression section.
    pub fn load<'k, P>(
        path: &Path,
        keys: impl IntoIterator<Item = &'k StudyKey>,
        parser: &P,
    ) -> Result<Self>
    where
        P: SectionParser + ?Sized,
    {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let reports = Self::from_archive(&mut archive, keys, parser)?;

        debug!(
            "Extracted {} reports from archive {}",
            reports.len(),
            path.display()
        );
        Ok(reports)
    }

    /// Extracts the reports of `keys` from an opened archive
    pub fn from_archive<'k, R, P>(
        archive: &mut ZipArchive<R>,
        keys: impl IntoIterator<Item = &'k StudyKey>,
        parser: &P,
    ) -> Result<Self>
    where
        R: Read + Seek,
        P: SectionParser + ?Sized,
    {
        let mut records = HashMap::new();

        for key in keys {
            if records.contains_key(key) {
                continue;
            }
            let text = read_report(archive, key)?;
            let record = extract_record(key, &text, parser)?;
            debug!("Extracted {}", key);
            records.insert(key.clone(), record);
        }

        Ok(Self { records })
    }
}

impl ReportSource for ArchiveReports {
    fn record(&self, key: &StudyKey) -> Result<ReportRecord> {
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| {
                RadsumError::ReportNotFound(format!("{} was not extracted from the archive", key))
            })
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Reads the free-text report of a study from the archive
fn read_report<R: Read + Seek>(archive: &mut ZipArchive<R>, key: &StudyKey) -> Result<String> {
    let name = key.archive_path();
    let mut entry = match archive.by_name(&name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(RadsumError::ReportNotFound(format!(
                "{} has no report at {}",
                key, name
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| RadsumError::DecodeError(format!("{} in {}: {}", key, name, e)))
}

/// Builds a cleaned record from the raw report text of a study
///
/// Findings and impression are looked up by section name. Background is
/// the text before the findings section.
///
/// # Errors
///
/// Returns [`RadsumError::SectionNotFound`] when the findings or impression
/// section is absent.
pub fn extract_record<P>(key: &StudyKey, text: &str, parser: &P) -> Result<ReportRecord>
where
    P: SectionParser + ?Sized,
{
    let sections = parser.section_text(text);

    let findings = find_section(&sections, FINDINGS).ok_or_else(|| {
        RadsumError::SectionNotFound(format!("no {} section in the report of {}", FINDINGS, key))
    })?;
    let impression = find_section(&sections, IMPRESSION).ok_or_else(|| {
        RadsumError::SectionNotFound(format!(
            "no {} section in the report of {}",
            IMPRESSION, key
        ))
    })?;

    let background = text.get(..findings.start).ok_or_else(|| {
        RadsumError::DecodeError(format!(
            "findings offset {} is not a character boundary in the report of {}",
            findings.start, key
        ))
    })?;

    Ok(ReportRecord::new(
        key,
        clean_findings(&findings.body),
        clean_impression(&impression.body),
        clean_background(background),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{MimicSectionParser, Section};
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const REPORT: &str = "                                 FINAL REPORT\n EXAMINATION:  CHEST (PA AND LAT)\n \n INDICATION:  ___ with cough\n \n COMPARISON:  None.\n \n FINDINGS: \n \n PA and lateral views of the chest.  Lungs are\n clear.\n \n IMPRESSION: \n \n 1. No acute process.\n 2. Stable cardiomegaly.\n";

    const NO_IMPRESSION: &str =
        "                                 FINAL REPORT\n INDICATION: Cough.\n \n FINDINGS: Lungs are clear.\n";

    fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));
            for (name, content) in entries {
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    fn open(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_extract_record() {
        let key = StudyKey::new("50414267", "10000032");
        let record = extract_record(&key, REPORT, &MimicSectionParser).unwrap();

        assert_eq!(record.study_id, "50414267");
        assert_eq!(record.subject_id, "10000032");
        assert_eq!(
            record.findings,
            "PA and lateral views of the chest. Lungs are clear."
        );
        assert_eq!(record.impression, "No acute process. Stable cardiomegaly.");
        assert_eq!(
            record.background,
            "EXAMINATION: CHEST (PA AND LAT) INDICATION: ___ with cough COMPARISON: None."
        );
    }

    #[test]
    fn test_missing_impression_is_error() {
        let key = StudyKey::new("50414267", "10000032");
        let err = extract_record(&key, NO_IMPRESSION, &MimicSectionParser).unwrap_err();
        assert!(matches!(err, RadsumError::SectionNotFound(ref msg) if msg.contains("impression")));
    }

    #[test]
    fn test_injected_parser() {
        let parser = |text: &str| {
            vec![
                Section::new(FINDINGS, &text[4..8], 4),
                Section::new(IMPRESSION, &text[9..], 9),
            ]
        };
        let key = StudyKey::new("1", "2");

        let record = extract_record(&key, "bgd:fndg impr", &parser).unwrap();
        assert_eq!(record.findings, "fndg");
        assert_eq!(record.impression, "impr");
        assert_eq!(record.background, "bgd");
    }

    #[test]
    fn test_offset_outside_text_is_error() {
        let parser = |_: &str| {
            vec![
                Section::new(FINDINGS, "x", 100),
                Section::new(IMPRESSION, "y", 101),
            ]
        };
        let err = extract_record(&StudyKey::new("1", "2"), "short", &parser).unwrap_err();
        assert!(matches!(err, RadsumError::DecodeError(_)));
    }

    #[test]
    fn test_from_archive() {
        let key = StudyKey::new("50414267", "10000032");
        let bytes = build_archive(&[(key.archive_path().as_str(), REPORT.as_bytes())]);

        let reports =
            ArchiveReports::from_archive(&mut open(bytes), [&key, &key], &MimicSectionParser)
                .unwrap();
        assert_eq!(reports.len(), 1);

        let record = reports.record(&key).unwrap();
        assert_eq!(record.key(), key);
        assert_eq!(record.impression, "No acute process. Stable cardiomegaly.");
    }

    #[test]
    fn test_study_listed_under_two_subjects() {
        let first = StudyKey::new("5", "10000001");
        let second = StudyKey::new("5", "20000002");
        let bytes = build_archive(&[
            (first.archive_path().as_str(), REPORT.as_bytes()),
            (second.archive_path().as_str(), REPORT.as_bytes()),
        ]);

        let reports = ArchiveReports::from_archive(
            &mut open(bytes),
            [&first, &second],
            &MimicSectionParser,
        )
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.record(&first).unwrap().subject_id, "10000001");
        assert_eq!(reports.record(&second).unwrap().subject_id, "20000002");
        assert!(reports.record(&StudyKey::new("5", "30000003")).is_err());
    }

    #[test]
    fn test_missing_entry_is_lookup_error() {
        let bytes = build_archive(&[("files/p10/p10000032/s1.txt", REPORT.as_bytes())]);
        let key = StudyKey::new("2", "10000032");

        let err = ArchiveReports::from_archive(&mut open(bytes), [&key], &MimicSectionParser)
            .unwrap_err();
        assert!(matches!(err, RadsumError::ReportNotFound(_)));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let key = StudyKey::new("1", "10000032");
        let bytes = build_archive(&[(key.archive_path().as_str(), &[0xff, 0xfe, 0x00][..])]);

        let err = ArchiveReports::from_archive(&mut open(bytes), [&key], &MimicSectionParser)
            .unwrap_err();
        assert!(matches!(err, RadsumError::DecodeError(_)));
    }

    #[test]
    fn test_unloaded_study_is_lookup_error() {
        let reports = ArchiveReports::default();
        let err = reports.record(&StudyKey::new("1", "2")).unwrap_err();
        assert!(matches!(err, RadsumError::ReportNotFound(_)));
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mimic-cxr-reports.zip");
        let key = StudyKey::new("50414267", "10000032");
        std::fs::write(&path, build_archive(&[(key.archive_path().as_str(), REPORT.as_bytes())]))
            .unwrap();

        let reports = ArchiveReports::load(&path, [&key], &MimicSectionParser).unwrap();
        assert_eq!(reports.record(&key).unwrap().findings.len(), 51);
    }
}
