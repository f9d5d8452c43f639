use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier pair of one report: the study and the patient it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudyKey {
    pub study_id: String,
    pub subject_id: String,
}

impl StudyKey {
    /// Creates a new StudyKey
    pub fn new(study_id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            study_id: study_id.into(),
            subject_id: subject_id.into(),
        }
    }

    /// Path of this study's free-text report inside a MIMIC-CXR archive
    ///
    /// Format: `files/p<first two chars of subject>/p<subject>/s<study>.txt`
    ///
    /// # Example
    ///
    /// ```
    /// use radsum_core::StudyKey;
    ///
    /// let key = StudyKey::new("50414267", "10000032");
    /// assert_eq!(key.archive_path(), "files/p10/p10000032/s50414267.txt");
    /// ```
    pub fn archive_path(&self) -> String {
        let prefix: String = self.subject_id.chars().take(2).collect();
        format!(
            "files/p{}/p{}/s{}.txt",
            prefix, self.subject_id, self.study_id
        )
    }
}

impl fmt::Display for StudyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "study {} (subject {})", self.study_id, self.subject_id)
    }
}

/// One example of the summarization dataset
///
/// Field order is the key order of the emitted JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Study ID of the radiology report
    pub study_id: String,

    /// De-identified ID of the patient
    pub subject_id: String,

    /// Findings text (summarization input)
    pub findings: String,

    /// Impression text (summarization target)
    pub impression: String,

    /// Background information preceding the findings, may be empty
    pub background: String,
}

impl ReportRecord {
    /// Creates a record for a study from its three text fields
    pub fn new(key: &StudyKey, findings: String, impression: String, background: String) -> Self {
        Self {
            study_id: key.study_id.clone(),
            subject_id: key.subject_id.clone(),
            findings,
            impression,
            background,
        }
    }

    /// Returns the identifier pair of this record
    pub fn key(&self) -> StudyKey {
        StudyKey::new(self.study_id.clone(), self.subject_id.clone())
    }
}
