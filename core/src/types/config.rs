use super::{Split, ALL_SPLITS};
use crate::error::{RadsumError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Output configuration: which splits to write and where
///
/// # Example
///
/// ```
/// use radsum_core::{ExportConfig, Split};
///
/// let config = ExportConfig::default()
///     .with_output(Split::Train, "train.json")
///     .with_output(Split::Test, "test.json");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.requested_splits(), vec![Split::Train, Split::Test]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportConfig {
    outputs: BTreeMap<Split, PathBuf>,
}

impl ExportConfig {
    /// Builder: Set the output file of a split
    ///
    /// An empty path leaves the split unrequested.
    pub fn with_output(mut self, split: Split, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str().is_empty() {
            self.outputs.remove(&split);
        } else {
            self.outputs.insert(split, path);
        }
        self
    }

    /// Builder: Set the output file of a split if one is given
    pub fn with_optional_output(self, split: Split, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => self.with_output(split, path),
            None => self,
        }
    }

    /// Returns the output file of a split, if requested
    pub fn output(&self, split: Split) -> Option<&Path> {
        self.outputs.get(&split).map(PathBuf::as_path)
    }

    /// Requested splits with their output files, in train, dev, test order
    pub fn outputs(&self) -> impl Iterator<Item = (Split, &Path)> {
        ALL_SPLITS
            .iter()
            .filter_map(|split| self.output(*split).map(|path| (*split, path)))
    }

    /// Requested splits, in train, dev, test order
    pub fn requested_splits(&self) -> Vec<Split> {
        self.outputs().map(|(split, _)| split).collect()
    }

    /// Checks that at least one output file is requested
    ///
    /// # Errors
    ///
    /// Returns [`RadsumError::ConfigError`] when no output is set.
    pub fn validate(&self) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(RadsumError::ConfigError(
                "At least one output file path must be specified with \
                 --train_file, --dev_file or --test_file."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
