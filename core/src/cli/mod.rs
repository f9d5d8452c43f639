pub mod report;

use crate::types::{ExportConfig, Split};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for radsum
#[derive(Parser, Debug)]
#[command(name = "radsum")]
#[command(about = "Make summarization data from the original MIMIC-CXR downloads")]
#[command(version)]
pub struct Cli {
    /// Path to the MIMIC-CXR sectioned file (.csv, .csv.gz) or report archive (.zip)
    #[arg(value_name = "REPORTS")]
    pub reports: PathBuf,

    /// Path to the CSV file that contains the split information
    #[arg(value_name = "SPLIT_FILE")]
    pub split_file: PathBuf,

    /// Path to a file where the training data will be written to
    #[arg(long = "train_file", value_name = "TRAIN_FILE")]
    pub train_file: Option<String>,

    /// Path to a file where the dev data will be written to
    #[arg(long = "dev_file", value_name = "DEV_FILE")]
    pub dev_file: Option<String>,

    /// Path to a file where the test data will be written to
    #[arg(long = "test_file", value_name = "TEST_FILE")]
    pub test_file: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Output configuration requested on the command line
    ///
    /// An empty output path counts as not given.
    pub fn export_config(&self) -> ExportConfig {
        let path = |value: &Option<String>| value.as_deref().map(PathBuf::from);

        ExportConfig::default()
            .with_optional_output(Split::Train, path(&self.train_file))
            .with_optional_output(Split::Dev, path(&self.dev_file))
            .with_optional_output(Split::Test, path(&self.test_file))
    }
}
