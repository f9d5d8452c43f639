use crate::api::BuildSummary;
use crate::types::ALL_SPLITS;
use crate::writer::WriteOutcome;
use std::fmt;

/// Text report of a dataset build
pub struct TextReport<'a> {
    summary: &'a BuildSummary,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(summary: &'a BuildSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assignment = &self.summary.assignment;

        writeln!(f, "Split File")?;
        writeln!(f, "==========")?;
        writeln!(f, "Total entries found: {}, including:", assignment.total())?;
        for split in ALL_SPLITS {
            writeln!(f, "\t{} = {}", split, assignment.split_ids(split).len())?;
        }
        writeln!(f)?;

        writeln!(f, "Outputs")?;
        writeln!(f, "-------")?;
        for output in &self.summary.outputs {
            match output.outcome {
                WriteOutcome::Written { count } => writeln!(
                    f,
                    "{}: {} examples written to {}",
                    output.split,
                    count,
                    output.path.display()
                )?,
                WriteOutcome::Skipped => {
                    writeln!(f, "{}: no ids found, skipped", output.split)?
                }
            }
        }

        Ok(())
    }
}
