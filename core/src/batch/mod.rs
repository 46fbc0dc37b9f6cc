//! Batch extraction over many files and grouping by study

pub mod aggregate;
pub mod runner;

pub use aggregate::{Aggregator, StudyGroup, StudyGroups, StudySummary};
pub use runner::{BatchRunner, Progress};

use crate::extraction::Outcome;

/// Number of failures listed individually in a batch summary
pub const MAX_REPORTED_ERRORS: usize = 10;

/// A failed file and its error text
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FileError {
    pub file_name: String,
    pub error: String,
}

/// Counts, study groups and a bounded error list for one batch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub studies: StudyGroups,

    /// The first [`MAX_REPORTED_ERRORS`] failures, in processing order
    pub errors: Vec<FileError>,

    /// Failures beyond those listed in `errors`
    pub remaining_errors: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let studies = Aggregator::group(outcomes.iter().filter_map(Outcome::record));

        let failures: Vec<FileError> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Outcome::Failure { file_name, error } => Some(FileError {
                    file_name: file_name.clone(),
                    error: error.clone(),
                }),
                Outcome::Success(_) => None,
            })
            .collect();

        let failed = failures.len();
        let remaining_errors = failed.saturating_sub(MAX_REPORTED_ERRORS);
        let errors = failures.into_iter().take(MAX_REPORTED_ERRORS).collect();

        Self {
            total: outcomes.len(),
            successful: outcomes.len() - failed,
            failed,
            studies,
            errors,
            remaining_errors,
        }
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.successful, self.total)
    }

    pub fn failure_rate(&self) -> f64 {
        percentage(self.failed, self.total)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
