use crate::discovery::FileCandidate;
use crate::extraction::{Outcome, RecordExtractor};
use log::{info, warn};
use std::fmt;
use std::path::Path;

/// Notification emitted before each file is processed
#[derive(Debug, Clone, PartialEq)]
pub struct Progress<'a> {
    /// 1-based position of the file
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
}

impl Progress<'_> {
    /// Completion percentage including the current file
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.index as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] ({:.1}%) Processing: {}",
            self.index,
            self.total,
            self.percentage(),
            self.file_name
        )
    }
}

/// Sequential per-file extraction with isolated failures
///
/// One [`Outcome`] is produced per input file, in input order. A file that
/// fails to decode is recorded as [`Outcome::Failure`] and processing moves
/// on to the next file.
///
/// # Example
///
/// ```no_run
/// use dicomscope_core::{discover, BatchRunner, DiscoveryConfig};
/// use std::path::Path;
///
/// let files = discover(Path::new("studies"), &DiscoveryConfig::default()).unwrap();
/// let outcomes = BatchRunner::run(&files, |progress| println!("{}", progress));
/// assert_eq!(outcomes.len(), files.len());
/// ```
pub struct BatchRunner;

impl BatchRunner {
    /// Runs header extraction over `files`
    pub fn run<F>(files: &[FileCandidate], on_progress: F) -> Vec<Outcome>
    where
        F: FnMut(&Progress<'_>),
    {
        Self::run_with(files, |path: &Path| RecordExtractor::extract(path), on_progress)
    }

    /// Runs a custom extraction function over `files`
    pub fn run_with<E, F>(files: &[FileCandidate], mut extract: E, mut on_progress: F) -> Vec<Outcome>
    where
        E: FnMut(&Path) -> Outcome,
        F: FnMut(&Progress<'_>),
    {
        let total = files.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, file) in files.iter().enumerate() {
            let file_name = file.file_name();
            on_progress(&Progress {
                index: i + 1,
                total,
                file_name: &file_name,
            });

            let outcome = extract(&file.path);
            if let Outcome::Failure { error, .. } = &outcome {
                warn!("Failed {}: {}", file_name, error);
            }
            outcomes.push(outcome);
        }

        info!(
            "Processed {} files, {} succeeded",
            total,
            outcomes.iter().filter(|o| o.is_success()).count()
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_dicom, DicomFixture};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn candidates(names: &[&str]) -> Vec<FileCandidate> {
        names
            .iter()
            .map(|n| FileCandidate {
                path: PathBuf::from(format!("/data/{}", n)),
            })
            .collect()
    }

    #[test]
    fn test_progress_display() {
        let progress = Progress {
            index: 1,
            total: 150,
            file_name: "IM-0001-0001.dcm",
        };
        assert_eq!(progress.to_string(), "[1/150] (0.7%) Processing: IM-0001-0001.dcm");
    }

    #[test]
    fn test_progress_zero_total() {
        let progress = Progress {
            index: 0,
            total: 0,
            file_name: "",
        };
        assert_eq!(progress.percentage(), 0.0);
    }

    #[test]
    fn test_outcomes_match_inputs_in_order() {
        let files = candidates(&["a.dcm", "b.dcm", "c.dcm", "d.dcm"]);
        let mut seen = Vec::new();

        let outcomes = BatchRunner::run_with(
            &files,
            |path| Outcome::Failure {
                file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
                error: "Invalid DICOM file".to_string(),
            },
            |p| seen.push((p.index, p.total, p.file_name.to_string())),
        );

        assert_eq!(outcomes.len(), files.len());
        for (outcome, file) in outcomes.iter().zip(&files) {
            assert_eq!(outcome.file_name(), file.file_name());
        }
        assert_eq!(
            seen,
            vec![
                (1, 4, "a.dcm".to_string()),
                (2, 4, "b.dcm".to_string()),
                (3, 4, "c.dcm".to_string()),
                (4, 4, "d.dcm".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let outcomes = BatchRunner::run(&[], |_| panic!("no progress expected"));
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("a_corrupted.dcm");
        let good = dir.path().join("b_valid.dcm");
        std::fs::write(&bad, b"garbage").unwrap();
        write_dicom(&good, &DicomFixture::new("1.2.3").modality("CT"));

        let files = vec![
            FileCandidate { path: bad },
            FileCandidate { path: good },
        ];
        let outcomes = BatchRunner::run(&files, |_| {});

        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
    }
}
