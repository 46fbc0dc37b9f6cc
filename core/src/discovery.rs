//! Recursive discovery of DICOM files
//!
//! Archives of DICOM data frequently drop the file extension altogether, so a
//! file without an extension is treated as a candidate rather than ignored.

use crate::error::{Result, ScopeError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file selected for extraction
///
/// Discovery only ever yields regular files, so no filesystem kind is
/// carried. Directories and symlinks are never candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FileCandidate {
    /// Absolute path to the file
    pub path: PathBuf,
}

impl FileCandidate {
    /// Base name of the file
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Which files count as candidates
///
/// # Example
///
/// ```
/// use dicomscope_core::DiscoveryConfig;
/// use std::path::Path;
///
/// let config = DiscoveryConfig::default().with_marker("Thumbs.db");
/// assert!(config.is_candidate(Path::new("IM-0001.DCM")));
/// assert!(config.is_candidate(Path::new("IM000001")));
/// assert!(!config.is_candidate(Path::new(".DS_Store")));
/// assert!(!config.is_candidate(Path::new("notes.txt")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Recognized extensions, lowercase and without the dot
    pub extensions: HashSet<String>,

    /// Names of extensionless filesystem marker files to skip
    pub markers: HashSet<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: ["dcm", "dicom"].iter().map(|s| s.to_string()).collect(),
            markers: [".DS_Store"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DiscoveryConfig {
    /// Adds a recognized extension (matched case-insensitively)
    pub fn with_extension(mut self, ext: &str) -> Self {
        self.extensions
            .insert(ext.trim_start_matches('.').to_ascii_lowercase());
        self
    }

    /// Adds a marker file name to skip
    pub fn with_marker(mut self, name: &str) -> Self {
        self.markers.insert(name.to_string());
        self
    }

    /// Decides by name alone whether a regular file is a candidate
    pub fn is_candidate(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => self
                .extensions
                .contains(&ext.to_string_lossy().to_ascii_lowercase()),
            None => path
                .file_name()
                .map(|name| !self.markers.contains(name.to_string_lossy().as_ref()))
                .unwrap_or(false),
        }
    }
}

/// Finds every candidate file under `root`, sorted by path
///
/// Symlinks are not followed. Entries that cannot be read are logged and
/// skipped.
///
/// # Errors
///
/// Returns [`ScopeError::FileNotFound`] if `root` does not exist and
/// [`ScopeError::NotADirectory`] if it is not a directory
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Vec<FileCandidate>> {
    if !root.exists() {
        return Err(ScopeError::FileNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScopeError::NotADirectory(root.to_path_buf()));
    }
    let root = std::fs::canonicalize(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", ScopeError::from(e));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if config.is_candidate(&path) {
            debug!("Candidate: {}", path.display());
            files.push(FileCandidate { path });
        }
    }

    files.sort();
    info!("Found {} DICOM files under {}", files.len(), root.display());
    Ok(files)
}
