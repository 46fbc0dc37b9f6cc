use std::path::PathBuf;
use thiserror::Error;

/// Result type for dicomscope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Error types for dicomscope operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// A capability needed by this invocation was compiled out
    #[error("Missing dependency: {0}")]
    DependencyMissing(String),

    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// DICOM content could not be decoded
    #[error("DICOM error: {0}")]
    DecodeFailure(String),

    /// Statistics needed by a filter are undefined for this image
    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),

    /// Filter parameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ScopeError {
    fn from(e: dicom_object::ReadError) -> Self {
        ScopeError::DecodeFailure(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for ScopeError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        ScopeError::InvalidValue(format!("{}", e))
    }
}

#[cfg(feature = "pixeldata")]
impl From<dicom_pixeldata::Error> for ScopeError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        ScopeError::DecodeFailure(format!("{}", e))
    }
}

impl From<walkdir::Error> for ScopeError {
    fn from(e: walkdir::Error) -> Self {
        ScopeError::Walk(format!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScopeError::NotADirectory(PathBuf::from("/tmp/x.dcm"));
        assert_eq!(err.to_string(), "Not a directory: /tmp/x.dcm");

        let err = ScopeError::DecodeFailure("bad preamble".to_string());
        assert_eq!(err.to_string(), "DICOM error: bad preamble");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScopeError = io.into();
        assert!(matches!(err, ScopeError::Io(_)));
    }
}
