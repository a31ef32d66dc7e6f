//! Error types for archive detection and expansion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExpandError`.
pub type Result<T> = std::result::Result<T, ExpandError>;

/// Errors that can occur while detecting or expanding an application archive.
#[derive(Error, Debug)]
pub enum ExpandError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive file could not be opened for reading.
    #[error("failed to open archive {path}: {source}")]
    OpenArchive {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The archive's file-name suffix is not in the recognized table.
    #[error("unrecognized archive suffix: {path}")]
    UnsupportedFormat {
        /// The path with the unrecognized suffix.
        path: PathBuf,
    },

    /// Archive is corrupted or could not be decoded.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An archive entry's path would escape the tree root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry path.
        path: PathBuf,
    },

    /// A symlink entry's target points outside the tree root.
    #[error("symlink target outside tree root: {path}")]
    SymlinkEscape {
        /// The symlink's entry path.
        path: PathBuf,
    },

    /// A build plan entry exists but lacks a required metadata key.
    #[error("build plan entry {dependency:?} is missing metadata key {key:?}")]
    MissingMetadata {
        /// The build plan entry name.
        dependency: String,
        /// The metadata key that was expected.
        key: String,
    },

    /// Extraction succeeded but the source archive could not be removed.
    #[error("failed to remove source archive {path}: {source}")]
    RemoveArchive {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl ExpandError {
    /// Returns `true` if this error represents a containment violation.
    ///
    /// Containment violations mean the archive attempted to write outside
    /// the tree root and extraction was aborted.
    #[must_use]
    pub const fn is_containment_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SymlinkEscape { .. }
        )
    }

    /// Returns `true` if this error is a pipeline contract error rather
    /// than an environmental failure.
    ///
    /// Contract errors indicate a mis-ordered or mis-configured pipeline:
    /// a plan entry without the required metadata, or an archive path whose
    /// suffix the detector could never have accepted.
    #[must_use]
    pub const fn is_contract_error(&self) -> bool {
        matches!(
            self,
            Self::MissingMetadata { .. } | Self::UnsupportedFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpandError::UnsupportedFormat {
            path: PathBuf::from("app.rar"),
        };
        assert_eq!(err.to_string(), "unrecognized archive suffix: app.rar");
    }

    #[test]
    fn test_path_traversal_error() {
        let err = ExpandError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_containment_violation());
    }

    #[test]
    fn test_symlink_escape_error() {
        let err = ExpandError::SymlinkEscape {
            path: PathBuf::from("dir/link"),
        };
        assert!(err.to_string().contains("symlink target outside"));
        assert!(err.is_containment_violation());
    }

    #[test]
    fn test_missing_metadata_error() {
        let err = ExpandError::MissingMetadata {
            dependency: "application-archive".into(),
            key: "archive".into(),
        };
        assert!(err.to_string().contains("application-archive"));
        assert!(err.to_string().contains("archive"));
        assert!(err.is_contract_error());
        assert!(!err.is_containment_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpandError = io_err.into();
        assert!(matches!(err, ExpandError::Io(_)));
        assert!(!err.is_contract_error());
    }

    #[test]
    fn test_remove_archive_error_names_step() {
        let err = ExpandError::RemoveArchive {
            path: PathBuf::from("app.zip"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("remove source archive"));
        assert!(err.to_string().contains("app.zip"));
    }
}
