//! Error conversion utilities for CLI.
//!
//! Converts unfurl-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) that name the failing step.

use anyhow::anyhow;
use std::path::Path;
use unfurl_core::ExpandError;

/// Converts `ExpandError` to a user-friendly anyhow error with context
pub fn convert_expand_error(err: ExpandError, app_dir: &Path) -> anyhow::Error {
    match err {
        ExpandError::PathTraversal { path } => {
            anyhow!(
                "Security violation: archive entry '{}' would escape '{}'\n\
                 HINT: The archive is malformed or malicious; extraction was aborted.",
                path.display(),
                app_dir.display()
            )
        }
        ExpandError::SymlinkEscape { path } => {
            anyhow!(
                "Security violation: symlink '{}' targets a location outside '{}'\n\
                 HINT: The archive is malformed or malicious; extraction was aborted.",
                path.display(),
                app_dir.display()
            )
        }
        ExpandError::UnsupportedFormat { path } => {
            anyhow!(
                "Unrecognized archive suffix: {}\n\
                 HINT: Supported suffixes: .jar, .war, .tar, .tar.gz, .tgz, .zip",
                path.display()
            )
        }
        ExpandError::OpenArchive { path, source } => {
            anyhow!(
                "Failed to open archive '{}': {source}\n\
                 HINT: The archive may already have been expanded by a previous run.",
                path.display()
            )
        }
        ExpandError::MissingMetadata { dependency, key } => {
            anyhow!(
                "Build plan entry '{dependency}' is missing metadata key '{key}'\n\
                 HINT: Run the detect step before expand, against the same plan file."
            )
        }
        ExpandError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive: {reason}\n\
                 HINT: The archive may be corrupted or mislabeled by its suffix."
            )
        }
        other => anyhow::Error::from(other)
            .context(format!("Error expanding archive into '{}'", app_dir.display())),
    }
}
