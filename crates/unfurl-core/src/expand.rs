//! Archive expansion: extract the planned archive and remove the original.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::ArchiveKind;
use crate::BuildPlan;
use crate::ExpandError;
use crate::ExpansionReport;
use crate::Result;
use crate::buildplan;
use crate::formats;

/// The contribution step, bound to a tree root and an archive path.
///
/// Constructed either directly or by [`Expander::resolve`] from a build
/// plan published by a prior detection. Expansion does not re-check the
/// detector's uniqueness invariant; it trusts the plan for *which* file to
/// expand but still verifies the suffix and the file's presence itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expander {
    root: PathBuf,
    archive: PathBuf,
}

impl Expander {
    /// Binds an expander to a tree root and archive path.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, archive: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            archive: archive.into(),
        }
    }

    /// Resolves this contributor's entry from the supplied build plan.
    ///
    /// Returns `Ok(None)` when the plan holds no `application-archive`
    /// entry; that is the normal nothing-to-do path, not a failure.
    ///
    /// # Errors
    ///
    /// Returns `ExpandError::MissingMetadata` when the entry exists but
    /// carries no `archive` metadata.
    pub fn resolve(root: &Path, plan: &BuildPlan) -> Result<Option<Self>> {
        let Some(entry) = plan.get(buildplan::DEPENDENCY) else {
            return Ok(None);
        };

        let archive = entry
            .requirement(buildplan::DEPENDENCY)
            .and_then(|req| req.metadata.get(buildplan::ARCHIVE))
            .ok_or_else(|| ExpandError::MissingMetadata {
                dependency: buildplan::DEPENDENCY.to_string(),
                key: buildplan::ARCHIVE.to_string(),
            })?;

        Ok(Some(Self::new(root, archive)))
    }

    /// The archive path this expander is bound to.
    #[must_use]
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Extracts the bound archive into the tree root and deletes the
    /// original file.
    ///
    /// On any extraction error the source archive is kept and partial
    /// output is left as-is; cleanup is the caller's responsibility.
    /// Because the archive is deleted on success, a second invocation with
    /// the same plan fails at the open step with file-not-found.
    ///
    /// # Errors
    ///
    /// Each failing step is attributable: `UnsupportedFormat` for a suffix
    /// outside the recognized table, `OpenArchive` when the file is missing
    /// or unreadable, `InvalidArchive` / `PathTraversal` / `SymlinkEscape` /
    /// `Io` during decode and write, and `RemoveArchive` when extraction
    /// succeeded but the source file could not be deleted.
    pub fn contribute(&self) -> Result<ExpansionReport> {
        let kind =
            ArchiveKind::from_path(&self.archive).ok_or_else(|| ExpandError::UnsupportedFormat {
                path: self.archive.clone(),
            })?;

        let file = File::open(&self.archive).map_err(|source| ExpandError::OpenArchive {
            path: self.archive.clone(),
            source,
        })?;

        let report = match kind {
            ArchiveKind::Jar | ArchiveKind::War | ArchiveKind::Zip => {
                formats::zip::extract(file, &self.root)?
            }
            ArchiveKind::Tar => formats::tar::extract(BufReader::new(file), &self.root)?,
            ArchiveKind::TarGz | ArchiveKind::Tgz => {
                formats::tar::extract(GzDecoder::new(BufReader::new(file)), &self.root)?
            }
        };

        fs::remove_file(&self.archive).map_err(|source| ExpandError::RemoveArchive {
            path: self.archive.clone(),
            source,
        })?;

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::buildplan::APPLICATION;
    use crate::buildplan::ARCHIVE;
    use crate::buildplan::DEPENDENCY;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::gzip;
    use tempfile::TempDir;

    fn plan_with_archive(path: &str) -> BuildPlan {
        let mut plan = BuildPlan::new();
        plan.entry(DEPENDENCY)
            .require(DEPENDENCY)
            .metadata
            .insert(ARCHIVE.into(), path.into());
        plan
    }

    #[test]
    fn test_resolve_present_entry() {
        let plan = plan_with_archive("/app/test-archive.zip");
        let expander = Expander::resolve(Path::new("/app"), &plan).unwrap();
        assert_eq!(
            expander,
            Some(Expander::new("/app", "/app/test-archive.zip"))
        );
    }

    #[test]
    fn test_resolve_absent_entry_is_none() {
        let mut plan = BuildPlan::new();
        plan.entry(APPLICATION).provide(APPLICATION);

        let expander = Expander::resolve(Path::new("/app"), &plan).unwrap();
        assert!(expander.is_none());
    }

    #[test]
    fn test_resolve_missing_metadata_is_an_error() {
        let mut plan = BuildPlan::new();
        plan.entry(DEPENDENCY).provide(DEPENDENCY);

        let result = Expander::resolve(Path::new("/app"), &plan);
        assert!(matches!(
            result,
            Err(ExpandError::MissingMetadata { .. })
        ));
    }

    #[test]
    fn test_contribute_unrecognized_suffix() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.rar");
        fs::write(&archive, b"not really").unwrap();

        let result = Expander::new(temp.path(), &archive).contribute();
        assert!(matches!(result, Err(ExpandError::UnsupportedFormat { .. })));
        assert!(archive.exists());
    }

    #[test]
    fn test_contribute_missing_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("gone.zip");

        let result = Expander::new(temp.path(), &archive).contribute();
        assert!(matches!(result, Err(ExpandError::OpenArchive { .. })));
    }

    #[test]
    fn test_contribute_zip_round_trip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.zip");
        fs::write(
            &archive,
            ZipTestBuilder::new().add_file("hello.txt", b"hi").build(),
        )
        .unwrap();

        let report = Expander::new(temp.path(), &archive).contribute().unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("hello.txt")).unwrap(),
            "hi"
        );
        assert!(!archive.exists());
    }

    #[test]
    fn test_contribute_tar_gz_round_trip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("app.tar.gz");
        let tar_data = TarTestBuilder::new().add_file("marker", b"payload").build();
        fs::write(&archive, gzip(&tar_data)).unwrap();

        Expander::new(temp.path(), &archive).contribute().unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("marker")).unwrap(),
            "payload"
        );
        assert!(!archive.exists());
    }

    #[test]
    fn test_contribute_keeps_archive_on_decode_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, b"\xde\xad\xbe\xef").unwrap();

        let result = Expander::new(temp.path(), &archive).contribute();

        assert!(matches!(result, Err(ExpandError::InvalidArchive(_))));
        assert!(archive.exists());
    }

    #[test]
    fn test_contribute_keeps_archive_on_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.tar");
        fs::write(
            &archive,
            TarTestBuilder::new()
                .add_file("../outside.txt", b"escape")
                .build(),
        )
        .unwrap();

        let result = Expander::new(temp.path(), &archive).contribute();

        assert!(matches!(result, Err(ExpandError::PathTraversal { .. })));
        assert!(archive.exists());
    }
}
