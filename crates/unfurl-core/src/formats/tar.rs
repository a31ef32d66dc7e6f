//! Tar stream extraction.
//!
//! Entries are processed sequentially in archive order. File, directory and
//! symlink header types are materialized; other entry types (pax headers
//! and similar bookkeeping) are skipped. Gzip decompression for `.tar.gz` /
//! `.tgz` is layered by the caller before the reader reaches this module.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ExpandError;
use crate::ExpansionReport;
use crate::Result;
use crate::paths;

/// Streams a tar archive into `root`.
///
/// Relative paths and permission bits are preserved. Any entry whose path
/// or symlink target would escape `root` aborts the whole extraction.
/// Symlink targets are checked lexically before creation and again against
/// the materialized tree, so a chain of links cannot smuggle a target past
/// the component count.
///
/// # Errors
///
/// Returns `ExpandError::InvalidArchive` on malformed tar data,
/// `ExpandError::PathTraversal` / `ExpandError::SymlinkEscape` on
/// containment violations, and `ExpandError::Io` on write failures.
pub fn extract<R: Read>(reader: R, root: &Path) -> Result<ExpansionReport> {
    let mut archive = tar::Archive::new(reader);
    let mut report = ExpansionReport::new();
    let canonical_root = fs::canonicalize(root)?;
    let mut created_links: Vec<PathBuf> = Vec::new();

    let entries = archive
        .entries()
        .map_err(|e| ExpandError::InvalidArchive(format!("failed to read tar entries: {e}")))?;

    for entry_result in entries {
        let mut entry = entry_result
            .map_err(|e| ExpandError::InvalidArchive(format!("failed to read tar entry: {e}")))?;

        let raw_path = entry
            .path()
            .map_err(|e| ExpandError::InvalidArchive(format!("invalid tar entry path: {e}")))?
            .into_owned();
        let rel = paths::contain(&raw_path)?;
        let dest = root.join(&rel);

        let entry_type = entry.header().entry_type();
        match entry_type {
            tar::EntryType::Directory => {
                fs::create_dir_all(&dest)?;
                ensure_real_dir_contained(&canonical_root, &dest, &raw_path)?;
                report.directories_created += 1;
            }
            tar::EntryType::Regular => {
                let mode = entry.header().mode().ok();

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                    ensure_real_dir_contained(&canonical_root, parent, &raw_path)?;
                }

                let output = File::create(&dest)?;
                let mut writer = BufWriter::with_capacity(64 * 1024, output);
                let written = std::io::copy(&mut entry, &mut writer)?;
                writer.flush()?;

                set_mode(&dest, mode)?;

                report.files_extracted += 1;
                report.bytes_written += written;
            }
            tar::EntryType::Symlink => {
                let target = entry
                    .link_name()
                    .map_err(|e| {
                        ExpandError::InvalidArchive(format!("invalid symlink target: {e}"))
                    })?
                    .ok_or_else(|| {
                        ExpandError::InvalidArchive(format!(
                            "symlink entry without target: {}",
                            rel.display()
                        ))
                    })?
                    .into_owned();

                paths::contain_link_target(&rel, &target)?;
                create_symlink(&target, &dest)?;
                paths::verify_link_on_disk(&canonical_root, &dest)?;
                created_links.push(dest);
                report.symlinks_created += 1;
            }
            // Pax/global extension headers and exotic types carry no
            // file-tree content for the application.
            _ => {}
        }
    }

    // A link can reference another link that the archive creates later, so
    // every link is re-checked once the tree is complete.
    for link in &created_links {
        paths::verify_link_on_disk(&canonical_root, link)?;
    }

    Ok(report)
}

/// Rejects a destination directory that canonicalizes outside the root,
/// which happens when a path routes through an escaping symlink.
fn ensure_real_dir_contained(root: &Path, dir: &Path, entry: &Path) -> Result<()> {
    let landing = fs::canonicalize(dir)?;
    if landing.starts_with(root) {
        Ok(())
    } else {
        Err(ExpandError::PathTraversal {
            path: entry.to_path_buf(),
        })
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    std::os::unix::fs::symlink(target, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(_target: &Path, dest: &Path) -> Result<()> {
    Err(ExpandError::InvalidArchive(format!(
        "symlinks are not supported on this platform: {}",
        dest.display()
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_extract_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("conf/")
            .add_file("conf/app.yml", b"name: demo")
            .add_file("marker", b"hi")
            .build();

        let report = extract(Cursor::new(data), temp.path()).unwrap();

        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("conf/app.yml")).unwrap(),
            "name: demo"
        );
        assert_eq!(fs::read_to_string(temp.path().join("marker")).unwrap(), "hi");
    }

    #[test]
    fn test_extract_creates_missing_parent_directories() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("a/b/c/deep.txt", b"deep")
            .build();

        extract(Cursor::new(data), temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("a/b/c/deep.txt")).unwrap(),
            "deep"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file_with_mode("bin/run.sh", b"#!/bin/sh\n", 0o755)
            .build();

        extract(Cursor::new(data), temp.path()).unwrap();

        let mode = fs::metadata(temp.path().join("bin/run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_symlink() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("real.txt", b"content")
            .add_symlink("link.txt", "real.txt")
            .build();

        let report = extract(Cursor::new(data), temp.path()).unwrap();

        assert_eq!(report.symlinks_created, 1);
        let link = temp.path().join("link.txt");
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&link).unwrap(), "content");
    }

    #[test]
    fn test_extract_rejects_traversal_entry() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("../outside.txt", b"escape")
            .build();

        let result = extract(Cursor::new(data), temp.path());

        assert!(matches!(result, Err(ExpandError::PathTraversal { .. })));
        assert!(!temp.path().parent().unwrap().join("outside.txt").exists());
    }

    #[test]
    fn test_extract_rejects_escaping_symlink() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_symlink("link", "../../etc/passwd")
            .build();

        let result = extract(Cursor::new(data), temp.path());

        assert!(matches!(result, Err(ExpandError::SymlinkEscape { .. })));
        assert!(!temp.path().join("link").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_rejects_symlink_chain_escape() {
        // d/l -> .. and m -> d/l/.. each pass the lexical component count,
        // but m resolves to the parent of the extraction root.
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("d/")
            .add_symlink("d/l", "..")
            .add_symlink("m", "d/l/..")
            .build();

        let result = extract(Cursor::new(data), temp.path());

        assert!(matches!(result, Err(ExpandError::SymlinkEscape { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_rejects_symlink_chain_created_out_of_order() {
        // The escaping hop appears after the link that routes through it.
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_symlink("m", "d/l/..")
            .add_directory("d/")
            .add_symlink("d/l", "..")
            .build();

        let result = extract(Cursor::new(data), temp.path());

        assert!(matches!(result, Err(ExpandError::SymlinkEscape { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_writes_through_internal_symlinked_directory() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("real/")
            .add_symlink("alias", "real")
            .add_file("alias/note.txt", b"ok")
            .build();

        extract(Cursor::new(data), temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("real/note.txt")).unwrap(),
            "ok"
        );
    }

    #[test]
    fn test_extract_garbage_is_invalid_archive() {
        let temp = TempDir::new().unwrap();
        let result = extract(Cursor::new(vec![0xff; 1024]), temp.path());
        assert!(matches!(result, Err(ExpandError::InvalidArchive(_))));
    }
}
