//! Zip-container extraction, shared by `.jar`, `.war` and `.zip`.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::ExpandError;
use crate::ExpansionReport;
use crate::Result;
use crate::paths;

/// Reads the zip central directory and materializes every entry under `root`.
///
/// Directory entries are created before the files they contain follow in the
/// directory listing; parent directories are created on demand regardless.
/// Unix permission bits recorded in the archive are preserved.
///
/// # Errors
///
/// Returns `ExpandError::InvalidArchive` if the zip directory cannot be
/// read, `ExpandError::PathTraversal` on containment violations, and
/// `ExpandError::Io` on write failures.
pub fn extract(file: File, root: &Path) -> Result<ExpansionReport> {
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ExpandError::InvalidArchive(format!("failed to open zip directory: {e}")))?;
    let mut report = ExpansionReport::new();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ExpandError::InvalidArchive(format!("failed to read zip entry: {e}")))?;

        // The raw entry name is untrusted; containment normalizes it and
        // rejects absolute paths and parent-directory segments.
        let rel = paths::contain(Path::new(entry.name()))?;
        let dest = root.join(&rel);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            report.directories_created += 1;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            let output = File::create(&dest)?;
            let mut writer = BufWriter::with_capacity(64 * 1024, output);
            let written = std::io::copy(&mut entry, &mut writer)?;
            writer.flush()?;

            set_mode(&dest, entry.unix_mode())?;

            report.files_extracted += 1;
            report.bytes_written += written;
        }
    }

    Ok(report)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
