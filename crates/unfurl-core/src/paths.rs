//! Entry path containment for archive extraction.
//!
//! Every archive entry path is normalized and verified to stay inside the
//! tree root before anything is written. A violation aborts extraction
//! entirely rather than skipping the offending entry.

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExpandError;
use crate::Result;

/// Normalizes an archive entry path and rejects anything that would escape
/// the tree root.
///
/// Absolute paths, Windows prefixes and parent-directory segments are
/// rejected; `.` components are dropped. The returned path is relative and
/// safe to join onto the tree root.
///
/// # Errors
///
/// Returns `ExpandError::PathTraversal` for absolute paths or paths
/// containing `..` components.
pub fn contain(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ExpandError::PathTraversal {
                    path: path.to_path_buf(),
                });
            }
            Component::CurDir => {}
            Component::Normal(part) => normalized.push(part),
        }
    }

    Ok(normalized)
}

/// Verifies a symlink target cannot resolve outside the tree root.
///
/// The target is interpreted relative to the link's parent directory; each
/// `..` pops one level and the running depth must never go above the root.
/// Absolute targets are rejected outright.
///
/// # Errors
///
/// Returns `ExpandError::SymlinkEscape` naming the link path.
pub fn contain_link_target(link: &Path, target: &Path) -> Result<()> {
    let escape = || ExpandError::SymlinkEscape {
        path: link.to_path_buf(),
    };

    // Depth of the directory containing the link, relative to the root.
    let mut depth = isize::try_from(link.components().count()).unwrap_or(isize::MAX) - 1;

    for component in target.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return Err(escape());
                }
            }
            Component::CurDir => {}
            Component::Normal(_) => depth += 1,
        }
    }

    Ok(())
}

/// Verifies that a symlink already created on disk resolves inside `root`.
///
/// The lexical check in [`contain_link_target`] treats every target
/// component as a real directory, which a chain of links can defeat: a link
/// routed through another link gains extra `..` hops the lexical count
/// never sees. This walk consults the filesystem instead, canonicalizing
/// each target prefix that exists so intermediate links are followed.
/// Components that do not exist yet are resolved lexically; they cannot be
/// followed until something creates them, at which point that link gets its
/// own check.
///
/// `root` must already be canonicalized.
///
/// # Errors
///
/// Returns `ExpandError::SymlinkEscape` when the resolved target leaves
/// `root`, and `ExpandError::Io` if the link or its parent cannot be read.
pub fn verify_link_on_disk(root: &Path, link: &Path) -> Result<()> {
    let escape = || ExpandError::SymlinkEscape {
        path: link.to_path_buf(),
    };

    let parent = match link.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut current = fs::canonicalize(parent)?;
    let target = fs::read_link(link)?;

    for component in target.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !current.pop() {
                    return Err(escape());
                }
            }
            Component::Normal(part) => {
                current.push(part);
                if let Ok(resolved) = fs::canonicalize(&current) {
                    current = resolved;
                }
            }
        }
    }

    if current.starts_with(root) {
        Ok(())
    } else {
        Err(escape())
    }
}
