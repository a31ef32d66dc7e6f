//! Participation detection: find exactly one application archive.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::BuildPlan;
use crate::Result;
use crate::buildplan;
use crate::formats::kind::SUFFIXES;

/// Outcome of the detection step.
///
/// `Fail` is a normal, expected outcome whenever the uniqueness invariant
/// does not hold; it never carries an error. True I/O failures propagate
/// through `Result` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Exactly one archive found; carries the merged build plan.
    Pass(BuildPlan),
    /// Zero or multiple archives found; participation declined.
    Fail,
}

impl Decision {
    /// Returns `true` for a `Pass` decision.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass(_))
    }
}

/// Scans the top level of `root` for application archives and decides
/// participation.
///
/// Only the immediate children of `root` are considered; archives inside
/// subdirectories are invisible to the scan by construction. Candidates
/// are collected in suffix-table order, then sorted file-name order within
/// each suffix. Exactly one candidate yields `Decision::Pass` with the
/// caller's plan merged: the `application-archive` entry gains the
/// candidate's absolute path under the `archive` metadata key (pre-existing
/// metadata is preserved) and a companion `unpacked-application` entry is
/// always provided alongside.
///
/// # Errors
///
/// Returns an error if `root` cannot be read or canonicalized. An
/// unreadable directory is an error, never a `Fail`.
pub fn detect(root: &Path, plan: &BuildPlan) -> Result<Decision> {
    let root = fs::canonicalize(root)?;
    let candidates = scan(&root)?;

    if candidates.len() != 1 {
        return Ok(Decision::Fail);
    }

    let mut merged = plan.clone();

    let entry = merged.entry(buildplan::DEPENDENCY);
    entry.provide(buildplan::DEPENDENCY);
    entry.require(buildplan::DEPENDENCY).metadata.insert(
        buildplan::ARCHIVE.to_string(),
        candidates[0].display().to_string(),
    );

    merged
        .entry(buildplan::APPLICATION)
        .provide(buildplan::APPLICATION);

    Ok(Decision::Pass(merged))
}

/// Collects top-level files whose names tail-match a recognized suffix.
fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        // file_type() does not follow symlinks: a link named like an
        // archive is not itself an archive. Names that are not valid UTF-8
        // cannot match any suffix in the table and are skipped.
        if entry.file_type()?.is_file()
            && let Ok(name) = entry.file_name().into_string()
        {
            names.push(name);
        }
    }
    // Enumeration order must be reproducible within a run.
    names.sort();

    let mut candidates = Vec::new();
    for (suffix, _) in SUFFIXES {
        for name in &names {
            if name.ends_with(suffix) {
                candidates.push(root.join(name));
            }
        }
    }
    Ok(candidates)
}
