//! Output formatter trait.

use anyhow::Result;
use std::path::Path;
use unfurl_core::ExpansionReport;

/// Formats the user-visible outcome of each step.
///
/// Implementations decide presentation only; exit codes are the pipeline
/// contract and are handled by the commands themselves.
pub trait OutputFormatter {
    /// Detection passed: `archive` was recorded into the plan at `plan_path`.
    fn detection_pass(&self, archive: &Path, plan_path: &Path) -> Result<()>;

    /// Detection declined participation.
    fn detection_fail(&self) -> Result<()>;

    /// Expansion found no plan entry addressed to this contributor.
    fn nothing_to_contribute(&self) -> Result<()>;

    /// Expansion succeeded.
    fn expansion_complete(&self, archive: &Path, report: &ExpansionReport) -> Result<()>;
}
