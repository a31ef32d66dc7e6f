//! Detect command implementation.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use unfurl_core::BuildPlan;
use unfurl_core::Decision;
use unfurl_core::buildplan::ARCHIVE;
use unfurl_core::buildplan::DEPENDENCY;

use crate::cli::DetectArgs;
use crate::cli::exit;
use crate::output::OutputFormatter;
use crate::plan;

pub fn execute(args: &DetectArgs, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let existing = plan::read_or_default(&args.plan)?;

    let decision = unfurl_core::detect(&args.app_dir, &existing)
        .with_context(|| format!("failed to scan {}", args.app_dir.display()))?;

    match decision {
        Decision::Pass(merged) => {
            plan::write(&args.plan, &merged)?;
            formatter.detection_pass(Path::new(recorded_archive(&merged)), &args.plan)?;
            Ok(ExitCode::from(exit::PASS))
        }
        Decision::Fail => {
            formatter.detection_fail()?;
            Ok(ExitCode::from(exit::FAIL))
        }
    }
}

/// The archive path a Pass decision always records.
fn recorded_archive(merged: &BuildPlan) -> &str {
    merged
        .get(DEPENDENCY)
        .and_then(|entry| entry.requirement(DEPENDENCY))
        .and_then(|req| req.metadata.get(ARCHIVE))
        .map_or("", String::as_str)
}
