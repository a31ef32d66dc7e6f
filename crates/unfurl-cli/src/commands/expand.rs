//! Expand command implementation.

use std::process::ExitCode;

use anyhow::Result;
use unfurl_core::Expander;

use crate::cli::ExpandArgs;
use crate::cli::exit;
use crate::error::convert_expand_error;
use crate::output::OutputFormatter;
use crate::plan;

pub fn execute(args: &ExpandArgs, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let plan = plan::read_or_default(&args.plan)?;

    let resolved = Expander::resolve(&args.app_dir, &plan)
        .map_err(|e| convert_expand_error(e, &args.app_dir))?;

    let Some(expander) = resolved else {
        formatter.nothing_to_contribute()?;
        return Ok(ExitCode::from(exit::FAIL));
    };

    let archive = expander.archive().to_path_buf();
    let report = expander
        .contribute()
        .map_err(|e| convert_expand_error(e, &args.app_dir))?;

    formatter.expansion_complete(&archive, &report)?;
    Ok(ExitCode::from(exit::PASS))
}
