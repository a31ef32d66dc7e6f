//! JSON output formatter for machine consumption.

use super::formatter::OutputFormatter;
use anyhow::Result;
use serde_json::json;
use std::path::Path;
use unfurl_core::ExpansionReport;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn detection_pass(&self, archive: &Path, plan_path: &Path) -> Result<()> {
        let output = json!({
            "status": "pass",
            "archive": archive.display().to_string(),
            "plan": plan_path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn detection_fail(&self) -> Result<()> {
        let output = json!({
            "status": "fail",
            "reason": "expected exactly one archive at the tree root",
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn nothing_to_contribute(&self) -> Result<()> {
        let output = json!({
            "status": "fail",
            "reason": "no plan entry for this contributor",
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn expansion_complete(&self, archive: &Path, report: &ExpansionReport) -> Result<()> {
        let output = json!({
            "status": "success",
            "archive": archive.display().to_string(),
            "files_extracted": report.files_extracted,
            "directories_created": report.directories_created,
            "symlinks_created": report.symlinks_created,
            "bytes_written": report.bytes_written,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
