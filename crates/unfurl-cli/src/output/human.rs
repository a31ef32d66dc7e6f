//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unfurl_core::ExpansionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn checkmark(&self) -> String {
        if self.use_colors {
            format!("{}", style("✓").green().bold())
        } else {
            "✓".to_string()
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn detection_pass(&self, archive: &Path, plan_path: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "{} Application archive detected: {}",
            self.checkmark(),
            archive.display()
        ));
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Plan written to: {}", plan_path.display()));
        }
        Ok(())
    }

    fn detection_fail(&self) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line("Detection failed: expected exactly one archive at the tree root");
        Ok(())
    }

    fn nothing_to_contribute(&self) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line("Nothing to contribute: no plan entry for this contributor");
        Ok(())
    }

    fn expansion_complete(&self, archive: &Path, report: &ExpansionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("{} Expansion complete", self.checkmark()));
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Symlinks: {}", report.symlinks_created));
            let _ = self
                .term
                .write_line(&format!("  Removed source archive: {}", archive.display()));
        }
        Ok(())
    }
}
