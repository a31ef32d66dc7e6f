//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

/// Process exit codes forming the pipeline's invocation contract.
pub mod exit {
    /// Participation accepted / contribution succeeded.
    pub const PASS: u8 = 0;
    /// Participation declined; an expected outcome, not an error.
    pub const FAIL: u8 = 100;
    /// Unrecoverable error.
    pub const ERROR: u8 = 101;
}

#[derive(Parser)]
#[command(name = "unfurl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide participation: scan for exactly one application archive
    Detect(DetectArgs),
    /// Expand the archive named by the build plan into the tree root
    Expand(ExpandArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// Root of the application source tree
    #[arg(value_name = "APP_DIR")]
    pub app_dir: PathBuf,

    /// Build plan file shared between contributors
    #[arg(short, long, value_name = "FILE", default_value = "plan.json")]
    pub plan: PathBuf,
}

#[derive(clap::Args)]
pub struct ExpandArgs {
    /// Root of the application source tree
    #[arg(value_name = "APP_DIR")]
    pub app_dir: PathBuf,

    /// Build plan file published by a prior detection
    #[arg(short, long, value_name = "FILE", default_value = "plan.json")]
    pub plan: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}
