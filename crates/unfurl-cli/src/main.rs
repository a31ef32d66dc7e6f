//! Unfurl CLI - detection and expansion steps of the archive-expanding
//! build contributor.

mod cli;
mod commands;
mod error;
mod output;
mod plan;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        cli::Commands::Detect(args) => commands::detect::execute(args, &*formatter),
        cli::Commands::Expand(args) => commands::expand::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|err| {
        eprintln!("Error: {err:#}");
        ExitCode::from(cli::exit::ERROR)
    })
}
