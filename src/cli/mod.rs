//! Command-line layer: argument parsing, the run pipeline and terminal output.

use anyhow::Result;
use colored::Colorize;

mod args;
mod exit_status;
pub mod report;
pub mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    report::configure_colors();
    let verbose = args.verbose;
    let summary = run::run(args)?;
    if verbose {
        eprintln!("{} {}", "run:".dimmed(), report::run_details(&summary));
    }
    Ok(ExitStatus::Success)
}
