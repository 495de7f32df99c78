use std::process::ExitCode;

use clap::Parser;
use locsync::cli::report::{Tag, print_status};
use locsync::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match locsync::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            print_status(Tag::Error, &format!("{:#}", err));
            ExitStatus::Error.into()
        }
    }
}
