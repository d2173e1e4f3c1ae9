use std::process::ExitCode;

use clap::Parser;
use pocheck::cli::{Arguments, ExitStatus, merge_env_options};

fn main() -> ExitCode {
    let argv = merge_env_options(std::env::args().collect());
    let args = Arguments::parse_from(argv);

    match pocheck::cli::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("FATAL: {err:#}");
            ExitStatus::Fatal.into()
        }
    }
}
