//! # wordcloudkit - command-line entry point
//!
//! Loads one table per invocation and runs a single request against one of
//! its columns: list/preview, ranked frequencies, word-cloud input, charts.

mod args;
mod command;

use clap::Parser;

use crate::args::Cli;
use crate::command::{EXIT_SUCCESS, exit_code_for, run};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    std::process::exit(match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    });
}

fn init_logger(verbose: bool) {
    let c_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(c_level)).init();
}
