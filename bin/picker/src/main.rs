mod cli;
mod commands;
mod error;
mod logger;

use std::process::ExitCode;

use clap::Parser;
use graphql_schema_picker_config::log::LoggingConfig;
use tracing::error;

use crate::{
    cli::{Cli, Command},
    error::PickerCliError,
    logger::configure_logging,
};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Not `err.exit()`: usage errors exit with 1, not clap's 2. A failed
            // print has nowhere else to be reported.
            let _ = err.print();
            // --help and --version end up here too
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let debug = cli.debug;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Failures before the config is loaded have no subscriber yet.
            configure_logging(&LoggingConfig::default(), debug);
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PickerCliError> {
    match cli.command {
        Command::Pick(args) => commands::pick::run(args, cli.dry_run, cli.debug),
    }
}
