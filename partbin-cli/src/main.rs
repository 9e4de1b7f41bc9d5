use std::process;

use clap::Parser;
use partbin_cli::cli::Cli;
use partbin_cli::commands;
use partbin_cli::error::handle_cli_result;
use partbin_cli::logging::configure_logging;

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);
    tracing::debug!(?cli.command, "starting");

    process::exit(handle_cli_result(commands::run(&cli)));
}
