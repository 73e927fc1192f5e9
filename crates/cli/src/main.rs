use std::io::IsTerminal;

use agcheck_cli::cli::Cli;
use agcheck_cli::commands;
use agcheck_cli::error::CliError;
use agcheck_cli::logging;
use agcheck_cli::output::{self, OutputFormat, ResultBuilder};
use clap::Parser;

fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if !std::io::stdout().is_terminal() {
		colored::control::set_override(false);
	}

	let format = cli.format;
	let command = cli.command_name();

	if let Err(err) = commands::dispatch(cli) {
		handle_error(err, command, format);
		std::process::exit(1);
	}
}

fn handle_error(err: CliError, command: &'static str, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	// Humans read stderr; agents read the envelope on stdout.
	output::print_error_stderr(&cmd_error);

	if format == OutputFormat::Json {
		let result: output::CommandResult<()> = ResultBuilder::new(command)
			.error_with_details(cmd_error.code, cmd_error.message, cmd_error.details)
			.build();
		output::print_json(&result);
	}
}
