mod cache;
mod discover;
mod probe;

use std::io::{self, StdoutLock};

use serde::Serialize;

use crate::cli::{CacheAction, Cli, Commands, DiscoverArgs};
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{self, CommandResult, OutputFormat};

pub fn dispatch(cli: Cli) -> Result<()> {
	let config = CliConfig::load(cli.config.as_deref())?;
	let format = cli.format;

	match cli.command.unwrap_or_else(|| Commands::Discover(DiscoverArgs::default())) {
		Commands::Discover(args) => discover::execute(&config, &args, format),
		Commands::Probe(args) => probe::execute(&config, &args, format),
		Commands::Cache(args) => match args.action {
			CacheAction::Show { show_token } => cache::show(&config, show_token, format),
			CacheAction::Clear => cache::clear(&config, format),
		},
	}
}

/// JSON prints the whole envelope; text renders the data and sends
/// diagnostics to stderr.
fn emit<T: Serialize>(
	result: CommandResult<T>,
	format: OutputFormat,
	render: impl FnOnce(&T, &mut StdoutLock<'static>) -> io::Result<()>,
) -> Result<()> {
	match format {
		OutputFormat::Json => output::print_json(&result),
		OutputFormat::Text => {
			if let Some(data) = &result.data {
				render(data, &mut io::stdout().lock())?;
			}
			output::print_diagnostics_stderr(&result.diagnostics);
		}
	}
	Ok(())
}
