
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Locate the local language server and recover its API port and CSRF token.
#[derive(Parser, Debug)]
#[command(name = "agcheck")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: text (default) or json
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// Config file (defaults to <config dir>/agcheck/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Defaults to `discover`
	#[command(subcommand)]
	pub command: Option<Commands>,
}

impl Cli {
	/// Name used in the result envelope.
	pub fn command_name(&self) -> &'static str {
		match &self.command {
			None | Some(Commands::Discover(_)) => "discover",
			Some(Commands::Probe(_)) => "probe",
			Some(Commands::Cache(args)) => match args.action {
				CacheAction::Show { .. } => "cache show",
				CacheAction::Clear => "cache clear",
			},
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Find the language server, its port and CSRF token.
	Discover(DiscoverArgs),
	/// Send one connectivity check to a port.
	Probe(ProbeArgs),
	/// Inspect or clear the last-known snapshot.
	Cache(CacheArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DiscoverArgs {
	/// Neither read nor write the last-known snapshot
	#[arg(long)]
	pub no_cache: bool,

	/// Print the CSRF token unmasked
	#[arg(long)]
	pub show_token: bool,

	/// Per-probe timeout in milliseconds
	#[arg(long, value_name = "MS")]
	pub timeout_ms: Option<u64>,

	/// Process name substring to look for
	#[arg(long, value_name = "NAME")]
	pub signature: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
	#[arg(long)]
	pub port: u16,

	/// CSRF token sent with the probe
	#[arg(long, default_value = "")]
	pub token: String,

	/// Probe timeout in milliseconds
	#[arg(long, value_name = "MS")]
	pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
	#[command(subcommand)]
	pub action: CacheAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
	/// Print the last-known discovery report.
	Show {
		/// Print the CSRF token unmasked
		#[arg(long)]
		show_token: bool,
	},
	/// Delete the last-known discovery report.
	Clear,
}
