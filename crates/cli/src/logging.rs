//! stderr diagnostics for the `agcheck` binary.
//!
//! Discovery logs under the `agcheck` target (core) and `agcheck_cli`
//! (this crate). HTTP and TLS internals stay quiet unless `RUST_LOG` asks.

use tracing_subscriber::EnvFilter;

const QUIET_DEPENDENCIES: &str = "hyper_util=warn,rustls=warn,reqwest=warn";

/// Directives for `-v` count `verbosity`; a set `RUST_LOG` replaces them.
fn default_directives(verbosity: u8) -> String {
	match verbosity {
		0 => "error".to_string(),
		1 => format!("warn,agcheck=info,agcheck_cli=info,{QUIET_DEPENDENCIES}"),
		_ => format!("debug,{QUIET_DEPENDENCIES}"),
	}
}

pub fn init_logging(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.without_time()
		.compact()
		.init();
}
