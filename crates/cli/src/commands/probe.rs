use std::time::Instant;

use agcheck::{HttpsProbe, PortValidator};
use agcheck_protocol::unleash_url;

use super::emit;
use crate::cli::ProbeArgs;
use crate::config::CliConfig;
use crate::display;
use crate::error::Result;
use crate::output::{OutputFormat, ProbeData, ResultBuilder};

/// A port that does not answer is a normal `validated: false`, not an error.
pub fn execute(config: &CliConfig, args: &ProbeArgs, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let discovery = config.clone().with_overrides(None, args.timeout_ms).discovery_config();

	let validated = HttpsProbe::from_config(&discovery).validate(args.port, &args.token);
	let data = ProbeData {
		url: unleash_url(&discovery.probe_host, args.port),
		port: args.port,
		validated,
	};

	let result = ResultBuilder::new("probe").data(data).timings(started.elapsed().into()).build();
	emit(result, format, |data, out| display::render_probe(data, out))
}
