use std::time::Instant;

use agcheck::{ConnectionDescriptor, Discovery};
use tracing::{debug, warn};

use super::emit;
use crate::cache::{SnapshotStore, now_ts};
use crate::cli::DiscoverArgs;
use crate::config::CliConfig;
use crate::display;
use crate::error::Result;
use crate::output::{DiagnosticLevel, DiscoverData, OutputFormat, ResultBuilder};

pub fn execute(config: &CliConfig, args: &DiscoverArgs, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let config = config.clone().with_overrides(args.signature.clone(), args.timeout_ms);
	let store = if args.no_cache { None } else { config.cache_path().map(SnapshotStore::new) };

	let mut builder = ResultBuilder::new("discover");
	let data = match Discovery::for_platform(&config.discovery_config()).discover() {
		Ok(connection) => {
			if connection.token_source().is_low_confidence() {
				warn!(source = %connection.token_source(), "no --csrf flag value; token may be wrong or empty");
			}
			if let Some(store) = &store {
				if let Err(e) = store.save(&connection) {
					warn!(path = %store.path().display(), error = %e, "could not cache discovery result");
					builder = builder.diagnostic(DiagnosticLevel::Warning, format!("result not cached: {e}"));
				}
			}
			DiscoverData::live(connection)
		}
		Err(err) if err.is_not_found() => {
			let Some(store) = &store else {
				return Err(err.into());
			};
			match store.load_last_known::<ConnectionDescriptor>() {
				Ok(snapshot) => {
					warn!(error = %err, fetched_at = snapshot.fetched_at, "falling back to last known result");
					builder = builder.diagnostic(DiagnosticLevel::Warning, format!("{err}; showing last known result"));
					DiscoverData::from_snapshot(snapshot, now_ts())
				}
				Err(cache_err) => {
					debug!(error = %cache_err, "no usable snapshot");
					return Err(err.into());
				}
			}
		}
		Err(err) => return Err(err.into()),
	};

	let result = builder.data(data).timings(started.elapsed().into()).build();
	emit(result, format, |data, out| display::render_table(data, args.show_token, out))
}
