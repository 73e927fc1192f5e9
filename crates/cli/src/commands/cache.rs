use agcheck::ConnectionDescriptor;

use super::emit;
use crate::cache::{SnapshotStore, now_ts};
use crate::config::CliConfig;
use crate::display;
use crate::error::{CliError, Result};
use crate::output::{CacheClearData, DiscoverData, OutputFormat, ResultBuilder};

pub fn show(config: &CliConfig, show_token: bool, format: OutputFormat) -> Result<()> {
	let snapshot = store(config)?.load_last_known::<ConnectionDescriptor>()?;
	let data = DiscoverData::from_snapshot(snapshot, now_ts());

	let result = ResultBuilder::new("cache show").data(data).build();
	emit(result, format, |data, out| display::render_table(data, show_token, out))
}

pub fn clear(config: &CliConfig, format: OutputFormat) -> Result<()> {
	let store = store(config)?;
	let removed = store.clear()?;
	let data = CacheClearData {
		path: store.path().to_path_buf(),
		removed,
	};

	let result = ResultBuilder::new("cache clear").data(data).build();
	emit(result, format, |data, out| display::render_cache_clear(data, out))
}

fn store(config: &CliConfig) -> Result<SnapshotStore> {
	config
		.cache_path()
		.map(SnapshotStore::new)
		.ok_or_else(|| CliError::Cache("no cache directory on this platform".into()))
}
