use std::path::PathBuf;

use agcheck::ConnectionDescriptor;
use serde::{Deserialize, Serialize};

use crate::cache::Snapshot;

/// Discovery report, live or replayed from the snapshot cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverData {
	#[serde(flatten)]
	pub connection: ConnectionDescriptor,
	pub cached: bool,
	/// Unix seconds the cached report was captured at.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fetched_at: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub age_secs: Option<u64>,
	pub incomplete: bool,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub missing_fields: Vec<String>,
}

impl DiscoverData {
	pub fn live(connection: ConnectionDescriptor) -> Self {
		Self::build(connection, None, None)
	}

	pub fn cached(connection: ConnectionDescriptor, fetched_at: u64, now: u64) -> Self {
		Self::build(connection, Some(fetched_at), Some(now.saturating_sub(fetched_at)))
	}

	/// Replayed snapshots are reported with their age; a snapshot that was
	/// just written is reported as live.
	pub fn from_snapshot(snapshot: Snapshot<ConnectionDescriptor>, now: u64) -> Self {
		if snapshot.cached {
			Self::cached(snapshot.data, snapshot.fetched_at, now)
		} else {
			Self::live(snapshot.data)
		}
	}

	fn build(connection: ConnectionDescriptor, fetched_at: Option<u64>, age_secs: Option<u64>) -> Self {
		let missing_fields = connection.missing_fields().into_iter().map(str::to_string).collect();
		Self {
			incomplete: connection.is_incomplete(),
			missing_fields,
			cached: fetched_at.is_some(),
			fetched_at,
			age_secs,
			connection,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeData {
	pub url: String,
	pub port: u16,
	pub validated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearData {
	pub path: PathBuf,
	pub removed: bool,
}
