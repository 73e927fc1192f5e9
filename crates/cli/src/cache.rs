//! Last-known snapshot persistence.
//!
//! A [`Snapshot`] wraps any serializable payload with a schema number and the
//! unix time it was captured. Snapshots older than [`MAX_SNAPSHOT_AGE`] are
//! refused on load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

pub const SNAPSHOT_SCHEMA: u32 = 1;

pub const MAX_SNAPSHOT_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
	pub schema: u32,
	/// Unix seconds.
	pub fetched_at: u64,
	pub data: T,
	/// Set when the snapshot came from disk rather than a fresh capture.
	#[serde(skip)]
	pub cached: bool,
}

impl<T> Snapshot<T> {
	pub fn age_secs(&self, now: u64) -> u64 {
		now.saturating_sub(self.fetched_at)
	}

	pub fn is_stale(&self, max_age: Duration, now: u64) -> bool {
		self.age_secs(now) > max_age.as_secs()
	}
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
	path: PathBuf,
}

impl SnapshotStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Writes `data` stamped with the current time; returns that stamp.
	pub fn save<T: Serialize>(&self, data: &T) -> Result<u64> {
		self.save_at(data, now_ts())
	}

	pub(crate) fn save_at<T: Serialize>(&self, data: &T, fetched_at: u64) -> Result<u64> {
		let snapshot = Snapshot {
			schema: SNAPSHOT_SCHEMA,
			fetched_at,
			data,
			cached: false,
		};

		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&self.path, serde_json::to_string_pretty(&snapshot)?)?;

		// Payload includes the CSRF token.
		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
		}

		debug!(path = %self.path.display(), fetched_at, "saved snapshot");
		Ok(fetched_at)
	}

	pub fn load_last_known<T: DeserializeOwned>(&self) -> Result<Snapshot<T>> {
		self.load_at(now_ts())
	}

	pub(crate) fn load_at<T: DeserializeOwned>(&self, now: u64) -> Result<Snapshot<T>> {
		let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
			ErrorKind::NotFound => CliError::Cache(format!("no snapshot at {}", self.path.display())),
			_ => CliError::Cache(format!("cannot read {}: {e}", self.path.display())),
		})?;

		let mut snapshot: Snapshot<T> =
			serde_json::from_str(&content).map_err(|e| CliError::Cache(format!("corrupt snapshot {}: {e}", self.path.display())))?;

		if snapshot.schema != SNAPSHOT_SCHEMA {
			return Err(CliError::Cache(format!("unsupported snapshot schema {}", snapshot.schema)));
		}
		if snapshot.is_stale(MAX_SNAPSHOT_AGE, now) {
			return Err(CliError::Cache(format!("snapshot is {}s old", snapshot.age_secs(now))));
		}

		snapshot.cached = true;
		Ok(snapshot)
	}

	/// Removes the snapshot file; returns whether one existed.
	pub fn clear(&self) -> Result<bool> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
			Err(e) => Err(e.into()),
		}
	}
}

pub fn now_ts() -> u64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

#[cfg(test)]
mod tests {
	use agcheck::{ConnectionDescriptor, TokenSource};
	use tempfile::TempDir;

	use super::*;

	fn store(dir: &TempDir) -> SnapshotStore {
		SnapshotStore::new(dir.path().join("nested").join("last_known.json"))
	}

	fn descriptor() -> ConnectionDescriptor {
		ConnectionDescriptor::new(4242, 50051, "abcDEF123456789012345678901234", TokenSource::CsrfFlag).with_validated_port(50052)
	}

	#[test]
	fn save_then_load_marks_cached() {
		let dir = TempDir::new().unwrap();
		let store = store(&dir);

		store.save_at(&descriptor(), 1_000).unwrap();
		let snapshot: Snapshot<ConnectionDescriptor> = store.load_at(1_060).unwrap();

		assert!(snapshot.cached);
		assert_eq!(snapshot.fetched_at, 1_000);
		assert_eq!(snapshot.age_secs(1_060), 60);
		assert_eq!(snapshot.data, descriptor());
	}

	#[test]
	fn missing_file_is_cache_error() {
		let dir = TempDir::new().unwrap();
		let err = store(&dir).load_last_known::<ConnectionDescriptor>().unwrap_err();
		assert!(matches!(err, CliError::Cache(msg) if msg.starts_with("no snapshot")));
	}

	#[test]
	fn stale_snapshot_is_refused() {
		let dir = TempDir::new().unwrap();
		let store = store(&dir);
		store.save_at(&descriptor(), 1_000).unwrap();

		let day = MAX_SNAPSHOT_AGE.as_secs();
		assert!(store.load_at::<ConnectionDescriptor>(1_000 + day).is_ok());
		assert!(matches!(store.load_at::<ConnectionDescriptor>(1_001 + day), Err(CliError::Cache(_))));
	}

	#[test]
	fn corrupt_snapshot_is_cache_error() {
		let dir = TempDir::new().unwrap();
		let store = store(&dir);
		fs::create_dir_all(store.path().parent().unwrap()).unwrap();
		fs::write(store.path(), "{\"schema\":1").unwrap();

		assert!(matches!(store.load_last_known::<ConnectionDescriptor>(), Err(CliError::Cache(_))));
	}

	#[test]
	fn clear_is_idempotent() {
		let dir = TempDir::new().unwrap();
		let store = store(&dir);
		store.save(&descriptor()).unwrap();

		assert!(store.clear().unwrap());
		assert!(!store.clear().unwrap());
		assert!(!store.path().exists());
	}

	#[cfg(unix)]
	#[test]
	fn snapshot_is_owner_only() {
		use std::os::unix::fs::PermissionsExt;

		let dir = TempDir::new().unwrap();
		let store = store(&dir);
		store.save(&descriptor()).unwrap();

		let mode = fs::metadata(store.path()).unwrap().permissions().mode();
		assert_eq!(mode & 0o777, 0o600);
	}
}
