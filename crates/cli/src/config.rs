//! `config.json` loading.
//!
//! Every field is optional; a missing file is the same as `{}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use agcheck::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT, DEFAULT_PROCESS_SIGNATURE, DiscoveryConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

const APP_DIR: &str = "agcheck";
const CONFIG_FILE: &str = "config.json";
const CACHE_FILE: &str = "last_known.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
	pub process_signature: String,
	pub probe_timeout_ms: u64,
	pub probe_host: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cache_path: Option<PathBuf>,
}

impl Default for CliConfig {
	fn default() -> Self {
		Self {
			process_signature: DEFAULT_PROCESS_SIGNATURE.to_string(),
			probe_timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
			probe_host: DEFAULT_PROBE_HOST.to_string(),
			cache_path: None,
		}
	}
}

impl CliConfig {
	/// Loads `path`, or the per-user default location when `None`.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path.map(Path::to_path_buf).or_else(default_config_path) {
			Some(path) => Self::load_from(&path),
			None => Ok(Self::default()),
		}
	}

	pub fn load_from(path: &Path) -> Result<Self> {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!(path = %path.display(), "no config file; using defaults");
				return Ok(Self::default());
			}
			Err(e) => return Err(config_error(path, e)),
		};
		serde_json::from_str(&content).map_err(|e| config_error(path, e))
	}

	pub fn with_overrides(mut self, signature: Option<String>, timeout_ms: Option<u64>) -> Self {
		if let Some(signature) = signature {
			self.process_signature = signature;
		}
		if let Some(timeout_ms) = timeout_ms {
			self.probe_timeout_ms = timeout_ms;
		}
		self
	}

	pub fn discovery_config(&self) -> DiscoveryConfig {
		DiscoveryConfig {
			process_signature: self.process_signature.clone(),
			probe_timeout: Duration::from_millis(self.probe_timeout_ms),
			probe_host: self.probe_host.clone(),
		}
	}

	/// Snapshot file location; `None` only when the platform has no cache dir.
	pub fn cache_path(&self) -> Option<PathBuf> {
		self.cache_path.clone().or_else(default_cache_path)
	}
}

pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_cache_path() -> Option<PathBuf> {
	dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(CACHE_FILE))
}

fn config_error(path: &Path, reason: impl ToString) -> CliError {
	CliError::Config {
		path: path.to_path_buf(),
		reason: reason.to_string(),
	}
}
