use std::time::Duration;

/// Substring identifying the companion process in a process listing.
pub const DEFAULT_PROCESS_SIGNATURE: &str = "language_server";

/// Upper bound on a single validation probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Loopback address the companion binds its API to.
pub const DEFAULT_PROBE_HOST: &str = "127.0.0.1";

/// Knobs for one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
	pub process_signature: String,
	pub probe_timeout: Duration,
	pub probe_host: String,
}

impl Default for DiscoveryConfig {
	fn default() -> Self {
		Self {
			process_signature: DEFAULT_PROCESS_SIGNATURE.to_string(),
			probe_timeout: DEFAULT_PROBE_TIMEOUT,
			probe_host: DEFAULT_PROBE_HOST.to_string(),
		}
	}
}
