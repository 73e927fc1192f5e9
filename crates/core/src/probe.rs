//! Live validation of candidate ports.

use std::time::Duration;

use agcheck_protocol::{CONNECT_PROTOCOL_VERSION, CONNECT_PROTOCOL_VERSION_HEADER, CSRF_TOKEN_HEADER, UnleashRequest, unleash_url};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Request};
use tracing::debug;

use crate::config::DiscoveryConfig;

/// Decides whether a port serves the companion API.
///
/// Never errors: an unreachable or wrong port is just `false`.
pub trait PortValidator {
	fn validate(&self, port: u16, token: &str) -> bool;
}

/// One HTTPS `GetUnleashData` call per port, certificate checks disabled
/// (the server presents a self-signed loopback certificate).
///
/// The client is built once and shared by every candidate port.
#[derive(Debug, Clone)]
pub struct HttpsProbe {
	host: String,
	timeout: Duration,
	/// `None` when the TLS client could not be built; every port is then invalid.
	client: Option<Client>,
}

impl HttpsProbe {
	pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
		let client = Client::builder()
			.timeout(timeout)
			.danger_accept_invalid_certs(true)
			.no_proxy()
			.build()
			.map_err(|e| debug!(error = %e, "failed to build probe client"))
			.ok();

		Self {
			host: host.into(),
			timeout,
			client,
		}
	}

	pub fn from_config(config: &DiscoveryConfig) -> Self {
		Self::new(config.probe_host.clone(), config.probe_timeout)
	}

	fn request(client: &Client, url: &str, token: &str) -> reqwest::Result<Request> {
		client
			.post(url)
			.header(CONNECT_PROTOCOL_VERSION_HEADER, CONNECT_PROTOCOL_VERSION)
			.header(CSRF_TOKEN_HEADER, token)
			.json(&UnleashRequest::default())
			.build()
	}
}

/// Only `200 OK` counts; auth failures and other statuses mean a wrong port or token.
fn is_valid_status(status: StatusCode) -> bool {
	status == StatusCode::OK
}

impl PortValidator for HttpsProbe {
	fn validate(&self, port: u16, token: &str) -> bool {
		let Some(client) = &self.client else {
			return false;
		};

		let url = unleash_url(&self.host, port);
		let response = Self::request(client, &url, token).and_then(|req| client.execute(req));

		match response {
			Ok(resp) => {
				let ok = is_valid_status(resp.status());
				debug!(port, status = %resp.status(), validated = ok, "probe answered");
				ok
			}
			Err(e) => {
				debug!(port, error = %e, "probe failed");
				false
			}
		}
	}
}
