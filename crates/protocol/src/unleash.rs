//! Request shape for the `GetUnleashData` connectivity check.
//!
//! # Wire format
//!
//! ```text
//! POST https://127.0.0.1:<port>/exa.language_server_pb.LanguageServerService/GetUnleashData
//! Content-Type: application/json
//! Connect-Protocol-Version: 1
//! X-Codeium-Csrf-Token: <token>
//!
//! {"context":{"properties":{"ide":"antigravity"}}}
//! ```
//!
//! Any `200 OK` answer means the port serves the language server API.

use serde::{Deserialize, Serialize};

/// Route of the low-privilege diagnostic call.
pub const UNLEASH_ROUTE: &str = "/exa.language_server_pb.LanguageServerService/GetUnleashData";

/// Header carrying the token recovered from the process arguments.
pub const CSRF_TOKEN_HEADER: &str = "X-Codeium-Csrf-Token";

/// Header pinning the Connect protocol revision.
pub const CONNECT_PROTOCOL_VERSION_HEADER: &str = "Connect-Protocol-Version";

/// Only revision the server speaks.
pub const CONNECT_PROTOCOL_VERSION: &str = "1";

/// Caller identity reported in the probe body.
pub const DEFAULT_IDE: &str = "antigravity";

/// Builds the probe URL for `host:port`.
pub fn unleash_url(host: &str, port: u16) -> String {
	format!("https://{host}:{port}{UNLEASH_ROUTE}")
}

/// Body of the `GetUnleashData` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnleashRequest {
	pub context: UnleashContext,
}

/// Feature-flag evaluation context sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnleashContext {
	pub properties: UnleashProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnleashProperties {
	pub ide: String,
}

impl Default for UnleashRequest {
	fn default() -> Self {
		Self {
			context: UnleashContext {
				properties: UnleashProperties { ide: DEFAULT_IDE.to_string() },
			},
		}
	}
}
