//! Connection facts recovered by one discovery pass.

use serde::{Deserialize, Serialize};

/// Which pattern produced the security token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
	/// Value of an explicit `--…csrf…` flag.
	CsrfFlag,
	/// Standalone 32-64 character token picked by the fallback heuristic.
	/// May be an unrelated identifier.
	Heuristic,
	/// Nothing matched; the token is empty.
	#[default]
	Missing,
}

impl TokenSource {
	pub fn is_low_confidence(self) -> bool {
		!matches!(self, TokenSource::CsrfFlag)
	}
}

impl std::fmt::Display for TokenSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TokenSource::CsrfFlag => write!(f, "csrf flag"),
			TokenSource::Heuristic => write!(f, "heuristic"),
			TokenSource::Missing => write!(f, "missing"),
		}
	}
}

/// How the resolved port was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortOrigin {
	/// A listening port answered the validation probe.
	Validated,
	/// No candidate answered; the port from the launch arguments is used.
	#[default]
	Declared,
}

impl std::fmt::Display for PortOrigin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PortOrigin::Validated => write!(f, "validated"),
			PortOrigin::Declared => write!(f, "declared"),
		}
	}
}

/// Value snapshot of one discovery attempt.
///
/// There are no setters: [`with_validated_port`](Self::with_validated_port)
/// consumes the descriptor and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
	process_id: u32,
	declared_port: u16,
	resolved_port: u16,
	security_token: String,
	#[serde(default)]
	token_source: TokenSource,
	#[serde(default)]
	port_origin: PortOrigin,
}

impl ConnectionDescriptor {
	/// Descriptor straight out of extraction; the resolved port starts as
	/// the declared one.
	pub fn new(process_id: u32, declared_port: u16, security_token: impl Into<String>, token_source: TokenSource) -> Self {
		Self {
			process_id,
			declared_port,
			resolved_port: declared_port,
			security_token: security_token.into(),
			token_source,
			port_origin: PortOrigin::Declared,
		}
	}

	pub fn with_validated_port(self, port: u16) -> Self {
		Self {
			resolved_port: port,
			port_origin: PortOrigin::Validated,
			..self
		}
	}

	/// Process id; 0 means unknown.
	pub fn process_id(&self) -> u32 {
		self.process_id
	}

	pub fn declared_port(&self) -> u16 {
		self.declared_port
	}

	/// Port callers must use for API calls.
	pub fn resolved_port(&self) -> u16 {
		self.resolved_port
	}

	pub fn security_token(&self) -> &str {
		&self.security_token
	}

	pub fn token_source(&self) -> TokenSource {
		self.token_source
	}

	pub fn port_origin(&self) -> PortOrigin {
		self.port_origin
	}

	/// Soft failure: a field degraded to its zero value during extraction.
	pub fn is_incomplete(&self) -> bool {
		self.declared_port == 0 || self.security_token.is_empty()
	}

	/// Names of the degraded fields, for diagnostics.
	pub fn missing_fields(&self) -> Vec<&'static str> {
		let mut missing = Vec::new();
		if self.process_id == 0 {
			missing.push("processId");
		}
		if self.declared_port == 0 {
			missing.push("declaredPort");
		}
		if self.security_token.is_empty() {
			missing.push("securityToken");
		}
		missing
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_descriptor_resolves_to_declared_port() {
		let desc = ConnectionDescriptor::new(42, 50051, "tok", TokenSource::CsrfFlag);
		assert_eq!(desc.resolved_port(), 50051);
		assert_eq!(desc.port_origin(), PortOrigin::Declared);
		assert!(!desc.is_incomplete());
	}

	#[test]
	fn validated_port_replaces_resolved_port_only() {
		let desc = ConnectionDescriptor::new(42, 50051, "tok", TokenSource::CsrfFlag).with_validated_port(50052);
		assert_eq!(desc.declared_port(), 50051);
		assert_eq!(desc.resolved_port(), 50052);
		assert_eq!(desc.port_origin(), PortOrigin::Validated);
	}

	#[test]
	fn incomplete_when_token_or_port_missing() {
		let no_token = ConnectionDescriptor::new(7, 50051, "", TokenSource::Missing);
		assert!(no_token.is_incomplete());
		assert_eq!(no_token.missing_fields(), vec!["securityToken"]);

		let no_port = ConnectionDescriptor::new(0, 0, "tok", TokenSource::Heuristic);
		assert!(no_port.is_incomplete());
		assert_eq!(no_port.missing_fields(), vec!["processId", "declaredPort"]);
	}

	#[test]
	fn serializes_camel_case_fields() {
		let desc = ConnectionDescriptor::new(1234, 50051, "abc", TokenSource::CsrfFlag);
		let json = serde_json::to_value(&desc).unwrap();
		assert_eq!(json["processId"], 1234);
		assert_eq!(json["resolvedPort"], 50051);
		assert_eq!(json["tokenSource"], "csrf_flag");
		assert_eq!(json["portOrigin"], "declared");
	}

	#[test]
	fn heuristic_and_missing_tokens_are_low_confidence() {
		assert!(!TokenSource::CsrfFlag.is_low_confidence());
		assert!(TokenSource::Heuristic.is_low_confidence());
		assert!(TokenSource::Missing.is_low_confidence());
	}
}
