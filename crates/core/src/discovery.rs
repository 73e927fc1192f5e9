//! One-pass discovery: list, extract, enumerate, probe, fall back.

use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::inspector::{ProcessInspector, platform_inspector};
use crate::probe::{HttpsProbe, PortValidator};

/// Sequences a [`ProcessInspector`] and a [`PortValidator`].
///
/// Holds no state between calls; every [`discover`](Self::discover) is an
/// independent snapshot.
pub struct Discovery {
	inspector: Box<dyn ProcessInspector>,
	validator: Box<dyn PortValidator>,
}

impl Discovery {
	pub fn new(inspector: Box<dyn ProcessInspector>, validator: Box<dyn PortValidator>) -> Self {
		Self { inspector, validator }
	}

	/// Native inspector for this OS and an HTTPS probe.
	pub fn for_platform(config: &DiscoveryConfig) -> Self {
		Self::new(platform_inspector(config), Box::new(HttpsProbe::from_config(config)))
	}

	pub fn discover(&self) -> Result<ConnectionDescriptor> {
		let raw = self.inspector.list_processes()?;
		let descriptor = self.inspector.extract(&raw)?;

		let candidates = match self.inspector.listening_ports(descriptor.process_id()) {
			Ok(ports) => ports,
			Err(e) => {
				warn!(pid = descriptor.process_id(), error = %e, "port enumeration failed; using declared port");
				Vec::new()
			}
		};

		let descriptor = resolve_port(descriptor, &candidates, self.validator.as_ref());
		if descriptor.resolved_port() == 0 {
			return Err(Error::NoUsablePort {
				pid: descriptor.process_id(),
			});
		}

		info!(
			inspector = self.inspector.name(),
			pid = descriptor.process_id(),
			port = descriptor.resolved_port(),
			origin = %descriptor.port_origin(),
			"discovered language server"
		);
		Ok(descriptor)
	}
}

/// Probes `candidates` in order and stops at the first success; otherwise
/// the descriptor keeps its declared port.
pub fn resolve_port(descriptor: ConnectionDescriptor, candidates: &[u16], validator: &dyn PortValidator) -> ConnectionDescriptor {
	for &port in candidates {
		if validator.validate(port, descriptor.security_token()) {
			debug!(port, "candidate port validated");
			return descriptor.with_validated_port(port);
		}
		debug!(port, "candidate port rejected");
	}
	descriptor
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::descriptor::{PortOrigin, TokenSource};
	use crate::extract;

	const LISTING: &str =
		"dev 4242 0.0 0.1 1 1 ? S 00:00 0:00 language_server --extension_server_port 50051 --csrf_token abcDEF123456789012345678901234";

	struct FakeInspector {
		listing: std::result::Result<String, &'static str>,
		ports: std::result::Result<Vec<u16>, &'static str>,
	}

	impl ProcessInspector for FakeInspector {
		fn name(&self) -> &'static str {
			"fake"
		}

		fn list_processes(&self) -> Result<String> {
			self.listing.clone().map_err(|reason| Error::ToolUnavailable {
				tool: "ps",
				reason: reason.to_string(),
			})
		}

		fn extract(&self, raw: &str) -> Result<ConnectionDescriptor> {
			extract::extract_from_table(raw, "language_server")
		}

		fn listening_ports(&self, _pid: u32) -> Result<Vec<u16>> {
			self.ports.clone().map_err(|reason| Error::ToolUnavailable {
				tool: "lsof",
				reason: reason.to_string(),
			})
		}
	}

	/// Accepts only `accept`, records every probed port.
	struct RecordingValidator {
		accept: Option<u16>,
		probed: Rc<RefCell<Vec<(u16, String)>>>,
	}

	impl PortValidator for RecordingValidator {
		fn validate(&self, port: u16, token: &str) -> bool {
			self.probed.borrow_mut().push((port, token.to_string()));
			self.accept == Some(port)
		}
	}

	fn discovery(
		listing: std::result::Result<&str, &'static str>,
		ports: std::result::Result<Vec<u16>, &'static str>,
		accept: Option<u16>,
	) -> (Discovery, Rc<RefCell<Vec<(u16, String)>>>) {
		let probed = Rc::new(RefCell::new(Vec::new()));
		let inspector = FakeInspector {
			listing: listing.map(str::to_string),
			ports,
		};
		let validator = RecordingValidator {
			accept,
			probed: Rc::clone(&probed),
		};
		(Discovery::new(Box::new(inspector), Box::new(validator)), probed)
	}

	#[test]
	fn first_validated_candidate_wins_and_stops_probing() {
		let (discovery, probed) = discovery(Ok(LISTING), Ok(vec![50051, 50052, 50053]), Some(50052));
		let desc = discovery.discover().unwrap();

		assert_eq!(desc.resolved_port(), 50052);
		assert_eq!(desc.declared_port(), 50051);
		assert_eq!(desc.port_origin(), PortOrigin::Validated);
		let ports: Vec<u16> = probed.borrow().iter().map(|(p, _)| *p).collect();
		assert_eq!(ports, vec![50051, 50052]);
	}

	#[test]
	fn probe_carries_extracted_token() {
		let (discovery, probed) = discovery(Ok(LISTING), Ok(vec![50051]), Some(50051));
		discovery.discover().unwrap();
		assert_eq!(probed.borrow()[0].1, "abcDEF123456789012345678901234");
	}

	#[test]
	fn no_candidates_falls_back_without_probing() {
		let (discovery, probed) = discovery(Ok(LISTING), Ok(vec![]), None);
		let desc = discovery.discover().unwrap();

		assert_eq!(desc.resolved_port(), 50051);
		assert_eq!(desc.port_origin(), PortOrigin::Declared);
		assert!(probed.borrow().is_empty());
	}

	#[test]
	fn rejected_candidates_fall_back_to_declared() {
		let (discovery, probed) = discovery(Ok(LISTING), Ok(vec![40000, 40001]), None);
		let desc = discovery.discover().unwrap();
		assert_eq!(desc.resolved_port(), 50051);
		assert_eq!(probed.borrow().len(), 2);
	}

	#[test]
	fn port_enumeration_failure_is_not_fatal() {
		let (discovery, probed) = discovery(Ok(LISTING), Err("lsof missing"), None);
		let desc = discovery.discover().unwrap();
		assert_eq!(desc.resolved_port(), 50051);
		assert!(probed.borrow().is_empty());
	}

	#[test]
	fn listing_failure_is_terminal() {
		let (discovery, _) = discovery(Err("ps missing"), Ok(vec![50051]), Some(50051));
		assert!(matches!(discovery.discover().unwrap_err(), Error::ToolUnavailable { tool: "ps", .. }));
	}

	#[test]
	fn missing_process_is_not_found() {
		let (discovery, probed) = discovery(Ok("root 1 /sbin/init\n"), Ok(vec![50051]), Some(50051));
		assert!(discovery.discover().unwrap_err().is_not_found());
		assert!(probed.borrow().is_empty());
	}

	#[test]
	fn zero_declared_port_without_validation_is_unusable() {
		let listing = "dev 77 0 0 0 0 ? S 0 0 language_server --csrf_token abcDEF123456789012345678901234";
		let (discovery, _) = discovery(Ok(listing), Ok(vec![]), None);
		assert!(matches!(discovery.discover().unwrap_err(), Error::NoUsablePort { pid: 77 }));
	}

	#[test]
	fn zero_declared_port_rescued_by_validated_candidate() {
		let listing = "dev 77 0 0 0 0 ? S 0 0 language_server --csrf_token abcDEF123456789012345678901234";
		let (discovery, _) = discovery(Ok(listing), Ok(vec![41000]), Some(41000));
		let desc = discovery.discover().unwrap();
		assert_eq!(desc.resolved_port(), 41000);
		assert_eq!(desc.token_source(), TokenSource::CsrfFlag);
	}

	#[test]
	fn resolve_port_is_pure() {
		let desc = ConnectionDescriptor::new(1, 50051, "t", TokenSource::CsrfFlag);
		let validator = RecordingValidator {
			accept: Some(50052),
			probed: Rc::default(),
		};
		let a = resolve_port(desc.clone(), &[50051, 50052], &validator);
		let b = resolve_port(desc, &[50051, 50052], &validator);
		assert_eq!(a, b);
	}
}
