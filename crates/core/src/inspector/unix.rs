use super::ProcessInspector;
use crate::descriptor::ConnectionDescriptor;
use crate::error::Result;
use crate::extract;
use crate::ports;
use crate::tool::{ExitPolicy, run_tool};

/// Linux / macOS: `ps` table scan and `lsof` socket listing.
#[derive(Debug, Clone)]
pub struct UnixInspector {
	signature: String,
}

impl UnixInspector {
	pub fn new(signature: impl Into<String>) -> Self {
		Self { signature: signature.into() }
	}
}

impl ProcessInspector for UnixInspector {
	fn name(&self) -> &'static str {
		"unix"
	}

	fn list_processes(&self) -> Result<String> {
		// `ww`: never truncate the command column.
		run_tool("ps", &["auxww"], ExitPolicy::Strict)
	}

	fn extract(&self, raw: &str) -> Result<ConnectionDescriptor> {
		extract::extract_from_table(raw, &self.signature)
	}

	fn listening_ports(&self, pid: u32) -> Result<Vec<u16>> {
		let pid_arg = pid.to_string();
		let output = run_tool(
			"lsof",
			&["-nP", "-a", "-iTCP", "-sTCP:LISTEN", "-p", &pid_arg],
			ExitPolicy::EmptyOnSilentFailure,
		)?;
		Ok(ports::parse_lsof_listening(&output, pid))
	}
}
