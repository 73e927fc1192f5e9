use super::ProcessInspector;
use crate::descriptor::ConnectionDescriptor;
use crate::error::Result;
use crate::extract;
use crate::ports;
use crate::tool::{ExitPolicy, run_tool};

/// Windows: CIM query through PowerShell and `netstat -ano`.
#[derive(Debug, Clone)]
pub struct WindowsInspector {
	signature: String,
}

impl WindowsInspector {
	pub fn new(signature: impl Into<String>) -> Self {
		Self { signature: signature.into() }
	}

	fn query_script(&self) -> String {
		let signature = self.signature.replace('\'', "''");
		format!(
			"Get-CimInstance Win32_Process | \
			 Where-Object {{ $_.CommandLine -like '*extension_server_port*' -and $_.Name -like '*{signature}*' }} | \
			 Select-Object -First 1 ProcessId, CommandLine | ConvertTo-Json -Compress"
		)
	}
}

impl ProcessInspector for WindowsInspector {
	fn name(&self) -> &'static str {
		"windows"
	}

	fn list_processes(&self) -> Result<String> {
		let script = self.query_script();
		run_tool("powershell", &["-NoProfile", "-NonInteractive", "-Command", &script], ExitPolicy::Strict)
	}

	/// JSON when the output looks like JSON, otherwise a `Format-List` rendering.
	fn extract(&self, raw: &str) -> Result<ConnectionDescriptor> {
		let trimmed = raw.trim_start();
		if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed.starts_with("null") {
			extract::extract_from_json(raw, &self.signature)
		} else {
			extract::extract_from_field_list(raw, &self.signature)
		}
	}

	fn listening_ports(&self, pid: u32) -> Result<Vec<u16>> {
		let output = run_tool("netstat", &["-ano"], ExitPolicy::Strict)?;
		Ok(ports::parse_netstat_listening(&output, pid))
	}
}
