//! Extraction from the compact JSON record emitted by `ConvertTo-Json`.

use serde::Deserialize;
use serde_json::Value;

use super::descriptor_from_command_line;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};

/// Subset of `Win32_Process` selected by the PowerShell query.
#[derive(Debug, Default, Deserialize)]
struct ProcessRecord {
	#[serde(rename = "ProcessId", default)]
	process_id: Option<u64>,
	#[serde(rename = "CommandLine", default)]
	command_line: Option<String>,
}

/// Parses `{"ProcessId":…,"CommandLine":"…"}` (or an array of them, first wins).
///
/// Empty output, `null`, or a record without a usable process id is
/// [`Error::NotFound`]; output that is not JSON at all is
/// [`Error::MalformedListing`].
pub fn extract_from_json(raw: &str, signature: &str) -> Result<ConnectionDescriptor> {
	let raw = raw.trim();
	if raw.is_empty() || raw == "null" {
		return Err(Error::not_found(signature));
	}

	let value: Value = serde_json::from_str(raw).map_err(|e| Error::MalformedListing {
		tool: "powershell",
		reason: e.to_string(),
	})?;

	let value = match value {
		Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
		other => other,
	};
	if value.is_null() {
		return Err(Error::not_found(signature));
	}

	let record: ProcessRecord = serde_json::from_value(value).map_err(|e| Error::MalformedListing {
		tool: "powershell",
		reason: e.to_string(),
	})?;

	let pid = record.process_id.and_then(|pid| u32::try_from(pid).ok()).unwrap_or(0);
	if pid == 0 {
		return Err(Error::not_found(signature));
	}

	descriptor_from_command_line(pid, record.command_line.as_deref().unwrap_or_default(), signature)
}
