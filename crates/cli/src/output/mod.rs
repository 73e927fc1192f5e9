//! Structured output envelope for all CLI commands.
//!
//! In JSON mode every command produces a result envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "discover",
//!   "data": { "processId": 4242, "resolvedPort": 50052, ... },
//!   "timings": { "durationMs": 412 }
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "discover",
//!   "error": {
//!     "code": "PROCESS_NOT_FOUND",
//!     "message": "companion process not found ...",
//!     "details": { "signature": "language_server" }
//!   }
//! }
//! ```

mod data;
#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use data::{CacheClearData, DiscoverData, ProbeData};

/// Current schema version for command output.
///
/// Increment this when making breaking changes to the output structure.
pub const SCHEMA_VERSION: u32 = 1;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Human-readable table
	#[default]
	Text,
	/// JSON result envelope
	Json,
}

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,

	pub ok: bool,

	/// Command name (`discover`, `probe`, `cache show`, `cache clear`)
	pub command: String,

	/// Command-specific result data (only present on success)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	/// Error information (only present on failure)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,

	/// Warnings that did not stop the command (cache fallback, heuristic token)
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub diagnostics: Vec<Diagnostic>,
}

/// Error information for failed commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,

	/// Human-readable error message
	pub message: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Standardized error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// No process matched the target signature
	ProcessNotFound,
	/// `ps`, `lsof`, `netstat` or PowerShell could not be run
	ToolUnavailable,
	/// Extraction succeeded but no port could be resolved
	NoUsablePort,
	/// Tool output could not be parsed
	MalformedListing,
	/// Snapshot cache missing, stale, or unreadable
	CacheUnavailable,
	/// Config file unreadable or invalid
	ConfigError,
	IoError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::ProcessNotFound => write!(f, "PROCESS_NOT_FOUND"),
			ErrorCode::ToolUnavailable => write!(f, "TOOL_UNAVAILABLE"),
			ErrorCode::NoUsablePort => write!(f, "NO_USABLE_PORT"),
			ErrorCode::MalformedListing => write!(f, "MALFORMED_LISTING"),
			ErrorCode::CacheUnavailable => write!(f, "CACHE_UNAVAILABLE"),
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings {
			duration_ms: duration.as_millis() as u64,
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
	pub level: DiagnosticLevel,
	pub message: String,
}

/// Severity on the wire. Failures go in `error`, so only warnings remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	Warning,
}

impl std::fmt::Display for DiagnosticLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DiagnosticLevel::Warning => write!(f, "warning"),
		}
	}
}

/// Builder for [`CommandResult`].
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	timings: Option<Timings>,
	diagnostics: Vec<Diagnostic>,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			timings: None,
			diagnostics: Vec::new(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error_with_details(mut self, code: ErrorCode, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
			details,
		});
		self
	}

	pub fn diagnostic(mut self, level: DiagnosticLevel, message: impl Into<String>) -> Self {
		self.diagnostics.push(Diagnostic {
			level,
			message: message.into(),
		});
		self
	}

	pub fn timings(mut self, timings: Timings) -> Self {
		self.timings = Some(timings);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			schema_version: Some(SCHEMA_VERSION),
			ok: self.error.is_none(),
			command: self.command,
			data: self.data,
			error: self.error,
			timings: self.timings,
			diagnostics: self.diagnostics,
		}
	}
}

/// Print a command result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(result: &CommandResult<T>) {
	if let Ok(json) = serde_json::to_string_pretty(result) {
		println!("{json}");
	}
}

/// Print diagnostics to stderr (text mode; JSON mode embeds them).
pub fn print_diagnostics_stderr(diagnostics: &[Diagnostic]) {
	for diag in diagnostics {
		eprintln!("{}: {}", diag.level, diag.message);
	}
}

/// Print an error to stderr in a human-friendly way
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
