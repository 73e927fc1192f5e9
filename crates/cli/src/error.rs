use std::path::PathBuf;

use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Discovery(#[from] agcheck::Error),

	#[error("snapshot cache unavailable: {0}")]
	Cache(String),

	#[error("invalid config {path}: {reason}")]
	Config { path: PathBuf, reason: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl CliError {
	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, message, details) = match self {
			CliError::Discovery(err) => discovery_error(err),
			CliError::Cache(msg) => (ErrorCode::CacheUnavailable, self.to_string(), Some(serde_json::json!({ "reason": msg }))),
			CliError::Config { path, .. } => (ErrorCode::ConfigError, self.to_string(), Some(serde_json::json!({ "path": path }))),
			CliError::Io(err) => (ErrorCode::IoError, err.to_string(), None),
			CliError::Json(err) => (ErrorCode::InternalError, format!("JSON error: {err}"), None),
		};

		CommandError { code, message, details }
	}
}

fn discovery_error(err: &agcheck::Error) -> (ErrorCode, String, Option<serde_json::Value>) {
	let message = err.to_string();
	match err {
		agcheck::Error::NotFound { signature } => (
			ErrorCode::ProcessNotFound,
			message,
			Some(serde_json::json!({ "signature": signature })),
		),
		agcheck::Error::ToolUnavailable { tool, .. } => (ErrorCode::ToolUnavailable, message, Some(serde_json::json!({ "tool": tool }))),
		agcheck::Error::MalformedListing { tool, .. } => (ErrorCode::MalformedListing, message, Some(serde_json::json!({ "tool": tool }))),
		agcheck::Error::NoUsablePort { pid } => (ErrorCode::NoUsablePort, message, Some(serde_json::json!({ "pid": pid }))),
	}
}
