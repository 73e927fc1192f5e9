use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a discovery pass.
///
/// Probe failures are deliberately absent: a port that does not answer is a
/// normal outcome and is folded into port resolution as `false`.
#[derive(Debug, Error)]
pub enum Error {
	/// An OS introspection tool could not be run or exited unsuccessfully.
	#[error("{tool} unavailable: {reason}")]
	ToolUnavailable { tool: &'static str, reason: String },

	/// No process listing entry matched the target signature.
	#[error("companion process not found (no `{signature}` process with connection arguments)")]
	NotFound { signature: String },

	/// Tool output had the expected shape marker but could not be parsed.
	#[error("could not parse {tool} output: {reason}")]
	MalformedListing { tool: &'static str, reason: String },

	/// Extraction succeeded but neither a validated nor a declared port exists.
	#[error("no usable API port for process {pid}")]
	NoUsablePort { pid: u32 },
}

impl Error {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound { .. })
	}

	pub(crate) fn not_found(signature: &str) -> Self {
		Error::NotFound {
			signature: signature.to_string(),
		}
	}
}
