//! Invocation of OS introspection tools (`ps`, `lsof`, `powershell`, `netstat`).

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// How a non-zero exit status is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitPolicy {
	/// Any failure status is a [`Error::ToolUnavailable`].
	Strict,
	/// A failure status with no output means "nothing matched" (lsof exits 1
	/// when a process has no matching sockets).
	EmptyOnSilentFailure,
}

/// Runs `tool` with fixed `args` and returns its stdout, lossily decoded.
pub(crate) fn run_tool(tool: &'static str, args: &[&str], policy: ExitPolicy) -> Result<String> {
	let program = which::which(tool).map_err(|e| Error::ToolUnavailable {
		tool,
		reason: format!("not found on PATH: {e}"),
	})?;

	debug!(tool, path = %program.display(), ?args, "running introspection tool");

	let output = Command::new(&program)
		.args(args)
		.stdin(Stdio::null())
		.output()
		.map_err(|e| Error::ToolUnavailable {
			tool,
			reason: format!("failed to execute {}: {e}", program.display()),
		})?;

	let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
	if output.status.success() {
		return Ok(stdout);
	}

	let stderr = String::from_utf8_lossy(&output.stderr);
	if policy == ExitPolicy::EmptyOnSilentFailure && stdout.trim().is_empty() && stderr.trim().is_empty() {
		debug!(tool, status = %output.status, "tool reported no matches");
		return Ok(String::new());
	}

	Err(Error::ToolUnavailable {
		tool,
		reason: format!("exited with {}: {}", output.status, stderr.trim()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_tool_is_unavailable() {
		let err = run_tool("agcheck-definitely-not-a-real-tool", &[], ExitPolicy::Strict).unwrap_err();
		match err {
			Error::ToolUnavailable { tool, reason } => {
				assert_eq!(tool, "agcheck-definitely-not-a-real-tool");
				assert!(reason.contains("not found"), "reason was {reason}");
			}
			other => panic!("expected ToolUnavailable, got {other:?}"),
		}
	}
}
