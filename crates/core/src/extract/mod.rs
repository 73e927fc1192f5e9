//! Command-line extraction: raw process listing text to [`ConnectionDescriptor`].
//!
//! Two listing shapes are handled:
//! * [`structured`]: a single JSON record with `ProcessId` and `CommandLine`.
//! * [`line_scan`]: an unfiltered table (`ps`) scanned line by line, or a
//!   field-per-record listing whose command line wraps across indented
//!   continuation lines.
//!
//! Both end in [`descriptor_from_command_line`], so the argument patterns in
//! [`patterns`] are shared.

pub mod line_scan;
pub mod patterns;
pub mod structured;

use tracing::debug;

use crate::descriptor::{ConnectionDescriptor, TokenSource};
use crate::error::{Error, Result};

pub use line_scan::{FieldRecord, extract_from_field_list, extract_from_table, parse_field_list};
pub use patterns::TokenMatch;
pub use structured::extract_from_json;

/// Applies the argument patterns to one command line.
///
/// Missing port or token alone is tolerated (zero value); both missing is
/// [`Error::NotFound`].
pub fn descriptor_from_command_line(process_id: u32, command_line: &str, signature: &str) -> Result<ConnectionDescriptor> {
	let port = patterns::declared_port(command_line);
	let token = patterns::security_token(command_line);

	if port == 0 && token.is_none() {
		debug!(process_id, "matched process has neither port nor token arguments");
		return Err(Error::not_found(signature));
	}

	let (value, source) = match token {
		Some(m) => (m.value(), m.source()),
		None => ("", TokenSource::Missing),
	};

	debug!(
		process_id,
		declared_port = port,
		token_source = %source,
		"extracted connection arguments"
	);

	Ok(ConnectionDescriptor::new(process_id, port, value, source))
}
