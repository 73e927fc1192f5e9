//! Line-oriented extraction for unfiltered process tables and field lists.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::descriptor_from_command_line;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};

// `Key : value` at column 0, as printed by PowerShell `Format-List`.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)\s*:\s?(.*)$").unwrap());

/// Scans a `ps`-style table and extracts from the first line containing
/// `signature`. Later matches are never consulted.
///
/// The row of the current process is skipped: its own arguments may carry
/// the signature.
pub fn extract_from_table(raw: &str, signature: &str) -> Result<ConnectionDescriptor> {
	scan_table(raw, signature, std::process::id())
}

fn scan_table(raw: &str, signature: &str, own_pid: u32) -> Result<ConnectionDescriptor> {
	let Some(line) = raw
		.lines()
		.find(|line| line.contains(signature) && table_pid(line) != own_pid)
	else {
		return Err(Error::not_found(signature));
	};

	let pid = table_pid(line);
	debug!(pid, "matched process table line");
	descriptor_from_command_line(pid, line, signature)
}

/// PID column of a `ps aux` row (second whitespace-separated column).
fn table_pid(line: &str) -> u32 {
	line.split_whitespace().nth(1).and_then(|col| col.parse().ok()).unwrap_or(0)
}

/// One object of a field-per-record listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
	pub process_id: u32,
	pub command_line: String,
}

/// Reassembles `ProcessId` / `CommandLine` records from field-list output.
///
/// Records are separated by blank lines. A long `CommandLine` value continues
/// on indented lines until the next blank line or unindented field; the
/// fragments are joined with single spaces.
pub fn parse_field_list(raw: &str) -> Vec<FieldRecord> {
	let mut records = Vec::new();
	let mut current: Option<FieldRecord> = None;
	let mut in_command_line = false;

	for line in raw.lines() {
		if line.trim().is_empty() {
			records.extend(current.take());
			in_command_line = false;
			continue;
		}

		if line.starts_with(char::is_whitespace) {
			if in_command_line {
				if let Some(record) = current.as_mut() {
					push_fragment(&mut record.command_line, line.trim());
				}
			}
			continue;
		}

		let Some(caps) = FIELD_RE.captures(line) else {
			in_command_line = false;
			continue;
		};
		let value = caps[2].trim();

		match &caps[1] {
			"ProcessId" => {
				if current.as_ref().is_some_and(|r| r.process_id != 0) {
					records.extend(current.take());
				}
				current.get_or_insert_with(FieldRecord::default).process_id = value.parse().unwrap_or(0);
				in_command_line = false;
			}
			"CommandLine" => {
				let record = current.get_or_insert_with(FieldRecord::default);
				record.command_line.clear();
				push_fragment(&mut record.command_line, value);
				in_command_line = true;
			}
			_ => in_command_line = false,
		}
	}

	records.extend(current);
	records
}

fn push_fragment(buf: &mut String, fragment: &str) {
	if fragment.is_empty() {
		return;
	}
	if !buf.is_empty() {
		buf.push(' ');
	}
	buf.push_str(fragment);
}

/// Extracts from the first field-list record mentioning `signature`.
///
/// Wrapping may split the signature across lines, so the spaces inserted
/// between fragments are ignored when matching.
pub fn extract_from_field_list(raw: &str, signature: &str) -> Result<ConnectionDescriptor> {
	let records = parse_field_list(raw);
	let record = records
		.iter()
		.find(|r| r.command_line.contains(signature) || r.command_line.replace(' ', "").contains(signature))
		.ok_or_else(|| Error::not_found(signature))?;

	debug!(pid = record.process_id, "reassembled field-list record");
	descriptor_from_command_line(record.process_id, &record.command_line, signature)
}
