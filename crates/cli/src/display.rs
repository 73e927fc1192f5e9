//! Human-readable rendering.
//!
//! Every function writes into a caller-supplied [`Write`] so output can be
//! captured in tests. Colour decisions are left to `colored`'s global
//! override, which `main` switches off when stdout is not a terminal.

use std::io::{self, Write};

use agcheck::TokenSource;
use colored::Colorize;

use crate::output::{CacheClearData, DiscoverData, ProbeData};

const RULE_WIDTH: usize = 48;
const LABEL_WIDTH: usize = 15;

pub fn render_table<W: Write>(report: &DiscoverData, show_token: bool, out: &mut W) -> io::Result<()> {
	let conn = &report.connection;
	let rule = "─".repeat(RULE_WIDTH);

	writeln!(out, "{}", "Language server connection".bold().cyan())?;
	writeln!(out, "{rule}")?;

	if let Some(age) = report.age_secs {
		writeln!(out, "{}", format!("⚠ cached data from {} ago", format_age(age)).yellow())?;
		writeln!(out, "{rule}")?;
	}

	row(out, "PID", conn.process_id().to_string())?;
	row(out, "Declared port", port_text(conn.declared_port()))?;
	row(out, "Resolved port", format!("{} ({})", conn.resolved_port(), conn.port_origin()))?;

	let token = match conn.security_token() {
		"" => "(missing)".red().to_string(),
		t if show_token => t.to_string(),
		t => mask_token(t),
	};
	row(out, "Token", token)?;
	row(out, "Token source", conn.token_source().to_string())?;
	writeln!(out, "{rule}")?;

	if conn.token_source() == TokenSource::Heuristic {
		writeln!(
			out,
			"{}",
			"⚠ token found by length heuristic, not a --csrf flag; it may be wrong".yellow()
		)?;
	}
	if report.incomplete {
		writeln!(out, "{}", format!("⚠ incomplete: missing {}", report.missing_fields.join(", ")).red())?;
	}
	Ok(())
}

pub fn render_probe<W: Write>(data: &ProbeData, out: &mut W) -> io::Result<()> {
	let verdict = if data.validated {
		"validated".green()
	} else {
		"not validated".red()
	};
	writeln!(out, "{}  {verdict}", data.url)
}

pub fn render_cache_clear<W: Write>(data: &CacheClearData, out: &mut W) -> io::Result<()> {
	if data.removed {
		writeln!(out, "removed {}", data.path.display())
	} else {
		writeln!(out, "nothing cached at {}", data.path.display())
	}
}

/// Keeps the first and last four characters of long tokens.
pub fn mask_token(token: &str) -> String {
	let chars: Vec<char> = token.chars().collect();
	if chars.len() <= 8 {
		return "*".repeat(chars.len());
	}
	let head: String = chars[..4].iter().collect();
	let tail: String = chars[chars.len() - 4..].iter().collect();
	format!("{head}…{tail}")
}

pub fn format_age(secs: u64) -> String {
	match secs {
		0..60 => format!("{secs}s"),
		60..3600 => format!("{}m", secs / 60),
		3600..86400 => format!("{}h {}m", secs / 3600, secs % 3600 / 60),
		_ => format!("{}d {}h", secs / 86400, secs % 86400 / 3600),
	}
}

fn port_text(port: u16) -> String {
	if port == 0 { "(none)".to_string() } else { port.to_string() }
}

fn row<W: Write>(out: &mut W, label: &str, value: String) -> io::Result<()> {
	writeln!(out, "{label:<LABEL_WIDTH$} {value}")
}
