//! Argument patterns applied to a recovered command line.
//!
//! The security token is looked up in two explicit stages. [`csrf_flag_token`]
//! only accepts the value of a `--…csrf…` flag. [`heuristic_token`] is the
//! last resort: any standalone 32-64 character identifier. Callers see which
//! stage matched through [`TokenMatch`].

use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::TokenSource;

static PORT_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--extension_server_port[=\s]+(\d+)").unwrap());

static CSRF_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[a-z_]*csrf[a-z_]*[=\s]+([A-Za-z0-9][A-Za-z0-9_-]*)").unwrap());

// Whole tokens only: bounded by start/end, whitespace, quotes or `=`, and
// never starting with `-` so long flag names are not mistaken for values.
static HEURISTIC_TOKEN_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(?:^|[\s"'=])([A-Za-z0-9_][A-Za-z0-9_-]{31,63})(?:[\s"']|$)"#).unwrap());

/// A token together with the stage that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch<'a> {
	CsrfFlag(&'a str),
	Heuristic(&'a str),
}

impl<'a> TokenMatch<'a> {
	pub fn value(self) -> &'a str {
		match self {
			TokenMatch::CsrfFlag(v) | TokenMatch::Heuristic(v) => v,
		}
	}

	pub fn source(self) -> TokenSource {
		match self {
			TokenMatch::CsrfFlag(_) => TokenSource::CsrfFlag,
			TokenMatch::Heuristic(_) => TokenSource::Heuristic,
		}
	}
}

/// Port from `--extension_server_port`; 0 when absent or out of range.
pub fn declared_port(command_line: &str) -> u16 {
	PORT_FLAG_RE
		.captures(command_line)
		.and_then(|caps| caps.get(1))
		.and_then(|m| m.as_str().parse().ok())
		.unwrap_or(0)
}

pub fn csrf_flag_token(command_line: &str) -> Option<&str> {
	CSRF_FLAG_RE.captures(command_line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

pub fn heuristic_token(command_line: &str) -> Option<&str> {
	HEURISTIC_TOKEN_RE
		.captures(command_line)
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str())
}

/// Primary flag pattern first, heuristic only if that finds nothing.
pub fn security_token(command_line: &str) -> Option<TokenMatch<'_>> {
	csrf_flag_token(command_line)
		.map(TokenMatch::CsrfFlag)
		.or_else(|| heuristic_token(command_line).map(TokenMatch::Heuristic))
}
