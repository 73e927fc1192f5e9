//! Listening-port extraction from socket tables.
//!
//! Only rows in a listening state that belong to the requested pid are
//! considered; the result keeps table order without duplicates.

use std::sync::LazyLock;

use regex::Regex;

static LSOF_LISTEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\d+)\s+\(LISTEN\)").unwrap());

/// Parses `lsof -nP -a -iTCP -sTCP:LISTEN -p <pid>` output.
///
/// ```text
/// COMMAND    PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
/// language_ 4242  dev   12u  IPv4 0x1234      0t0  TCP 127.0.0.1:50051 (LISTEN)
/// ```
pub fn parse_lsof_listening(output: &str, pid: u32) -> Vec<u16> {
	let mut ports = Vec::new();
	for line in output.lines() {
		if !line.contains("(LISTEN)") || !column_is_pid(line.split_whitespace().nth(1), pid) {
			continue;
		}
		let port = LSOF_LISTEN_RE
			.captures(line)
			.and_then(|caps| caps.get(1))
			.and_then(|m| m.as_str().parse::<u16>().ok());
		push_unique(&mut ports, port);
	}
	ports
}

/// Parses `netstat -ano` output.
///
/// ```text
///   Proto  Local Address          Foreign Address        State           PID
///   TCP    127.0.0.1:42100        0.0.0.0:0              LISTENING       5120
/// ```
pub fn parse_netstat_listening(output: &str, pid: u32) -> Vec<u16> {
	let mut ports = Vec::new();
	for line in output.lines() {
		let cols: Vec<&str> = line.split_whitespace().collect();
		if cols.len() < 5 || !cols[0].eq_ignore_ascii_case("TCP") || cols[3] != "LISTENING" || !column_is_pid(cols.last().copied(), pid) {
			continue;
		}
		let port = cols[1].rsplit_once(':').and_then(|(_, port)| port.parse::<u16>().ok());
		push_unique(&mut ports, port);
	}
	ports
}

fn column_is_pid(column: Option<&str>, pid: u32) -> bool {
	column.and_then(|c| c.parse::<u32>().ok()) == Some(pid)
}

fn push_unique(ports: &mut Vec<u16>, port: Option<u16>) {
	if let Some(port) = port.filter(|p| *p != 0) {
		if !ports.contains(&port) {
			ports.push(port);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LSOF: &str = "\
COMMAND    PID USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
language_ 4242  dev   12u  IPv4 0x5a1b2c3d4e5f6071      0t0  TCP 127.0.0.1:50051 (LISTEN)
language_ 4242  dev   13u  IPv4 0x5a1b2c3d4e5f6072      0t0  TCP 127.0.0.1:42100 (LISTEN)
language_ 4242  dev   14u  IPv6 0x5a1b2c3d4e5f6073      0t0  TCP [::1]:42100 (LISTEN)
language_ 4242  dev   15u  IPv4 0x5a1b2c3d4e5f6074      0t0  TCP 127.0.0.1:42100->127.0.0.1:61000 (ESTABLISHED)
other     9999  dev    3u  IPv4 0x5a1b2c3d4e5f6075      0t0  TCP *:8080 (LISTEN)
";

	const NETSTAT: &str = "
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1044
  TCP    127.0.0.1:42100        0.0.0.0:0              LISTENING       5120
  TCP    127.0.0.1:42101        0.0.0.0:0              LISTENING       15120
  TCP    127.0.0.1:42102        127.0.0.1:50000        ESTABLISHED     5120
  TCP    [::1]:42103            [::]:0                 LISTENING       5120
  UDP    127.0.0.1:42104        *:*                                    5120
";

	#[test]
	fn lsof_keeps_listening_rows_of_pid() {
		assert_eq!(parse_lsof_listening(LSOF, 4242), vec![50051, 42100]);
	}

	#[test]
	fn lsof_other_pid_is_isolated() {
		assert_eq!(parse_lsof_listening(LSOF, 9999), vec![8080]);
		assert!(parse_lsof_listening(LSOF, 1).is_empty());
	}

	#[test]
	fn netstat_matches_pid_column_exactly() {
		assert_eq!(parse_netstat_listening(NETSTAT, 5120), vec![42100, 42103]);
		assert_eq!(parse_netstat_listening(NETSTAT, 15120), vec![42101]);
	}

	#[test]
	fn empty_output_has_no_candidates() {
		assert!(parse_lsof_listening("", 4242).is_empty());
		assert!(parse_netstat_listening("", 5120).is_empty());
	}
}
