use agcheck::{ConnectionDescriptor, TokenSource};

use super::*;
use crate::cache::Snapshot;

fn descriptor() -> ConnectionDescriptor {
	ConnectionDescriptor::new(4242, 50051, "abcDEF123456789012345678901234", TokenSource::CsrfFlag)
}

#[test]
fn result_builder_success() {
	let result: CommandResult<DiscoverData> = ResultBuilder::new("discover").data(DiscoverData::live(descriptor())).build();

	assert!(result.ok);
	assert_eq!(result.command, "discover");
	assert_eq!(result.schema_version, Some(SCHEMA_VERSION));
	assert!(result.data.is_some());
	assert!(result.error.is_none());
}

#[test]
fn result_builder_error() {
	let result: CommandResult<DiscoverData> = ResultBuilder::new("discover")
		.error_with_details(
			ErrorCode::ProcessNotFound,
			"companion process not found",
			Some(serde_json::json!({ "signature": "language_server" })),
		)
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	let error = result.error.as_ref().unwrap();
	assert_eq!(error.code, ErrorCode::ProcessNotFound);
	assert_eq!(error.details.as_ref().unwrap()["signature"], "language_server");
}

#[test]
fn error_code_display_matches_serde() {
	for code in [ErrorCode::ProcessNotFound, ErrorCode::NoUsablePort, ErrorCode::CacheUnavailable] {
		let json = serde_json::to_value(code).unwrap();
		assert_eq!(json, code.to_string());
	}
	assert_eq!(ErrorCode::ToolUnavailable.to_string(), "TOOL_UNAVAILABLE");
}

#[test]
fn envelope_flattens_descriptor_fields() {
	let result: CommandResult<DiscoverData> = ResultBuilder::new("discover")
		.data(DiscoverData::live(descriptor()))
		.timings(Timings { duration_ms: 12 })
		.build();
	let json = serde_json::to_value(&result).unwrap();

	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["processId"], 4242);
	assert_eq!(json["data"]["resolvedPort"], 50051);
	assert_eq!(json["data"]["tokenSource"], "csrf_flag");
	assert_eq!(json["data"]["cached"], false);
	assert!(json["data"].get("fetchedAt").is_none());
	assert_eq!(json["timings"]["durationMs"], 12);
	assert!(json.get("diagnostics").is_none());
}

#[test]
fn cached_report_carries_age() {
	let data = DiscoverData::cached(descriptor(), 1_000, 1_300);
	assert!(data.cached);
	assert_eq!(data.fetched_at, Some(1_000));
	assert_eq!(data.age_secs, Some(300));
}

#[test]
fn snapshot_conversion_follows_cached_flag() {
	let snapshot = |cached| Snapshot {
		schema: 1,
		fetched_at: 1_000,
		data: descriptor(),
		cached,
	};

	let replayed = DiscoverData::from_snapshot(snapshot(true), 1_060);
	assert!(replayed.cached);
	assert_eq!(replayed.age_secs, Some(60));

	let fresh = DiscoverData::from_snapshot(snapshot(false), 1_060);
	assert!(!fresh.cached);
	assert_eq!(fresh.fetched_at, None);
}

#[test]
fn incomplete_report_lists_missing_fields() {
	let data = DiscoverData::live(ConnectionDescriptor::new(7, 50051, "", TokenSource::Missing));
	assert!(data.incomplete);
	assert_eq!(data.missing_fields, vec!["securityToken".to_string()]);
}

#[test]
fn diagnostics_serialize_lowercase_level() {
	let result: CommandResult<()> = ResultBuilder::new("discover")
		.diagnostic(DiagnosticLevel::Warning, "showing cached data")
		.build();
	let json = serde_json::to_value(&result).unwrap();
	assert_eq!(json["diagnostics"][0]["level"], "warning");
}
