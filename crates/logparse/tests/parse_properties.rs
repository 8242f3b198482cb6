// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::io::Cursor;

use anyhow::Result;
use logparse::{
    CollectingSink, EmitSink, LogMetadata, ParseOptions, ParseWarning, extract_partition_keys,
    parse_log_file,
};
use serde_json::json;

fn parse(input: &str) -> Result<(LogMetadata, CollectingSink)> {
    let sink = CollectingSink::new();
    let metadata = parse_log_file(Cursor::new(input.as_bytes()), &ParseOptions::default(), &sink)?;
    Ok((metadata, sink))
}

fn generated_lines(n: usize) -> String {
    (0..n)
        .map(|i| {
            json!({
                "timestamp": format!("2024-01-{:02}T08:00:00.{:06}", (i % 28) + 1, i),
                "log_level": (["INFO", "WARNING", "ERROR"][i % 3]),
                "userid": format!("user{i}"),
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bare object lines: one record per line, in input order
#[test]
fn test_count_matches_lines() -> Result<()> {
    let (metadata, sink) = parse(&generated_lines(25))?;

    assert_eq!(metadata.log_count, 25);
    assert_eq!(metadata.logs.len(), 25);
    for (i, log) in metadata.logs.iter().enumerate() {
        assert_eq!(log["userid"], json!(format!("user{i}")));
    }
    assert!(sink.is_empty());
    Ok(())
}

/// N good lines and M bad lines give N records and M warnings
#[test]
fn test_malformed_lines_are_counted_out() -> Result<()> {
    let input = [
        r#"{"a":1}"#,
        r#"{"a":"#,
        r#"{"b":2}"#,
        "garbage",
        r#"{"c":3}"#,
        "}{",
    ]
    .join("\n");

    let (metadata, sink) = parse(&input)?;
    assert_eq!(metadata.log_count, 3);
    assert_eq!(metadata.logs.len() as u64, metadata.log_count);
    assert_eq!(sink.len(), 3);
    assert!(
        sink.warnings()
            .iter()
            .all(|w| matches!(w, ParseWarning::InvalidLine { .. }))
    );
    Ok(())
}

#[test]
fn test_columns_unique_and_cover_every_field() -> Result<()> {
    let input = [
        r#"{"a":1,"b":2}"#,
        r#"{"b":"x","c":null}"#,
        r#"{"logEvents":[{"message":"{\"a\":5,\"d\":[1]}"}]}"#,
        r#"{"e":{"nested":true},"a":0}"#,
    ]
    .join("\n");

    let (metadata, _) = parse(&input)?;
    let names = metadata.column_names();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());

    for log in &metadata.logs {
        for field in log.keys() {
            assert!(unique.contains(field.as_str()), "missing column {field}");
        }
    }
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
    assert!(metadata.columns.iter().all(|c| c.data_type == "string"));
    Ok(())
}

#[test]
fn test_timestamp_bounds() -> Result<()> {
    let input = [
        r#"{"timestamp":"2024-01-01T00:00:00.000000"}"#,
        r#"{"timestamp":"2023-06-15T10:00:00.000000"}"#,
    ]
    .join("\n");

    let (metadata, _) = parse(&input)?;
    assert_eq!(
        metadata.start_timestamp.as_deref(),
        Some("2023-06-15T10:00:00.000000")
    );
    assert_eq!(
        metadata.end_timestamp.as_deref(),
        Some("2024-01-01T00:00:00.000000")
    );
    Ok(())
}

#[test]
fn test_bad_timestamp_record_still_kept() -> Result<()> {
    let input = [
        r#"{"timestamp":"2024-01-01T00:00:00.000000","n":1}"#,
        r#"{"timestamp":"not-a-date","n":2}"#,
    ]
    .join("\n");

    let (metadata, sink) = parse(&input)?;
    assert_eq!(metadata.log_count, 2);
    assert_eq!(metadata.logs[1]["n"], json!(2));
    assert_eq!(
        metadata.start_timestamp.as_deref(),
        Some("2024-01-01T00:00:00.000000")
    );
    assert_eq!(metadata.start_timestamp, metadata.end_timestamp);
    assert_eq!(
        sink.warnings(),
        vec![ParseWarning::InvalidTimestamp {
            value: "not-a-date".to_string()
        }]
    );
    Ok(())
}

#[test]
fn test_no_timestamps_gives_null_bounds() -> Result<()> {
    let (metadata, _) = parse(r#"{"a":1}"#)?;
    assert!(metadata.start_timestamp.is_none());
    assert!(metadata.end_timestamp.is_none());
    Ok(())
}

#[test]
fn test_partition_keys() {
    assert_eq!(
        extract_partition_keys("logs/year=2024/month=01/day=15/file.json"),
        vec!["year", "month", "day"]
    );
    assert!(extract_partition_keys("logs/file.json").is_empty());
}

#[test]
fn test_envelope_yields_nested_records() -> Result<()> {
    let (metadata, _) =
        parse(r#"{"logEvents":[{"message":"{\"a\":1}"}, {"message":"{\"b\":2}"}]}"#)?;
    assert_eq!(metadata.log_count, 2);
    let names = metadata.column_names();
    assert!(names.contains(&"a"));
    assert!(names.contains(&"b"));
    Ok(())
}

#[test]
fn test_reparse_is_deterministic() -> Result<()> {
    let mut input = generated_lines(40);
    input.push_str("\nbroken line\n");
    input.push_str(r#"{"logEvents":[{"message":"{\"extra\":1,\"timestamp\":\"2022-02-02T02:02:02.000000\"}"}]}"#);

    let (first, _) = parse(&input)?;
    let (second, _) = parse(&input)?;

    assert_eq!(first.log_count, second.log_count);
    assert_eq!(first.columns, second.columns);
    assert_eq!(first.start_timestamp, second.start_timestamp);
    assert_eq!(first.end_timestamp, second.end_timestamp);
    assert_eq!(first, second);
    assert_eq!(
        first.start_timestamp.as_deref(),
        Some("2022-02-02T02:02:02.000000")
    );
    Ok(())
}

#[test]
fn test_emit_sink_does_not_interrupt_parsing() -> Result<()> {
    diagnostics::init_diagnostics();
    let metadata = parse_log_file(
        Cursor::new("nope\n{\"timestamp\":\"bad\"}\n"),
        &ParseOptions::default(),
        &EmitSink,
    )?;
    assert_eq!(metadata.log_count, 1);
    Ok(())
}
