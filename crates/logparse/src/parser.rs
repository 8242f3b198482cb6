// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Single pass over a newline-delimited export file
//!
//! Each line is one JSON document. A line that is an export envelope carries
//! its records inside `logEvents[*].message` as JSON-encoded strings; any
//! other object line is a record by itself. Lines that don't decode are
//! reported to the [`WarningSink`] and skipped.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::ParseError;
use crate::metadata::{LogMetadata, MetadataAccumulator, Record};
use crate::record::process_record;
use crate::schema::analyze_record;
use crate::warning::{ParseWarning, WarningSink};

/// Envelope field holding the event array.
pub const ENVELOPE_FIELD: &str = "logEvents";

/// Event field holding the JSON-encoded record.
pub const MESSAGE_FIELD: &str = "message";

/// What to do with an envelope event whose message can't be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopePolicy {
    /// Warn and continue with the next event.
    #[default]
    Skip,
    /// Abort the whole file with [`ParseError::EnvelopeEvent`].
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub envelope_policy: EnvelopePolicy,
}

impl ParseOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            envelope_policy: EnvelopePolicy::Strict,
        }
    }
}

/// Parse an export file into [`LogMetadata`].
///
/// The reader is consumed once, front to back. Only I/O failures (including
/// invalid UTF-8) and, under [`EnvelopePolicy::Strict`], bad envelope events
/// are errors.
pub fn parse_log_file<R: BufRead>(
    reader: R,
    options: &ParseOptions,
    sink: &dyn WarningSink,
) -> Result<LogMetadata> {
    let mut metadata = MetadataAccumulator::new();
    let mut line_count: u64 = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        line_count += 1;

        let value: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                sink.warn(ParseWarning::InvalidLine {
                    line_number,
                    line,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let Value::Object(object) = value else {
            sink.warn(ParseWarning::NotAnObject { line_number, line });
            continue;
        };

        if object.contains_key(ENVELOPE_FIELD) {
            let events = &object[ENVELOPE_FIELD];
            ingest_envelope(events, line_number, &mut metadata, options, sink)?;
        } else {
            ingest(object, &mut metadata, sink);
        }
    }

    diagnostics::log_debug!(
        "Parsed {lines} lines into {records} records",
        lines: line_count,
        records: metadata.log_count()
    );

    Ok(metadata.finish())
}

/// [`parse_log_file`] over an in-memory buffer.
pub fn parse_log_bytes(
    data: &[u8],
    options: &ParseOptions,
    sink: &dyn WarningSink,
) -> Result<LogMetadata> {
    parse_log_file(data, options, sink)
}

fn ingest(record: Record, metadata: &mut MetadataAccumulator, sink: &dyn WarningSink) {
    analyze_record(&record, metadata.schema_mut());
    process_record(record, metadata, sink);
}

fn ingest_envelope(
    events: &Value,
    line_number: usize,
    metadata: &mut MetadataAccumulator,
    options: &ParseOptions,
    sink: &dyn WarningSink,
) -> Result<()> {
    let Value::Array(events) = events else {
        return reject(
            options,
            sink,
            line_number,
            0,
            format!("{ENVELOPE_FIELD} is not an array"),
        );
    };

    for (index, event) in events.iter().enumerate() {
        match decode_event(event) {
            Ok(record) => ingest(record, metadata, sink),
            Err(reason) => reject(options, sink, line_number, index, reason)?,
        }
    }
    Ok(())
}

fn decode_event(event: &Value) -> std::result::Result<Record, String> {
    let Some(message) = event.get(MESSAGE_FIELD) else {
        return Err(format!("missing {MESSAGE_FIELD} field"));
    };
    let Value::String(text) = message else {
        return Err(format!("{MESSAGE_FIELD} is not a string"));
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(format!("{MESSAGE_FIELD} is not a JSON object: {other}")),
        Err(e) => Err(format!("invalid JSON in {MESSAGE_FIELD}: {e}")),
    }
}

fn reject(
    options: &ParseOptions,
    sink: &dyn WarningSink,
    line_number: usize,
    index: usize,
    reason: String,
) -> Result<()> {
    match options.envelope_policy {
        EnvelopePolicy::Skip => {
            sink.warn(ParseWarning::InvalidEnvelopeEvent {
                line_number,
                index,
                reason,
            });
            Ok(())
        }
        EnvelopePolicy::Strict => Err(ParseError::EnvelopeEvent {
            line_number,
            index,
            reason,
        }),
    }
}
