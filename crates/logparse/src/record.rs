// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Counting and storing decoded records

use serde_json::Value;

use crate::metadata::{MetadataAccumulator, Record};
use crate::timestamp::update_timestamp;
use crate::warning::{ParseWarning, WarningSink};

/// Field whose value feeds the timestamp range.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Count `record`, track its timestamp and keep it. Schema discovery is the
/// caller's job.
pub fn process_record(record: Record, metadata: &mut MetadataAccumulator, sink: &dyn WarningSink) {
    metadata.log_count += 1;

    match record.get(TIMESTAMP_FIELD) {
        Some(Value::String(value)) => update_timestamp(metadata, value, sink),
        Some(other) => sink.warn(ParseWarning::InvalidTimestamp {
            value: other.to_string(),
        }),
        None => {}
    }

    metadata.logs.push(record);
}
