// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Per-file metadata: the working accumulator and the finished value

use serde::{Deserialize, Serialize};

use crate::schema::SchemaAccumulator;
use crate::timestamp::TimestampRange;

/// One decoded log record: a JSON object, keys in document order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Every column is registered with this type.
pub const DEFAULT_COLUMN_TYPE: &str = "string";

/// A table column as the catalog expects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub data_type: String,
}

impl Column {
    /// A column of the default type.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DEFAULT_COLUMN_TYPE.to_string(),
        }
    }
}

/// Mutable state owned by a single parse call.
#[derive(Debug, Default)]
pub struct MetadataAccumulator {
    pub(crate) log_count: u64,
    pub(crate) time_range: TimestampRange,
    pub(crate) schema: SchemaAccumulator,
    pub(crate) logs: Vec<Record>,
}

impl MetadataAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log_count(&self) -> u64 {
        self.log_count
    }

    #[must_use]
    pub fn time_range(&self) -> &TimestampRange {
        &self.time_range
    }

    #[must_use]
    pub fn logs(&self) -> &[Record] {
        &self.logs
    }

    pub fn schema_mut(&mut self) -> &mut SchemaAccumulator {
        &mut self.schema
    }

    /// Freeze the accumulator, turning the schema into its column list.
    #[must_use]
    pub fn finish(self) -> LogMetadata {
        LogMetadata {
            log_count: self.log_count,
            start_timestamp: self.time_range.start().map(str::to_string),
            end_timestamp: self.time_range.end().map(str::to_string),
            columns: self.schema.into_columns(),
            logs: self.logs,
            s3_location: None,
            partition_keys: Vec::new(),
        }
    }
}

/// Result of parsing one export file.
///
/// `s3_location` and `partition_keys` are left empty by the parser and filled
/// in by whoever knows where the file came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogMetadata {
    pub log_count: u64,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub logs: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_location: Option<String>,
    #[serde(default)]
    pub partition_keys: Vec<String>,
}

impl LogMetadata {
    /// Column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
