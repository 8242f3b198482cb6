// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Log export parsing and schema inference
//!
//! Turns one newline-delimited JSON export file into [`LogMetadata`]: the
//! record count, the earliest and latest `timestamp`, a flat all-string
//! column list and the decoded records themselves.
//!
//! # Components
//!
//! - [`extract_partition_keys`]: `name=value` segment names of an object key
//! - [`update_timestamp`]: min/max tracking over the fixed timestamp format
//! - [`analyze_record`]: first-seen column discovery
//! - [`process_record`]: counting and storing one record
//! - [`parse_log_file`]: the line-by-line driver
//!
//! Recoverable problems are reported through an injected [`WarningSink`].

mod error;
mod metadata;
mod parser;
mod partition;
mod record;
mod schema;
mod timestamp;
mod warning;

pub use error::ParseError;
pub use metadata::{Column, DEFAULT_COLUMN_TYPE, LogMetadata, MetadataAccumulator, Record};
pub use parser::{
    ENVELOPE_FIELD, EnvelopePolicy, MESSAGE_FIELD, ParseOptions, parse_log_bytes, parse_log_file,
};
pub use partition::extract_partition_keys;
pub use record::{TIMESTAMP_FIELD, process_record};
pub use schema::{SchemaAccumulator, analyze_record};
pub use timestamp::{TIMESTAMP_FORMAT, TimestampRange, parse_timestamp, update_timestamp};
pub use warning::{CollectingSink, EmitSink, ParseWarning, TeeSink, WarningSink};

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;
