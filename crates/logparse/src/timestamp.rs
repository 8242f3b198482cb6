// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Tracking the earliest and latest record timestamp

use chrono::NaiveDateTime;

use crate::metadata::MetadataAccumulator;
use crate::warning::{ParseWarning, WarningSink};

/// `YYYY-MM-DDTHH:MM:SS.ffffff`, exactly six fractional digits, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Parse a record timestamp with [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    raw: String,
    at: NaiveDateTime,
}

/// Min/max over parsed timestamps, remembering the original strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampRange {
    start: Option<Bound>,
    end: Option<Bound>,
}

impl TimestampRange {
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.start.as_ref().map(|b| b.raw.as_str())
    }

    #[must_use]
    pub fn end(&self) -> Option<&str> {
        self.end.as_ref().map(|b| b.raw.as_str())
    }

    /// Widen the range to include `value`. Returns false, leaving the range
    /// untouched, when `value` does not parse.
    pub fn observe(&mut self, value: &str) -> bool {
        let Some(at) = parse_timestamp(value) else {
            return false;
        };

        // Strict comparisons: an equal value never replaces a bound.
        if self.start.as_ref().is_none_or(|b| at < b.at) {
            self.start = Some(Bound {
                raw: value.to_string(),
                at,
            });
        }
        if self.end.as_ref().is_none_or(|b| at > b.at) {
            self.end = Some(Bound {
                raw: value.to_string(),
                at,
            });
        }
        true
    }
}

/// Fold one candidate timestamp into the accumulator, warning when it does
/// not parse.
pub fn update_timestamp(metadata: &mut MetadataAccumulator, value: &str, sink: &dyn WarningSink) {
    if !metadata.time_range.observe(value) {
        sink.warn(ParseWarning::InvalidTimestamp {
            value: value.to_string(),
        });
    }
}
