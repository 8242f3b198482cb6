// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Injected reporting for recoverable parse problems
//!
//! The parser never logs directly. Every component that can skip input takes
//! a `&dyn WarningSink` and reports what it skipped through it, so callers
//! decide whether warnings go to the process log, into a test buffer, or both.

use std::fmt;
use std::sync::Mutex;

/// Something the parser skipped or ignored while continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A line that is not valid JSON.
    InvalidLine {
        line_number: usize,
        line: String,
        error: String,
    },
    /// A line that is valid JSON but not an object.
    NotAnObject { line_number: usize, line: String },
    /// An envelope event whose embedded message could not be used.
    InvalidEnvelopeEvent {
        line_number: usize,
        index: usize,
        reason: String,
    },
    /// A `timestamp` value that does not match the fixed format.
    InvalidTimestamp { value: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine {
                line_number,
                line,
                error,
            } => write!(f, "Skipping invalid JSON line {line_number}: {line} ({error})"),
            Self::NotAnObject { line_number, line } => {
                write!(f, "Skipping non-object JSON line {line_number}: {line}")
            }
            Self::InvalidEnvelopeEvent {
                line_number,
                index,
                reason,
            } => write!(
                f,
                "Skipping envelope event {index} on line {line_number}: {reason}"
            ),
            Self::InvalidTimestamp { value } => write!(f, "Invalid timestamp format: {value}"),
        }
    }
}

/// Receiver for [`ParseWarning`]s.
pub trait WarningSink: Send + Sync {
    fn warn(&self, warning: ParseWarning);
}

/// Forwards warnings to the process log at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmitSink;

impl WarningSink for EmitSink {
    fn warn(&self, warning: ParseWarning) {
        let text = warning.to_string();
        diagnostics::log_warn!("{warning}", warning: text.as_str());
    }
}

/// Keeps every warning in memory, in the order reported.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<ParseWarning>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> Vec<ParseWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, warning: ParseWarning) {
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning),
            Err(poisoned) => poisoned.into_inner().push(warning),
        }
    }
}

/// Fan a warning out to two sinks, e.g. the log and a collector.
pub struct TeeSink<'a> {
    first: &'a dyn WarningSink,
    second: &'a dyn WarningSink,
}

impl<'a> TeeSink<'a> {
    pub fn new(first: &'a dyn WarningSink, second: &'a dyn WarningSink) -> Self {
        Self { first, second }
    }
}

impl WarningSink for TeeSink<'_> {
    fn warn(&self, warning: ParseWarning) {
        self.first.warn(warning.clone());
        self.second.warn(warning);
    }
}
