// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Fatal parse errors. Per-line problems are warnings, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error reading log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid envelope event at line {line_number}, event {index}: {reason}")]
    EnvelopeEvent {
        line_number: usize,
        index: usize,
        reason: String,
    },
}
