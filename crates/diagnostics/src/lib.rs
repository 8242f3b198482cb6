// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by every logpipe crate
//!
//! Usage:
//! - Set LOGPIPE_LOG=off (default) - no logs
//! - Set LOGPIPE_LOG=error | warn | info | debug - minimum level emitted to stderr

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable consulted by [`init_diagnostics`].
pub const LOG_ENV: &str = "LOGPIPE_LOG";

static INIT: Once = Once::new();

/// Map a `LOGPIPE_LOG` value to a minimum level.
///
/// `Ok(None)` means logging is switched off. Unknown values fall back to
/// info and are reported back as `Err` so the caller can say so.
pub fn parse_level(value: &str) -> Result<Option<emit::Level>, emit::Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => Ok(None),
        "error" => Ok(Some(emit::Level::Error)),
        "warn" | "warning" => Ok(Some(emit::Level::Warn)),
        "info" => Ok(Some(emit::Level::Info)),
        "debug" => Ok(Some(emit::Level::Debug)),
        _ => Err(emit::Level::Info),
    }
}

/// Initialize diagnostics based on the LOGPIPE_LOG environment variable
///
/// Safe to call multiple times; only the first call has any effect.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let (level, unknown) = match parse_level(&value) {
            Ok(None) => return,
            Ok(Some(level)) => (level, false),
            Err(fallback) => (fallback, true),
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if unknown {
            emit::warn!("Unknown {var} value {value}, using info", var: LOG_ENV, value: value.as_str());
        }

        // The runtime has to outlive main; it is flushed on process exit.
        std::mem::forget(rt);
    });
}

/// Log basic operations (objects fetched, tables created, partitions registered)
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (line counts, per-record processing steps)
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems (skipped lines, unparseable timestamps)
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that abort the current invocation
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
