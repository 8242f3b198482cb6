// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pipeline::PipelineConfig;
use serde::Serialize;

/// Environment variable naming the configuration file when `--config` is absent.
pub const CONFIG_ENV: &str = "LOGPIPE_CONFIG";

/// The configuration file to use: the override, else `$LOGPIPE_CONFIG`, else none.
#[must_use]
pub fn config_path_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path.or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// Load configuration, falling back to defaults when no file is named.
pub fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => pipeline::load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Pretty JSON for command output.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing output")
}
