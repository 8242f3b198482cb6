// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Pipeline configuration, loaded from YAML
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! bucket: log-exports
//! storage:
//!   kind: local
//!   root: ./logpipe-data
//! catalog:
//!   database: logs_database
//!   table: logs_table
//!   root: ./logpipe-catalog     # omit for an in-memory catalog
//! generator:
//!   log_group: /aws/lambda/generated-logs
//!   events_per_invocation: 2
//!   export_prefix: exports
//! parser:
//!   envelope_policy: skip       # or strict
//! ```

use std::path::{Path, PathBuf};

use logparse::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::PipelineError;

pub const DEFAULT_BUCKET: &str = "log-exports";
pub const DEFAULT_LOG_GROUP: &str = "/aws/lambda/generated-logs";
pub const DEFAULT_EXPORT_PREFIX: &str = "exports";
pub const DEFAULT_EVENTS_PER_INVOCATION: usize = 2;
pub const DEFAULT_STORAGE_ROOT: &str = "logpipe-data";
pub const DEFAULT_CATALOG_ROOT: &str = "logpipe-catalog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Buckets live in process memory.
    Memory,
    /// Each bucket is a directory under `root`.
    Local { root: PathBuf },
    /// S3 or an S3-compatible service; credentials come from the environment.
    S3 {
        #[serde(default)]
        region: Option<String>,
        #[serde(default)]
        endpoint: Option<String>,
        #[serde(default)]
        allow_http: bool,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Local {
            root: PathBuf::from(DEFAULT_STORAGE_ROOT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub database: String,
    pub table: String,
    /// Directory for a [`catalog::LocalCatalog`]. `None` (`root: ~`) keeps the
    /// catalog in memory, so registrations end with the process.
    pub root: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: catalog::DEFAULT_DATABASE.to_string(),
            table: catalog::DEFAULT_TABLE.to_string(),
            root: Some(PathBuf::from(DEFAULT_CATALOG_ROOT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub log_group: String,
    pub events_per_invocation: usize,
    /// Key prefix for export objects written by the log store.
    pub export_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            log_group: DEFAULT_LOG_GROUP.to_string(),
            events_per_invocation: DEFAULT_EVENTS_PER_INVOCATION,
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bucket that receives log exports.
    pub bucket: String,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub generator: GeneratorConfig,
    pub parser: ParseOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            storage: StorageConfig::default(),
            catalog: CatalogConfig::default(),
            generator: GeneratorConfig::default(),
            parser: ParseOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults with in-memory storage and catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: StorageConfig::Memory,
            catalog: CatalogConfig {
                root: None,
                ..CatalogConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(&path).map_err(|e| {
        PipelineError::Configuration(format!(
            "Failed to read config file {}: {e}",
            path.as_ref().display()
        ))
    })?;
    parse_config(&content)
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = if content.trim().is_empty() {
        PipelineConfig::default()
    } else {
        serde_yaml_ng::from_str(content)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    let invalid = |msg: &str| Err(PipelineError::Configuration(msg.to_string()));

    if config.bucket.is_empty() {
        return invalid("bucket cannot be empty");
    }
    if config.catalog.database.is_empty() {
        return invalid("catalog.database cannot be empty");
    }
    if config.catalog.table.is_empty() {
        return invalid("catalog.table cannot be empty");
    }
    if config.generator.log_group.is_empty() {
        return invalid("generator.log_group cannot be empty");
    }
    if config.generator.events_per_invocation == 0 {
        return invalid("generator.events_per_invocation must be greater than 0");
    }
    if config
        .catalog
        .root
        .as_ref()
        .is_some_and(|root| root.as_os_str().is_empty())
    {
        return invalid("catalog.root cannot be empty");
    }
    if let StorageConfig::Local { root } = &config.storage {
        if root.as_os_str().is_empty() {
            return invalid("storage.root cannot be empty");
        }
    }
    Ok(())
}
