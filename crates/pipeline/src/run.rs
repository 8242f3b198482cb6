// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Wiring the three steps together in one process
//!
//! Object-created notifications are replaced by listing the export prefix
//! and parsing every object not processed by this [`Pipeline`] yet.

use std::collections::BTreeSet;
use std::sync::Arc;

use catalog::{Catalog, LocalCatalog, MemoryCatalog};
use futures::TryStreamExt;
use logparse::{EmitSink, LogMetadata};
use object_store::ObjectStore;
use object_store::path::Path;
use serde::Serialize;

use crate::Result;
use crate::config::PipelineConfig;
use crate::event::{CatalogEvent, ObjectCreatedEvent};
use crate::generate::ObjectLogStore;
use crate::handlers::{generate_logs, parse_object, update_catalog};
use crate::storage::Storage;

/// What one [`Pipeline::run_once`] did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub generated: String,
    pub parsed_keys: Vec<String>,
    pub log_count: u64,
    pub registered: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
    storage: Storage,
    catalog: Box<dyn Catalog>,
    log_store: ObjectLogStore,
    processed: BTreeSet<String>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("processed", &self.processed)
            .finish_non_exhaustive()
    }
}

/// The catalog selected by `config.catalog.root`.
#[must_use]
pub fn open_catalog(config: &PipelineConfig) -> Box<dyn Catalog> {
    match &config.catalog.root {
        Some(root) => Box::new(LocalCatalog::new(root.clone())),
        None => {
            diagnostics::log_warn!("No catalog.root configured, registrations are kept in memory only");
            Box::new(MemoryCatalog::new())
        }
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let catalog = open_catalog(&config);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: PipelineConfig, catalog: Box<dyn Catalog>) -> Result<Self> {
        let storage = Storage::new(config.storage.clone());
        let bucket = storage.bucket(&config.bucket)?;
        let log_store = ObjectLogStore::new(bucket, config.generator.export_prefix.clone());
        Ok(Self {
            config,
            storage,
            catalog,
            log_store,
            processed: BTreeSet::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Export objects under the configured prefix not parsed yet, sorted.
    pub async fn pending_keys(&self) -> Result<Vec<String>> {
        let store: Arc<dyn ObjectStore> = self.storage.bucket(&self.config.bucket)?;
        let prefix = self.config.generator.export_prefix.trim_matches('/');
        let prefix = (!prefix.is_empty()).then(|| Path::from(prefix));

        let objects: Vec<_> = store.list(prefix.as_ref()).try_collect().await?;
        let mut keys: Vec<String> = objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .filter(|key| !self.processed.contains(key))
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Parse one object and register it.
    pub async fn ingest(&mut self, key: &str) -> Result<LogMetadata> {
        let event = ObjectCreatedEvent::new(self.config.bucket.clone(), key);
        let response = parse_object(&self.storage, &event, &self.config.parser, &EmitSink).await?;
        let event = CatalogEvent::from(response);
        update_catalog(self.catalog.as_ref(), &self.config.catalog, &event).await?;
        self.processed.insert(key.to_string());
        Ok(event.metadata)
    }

    /// Generate one batch, then parse and register every pending export.
    pub async fn run_once(&mut self) -> Result<RunReport> {
        let generated = generate_logs(&self.log_store, &self.config.generator).await?;

        let mut report = RunReport {
            generated: generated.body,
            ..RunReport::default()
        };
        for key in self.pending_keys().await? {
            let metadata = self.ingest(&key).await?;
            report.log_count += metadata.log_count;
            report.registered += 1;
            report.parsed_keys.push(key);
        }

        diagnostics::log_info!(
            "Run complete: {files} files, {logs} logs",
            files: report.registered as u64,
            logs: report.log_count
        );
        Ok(report)
    }
}
