// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{Context, Result, bail};
use pipeline::{CatalogEvent, HandlerResponse, PipelineConfig, open_catalog, update_catalog};

use crate::common::to_pretty_json;

/// Register a metadata document produced by `parse`.
///
/// The file may hold the whole parse response or just `{"metadata": ...}`.
/// An in-memory catalog would be gone when the command exits, so a
/// `catalog.root` is required.
pub async fn register_command(
    config: &PipelineConfig,
    metadata_path: &Path,
    mut output: impl FnMut(&str),
) -> Result<HandlerResponse> {
    if config.catalog.root.is_none() {
        bail!("register needs a persistent catalog: set catalog.root in the configuration");
    }

    let text = std::fs::read_to_string(metadata_path)
        .with_context(|| format!("reading {}", metadata_path.display()))?;
    let event: CatalogEvent = serde_json::from_str(&text)
        .with_context(|| format!("decoding metadata in {}", metadata_path.display()))?;

    let catalog = open_catalog(config);
    let response = update_catalog(catalog.as_ref(), &config.catalog, &event).await?;
    output(&to_pretty_json(&response)?);
    Ok(response)
}
