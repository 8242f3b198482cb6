// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use pipeline::{ObjectLogStore, PipelineConfig, Storage, generate_logs};

use crate::common::to_pretty_json;

/// Generate one batch of sample logs into the configured bucket.
pub async fn generate_command(
    config: &PipelineConfig,
    mut output: impl FnMut(&str),
) -> Result<Vec<String>> {
    let storage = Storage::new(config.storage.clone());
    let store = ObjectLogStore::new(
        storage.bucket(&config.bucket)?,
        config.generator.export_prefix.clone(),
    );

    let response = generate_logs(&store, &config.generator).await?;
    output(&to_pretty_json(&response)?);

    let keys = store.written_keys();
    for key in &keys {
        output(&format!("wrote {}/{key}", config.bucket));
    }
    Ok(keys)
}
