// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use logparse::EmitSink;
use pipeline::{ObjectCreatedEvent, ParseResponse, PipelineConfig, Storage, parse_object};

use crate::common::to_pretty_json;

/// Parse one export object and print (or save) its metadata.
pub async fn parse_command(
    config: &PipelineConfig,
    bucket: Option<&str>,
    key: &str,
    save_to: Option<&Path>,
    mut output: impl FnMut(&str),
) -> Result<ParseResponse> {
    let storage = Storage::new(config.storage.clone());
    let event = ObjectCreatedEvent::new(bucket.unwrap_or(config.bucket.as_str()), key);

    let response = parse_object(&storage, &event, &config.parser, &EmitSink)
        .await
        .with_context(|| format!("parsing {}/{key}", event.bucket()))?;

    let text = to_pretty_json(&response)?;
    match save_to {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("writing metadata to {}", path.display()))?;
            output(&format!(
                "{} logs, metadata saved to {}",
                response.metadata.log_count,
                path.display()
            ));
        }
        None => output(&text),
    }
    Ok(response)
}
