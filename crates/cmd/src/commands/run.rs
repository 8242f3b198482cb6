// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use pipeline::{Pipeline, PipelineConfig, RunReport};

use crate::common::to_pretty_json;

/// Run the whole pipeline `iterations` times.
pub async fn run_command(
    config: &PipelineConfig,
    iterations: usize,
    mut output: impl FnMut(&str),
) -> Result<Vec<RunReport>> {
    let mut pipeline = Pipeline::new(config.clone())?;
    let mut reports = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let report = pipeline.run_once().await?;
        output(&to_pretty_json(&report)?);
        reports.push(report);
    }
    Ok(reports)
}
