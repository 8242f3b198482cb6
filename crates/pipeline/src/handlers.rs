// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The three pipeline steps: generate, parse, register

use bytes::Buf;
use catalog::{Catalog, register_metadata};
use chrono::{Local, Utc};
use logparse::{LogMetadata, ParseOptions, WarningSink, extract_partition_keys, parse_log_file};
use object_store::path::Path;

use crate::Result;
use crate::config::{CatalogConfig, GeneratorConfig};
use crate::event::{CatalogEvent, HandlerResponse, ObjectCreatedEvent, ParseResponse, STATUS_OK};
use crate::generate::{LogEvent, LogStore, generate_log};
use crate::storage::{Storage, s3_uri};

pub const STREAM_NAME_FORMAT: &str = "stream-%Y-%m-%d-%H-%M-%S";
pub const CATALOG_UPDATED: &str = "Data Catalog updated successfully";

/// Generate a batch of sample logs and put them into a fresh stream.
pub async fn generate_logs(store: &dyn LogStore, config: &GeneratorConfig) -> Result<HandlerResponse> {
    let now = Local::now().naive_local();
    let millis = Utc::now().timestamp_millis();

    let events = {
        let mut rng = rand::thread_rng();
        (0..config.events_per_invocation)
            .map(|_| LogEvent::from_record(&generate_log(&mut rng, now), millis))
            .collect::<Result<Vec<_>>>()?
    };

    match store.create_log_group(&config.log_group).await {
        Ok(()) => {}
        Err(e) if e.is_already_exists() => {
            diagnostics::log_debug!("Log group {group} already exists", group: config.log_group.as_str());
        }
        Err(e) => return Err(e),
    }

    let stream = now.format(STREAM_NAME_FORMAT).to_string();
    match store.create_log_stream(&config.log_group, &stream).await {
        Ok(()) => {}
        Err(e) if e.is_already_exists() => {
            diagnostics::log_debug!("Log stream {stream} already exists", stream: stream.as_str());
        }
        Err(e) => return Err(e),
    }

    store
        .put_log_events(&config.log_group, &stream, &events)
        .await?;

    diagnostics::log_info!(
        "Stored {count} logs in {group}/{stream}",
        count: events.len() as u64,
        group: config.log_group.as_str(),
        stream: stream.as_str()
    );
    Ok(HandlerResponse::ok(format!(
        "Generated and stored {} logs",
        events.len()
    )))
}

/// Parse the object named by `event` and describe it for the catalog.
pub async fn parse_object(
    storage: &Storage,
    event: &ObjectCreatedEvent,
    options: &ParseOptions,
    sink: &dyn WarningSink,
) -> Result<ParseResponse> {
    let bucket = event.bucket();
    let key = event.key();

    match parse_object_inner(storage, bucket, key, options, sink).await {
        Ok(metadata) => {
            let shown = serde_json::to_string(&metadata)?;
            diagnostics::log_info!("Log metadata: {metadata}", metadata: shown.as_str());
            Ok(ParseResponse {
                status_code: STATUS_OK,
                metadata,
            })
        }
        Err(e) => {
            let message = e.to_string();
            diagnostics::log_error!(
                "Error processing log file {key}: {error}",
                key: key,
                error: message.as_str()
            );
            Err(e)
        }
    }
}

async fn parse_object_inner(
    storage: &Storage,
    bucket: &str,
    key: &str,
    options: &ParseOptions,
    sink: &dyn WarningSink,
) -> Result<LogMetadata> {
    diagnostics::log_info!("Processing log file {key} from bucket {bucket}", key: key, bucket: bucket);

    let store = storage.bucket(bucket)?;
    let bytes = store.get(&Path::from(key)).await?.bytes().await?;

    let mut metadata = parse_log_file(bytes.reader(), options, sink)?;
    metadata.s3_location = Some(s3_uri(bucket, key));
    metadata.partition_keys = extract_partition_keys(key);
    Ok(metadata)
}

/// Register the parsed file with the configured table.
pub async fn update_catalog(
    catalog: &dyn Catalog,
    config: &CatalogConfig,
    event: &CatalogEvent,
) -> Result<HandlerResponse> {
    let outcome = register_metadata(catalog, &config.database, &config.table, &event.metadata)
        .await
        .inspect_err(|e| {
            let message = e.to_string();
            diagnostics::log_error!("Error updating Data Catalog: {error}", error: message.as_str());
        })?;

    let shown = serde_json::to_string(&outcome)?;
    diagnostics::log_debug!("Registration outcome {outcome}", outcome: shown.as_str());
    Ok(HandlerResponse::ok(CATALOG_UPDATED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::MemoryLogStore;
    use catalog::MemoryCatalog;
    use logparse::CollectingSink;

    #[tokio::test]
    async fn test_generate_logs_twice_reuses_group() {
        let store = MemoryLogStore::new();
        let config = GeneratorConfig {
            events_per_invocation: 3,
            ..GeneratorConfig::default()
        };

        let response = generate_logs(&store, &config).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "Generated and stored 3 logs");

        // Same second: the stream exists and still receives the batch.
        generate_logs(&store, &config).await.unwrap();
        let total: usize = store
            .streams(&config.log_group)
            .iter()
            .map(|s| store.events(&config.log_group, s).len())
            .sum();
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn test_parse_object_sets_location_and_keys() {
        let storage = Storage::in_memory();
        let key = "logs/year=2024/month=03/app.json";
        storage
            .bucket("b")
            .unwrap()
            .put(
                &Path::from(key),
                b"{\"timestamp\":\"2024-03-01T00:00:00.000000\",\"a\":1}\nbad\n"
                    .to_vec()
                    .into(),
            )
            .await
            .unwrap();

        let sink = CollectingSink::new();
        let response = parse_object(
            &storage,
            &ObjectCreatedEvent::new("b", key),
            &ParseOptions::default(),
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(response.status_code, 200);
        let metadata = response.metadata;
        assert_eq!(metadata.log_count, 1);
        assert_eq!(metadata.s3_location.as_deref(), Some("s3://b/logs/year=2024/month=03/app.json"));
        assert_eq!(metadata.partition_keys, vec!["year", "month"]);
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_parse_missing_object_fails() {
        let storage = Storage::in_memory();
        let err = parse_object(
            &storage,
            &ObjectCreatedEvent::new("b", "nope.json"),
            &ParseOptions::default(),
            &CollectingSink::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, crate::PipelineError::ObjectStore(_)));
    }

    #[tokio::test]
    async fn test_update_catalog_response() {
        let catalog = MemoryCatalog::new();
        let metadata = LogMetadata {
            s3_location: Some("s3://b/logs/year=2024/a.json".to_string()),
            partition_keys: vec!["year".to_string()],
            ..LogMetadata::default()
        };
        let response = update_catalog(
            &catalog,
            &CatalogConfig::default(),
            &CatalogEvent { metadata },
        )
        .await
        .unwrap();
        assert_eq!(response.body, "Data Catalog updated successfully");
        assert_eq!(catalog.partition_count("logs_database", "logs_table"), Some(1));
    }
}
