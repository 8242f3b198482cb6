// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use anyhow::Result;
use catalog::{Catalog, LocalCatalog, MemoryCatalog};
use logparse::{CollectingSink, EnvelopePolicy, ParseOptions, ParseWarning};
use object_store::path::Path;
use pipeline::{
    CatalogConfig, CatalogEvent, ObjectCreatedEvent, ObjectLogStore, Pipeline, PipelineConfig,
    PipelineError, Storage, StorageConfig, generate_logs, parse_config, parse_object,
    update_catalog,
};
use tempfile::tempdir;

async fn put(storage: &Storage, bucket: &str, key: &str, body: &str) -> Result<()> {
    storage
        .bucket(bucket)?
        .put(&Path::from(key), body.as_bytes().to_vec().into())
        .await?;
    Ok(())
}

/// Generated exports parse back into the records that were generated.
#[tokio::test]
async fn test_generated_exports_parse_cleanly() -> Result<()> {
    let storage = Storage::in_memory();
    let store = ObjectLogStore::new(storage.bucket("exports")?, "logs");
    let config = PipelineConfig::in_memory().generator;

    generate_logs(&store, &config).await?;
    let keys = store.written_keys();
    assert_eq!(keys.len(), 1);

    let sink = CollectingSink::new();
    let response = parse_object(
        &storage,
        &ObjectCreatedEvent::new("exports", keys[0].as_str()),
        &ParseOptions::default(),
        &sink,
    )
    .await?;

    let metadata = response.metadata;
    assert!(sink.is_empty(), "{:?}", sink.warnings());
    assert_eq!(metadata.log_count, 2);
    assert_eq!(
        metadata.column_names(),
        vec!["timestamp", "log_level", "action", "userid", "message"]
    );
    assert!(metadata.start_timestamp.is_some());
    assert!(metadata.start_timestamp <= metadata.end_timestamp);
    Ok(())
}

#[tokio::test]
async fn test_mixed_file_into_local_catalog() -> Result<()> {
    let tmp = tempdir()?;
    let storage = Storage::new(StorageConfig::Local {
        root: tmp.path().join("data"),
    });
    let key = "app/year=2024/month=02/day=29/part-0.json";
    put(
        &storage,
        "raw",
        key,
        concat!(
            "{\"timestamp\":\"2024-02-29T12:00:00.000001\",\"level\":\"INFO\"}\n",
            "{\"logEvents\":[{\"message\":\"{\\\"timestamp\\\":\\\"2024-02-29T11:00:00.000000\\\",\\\"user\\\":\\\"u1\\\"}\"},{\"message\":\"not json\"}]}\n",
            "[1,2]\n",
            "\n",
        ),
    )
    .await?;

    let sink = CollectingSink::new();
    let response = parse_object(
        &storage,
        &ObjectCreatedEvent::new("raw", key),
        &ParseOptions::default(),
        &sink,
    )
    .await?;
    assert_eq!(response.metadata.log_count, 2);
    assert_eq!(
        response.metadata.start_timestamp.as_deref(),
        Some("2024-02-29T11:00:00.000000")
    );
    assert_eq!(
        response.metadata.end_timestamp.as_deref(),
        Some("2024-02-29T12:00:00.000001")
    );
    let warnings = sink.warnings();
    assert!(
        warnings
            .iter()
            .any(|w| matches!(w, ParseWarning::InvalidEnvelopeEvent { .. }))
    );
    assert!(
        warnings
            .iter()
            .any(|w| matches!(w, ParseWarning::NotAnObject { .. }))
    );

    let catalog = LocalCatalog::new(tmp.path().join("catalog"));
    let config = CatalogConfig::default();
    let event = CatalogEvent::from(response);
    update_catalog(&catalog, &config, &event).await?;
    update_catalog(&catalog, &config, &event).await?;

    let table = catalog.get_table("logs_database", "logs_table").await?;
    assert_eq!(
        table.storage_descriptor.location,
        "s3://raw/app/year=2024/month=02/day=29"
    );
    let values = vec!["2024".to_string(), "02".to_string(), "29".to_string()];
    let partition = catalog
        .get_partition("logs_database", "logs_table", &values)
        .await?;
    assert_eq!(partition.values, values);
    Ok(())
}

#[tokio::test]
async fn test_strict_envelope_policy_fails_the_file() -> Result<()> {
    let storage = Storage::in_memory();
    put(
        &storage,
        "raw",
        "f.json",
        "{\"logEvents\":[{\"message\":\"{broken\"}]}\n",
    )
    .await?;

    let err = parse_object(
        &storage,
        &ObjectCreatedEvent::new("raw", "f.json"),
        &ParseOptions {
            envelope_policy: EnvelopePolicy::Strict,
        },
        &CollectingSink::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PipelineError::Parse(_)));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_from_yaml() -> Result<()> {
    let tmp = tempdir()?;
    let yaml = format!(
        "bucket: yaml-bucket\nstorage:\n  kind: local\n  root: {}\ncatalog:\n  table: from_yaml\ngenerator:\n  events_per_invocation: 5\n",
        tmp.path().join("data").display()
    );
    let config = parse_config(&yaml)?;

    let catalog = Arc::new(MemoryCatalog::new());
    let mut pipeline = Pipeline::with_catalog(config, Box::new(Arc::clone(&catalog)))?;
    let report = pipeline.run_once().await?;
    assert_eq!(report.log_count, 5);
    assert_eq!(catalog.partition_count("logs_database", "from_yaml"), Some(1));
    assert!(tmp.path().join("data").join("yaml-bucket").join("exports").is_dir());
    Ok(())
}
