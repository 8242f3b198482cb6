// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Resolving bucket names to object stores

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;

use crate::Result;
use crate::config::StorageConfig;
use crate::error::PipelineError;

/// Opens one [`ObjectStore`] per bucket according to a [`StorageConfig`].
///
/// In-memory buckets are created on first use and shared afterwards, so a
/// writer and a reader in the same process see the same objects.
#[derive(Debug)]
pub struct Storage {
    config: StorageConfig,
    memory: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl Storage {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            memory: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(StorageConfig::Memory)
    }

    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// The store holding objects of `bucket`.
    pub fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
            return Err(PipelineError::Configuration(format!(
                "invalid bucket name {bucket:?}"
            )));
        }

        match &self.config {
            StorageConfig::Memory => {
                let mut buckets = match self.memory.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                let store = buckets
                    .entry(bucket.to_string())
                    .or_insert_with(|| Arc::new(InMemory::new()) as Arc<dyn ObjectStore>);
                Ok(Arc::clone(store))
            }
            StorageConfig::Local { root } => {
                let path = root.join(bucket);
                std::fs::create_dir_all(&path)?;
                let store = LocalFileSystem::new_with_prefix(&path)?;
                Ok(Arc::new(store))
            }
            StorageConfig::S3 {
                region,
                endpoint,
                allow_http,
            } => {
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .with_allow_http(*allow_http);
                if let Some(region) = region {
                    builder = builder.with_region(region);
                }
                if let Some(endpoint) = endpoint {
                    builder = builder.with_endpoint(endpoint);
                }
                Ok(Arc::new(builder.build()?))
            }
        }
    }
}

/// `s3://<bucket>/<key>`, the location string recorded in metadata.
#[must_use]
pub fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::path::Path;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_buckets_are_shared() {
        let storage = Storage::in_memory();
        let a = storage.bucket("logs").unwrap();
        a.put(&Path::from("k.json"), b"{}".to_vec().into())
            .await
            .unwrap();

        let b = storage.bucket("logs").unwrap();
        let bytes = b.get(&Path::from("k.json")).await.unwrap().bytes().await.unwrap();
        assert_eq!(&bytes[..], b"{}");

        let other = storage.bucket("other").unwrap();
        assert!(other.get(&Path::from("k.json")).await.is_err());
    }

    #[tokio::test]
    async fn test_local_bucket_is_directory() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(StorageConfig::Local {
            root: dir.path().to_path_buf(),
        });
        let store = storage.bucket("logs").unwrap();
        store
            .put(&Path::from("year=2024/a.json"), b"{}".to_vec().into())
            .await
            .unwrap();
        assert!(dir.path().join("logs").join("year=2024").join("a.json").exists());
    }

    #[test]
    fn test_rejects_bad_bucket_names() {
        let storage = Storage::in_memory();
        assert!(storage.bucket("").is_err());
        assert!(storage.bucket("a/b").is_err());
        assert!(storage.bucket("..").is_err());
    }

    #[test]
    fn test_s3_uri() {
        assert_eq!(s3_uri("b", "logs/a.json"), "s3://b/logs/a.json");
    }
}
