// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog stored as JSON documents in a directory tree
//!
//! ```text
//! <root>/<database>/<table>/table.json
//! <root>/<database>/<table>/partitions/<value>/<value>/.../partition.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::{Catalog, partition_ref, table_ref};
use crate::error::CatalogError;
use crate::model::{PartitionInput, TableInput};
use crate::Result;

const TABLE_FILE: &str = "table.json";
const PARTITION_FILE: &str = "partition.json";
const PARTITIONS_DIR: &str = "partitions";

#[derive(Debug, Clone)]
pub struct LocalCatalog {
    root: PathBuf,
}

impl LocalCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_dir(&self, database: &str, table: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(path_component(database)?)
            .join(path_component(table)?))
    }

    fn partition_file(&self, database: &str, table: &str, values: &[String]) -> Result<PathBuf> {
        let mut path = self.table_dir(database, table)?.join(PARTITIONS_DIR);
        for value in values {
            path.push(path_component(value)?);
        }
        Ok(path.join(PARTITION_FILE))
    }
}

/// Names become directory names, so they must be a single normal component.
fn path_component(name: &str) -> Result<&str> {
    let reason = if name.is_empty() {
        Some("empty")
    } else if name == "." || name == ".." {
        Some("reserved path component")
    } else if name.contains(['/', '\\']) {
        Some("contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(name),
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path, missing: impl FnOnce() -> String) -> Result<T> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CatalogError::EntityNotFound(missing()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[async_trait]
impl Catalog for LocalCatalog {
    async fn get_table(&self, database: &str, name: &str) -> Result<TableInput> {
        let path = self.table_dir(database, name)?.join(TABLE_FILE);
        read_json(&path, || table_ref(database, name)).await
    }

    async fn create_table(&self, database: &str, table: &TableInput) -> Result<()> {
        let path = self.table_dir(database, &table.name)?.join(TABLE_FILE);
        if tokio::fs::try_exists(&path).await? {
            return Err(CatalogError::AlreadyExists(table_ref(database, &table.name)));
        }
        let shown = path.display().to_string();
        diagnostics::log_debug!("Writing table definition {path}", path: shown.as_str());
        write_json(&path, table).await
    }

    async fn update_table(&self, database: &str, table: &TableInput) -> Result<()> {
        let path = self.table_dir(database, &table.name)?.join(TABLE_FILE);
        if !tokio::fs::try_exists(&path).await? {
            return Err(CatalogError::EntityNotFound(table_ref(database, &table.name)));
        }
        write_json(&path, table).await
    }

    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionInput,
    ) -> Result<()> {
        let table_file = self.table_dir(database, table)?.join(TABLE_FILE);
        if !tokio::fs::try_exists(&table_file).await? {
            return Err(CatalogError::EntityNotFound(table_ref(database, table)));
        }

        let path = self.partition_file(database, table, &partition.values)?;
        if tokio::fs::try_exists(&path).await? {
            return Err(CatalogError::AlreadyExists(partition_ref(
                database,
                table,
                &partition.values,
            )));
        }
        write_json(&path, partition).await
    }

    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput> {
        let path = self.partition_file(database, table, values)?;
        read_json(&path, || partition_ref(database, table, values)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_table_files_on_disk() {
        let dir = tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let table = TableInput::json_logs("t", Vec::new(), &[], "s3://b/logs");

        catalog.create_table("db", &table).await.unwrap();
        assert!(dir.path().join("db").join("t").join("table.json").exists());
        assert_eq!(catalog.get_table("db", "t").await.unwrap(), table);

        // A second handle on the same root sees the same table.
        let reopened = LocalCatalog::new(dir.path());
        assert!(
            reopened
                .create_table("db", &table)
                .await
                .unwrap_err()
                .is_already_exists()
        );
    }

    #[tokio::test]
    async fn test_rejects_path_like_names() {
        let dir = tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let table = TableInput::json_logs("../escape", Vec::new(), &[], "s3://b");
        let err = catalog.create_table("db", &table).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn test_partition_requires_table() {
        let dir = tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let partition = PartitionInput::new(vec!["2024".to_string()], "s3://b/year=2024");
        let err = catalog
            .create_partition("db", "t", &partition)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
