// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! In-process catalog

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::catalog::{Catalog, partition_ref, table_ref};
use crate::error::CatalogError;
use crate::model::{PartitionInput, TableInput};
use crate::Result;

#[derive(Debug)]
struct TableEntry {
    table: TableInput,
    partitions: BTreeMap<Vec<String>, PartitionInput>,
}

/// Catalog kept entirely in memory; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: Mutex<BTreeMap<(String, String), TableEntry>>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(String, String), TableEntry>> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Number of partitions registered for a table, if the table exists.
    #[must_use]
    pub fn partition_count(&self, database: &str, table: &str) -> Option<usize> {
        self.lock()
            .get(&(database.to_string(), table.to_string()))
            .map(|entry| entry.partitions.len())
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn get_table(&self, database: &str, name: &str) -> Result<TableInput> {
        self.lock()
            .get(&(database.to_string(), name.to_string()))
            .map(|entry| entry.table.clone())
            .ok_or_else(|| CatalogError::EntityNotFound(table_ref(database, name)))
    }

    async fn create_table(&self, database: &str, table: &TableInput) -> Result<()> {
        let mut tables = self.lock();
        let key = (database.to_string(), table.name.clone());
        if tables.contains_key(&key) {
            return Err(CatalogError::AlreadyExists(table_ref(database, &table.name)));
        }
        tables.insert(
            key,
            TableEntry {
                table: table.clone(),
                partitions: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn update_table(&self, database: &str, table: &TableInput) -> Result<()> {
        let mut tables = self.lock();
        let entry = tables
            .get_mut(&(database.to_string(), table.name.clone()))
            .ok_or_else(|| CatalogError::EntityNotFound(table_ref(database, &table.name)))?;
        entry.table = table.clone();
        Ok(())
    }

    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionInput,
    ) -> Result<()> {
        let mut tables = self.lock();
        let entry = tables
            .get_mut(&(database.to_string(), table.to_string()))
            .ok_or_else(|| CatalogError::EntityNotFound(table_ref(database, table)))?;
        if entry.partitions.contains_key(&partition.values) {
            return Err(CatalogError::AlreadyExists(partition_ref(
                database,
                table,
                &partition.values,
            )));
        }
        entry
            .partitions
            .insert(partition.values.clone(), partition.clone());
        Ok(())
    }

    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput> {
        self.lock()
            .get(&(database.to_string(), table.to_string()))
            .and_then(|entry| entry.partitions.get(values).cloned())
            .ok_or_else(|| CatalogError::EntityNotFound(partition_ref(database, table, values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> TableInput {
        TableInput::json_logs(name, Vec::new(), &["year".to_string()], "s3://b/logs")
    }

    #[tokio::test]
    async fn test_create_get_update() {
        let catalog = MemoryCatalog::new();
        assert!(catalog.get_table("db", "t").await.unwrap_err().is_not_found());

        catalog.create_table("db", &table("t")).await.unwrap();
        assert!(
            catalog
                .create_table("db", &table("t"))
                .await
                .unwrap_err()
                .is_already_exists()
        );

        let mut updated = table("t");
        updated.storage_descriptor.location = "s3://b/other".to_string();
        catalog.update_table("db", &updated).await.unwrap();
        assert_eq!(catalog.get_table("db", "t").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_table() {
        let catalog = MemoryCatalog::new();
        let err = catalog.update_table("db", &table("t")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_partitions() {
        let catalog = MemoryCatalog::new();
        let partition = PartitionInput::new(vec!["2024".to_string()], "s3://b/logs/year=2024");

        let err = catalog.create_partition("db", "t", &partition).await.unwrap_err();
        assert!(err.is_not_found());

        catalog.create_table("db", &table("t")).await.unwrap();
        catalog.create_partition("db", "t", &partition).await.unwrap();
        let err = catalog.create_partition("db", "t", &partition).await.unwrap_err();
        assert!(err.is_already_exists());

        assert_eq!(catalog.partition_count("db", "t"), Some(1));
        assert_eq!(
            catalog
                .get_partition("db", "t", &["2024".to_string()])
                .await
                .unwrap(),
            partition
        );
    }
}
