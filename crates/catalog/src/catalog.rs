// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::model::{PartitionInput, TableInput};

/// A metadata catalog holding table definitions and their partitions.
///
/// Implementations report a missing table or partition as
/// [`CatalogError::EntityNotFound`](crate::CatalogError::EntityNotFound) and a
/// duplicate create as
/// [`CatalogError::AlreadyExists`](crate::CatalogError::AlreadyExists).
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_table(&self, database: &str, name: &str) -> Result<TableInput>;

    async fn create_table(&self, database: &str, table: &TableInput) -> Result<()>;

    async fn update_table(&self, database: &str, table: &TableInput) -> Result<()>;

    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionInput,
    ) -> Result<()>;

    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn get_table(&self, database: &str, name: &str) -> Result<TableInput> {
        (**self).get_table(database, name).await
    }

    async fn create_table(&self, database: &str, table: &TableInput) -> Result<()> {
        (**self).create_table(database, table).await
    }

    async fn update_table(&self, database: &str, table: &TableInput) -> Result<()> {
        (**self).update_table(database, table).await
    }

    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionInput,
    ) -> Result<()> {
        (**self).create_partition(database, table, partition).await
    }

    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput> {
        (**self).get_partition(database, table, values).await
    }
}

pub(crate) fn table_ref(database: &str, table: &str) -> String {
    format!("{database}.{table}")
}

pub(crate) fn partition_ref(database: &str, table: &str, values: &[String]) -> String {
    format!("{database}.{table} partition {values:?}")
}
