// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of the log table plus one partition per file

use logparse::LogMetadata;
use serde::Serialize;

use crate::Result;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{PartitionInput, TableInput};
use crate::partition::{extract_partition_values, table_location};

pub const DEFAULT_DATABASE: &str = "logs_database";
pub const DEFAULT_TABLE: &str = "logs_table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionAction {
    Created,
    AlreadyExisted,
    /// No partition values could be read from the location.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub table: TableAction,
    pub partition: PartitionAction,
    pub partition_values: Vec<String>,
}

/// Point `database.table` at the file described by `metadata` and register
/// its partition.
pub async fn register_metadata(
    catalog: &dyn Catalog,
    database: &str,
    table: &str,
    metadata: &LogMetadata,
) -> Result<RegistrationOutcome> {
    let s3_location = metadata
        .s3_location
        .as_deref()
        .ok_or_else(|| CatalogError::InvalidMetadata("metadata has no s3_location".to_string()))?;
    let location = table_location(s3_location);

    // Checked before any catalog write so a bad key leaves the table untouched.
    let partition_values = extract_partition_values(s3_location, &metadata.partition_keys);
    if partition_values.iter().any(String::is_empty) {
        return Err(CatalogError::InvalidMetadata(format!(
            "empty partition value in {s3_location}"
        )));
    }

    diagnostics::log_info!(
        "Preparing to create or update table {table} in database {database}",
        table: table,
        database: database
    );

    let table_input = TableInput::json_logs(
        table,
        metadata.columns.clone(),
        &metadata.partition_keys,
        location,
    );

    let table_action = match catalog.get_table(database, table).await {
        Ok(_) => {
            diagnostics::log_info!("Table {table} exists, updating it", table: table);
            catalog.update_table(database, &table_input).await?;
            TableAction::Updated
        }
        Err(CatalogError::EntityNotFound(_)) => {
            diagnostics::log_info!("Table {table} does not exist, creating it", table: table);
            catalog.create_table(database, &table_input).await?;
            TableAction::Created
        }
        Err(e) => return Err(e),
    };

    let shown = format!("{partition_values:?}");
    diagnostics::log_info!("Partition values extracted: {values}", values: shown.as_str());
    if partition_values.len() != metadata.partition_keys.len() {
        diagnostics::log_warn!(
            "Found {found} partition values for {expected} partition keys in {location}",
            found: partition_values.len() as u64,
            expected: metadata.partition_keys.len() as u64,
            location: s3_location
        );
    }

    let partition_action = if partition_values.is_empty() {
        PartitionAction::Skipped
    } else {
        register_partition(catalog, database, table, &partition_values, location).await?
    };

    diagnostics::log_info!("Logs stored at location {location}", location: s3_location);

    Ok(RegistrationOutcome {
        table: table_action,
        partition: partition_action,
        partition_values,
    })
}

async fn register_partition(
    catalog: &dyn Catalog,
    database: &str,
    table: &str,
    values: &[String],
    location: &str,
) -> Result<PartitionAction> {
    let partition = PartitionInput::new(values.to_vec(), location);
    let shown = format!("{values:?}");

    match catalog.create_partition(database, table, &partition).await {
        Ok(()) => {
            diagnostics::log_info!("Created partition {values}", values: shown.as_str());
            Ok(PartitionAction::Created)
        }
        Err(CatalogError::AlreadyExists(_)) => {
            diagnostics::log_info!("Partition already exists {values}", values: shown.as_str());
            Ok(PartitionAction::AlreadyExisted)
        }
        Err(e) => {
            let error = e.to_string();
            diagnostics::log_error!("Error creating partition: {error}", error: error.as_str());
            Err(e)
        }
    }
}
