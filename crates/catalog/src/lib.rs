// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Registering parsed log files with a metadata catalog
//!
//! [`register_metadata`] takes the [`logparse::LogMetadata`] of one file,
//! creates or updates an external JSON table whose location is the file's
//! directory, and registers one partition built from the `name=value`
//! segments of the file's location.
//!
//! Two [`Catalog`] implementations are provided: [`MemoryCatalog`] for tests
//! and embedding, and [`LocalCatalog`], which keeps definitions as JSON files
//! under a directory.

mod catalog;
mod error;
mod local;
mod memory;
mod model;
mod partition;
mod register;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use local::LocalCatalog;
pub use memory::MemoryCatalog;
pub use model::{
    EXTERNAL_TABLE, INPUT_FORMAT, JSON_SERDE, OUTPUT_FORMAT, PartitionInput, SerdeInfo,
    StorageDescriptor, TableInput,
};
pub use partition::{extract_partition_values, table_location};
pub use register::{
    DEFAULT_DATABASE, DEFAULT_TABLE, PartitionAction, RegistrationOutcome, TableAction,
    register_metadata,
};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
