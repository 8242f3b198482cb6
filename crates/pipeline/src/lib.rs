// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Log pipeline handlers
//!
//! - [`generate_logs`] writes sample application logs to a [`LogStore`]
//! - [`parse_object`] turns a newly created export object into
//!   [`logparse::LogMetadata`]
//! - [`update_catalog`] registers that metadata as a table and partition
//!
//! [`Pipeline`] runs the three in sequence against configured storage and
//! catalog.

pub mod config;
mod error;
mod event;
mod generate;
mod handlers;
mod run;
mod storage;

pub use config::{
    CatalogConfig, GeneratorConfig, PipelineConfig, StorageConfig, load_config, parse_config,
    validate_config,
};
pub use error::PipelineError;
pub use event::{
    BucketRef, CatalogEvent, HandlerResponse, ObjectCreatedDetail, ObjectCreatedEvent, ObjectRef,
    ParseResponse, STATUS_OK,
};
pub use generate::{
    ACTIONS, ExportEnvelope, LOG_LEVELS, LogEvent, LogStore, MAX_USER_ID, MemoryLogStore,
    ObjectLogStore, generate_log,
};
pub use handlers::{
    CATALOG_UPDATED, STREAM_NAME_FORMAT, generate_logs, parse_object, update_catalog,
};
pub use run::{Pipeline, RunReport, open_catalog};
pub use storage::{Storage, s3_uri};

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
