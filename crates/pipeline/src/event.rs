// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Handler inputs and outputs

use logparse::LogMetadata;
use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;

/// Notification that an object was created in a bucket.
///
/// ```json
/// {"detail": {"bucket": {"name": "log-exports"}, "object": {"key": "exports/year=2024/a.json"}}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreatedEvent {
    pub detail: ObjectCreatedDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreatedDetail {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl ObjectCreatedEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            detail: ObjectCreatedDetail {
                bucket: BucketRef {
                    name: bucket.into(),
                },
                object: ObjectRef { key: key.into() },
            },
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.detail.bucket.name
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.detail.object.key
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.into(),
        }
    }
}

/// Result of parsing one object; `metadata` is the input of the catalog step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub metadata: LogMetadata,
}

/// Input of the catalog step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub metadata: LogMetadata,
}

impl From<ParseResponse> for CatalogEvent {
    fn from(response: ParseResponse) -> Self {
        Self {
            metadata: response.metadata,
        }
    }
}
