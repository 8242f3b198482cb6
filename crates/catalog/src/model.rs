// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Table and partition definitions in the catalog's wire shape

use std::collections::BTreeMap;

use logparse::Column;
use serde::{Deserialize, Serialize};

pub const INPUT_FORMAT: &str = "org.apache.hadoop.mapred.TextInputFormat";
pub const OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";
pub const JSON_SERDE: &str = "org.openx.data.jsonserde.JsonSerDe";
pub const EXTERNAL_TABLE: &str = "EXTERNAL_TABLE";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SerdeInfo {
    pub serialization_library: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl SerdeInfo {
    /// OpenX JSON serde, tolerant of malformed lines and case-insensitive.
    #[must_use]
    pub fn openx_json() -> Self {
        let parameters = [
            ("ignore.malformed.json", "true"),
            ("dots.in.keys", "false"),
            ("case.insensitive", "true"),
            ("mapping", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            serialization_library: JSON_SERDE.to_string(),
            parameters,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct StorageDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    pub location: String,
    pub input_format: String,
    pub output_format: String,
    pub serde_info: SerdeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_buckets: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_as_sub_directories: Option<bool>,
}

impl StorageDescriptor {
    /// Newline-delimited JSON text files under `location`.
    #[must_use]
    pub fn json_lines(location: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            location: location.into(),
            input_format: INPUT_FORMAT.to_string(),
            output_format: OUTPUT_FORMAT.to_string(),
            serde_info: SerdeInfo::openx_json(),
            compressed: None,
            number_of_buckets: None,
            stored_as_sub_directories: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TableInput {
    pub name: String,
    pub storage_descriptor: StorageDescriptor,
    #[serde(default)]
    pub partition_keys: Vec<Column>,
    pub table_type: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl TableInput {
    /// External JSON log table with string columns and string partition keys.
    #[must_use]
    pub fn json_logs(
        name: impl Into<String>,
        columns: Vec<Column>,
        partition_keys: &[String],
        location: impl Into<String>,
    ) -> Self {
        let mut storage_descriptor = StorageDescriptor::json_lines(location);
        storage_descriptor.columns = columns;
        storage_descriptor.compressed = Some(false);
        storage_descriptor.number_of_buckets = Some(-1);
        storage_descriptor.stored_as_sub_directories = Some(false);

        let parameters = [
            ("classification", "json"),
            ("compressionType", "none"),
            ("typeOfData", "log_data"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            name: name.into(),
            storage_descriptor,
            partition_keys: partition_keys.iter().map(Column::string).collect(),
            table_type: EXTERNAL_TABLE.to_string(),
            parameters,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PartitionInput {
    pub values: Vec<String>,
    pub storage_descriptor: StorageDescriptor,
}

impl PartitionInput {
    #[must_use]
    pub fn new(values: Vec<String>, location: impl Into<String>) -> Self {
        Self {
            values,
            storage_descriptor: StorageDescriptor::json_lines(location),
        }
    }
}
