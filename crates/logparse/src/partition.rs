// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Hive-style partition names from an object key

/// Names of the `name=value` segments of `key`, root to leaf.
///
/// ```
/// use logparse::extract_partition_keys;
///
/// let keys = extract_partition_keys("logs/year=2024/month=01/day=15/file.json");
/// assert_eq!(keys, vec!["year", "month", "day"]);
/// assert!(extract_partition_keys("logs/file.json").is_empty());
/// ```
#[must_use]
pub fn extract_partition_keys(key: &str) -> Vec<String> {
    key.split('/')
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, _)| name.to_string())
        .collect()
}
