// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Partition values and table location from an object location

/// For each key name, the value of the first `name=value` segment of
/// `location`. Keys with no matching segment are left out.
#[must_use]
pub fn extract_partition_values(location: &str, partition_keys: &[String]) -> Vec<String> {
    let segments: Vec<&str> = location.split('/').collect();
    partition_keys
        .iter()
        .filter_map(|key| {
            segments.iter().find_map(|segment| {
                segment
                    .strip_prefix(key.as_str())
                    .and_then(|rest| rest.strip_prefix('='))
            })
        })
        .map(str::to_string)
        .collect()
}

/// The location with its final `/` segment (the file name) removed.
#[must_use]
pub fn table_location(object_location: &str) -> &str {
    object_location
        .rsplit_once('/')
        .map_or(object_location, |(parent, _)| parent)
}
