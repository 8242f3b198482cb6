// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Flat schema discovery: every field name seen, typed as string

use std::collections::HashSet;

use crate::metadata::{Column, Record};

/// Distinct field names in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SchemaAccumulator {
    columns: Vec<Column>,
    seen: HashSet<String>,
}

impl SchemaAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column for each field of `record` not already known. Known
    /// columns are never retyped, whatever the value looks like.
    pub fn observe(&mut self, record: &Record) {
        for name in record.keys() {
            if self.seen.insert(name.clone()) {
                self.columns.push(Column::string(name.as_str()));
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Fold the fields of one record into `schema`.
pub fn analyze_record(record: &Record, schema: &mut SchemaAccumulator) {
    schema.observe(record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DEFAULT_COLUMN_TYPE;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_first_seen_order() {
        let mut schema = SchemaAccumulator::new();
        analyze_record(&record(json!({"b": 1, "a": 2})), &mut schema);
        analyze_record(&record(json!({"c": 3, "a": "again"})), &mut schema);

        let names: Vec<&str> = schema.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_types_are_always_string() {
        let mut schema = SchemaAccumulator::new();
        analyze_record(
            &record(json!({"n": 1, "f": 1.5, "b": true, "z": null, "o": {"k": 1}})),
            &mut schema,
        );
        assert_eq!(schema.len(), 5);
        assert!(schema.columns().iter().all(|c| c.data_type == DEFAULT_COLUMN_TYPE));
    }

    #[test]
    fn test_no_duplicates() {
        let mut schema = SchemaAccumulator::new();
        for _ in 0..3 {
            analyze_record(&record(json!({"x": 1, "y": 2})), &mut schema);
        }
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("x"));
        assert!(!schema.contains("w"));
    }

    #[test]
    fn test_empty_record() {
        let mut schema = SchemaAccumulator::new();
        analyze_record(&Record::new(), &mut schema);
        assert!(schema.is_empty());
    }
}
