// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Synthetic application logs and the log store they are written to
//!
//! [`generate_log`] produces one random user-activity record. A [`LogStore`]
//! accepts batches of events into named groups and streams;
//! [`ObjectLogStore`] additionally exports every batch as a one-line
//! envelope object under a `year=/month=/day=` key, the shape the parser and
//! catalog expect.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime};
use logparse::{Record, TIMESTAMP_FORMAT};
use object_store::{ObjectStore, PutMode, PutPayload};
use object_store::path::Path;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::PipelineError;

pub const LOG_LEVELS: [&str; 3] = ["INFO", "WARNING", "ERROR"];
pub const ACTIONS: [&str; 5] = ["LOGIN", "LOGOUT", "UPDATE", "DELETE", "CREATE"];
pub const MAX_USER_ID: u32 = 1000;

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[&'static str]) -> &'static str {
    choices.choose(rng).copied().unwrap_or_default()
}

/// One synthetic log record stamped with `now`.
pub fn generate_log<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> Record {
    let mut record = Record::new();
    record.insert(
        "timestamp".to_string(),
        Value::String(now.format(TIMESTAMP_FORMAT).to_string()),
    );
    record.insert(
        "log_level".to_string(),
        Value::String(pick(rng, &LOG_LEVELS).to_string()),
    );
    record.insert(
        "action".to_string(),
        Value::String(pick(rng, &ACTIONS).to_string()),
    );
    record.insert(
        "userid".to_string(),
        Value::String(format!("user{}", rng.gen_range(1..=MAX_USER_ID))),
    );
    // Drawn independently of `action`.
    record.insert(
        "message".to_string(),
        Value::String(format!("User performed {} action", pick(rng, &ACTIONS))),
    );
    record
}

/// An event as accepted by a [`LogStore`]: epoch milliseconds and the
/// JSON-encoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: i64,
    pub message: String,
}

impl LogEvent {
    pub fn from_record(record: &Record, timestamp_millis: i64) -> Result<Self> {
        Ok(Self {
            timestamp: timestamp_millis,
            message: serde_json::to_string(record)?,
        })
    }
}

/// One line of an export object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub log_group: String,
    pub log_stream: String,
    pub log_events: Vec<LogEvent>,
}

/// Append-only store of log events, grouped into streams.
///
/// Creating a group or stream that exists fails with
/// [`PipelineError::AlreadyExists`]; putting into a missing one fails with
/// [`PipelineError::NotFound`].
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn create_log_group(&self, group: &str) -> Result<()>;

    async fn create_log_stream(&self, group: &str, stream: &str) -> Result<()>;

    async fn put_log_events(&self, group: &str, stream: &str, events: &[LogEvent]) -> Result<()>;
}

type Groups = BTreeMap<String, BTreeMap<String, Vec<LogEvent>>>;

/// Log store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    groups: Mutex<Groups>,
}

impl MemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Groups> {
        match self.groups.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Events put into a stream so far.
    #[must_use]
    pub fn events(&self, group: &str, stream: &str) -> Vec<LogEvent> {
        self.lock()
            .get(group)
            .and_then(|streams| streams.get(stream))
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn streams(&self, group: &str) -> Vec<String> {
        self.lock()
            .get(group)
            .map(|streams| streams.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn create_log_group(&self, group: &str) -> Result<()> {
        let mut groups = self.lock();
        if groups.contains_key(group) {
            return Err(PipelineError::AlreadyExists(format!("log group {group}")));
        }
        groups.insert(group.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn create_log_stream(&self, group: &str, stream: &str) -> Result<()> {
        let mut groups = self.lock();
        let streams = groups
            .get_mut(group)
            .ok_or_else(|| PipelineError::NotFound(format!("log group {group}")))?;
        if streams.contains_key(stream) {
            return Err(PipelineError::AlreadyExists(format!(
                "log stream {group}/{stream}"
            )));
        }
        streams.insert(stream.to_string(), Vec::new());
        Ok(())
    }

    async fn put_log_events(&self, group: &str, stream: &str, events: &[LogEvent]) -> Result<()> {
        let mut groups = self.lock();
        let stored = groups
            .get_mut(group)
            .and_then(|streams| streams.get_mut(stream))
            .ok_or_else(|| PipelineError::NotFound(format!("log stream {group}/{stream}")))?;
        stored.extend_from_slice(events);
        Ok(())
    }
}

/// Log store that exports each batch to an object store.
#[derive(Debug)]
pub struct ObjectLogStore {
    index: MemoryLogStore,
    store: Arc<dyn ObjectStore>,
    prefix: String,
    sequence: AtomicU64,
    written: Mutex<Vec<String>>,
}

impl ObjectLogStore {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        Self {
            index: MemoryLogStore::new(),
            store,
            prefix: prefix.into().trim_matches('/').to_string(),
            sequence: AtomicU64::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Keys of every export object written so far, oldest first.
    #[must_use]
    pub fn written_keys(&self) -> Vec<String> {
        match self.written.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn export_key(&self, stream: &str, now: NaiveDateTime) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let partitioned = format!(
            "year={:04}/month={:02}/day={:02}/{stream}-{seq:06}.json",
            now.year(),
            now.month(),
            now.day()
        );
        if self.prefix.is_empty() {
            partitioned
        } else {
            format!("{}/{partitioned}", self.prefix)
        }
    }
}

#[async_trait]
impl LogStore for ObjectLogStore {
    async fn create_log_group(&self, group: &str) -> Result<()> {
        self.index.create_log_group(group).await
    }

    async fn create_log_stream(&self, group: &str, stream: &str) -> Result<()> {
        self.index.create_log_stream(group, stream).await
    }

    async fn put_log_events(&self, group: &str, stream: &str, events: &[LogEvent]) -> Result<()> {
        self.index.put_log_events(group, stream, events).await?;

        let envelope = ExportEnvelope {
            log_group: group.to_string(),
            log_stream: stream.to_string(),
            log_events: events.to_vec(),
        };
        let mut line = serde_json::to_vec(&envelope)?;
        line.push(b'\n');

        let payload = PutPayload::from(line);
        let now = chrono::Local::now().naive_local();
        // Another writer may have used the same stream name and sequence.
        let key = loop {
            let key = self.export_key(stream, now);
            let created = self
                .store
                .put_opts(&Path::from(key.as_str()), payload.clone(), PutMode::Create.into())
                .await;
            match created {
                Ok(_) => break key,
                Err(object_store::Error::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        };
        diagnostics::log_debug!("Exported {count} events to {key}", count: events.len() as u64, key: key.as_str());

        match self.written.lock() {
            Ok(mut guard) => guard.push(key),
            Err(poisoned) => poisoned.into_inner().push(key),
        }
        Ok(())
    }
}
