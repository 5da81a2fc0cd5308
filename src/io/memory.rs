// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory record source.
//!
//! Holds pre-decoded records per topic. Used to build recordings without an
//! archive on disk, e.g. from live data or in tests.

use std::collections::HashMap;

use crate::core::{DecodedMessage, EvalError, Result};

use super::metadata::{ChannelInfo, FileFormat, Record};
use super::traits::RecordSource;

/// Record source backed by in-memory records.
///
/// # Example
///
/// ```
/// use roboeval::core::{message_of, CodecValue};
/// use roboeval::io::{MemorySource, RecordSource};
///
/// let mut source = MemorySource::new("run-1")
///     .with_channel("/rexrov/thrusters/0/thrust", "uuv_gazebo_ros_plugins_msgs/FloatStamped");
/// source.push(
///     "/rexrov/thrusters/0/thrust",
///     1_000_000_000,
///     message_of([("data", CodecValue::Float64(12.0))]),
/// );
/// assert_eq!(source.read("/rexrov/thrusters/0/thrust").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    channels: Vec<ChannelInfo>,
    records: HashMap<String, Vec<Record>>,
    failures: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source with a descriptive name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a channel. Registering a known topic again is a no-op.
    pub fn with_channel(mut self, topic: impl Into<String>, message_type: impl Into<String>) -> Self {
        self.register(topic.into(), message_type.into());
        self
    }

    /// Make every read of `topic` fail with a channel decode error.
    pub fn with_failure(mut self, topic: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(topic.into(), reason.into());
        self
    }

    /// Append a record to a topic, registering the topic with an empty
    /// message type if it is not in the catalogue yet.
    pub fn push(&mut self, topic: &str, log_time: u64, message: DecodedMessage) {
        if !self.channels.iter().any(|c| c.topic == topic) {
            self.register(topic.to_string(), String::new());
        }
        if let Some(channel) = self.channels.iter_mut().find(|c| c.topic == topic) {
            channel.message_count += 1;
        }
        self.records
            .entry(topic.to_string())
            .or_default()
            .push(Record::new(log_time, message));
    }

    /// Builder form of [`MemorySource::push`].
    pub fn with_record(mut self, topic: &str, log_time: u64, message: DecodedMessage) -> Self {
        self.push(topic, log_time, message);
        self
    }

    fn register(&mut self, topic: String, message_type: String) {
        if self.channels.iter().any(|c| c.topic == topic) {
            return;
        }
        let id = self.channels.len() as u32;
        self.channels
            .push(ChannelInfo::new(id, topic, message_type).with_encoding("memory"));
    }
}

impl RecordSource for MemorySource {
    fn path(&self) -> &str {
        &self.name
    }

    fn format(&self) -> FileFormat {
        FileFormat::Memory
    }

    fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    fn read(&self, topic: &str) -> Result<Vec<Record>> {
        if let Some(reason) = self.failures.get(topic) {
            return Err(EvalError::channel_decode(topic, reason.clone()));
        }
        Ok(self.records.get(topic).cloned().unwrap_or_default())
    }
}
