// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared metadata types for all record sources.
//!
//! These types describe an archive independently of its on-disk format
//! (ROS1 bag, MCAP, or an in-memory source).

use crate::core::DecodedMessage;

/// Information about a recorded channel.
///
/// A channel (a "topic" in ROS terminology) is a named stream of records of
/// a single message type. Its identity within a recording is the topic name.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    /// Channel or connection ID within the file
    pub id: u32,
    /// Topic name (e.g., "/rexrov/pose_gt")
    pub topic: String,
    /// Message type name as recorded (e.g., "nav_msgs/Odometry", "nav_msgs/msg/Odometry")
    pub message_type: String,
    /// Serialization of the payload ("ros1" or "cdr")
    pub encoding: String,
    /// Number of records in this channel (0 if unknown)
    pub message_count: u64,
    /// Caller ID of the publishing node (ROS1 specific)
    pub callerid: Option<String>,
}

impl ChannelInfo {
    /// Create a new ChannelInfo.
    pub fn new(id: u32, topic: impl Into<String>, message_type: impl Into<String>) -> Self {
        Self {
            id,
            topic: topic.into(),
            message_type: message_type.into(),
            encoding: String::new(),
            message_count: 0,
            callerid: None,
        }
    }

    /// Set the encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the message count.
    pub fn with_message_count(mut self, count: u64) -> Self {
        self.message_count = count;
        self
    }

    /// Set the caller ID.
    pub fn with_callerid(mut self, callerid: impl Into<String>) -> Self {
        self.callerid = Some(callerid.into());
        self
    }
}

/// One decoded record of a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Archive log timestamp (nanoseconds since Unix epoch)
    pub log_time: u64,
    /// Decoded payload
    pub message: DecodedMessage,
}

impl Record {
    /// Create a new Record.
    pub fn new(log_time: u64, message: DecodedMessage) -> Self {
        Self { log_time, message }
    }

    /// Log time in seconds.
    pub fn log_time_secs(&self) -> f64 {
        self.log_time as f64 / 1e9
    }
}

/// Detected file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// MCAP format
    Mcap,
    /// ROS1 bag format
    Bag,
    /// In-memory record source
    Memory,
    /// Unknown format
    Unknown,
}

impl FileFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Mcap => "mcap",
            FileFormat::Bag => "bag",
            FileFormat::Memory | FileFormat::Unknown => "",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Mcap => write!(f, "MCAP"),
            FileFormat::Bag => write!(f, "ROS1 Bag"),
            FileFormat::Memory => write!(f, "Memory"),
            FileFormat::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{message_of, CodecValue};

    #[test]
    fn test_channel_info_builder() {
        let info = ChannelInfo::new(3, "/rexrov/pose_gt", "nav_msgs/Odometry")
            .with_encoding("ros1")
            .with_message_count(100)
            .with_callerid("/gazebo");

        assert_eq!(info.id, 3);
        assert_eq!(info.topic, "/rexrov/pose_gt");
        assert_eq!(info.encoding, "ros1");
        assert_eq!(info.message_count, 100);
        assert_eq!(info.callerid.as_deref(), Some("/gazebo"));
    }

    #[test]
    fn test_record_log_time_secs() {
        let record = Record::new(
            2_500_000_000,
            message_of([("data", CodecValue::Float64(1.0))]),
        );
        assert_eq!(record.log_time_secs(), 2.5);
    }

    #[test]
    fn test_file_format() {
        assert_eq!(FileFormat::Mcap.extension(), "mcap");
        assert_eq!(FileFormat::Memory.extension(), "");
        assert_eq!(format!("{}", FileFormat::Bag), "ROS1 Bag");
    }
}
