// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record source abstraction.
//!
//! Extraction only needs two things from an archive: the channel catalogue
//! and the ordered records of one channel. Every backend (bag, MCAP, memory)
//! implements [`RecordSource`], so recordings can be built from any of them.

use crate::core::Result;

use super::metadata::{ChannelInfo, FileFormat, Record};

/// Trait for reading decoded records from a recorded archive.
///
/// # Example
///
/// ```no_run
/// use roboeval::io::RecordSource;
///
/// fn list_topics(source: &dyn RecordSource) {
///     for channel in source.channels() {
///         println!("{} ({})", channel.topic, channel.message_type);
///     }
/// }
/// ```
pub trait RecordSource: Send + Sync {
    /// Get the source path (or a descriptive name for in-memory sources).
    fn path(&self) -> &str;

    /// Get the source format.
    fn format(&self) -> FileFormat;

    /// Get the channel catalogue.
    ///
    /// The order is deterministic for a given archive.
    fn channels(&self) -> &[ChannelInfo];

    /// Get channel info by topic name.
    fn channel_by_topic(&self, topic: &str) -> Option<&ChannelInfo> {
        self.channels().iter().find(|c| c.topic == topic)
    }

    /// Check whether the catalogue lists a topic.
    fn has_topic(&self, topic: &str) -> bool {
        self.channel_by_topic(topic).is_some()
    }

    /// Read and decode all records of a topic in archive order.
    ///
    /// An unknown topic yields an empty vector. A record that fails to decode
    /// fails the whole read.
    fn read(&self, topic: &str) -> Result<Vec<Record>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        channels: Vec<ChannelInfo>,
    }

    impl RecordSource for Fixed {
        fn path(&self) -> &str {
            "fixed"
        }

        fn format(&self) -> FileFormat {
            FileFormat::Memory
        }

        fn channels(&self) -> &[ChannelInfo] {
            &self.channels
        }

        fn read(&self, _topic: &str) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_channel_by_topic() {
        let source = Fixed {
            channels: vec![
                ChannelInfo::new(0, "/a", "std_msgs/Float64"),
                ChannelInfo::new(1, "/b", "nav_msgs/Odometry"),
            ],
        };
        assert_eq!(
            source.channel_by_topic("/b").map(|c| c.message_type.as_str()),
            Some("nav_msgs/Odometry")
        );
        assert!(source.has_topic("/a"));
        assert!(!source.has_topic("/c"));
    }
}
