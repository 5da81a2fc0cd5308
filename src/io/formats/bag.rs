// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 bag record source using the rosbag crate.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::core::{EvalError, Result};
use crate::encoding::decode_message;
use crate::io::metadata::{ChannelInfo, FileFormat, Record};
use crate::io::traits::RecordSource;

/// ROS1 bag record source.
///
/// The catalogue is collected from the connection records of the index
/// section, plus any connection found only inside chunks. Channels are
/// ordered by connection ID.
pub struct BagSource {
    path: String,
    bag: rosbag::RosBag,
    channels: Vec<ChannelInfo>,
}

impl BagSource {
    /// Open a bag file and read its connection catalogue.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let bag = rosbag::RosBag::new(path_ref)
            .map_err(|e| EvalError::archive_open(&path_str, format!("Failed to open bag: {e}")))?;

        let mut connections: HashMap<u32, ChannelInfo> = HashMap::new();

        for record in bag.index_records() {
            let record = record.map_err(|e| {
                EvalError::archive_open(&path_str, format!("Failed to read index: {e}"))
            })?;
            if let rosbag::IndexRecord::Connection(conn) = record {
                connections
                    .entry(conn.id)
                    .or_insert_with(|| connection_info(conn.id, conn.topic, conn.tp, conn.caller_id));
            }
        }

        // Connections that only appear inside chunks
        for record in bag.chunk_records() {
            let record = record.map_err(|e| {
                EvalError::archive_open(&path_str, format!("Failed to read chunk: {e}"))
            })?;
            if let rosbag::ChunkRecord::Chunk(chunk) = record {
                for msg in chunk.messages() {
                    let msg = msg.map_err(|e| {
                        EvalError::archive_open(&path_str, format!("Failed to read message: {e}"))
                    })?;
                    if let rosbag::MessageRecord::Connection(conn) = msg {
                        connections.entry(conn.id).or_insert_with(|| {
                            connection_info(conn.id, conn.topic, conn.tp, conn.caller_id)
                        });
                    }
                }
            }
        }

        let mut channels: Vec<ChannelInfo> = connections.into_values().collect();
        channels.sort_by_key(|c| c.id);

        debug!(
            context = "BagSource",
            path = %path_str,
            channels = channels.len(),
            "Opened bag"
        );

        Ok(Self {
            path: path_str,
            bag,
            channels,
        })
    }
}

fn connection_info(id: u32, topic: &str, tp: &str, caller_id: &str) -> ChannelInfo {
    let info = ChannelInfo::new(id, topic, tp).with_encoding("ros1");
    if caller_id.is_empty() {
        info
    } else {
        info.with_callerid(caller_id)
    }
}

impl RecordSource for BagSource {
    fn path(&self) -> &str {
        &self.path
    }

    fn format(&self) -> FileFormat {
        FileFormat::Bag
    }

    fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    fn read(&self, topic: &str) -> Result<Vec<Record>> {
        // A topic may be recorded through several connections
        let types: HashMap<u32, &str> = self
            .channels
            .iter()
            .filter(|c| c.topic == topic)
            .map(|c| (c.id, c.message_type.as_str()))
            .collect();
        if types.is_empty() {
            return Ok(Vec::new());
        }
        let conn_ids: HashSet<u32> = types.keys().copied().collect();

        let mut records = Vec::new();
        for record in self.bag.chunk_records() {
            let record =
                record.map_err(|e| EvalError::channel_decode(topic, format!("Failed to read chunk: {e}")))?;
            let rosbag::ChunkRecord::Chunk(chunk) = record else {
                continue;
            };
            for msg in chunk.messages() {
                let msg = msg.map_err(|e| {
                    EvalError::channel_decode(topic, format!("Failed to read message: {e}"))
                })?;
                let rosbag::MessageRecord::MessageData(data) = msg else {
                    continue;
                };
                if !conn_ids.contains(&data.conn_id) {
                    continue;
                }
                let message_type = types.get(&data.conn_id).copied().unwrap_or_default();
                let message = decode_message(message_type, "ros1", data.data)
                    .map_err(|e| EvalError::channel_decode(topic, e.to_string()))?;
                records.push(Record::new(data.time, message));
            }
        }

        // Chunks are not guaranteed to be in time order
        records.sort_by_key(|r| r.log_time);
        Ok(records)
    }
}
