// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP record source using the mcap crate over a memory-mapped file.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{EvalError, Result};
use crate::encoding::decode_message;
use crate::io::metadata::{ChannelInfo, FileFormat, Record};
use crate::io::traits::RecordSource;

/// MCAP record source.
///
/// The catalogue comes from the summary section when present and from a
/// full scan of the data section otherwise. Channels are ordered by ID.
pub struct McapSource {
    path: String,
    mmap: memmap2::Mmap,
    channels: Vec<ChannelInfo>,
}

impl McapSource {
    /// Open an MCAP file and read its channel catalogue.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref)
            .map_err(|e| EvalError::archive_open(&path_str, format!("Failed to open file: {e}")))?;
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| EvalError::archive_open(&path_str, format!("Failed to mmap file: {e}")))?;

        let mut channels = match mcap::Summary::read(&mmap) {
            Ok(Some(summary)) => {
                let counts: HashMap<u16, u64> = summary
                    .stats
                    .as_ref()
                    .map(|stats| {
                        stats
                            .channel_message_counts
                            .iter()
                            .map(|(id, count)| (*id, *count))
                            .collect()
                    })
                    .unwrap_or_default();

                summary
                    .channels
                    .values()
                    .map(|channel| {
                        channel_info(channel).with_message_count(
                            counts.get(&channel.id).copied().unwrap_or(0),
                        )
                    })
                    .collect::<Vec<_>>()
            }
            Ok(None) => {
                warn!(
                    context = "McapSource",
                    path = %path_str,
                    "MCAP file has no summary section, scanning for channels"
                );
                Self::scan_channels(&mmap, &path_str)?
            }
            Err(e) => {
                warn!(
                    context = "McapSource",
                    path = %path_str,
                    error = %e,
                    "Failed to read summary, scanning for channels"
                );
                Self::scan_channels(&mmap, &path_str)?
            }
        };
        channels.sort_by_key(|c| c.id);

        debug!(
            context = "McapSource",
            path = %path_str,
            channels = channels.len(),
            "Opened MCAP"
        );

        Ok(Self {
            path: path_str,
            mmap,
            channels,
        })
    }

    /// Build the catalogue by walking every message.
    fn scan_channels(mmap: &memmap2::Mmap, path: &str) -> Result<Vec<ChannelInfo>> {
        let stream = mcap::MessageStream::new(mmap)
            .map_err(|e| EvalError::archive_open(path, format!("Failed to read MCAP: {e}")))?;

        let mut channels: HashMap<u16, ChannelInfo> = HashMap::new();
        for result in stream {
            let message = result
                .map_err(|e| EvalError::archive_open(path, format!("Failed to scan MCAP: {e}")))?;
            channels
                .entry(message.channel.id)
                .or_insert_with(|| channel_info(&message.channel))
                .message_count += 1;
        }

        Ok(channels.into_values().collect())
    }
}

fn channel_info(channel: &mcap::Channel<'_>) -> ChannelInfo {
    let message_type = channel
        .schema
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    ChannelInfo::new(u32::from(channel.id), channel.topic.clone(), message_type)
        .with_encoding(channel.message_encoding.clone())
}

impl RecordSource for McapSource {
    fn path(&self) -> &str {
        &self.path
    }

    fn format(&self) -> FileFormat {
        FileFormat::Mcap
    }

    fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    fn read(&self, topic: &str) -> Result<Vec<Record>> {
        if !self.has_topic(topic) {
            return Ok(Vec::new());
        }

        let stream = mcap::MessageStream::new(&self.mmap)
            .map_err(|e| EvalError::channel_decode(topic, format!("Failed to read MCAP: {e}")))?;

        let mut records = Vec::new();
        for result in stream {
            let message = result
                .map_err(|e| EvalError::channel_decode(topic, format!("Read error: {e}")))?;
            if message.channel.topic != topic {
                continue;
            }
            let message_type = message
                .channel
                .schema
                .as_ref()
                .map(|s| s.name.as_str())
                .unwrap_or_default();
            let decoded = decode_message(
                message_type,
                &message.channel.message_encoding,
                &message.data,
            )
            .map_err(|e| EvalError::channel_decode(topic, e.to_string()))?;
            records.push(Record::new(message.log_time, decoded));
        }

        // Chunks may overlap in time; the data section is not log-time ordered
        records.sort_by_key(|r| r.log_time);
        Ok(records)
    }
}
