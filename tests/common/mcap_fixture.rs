// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP archives written with `mcap::Writer` for tests.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use roboeval::encoding::FLOAT_STAMPED;

use super::{nanos, ODOM, REFERENCE};

// ============================================================================
// Payload Builders
// ============================================================================

/// Little-endian CDR payload with its encapsulation header.
pub struct Cdr {
    buf: Vec<u8>,
}

impl Cdr {
    pub fn new() -> Self {
        Self {
            buf: vec![0x00, 0x01, 0x00, 0x00],
        }
    }

    pub fn align(&mut self, size: usize) {
        while (self.buf.len() - 4) % size != 0 {
            self.buf.push(0);
        }
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64s(&mut self, values: &[f64]) -> &mut Self {
        for v in values {
            self.align(8);
            self.buf.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u32(s.len() as u32 + 1);
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        self
    }

    pub fn header(&mut self, sec: i32) -> &mut Self {
        self.i32(sec).u32(0).string("world")
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

pub fn cdr_trajectory_point(sec: i32, position: [f64; 3]) -> Vec<u8> {
    Cdr::new()
        .header(sec)
        .f64s(&position)
        .f64s(&[0.0, 0.0, 0.0, 1.0])
        .f64s(&[0.0; 6])
        .f64s(&[0.0; 6])
        .finish()
}

pub fn cdr_odometry(sec: i32, position: [f64; 3]) -> Vec<u8> {
    Cdr::new()
        .header(sec)
        .string("base_link")
        .f64s(&position)
        .f64s(&[0.0, 0.0, 0.0, 1.0])
        .f64s(&[0.0; 36])
        .f64s(&[0.5, 0.0, 0.0, 0.0, 0.0, 0.0])
        .f64s(&[0.0; 36])
        .finish()
}

/// ROS1 `FloatStamped`: packed, header with sequence number.
pub fn ros1_float_stamped(secs: u32, value: f64) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&secs.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&5u32.to_le_bytes());
    buf.extend_from_slice(b"world");
    buf.extend_from_slice(&value.to_le_bytes());
    buf
}

// ============================================================================
// Archive Writer
// ============================================================================

pub struct Topic<'a> {
    pub name: &'a str,
    pub message_type: &'a str,
    pub encoding: &'a str,
    pub messages: Vec<(u64, Vec<u8>)>,
}

pub fn write_mcap(path: &Path, topics: &[Topic<'_>]) {
    let file = BufWriter::new(File::create(path).unwrap());
    let mut writer = mcap::Writer::new(file).unwrap();

    for topic in topics {
        let schema_encoding = if topic.encoding == "cdr" { "ros2msg" } else { "ros1msg" };
        let definition = format!("# {}\n", topic.message_type);
        let schema_id = writer
            .add_schema(topic.message_type, schema_encoding, definition.as_bytes())
            .unwrap();
        let channel_id = writer
            .add_channel(schema_id, topic.name, topic.encoding, &BTreeMap::new())
            .unwrap();

        for (sequence, (log_time, data)) in topic.messages.iter().enumerate() {
            writer
                .write_to_known_channel(
                    &mcap::records::MessageHeader {
                        channel_id,
                        sequence: sequence as u32,
                        log_time: *log_time,
                        publish_time: *log_time,
                    },
                    data,
                )
                .unwrap();
        }
    }

    writer.finish().unwrap();
}

pub fn rexrov_topics() -> Vec<Topic<'static>> {
    vec![
        Topic {
            name: REFERENCE,
            message_type: "uuv_control_msgs/msg/TrajectoryPoint",
            encoding: "cdr",
            messages: vec![
                (nanos(0.0), cdr_trajectory_point(0, [0.0, 0.0, 0.0])),
                (nanos(1.0), cdr_trajectory_point(1, [1.0, 0.0, 0.0])),
            ],
        },
        Topic {
            name: ODOM,
            message_type: "nav_msgs/msg/Odometry",
            encoding: "cdr",
            // written out of order on purpose
            messages: vec![
                (nanos(1.0), cdr_odometry(1, [1.0, 3.0, 0.0])),
                (nanos(0.0), cdr_odometry(0, [0.0, 1.0, 0.0])),
            ],
        },
        Topic {
            name: "/rexrov/thrusters/0/thrust",
            message_type: FLOAT_STAMPED,
            encoding: "ros1",
            messages: vec![
                (nanos(0.0), ros1_float_stamped(0, -3.0)),
                (nanos(1.0), ros1_float_stamped(1, 5.0)),
            ],
        },
    ]
}
