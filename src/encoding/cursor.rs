// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for ROS1 and CDR serialized messages.
//!
//! The two serializations differ in three places only:
//! - ROS1 is packed little-endian with no alignment and no header
//! - CDR starts with a 4-byte encapsulation header whose second byte selects
//!   the byte order, and aligns primitives to their size relative to the end
//!   of that header
//! - CDR strings count the trailing NUL in their length prefix

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::core::{EvalError, Result};

/// Size of the CDR encapsulation header.
pub const CDR_HEADER_SIZE: usize = 4;

/// Serialization flavour of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// ROS1 serialization (bag files, `ros1` MCAP channels)
    Ros1,
    /// OMG CDR as used by ROS2 (`cdr` MCAP channels)
    Cdr,
}

/// Read cursor over one serialized message.
pub struct WireCursor<'a> {
    data: &'a [u8],
    offset: usize,
    /// Alignment reference point
    origin: usize,
    little_endian: bool,
    format: WireFormat,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor over ROS1 serialized data.
    pub fn new_ros1(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            origin: 0,
            little_endian: true,
            format: WireFormat::Ros1,
        }
    }

    /// Create a cursor over CDR data, including its encapsulation header.
    pub fn new_cdr(data: &'a [u8]) -> Result<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(EvalError::wire(
                "cdr",
                format!(
                    "data size {} is smaller than the {CDR_HEADER_SIZE}-byte header",
                    data.len()
                ),
            ));
        }

        // Byte 1: 0 = big endian, 1 = little endian
        let little_endian = data[1] & 0x01 == 1;

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
            little_endian,
            format: WireFormat::Cdr,
        })
    }

    /// Create a cursor for the given format.
    pub fn new(data: &'a [u8], format: WireFormat) -> Result<Self> {
        match format {
            WireFormat::Ros1 => Ok(Self::new_ros1(data)),
            WireFormat::Cdr => Self::new_cdr(data),
        }
    }

    /// Serialization flavour of this cursor.
    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Align to `size` relative to the origin. No-op for ROS1.
    fn align(&mut self, size: usize) -> Result<()> {
        if self.format == WireFormat::Ros1 {
            return Ok(());
        }
        let misalignment = (self.offset - self.origin) % size;
        if misalignment > 0 {
            self.take(size - misalignment)?;
        }
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(EvalError::wire(
                self.context(),
                format!(
                    "buffer too short: requested {count} bytes at position {}, but only {} available",
                    self.offset,
                    self.remaining()
                ),
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    fn context(&self) -> &'static str {
        match self.format {
            WireFormat::Ros1 => "ros1",
            WireFormat::Cdr => "cdr",
        }
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        let little_endian = self.little_endian;
        let bytes = self.take(4)?;
        Ok(if little_endian {
            LittleEndian::read_u32(bytes)
        } else {
            BigEndian::read_u32(bytes)
        })
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.align(8)?;
        let little_endian = self.little_endian;
        let bytes = self.take(8)?;
        Ok(if little_endian {
            LittleEndian::read_f64(bytes)
        } else {
            BigEndian::read_f64(bytes)
        })
    }

    /// Read a fixed-size f64 array (no length prefix in either format).
    pub fn read_f64_array<const N: usize>(&mut self) -> Result<[f64; N]> {
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            *slot = self.read_f64()?;
        }
        Ok(out)
    }

    /// Read a length-prefixed string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        let bytes = match self.format {
            // CDR length includes the NUL terminator
            WireFormat::Cdr => bytes.strip_suffix(b"\0").unwrap_or(bytes),
            WireFormat::Ros1 => bytes,
        };
        String::from_utf8(bytes.to_vec())
            .map_err(|e| EvalError::wire(self.context(), format!("invalid UTF-8 string: {e}")))
    }
}
