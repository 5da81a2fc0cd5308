// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection using magic numbers and file extensions.
//!
//! - **MCAP**: `\x89MCAP0\r\n` magic at the start of the file
//! - **ROS1 Bag**: `#ROSBAG V2.0` version line at the start of the file
//!
//! When the header matches neither, the extension decides.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::{EvalError, Result};

use super::metadata::FileFormat;

const MCAP_MAGIC: &[u8] = b"\x89MCAP";
const BAG_MAGIC: &[u8] = b"#ROSBAG";

/// Detect the format of an archive from its content, falling back to the
/// file extension.
///
/// Fails with [`EvalError::ArchiveOpen`] when the file cannot be opened.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<FileFormat> {
    let path_ref = path.as_ref();

    match detect_from_magic(path_ref)? {
        FileFormat::Unknown => Ok(detect_from_extension(path_ref)),
        format => Ok(format),
    }
}

/// Detect format by reading the file header.
fn detect_from_magic(path: &Path) -> Result<FileFormat> {
    let display = path.display().to_string();
    let mut file =
        File::open(path).map_err(|e| EvalError::archive_open(&display, e.to_string()))?;

    let mut header = [0u8; 16];
    let n = file
        .read(&mut header)
        .map_err(|e| EvalError::archive_open(&display, format!("Failed to read header: {e}")))?;

    Ok(format_from_header(&header[..n]))
}

fn format_from_header(header: &[u8]) -> FileFormat {
    if header.starts_with(MCAP_MAGIC) {
        FileFormat::Mcap
    } else if header.starts_with(BAG_MAGIC) {
        FileFormat::Bag
    } else {
        FileFormat::Unknown
    }
}

/// Detect format from file extension (fallback).
fn detect_from_extension(path: &Path) -> FileFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| match ext.to_lowercase().as_str() {
            "mcap" => FileFormat::Mcap,
            "bag" => FileFormat::Bag,
            _ => FileFormat::Unknown,
        })
        .unwrap_or(FileFormat::Unknown)
}
