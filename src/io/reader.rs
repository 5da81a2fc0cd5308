// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Archive opening with automatic format detection.

use std::path::Path;

use tracing::info;

use crate::core::{EvalError, Result};

use super::detection::detect_format;
use super::formats::{BagSource, McapSource};
use super::metadata::FileFormat;
use super::traits::RecordSource;

/// Open an archive as a record source, detecting its format.
///
/// Every failure, including an unrecognized format, is reported as
/// [`EvalError::ArchiveOpen`].
///
/// # Example
///
/// ```rust,no_run
/// use roboeval::io::open_source;
///
/// let source = open_source("run.bag")?;
/// println!("{} channels", source.channels().len());
/// # Ok::<(), roboeval::EvalError>(())
/// ```
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn RecordSource>> {
    let path_ref = path.as_ref();
    let format = detect_format(path_ref)?;

    let source: Box<dyn RecordSource> = match format {
        FileFormat::Bag => Box::new(BagSource::open(path_ref)?),
        FileFormat::Mcap => Box::new(McapSource::open(path_ref)?),
        FileFormat::Memory | FileFormat::Unknown => {
            return Err(EvalError::archive_open(
                path_ref.display().to_string(),
                "Unrecognized archive format (expected ROS1 bag or MCAP)",
            ));
        }
    };

    info!(
        context = "open_source",
        path = %path_ref.display(),
        format = %format,
        channels = source.channels().len(),
        "Opened archive"
    );
    Ok(source)
}
