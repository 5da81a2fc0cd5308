// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for roboeval.
//!
//! Errors fall into three groups:
//! - Archive level (opening, format detection) which abort recording construction
//! - Channel level (wire decode, missing fields) which stay inside one extraction pass
//! - Caller level (accessor preconditions, KPI data requirements, configuration)

use thiserror::Error;

/// Errors that can occur while extracting or evaluating a recording.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The archive path could not be opened as a bag or MCAP file
    #[error("Failed to open archive '{path}': {reason}")]
    ArchiveOpen {
        /// Archive path as given by the caller
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// One channel could not be read or decoded
    #[error("Failed to decode channel '{channel}': {reason}")]
    ChannelDecode {
        /// Channel (topic) name
        channel: String,
        /// Underlying failure
        reason: String,
    },

    /// A required field is absent from a decoded record
    #[error("Missing field '{field}' in record")]
    MissingField {
        /// Dotted field path (e.g. "wrench.force")
        field: String,
    },

    /// Low-level wire decode failure
    #[error("{context} decode error: {message}")]
    Wire {
        /// Decoder context (e.g. "ros1", "cdr")
        context: String,
        /// Error message
        message: String,
    },

    /// The message type has no decoder
    #[error("Unsupported message type: '{message_type}'")]
    UnsupportedType {
        /// Message type name as recorded
        message_type: String,
    },

    /// Accessor called with an actuator index that holds no data
    #[error("Invalid {family} index: {index}")]
    InvalidIndex {
        /// Actuator family and signal (e.g. "thruster output")
        family: &'static str,
        /// Requested index
        index: usize,
    },

    /// The desired trajectory has no points
    #[error("Desired trajectory is empty")]
    EmptyTrajectory,

    /// A metric requires data the recording does not hold
    #[error("Insufficient data: {what}")]
    InsufficientData {
        /// Description of the missing data
        what: String,
    },

    /// Time offset outside of the recorded time span
    #[error("Time offset {offset} is outside of [0, {max}]")]
    InvalidTimeOffset {
        /// Requested offset in seconds
        offset: f64,
        /// Last available timestamp in seconds
        max: f64,
    },

    /// Invalid evaluation or cost function configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error while writing results
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvalError {
    /// Create an archive open error.
    pub fn archive_open(path: impl Into<String>, reason: impl Into<String>) -> Self {
        EvalError::ArchiveOpen {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a channel decode error.
    pub fn channel_decode(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        EvalError::ChannelDecode {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        EvalError::MissingField {
            field: field.into(),
        }
    }

    /// Create a wire decode error.
    pub fn wire(context: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Wire {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported message type error.
    pub fn unsupported_type(message_type: impl Into<String>) -> Self {
        EvalError::UnsupportedType {
            message_type: message_type.into(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(what: impl Into<String>) -> Self {
        EvalError::InsufficientData { what: what.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        EvalError::Config {
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            EvalError::ArchiveOpen { path, reason } => {
                vec![("path", path.clone()), ("reason", reason.clone())]
            }
            EvalError::ChannelDecode { channel, reason } => {
                vec![("channel", channel.clone()), ("reason", reason.clone())]
            }
            EvalError::MissingField { field } => vec![("field", field.clone())],
            EvalError::Wire { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            EvalError::UnsupportedType { message_type } => {
                vec![("type", message_type.clone())]
            }
            EvalError::InvalidIndex { family, index } => {
                vec![("family", family.to_string()), ("index", index.to_string())]
            }
            EvalError::EmptyTrajectory => vec![("trajectory", "desired".to_string())],
            EvalError::InsufficientData { what } => vec![("what", what.clone())],
            EvalError::InvalidTimeOffset { offset, max } => {
                vec![("offset", offset.to_string()), ("max", max.to_string())]
            }
            EvalError::Config { message } => vec![("message", message.clone())],
            EvalError::Io(err) => vec![("message", err.to_string())],
        }
    }
}

/// Result type for roboeval operations.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_open_error() {
        let err = EvalError::archive_open("/tmp/run.bag", "not found");
        assert!(matches!(err, EvalError::ArchiveOpen { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to open archive '/tmp/run.bag': not found"
        );
    }

    #[test]
    fn test_channel_decode_error() {
        let err = EvalError::channel_decode("/rexrov/wrench_perturbation", "bad record");
        assert_eq!(
            err.to_string(),
            "Failed to decode channel '/rexrov/wrench_perturbation': bad record"
        );
    }

    #[test]
    fn test_invalid_index_error() {
        let err = EvalError::InvalidIndex {
            family: "thruster output",
            index: 7,
        };
        assert_eq!(err.to_string(), "Invalid thruster output index: 7");
    }

    #[test]
    fn test_missing_field_display() {
        let err = EvalError::missing_field("wrench.force");
        assert_eq!(err.to_string(), "Missing field 'wrench.force' in record");
    }

    #[test]
    fn test_log_fields_channel_decode() {
        let err = EvalError::channel_decode("/odom", "truncated");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("channel", "/odom".to_string()));
        assert_eq!(fields[1], ("reason", "truncated".to_string()));
    }

    #[test]
    fn test_log_fields_time_offset() {
        let err = EvalError::InvalidTimeOffset {
            offset: 12.5,
            max: 10.0,
        };
        let fields = err.log_fields();
        assert_eq!(fields[0], ("offset", "12.5".to_string()));
        assert_eq!(fields[1], ("max", "10".to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EvalError = io_err.into();
        assert!(matches!(err, EvalError::Io(_)));
        assert_eq!(err.to_string(), "IO error: file not found");
    }
}
