//! Error types for the label library.
//!
//! This module defines all error types that can occur while extracting
//! shipment data and generating labels.

/// Result type alias for label library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during label generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Label dimensions must be strictly positive
    #[error("Invalid label dimensions: {width} x {height} cm (both must be > 0)")]
    InvalidDimensions {
        /// Requested width in centimeters
        width: f32,
        /// Requested height in centimeters
        height: f32,
    },

    /// Malformed XML document (no partial record is produced)
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The page emitter produced zero-length output
    #[error("Emitter produced no output")]
    EmptyOutput,

    /// Requested volume count exceeds the configured cap
    #[error("Volume count {requested} exceeds the configured cap of {cap}")]
    VolumeCapExceeded {
        /// Volumes requested by the caller or resolved from the document
        requested: u32,
        /// Configured upper bound
        cap: u32,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_error() {
        let err = Error::InvalidDimensions {
            width: 0.0,
            height: 5.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid label dimensions"));
        assert!(msg.contains("0 x 5"));
    }

    #[test]
    fn test_parse_error() {
        let err = Error::Parse("unexpected end tag at position 42".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("XML parse error"));
        assert!(msg.contains("position 42"));
    }

    #[test]
    fn test_volume_cap_error() {
        let err = Error::VolumeCapExceeded {
            requested: 5000,
            cap: 500,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("5000"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
