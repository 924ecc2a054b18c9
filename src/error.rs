//! Error types for telemetry decoding.
//!
//! Only two classes of problem surface as [`DecoderError`]: a configuration
//! that cannot be used, and a transport that cannot be acquired. Everything
//! that happens per tick or per field — a frame that has not fully arrived,
//! an out-of-range offset, an absent tag, a non-numeric value handed to a
//! modifier — degrades to a stale or empty value instead of an error, so one
//! bad frame never halts the live display.
//!
//! ## Error Categories
//!
//! - **Config**: a settings blob that failed validation
//! - **ConfigParse**: a settings blob that is not valid YAML
//! - **UnsupportedTransport**: a transport type that is configured but not
//!   implemented (network)
//! - **Transport**: the serial device could not be acquired or opened
//! - **Io**: a stream-level I/O failure inside the read loop
//!
//! ## Helper Constructors
//!
//! ```rust
//! use rovtel::DecoderError;
//!
//! let err = DecoderError::config("fields[2]: duplicate label 'Depth'");
//! assert!(!err.is_retryable());
//!
//! let err = DecoderError::unsupported_transport("network");
//! assert!(!err.is_retryable());
//! ```

use thiserror::Error;

/// Result type alias for decoder operations.
pub type Result<T, E = DecoderError> = std::result::Result<T, E>;

/// Main error type for telemetry decoding operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecoderError {
    #[error("configuration rejected: {reason}")]
    Config { reason: String },

    #[error("failed to parse configuration blob")]
    ConfigParse {
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("{kind} transport is configured but not supported")]
    UnsupportedTransport { kind: String },

    #[error("failed to open {port}: {reason}")]
    Transport {
        port: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O failure on the telemetry stream")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl DecoderError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Configuration problems need an edited configuration, not a retry;
    /// transport acquisition can succeed on a later attempt once the device
    /// is free or plugged back in.
    pub fn is_retryable(&self) -> bool {
        match self {
            DecoderError::Config { .. } => false,
            DecoderError::ConfigParse { .. } => false,
            DecoderError::UnsupportedTransport { .. } => false,
            DecoderError::Transport { .. } => true,
            DecoderError::Io { .. } => true,
        }
    }

    /// Helper constructor for configuration validation failures.
    pub fn config(reason: impl Into<String>) -> Self {
        DecoderError::Config { reason: reason.into() }
    }

    /// Helper constructor for transports that are configured but unimplemented.
    pub fn unsupported_transport(kind: impl Into<String>) -> Self {
        DecoderError::UnsupportedTransport { kind: kind.into() }
    }

    /// Helper constructor for transport acquisition failures.
    pub fn transport_failed(port: impl Into<String>, reason: impl Into<String>) -> Self {
        DecoderError::Transport { port: port.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for transport acquisition failures with a source.
    pub fn transport_failed_with_source(
        port: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        DecoderError::Transport { port: port.into(), reason: reason.into(), source: Some(source) }
    }
}

impl From<std::io::Error> for DecoderError {
    fn from(err: std::io::Error) -> Self {
        DecoderError::Io { source: err }
    }
}

impl From<serde_yaml_ng::Error> for DecoderError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        DecoderError::ConfigParse { source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructors_validation() {
        let config_err = DecoderError::config("frame length must be positive");
        assert!(matches!(config_err, DecoderError::Config { .. }));

        let transport_err = DecoderError::transport_failed("/dev/ttyUSB0", "device busy");
        assert!(matches!(transport_err, DecoderError::Transport { .. }));

        let unsupported = DecoderError::unsupported_transport("network");
        assert!(matches!(unsupported, DecoderError::UnsupportedTransport { .. }));
    }

    #[test]
    fn error_messages_contain_context() {
        let err = DecoderError::transport_failed("/dev/ttyACM3", "permission denied");
        let message = err.to_string();
        assert!(message.contains("/dev/ttyACM3"));
        assert!(message.contains("permission denied"));

        let err = DecoderError::unsupported_transport("network");
        assert!(err.to_string().contains("network"));
    }

    #[test]
    fn retryability_classification() {
        assert!(DecoderError::transport_failed("COM3", "busy").is_retryable());
        assert!(
            DecoderError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
                .is_retryable()
        );
        assert!(!DecoderError::config("bad").is_retryable());
        assert!(!DecoderError::unsupported_transport("network").is_retryable());
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<DecoderError>();

        let error = DecoderError::config("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn io_conversion_preserves_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let err: DecoderError = io_err.into();
        match err {
            DecoderError::Io { source } => assert_eq!(source.to_string(), "read timed out"),
            _ => panic!("expected Io variant"),
        }
    }
}
