//! Modern, type-safe Rust library for live ROV and diver telemetry decoding.
//!
//! Rovtel ingests the continuous character stream a survey sensor package
//! emits over a serial line, frames it, and publishes a live field→value
//! snapshot used to auto-populate inspection records.
//!
//! # Features
//!
//! - **Live decoding**: continuous framing and extraction against an
//!   unbounded stream, bounded memory, fixed CPU cost
//! - **Two addressing schemes**: fixed column position or tagged-field
//!   lookup, per field
//! - **Graceful degradation**: partial frames, absent tags and malformed
//!   numbers never interrupt the live display
//! - **Configuration-driven**: one YAML blob describes the device, the
//!   framing and every field
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rovtel::{Rovtel, DecoderConfig, SampleRate};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> rovtel::Result<()> {
//!     let blob = std::fs::read_to_string("telemetry.yaml")?;
//!     let config = DecoderConfig::from_yaml(&blob)?;
//!
//!     let connection = Rovtel::connect(&config).await?;
//!     let mut snapshots = connection.snapshots(SampleRate::Max(4));
//!
//!     while let Some(snapshot) = snapshots.next().await {
//!         if let Some(depth) = snapshot.get("Depth") {
//!             println!("Depth: {depth}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Pure decoding core
pub mod buffer;
pub mod decode;

// Stream-based session architecture
pub mod config;
pub mod connection;
pub mod driver;
pub mod stream;
pub mod transport;
pub mod transports;

// Core exports
pub use error::*;
pub use types::*;

// Configuration exports
pub use config::{ConnectionConfig, DecoderConfig, NetworkConfig, Parity, SerialConfig, TransportKind};

// Session exports
pub use buffer::{RollingBuffer, SharedBuffer};
pub use connection::SerialConnection;
pub use driver::{Driver, DriverChannels, LinkState};
pub use transport::Transport;
pub use transports::SerialTransport;

/// Unified entry point for rovtel decoding sessions.
///
/// Dispatches on the configured transport type. Only the serial transport
/// is implemented; a `network` configuration is rejected with a clear
/// error instead of failing silently.
///
/// # Example
///
/// ```rust,no_run
/// use rovtel::{Rovtel, DecoderConfig};
///
/// # #[tokio::main]
/// # async fn main() -> rovtel::Result<()> {
/// let config = DecoderConfig::from_yaml("...")?;
/// let connection = Rovtel::connect(&config).await?;
/// # Ok(())
/// # }
/// ```
pub struct Rovtel;

impl Rovtel {
    /// Connect to the configured telemetry source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The configured transport type is not supported
    /// - The serial device cannot be acquired
    pub async fn connect(config: &DecoderConfig) -> Result<SerialConnection> {
        match config.connection.kind {
            TransportKind::Serial => SerialConnection::connect(config).await,
            TransportKind::Network => Err(DecoderError::unsupported_transport("network")),
        }
    }
}
