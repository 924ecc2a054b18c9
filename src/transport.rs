//! Transport trait for character-stream sources

use crate::Result;

/// Trait for telemetry character sources
///
/// Transports abstract over where the text stream comes from (a serial
/// device today, a network socket once implemented) and own the underlying
/// handle. The decoder only needs two things: the next chunk of text, and a
/// name to log.
#[async_trait::async_trait]
pub trait Transport: Send + 'static {
    /// Get the next chunk of received text
    ///
    /// Returns:
    /// - `Ok(Some(chunk))` - More data arrived
    /// - `Ok(None)` - Stream ended (normal termination)
    /// - `Err(e)` - Read failure; the read loop logs it and stops
    ///
    /// The future must be cancel-safe at its await point: disconnect
    /// cancels an in-flight read rather than waiting for more data.
    async fn next_chunk(&mut self) -> Result<Option<String>>;

    /// Human-readable identity of the source, e.g. the device path
    fn descriptor(&self) -> String;
}
