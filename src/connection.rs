//! Live serial connection for telemetry decoding

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};

use crate::config::DecoderConfig;
use crate::driver::{Driver, DriverChannels, LinkState};
use crate::error::Result;
use crate::stream::PaceExt;
use crate::transports::SerialTransport;
use crate::types::{DecodedSnapshot, SampleRate};

/// Live connection to one serial telemetry source.
///
/// Owns the decode session: the open device, the rolling buffer, and the
/// two session tasks. Dropping the connection cancels the tasks; call
/// [`SerialConnection::disconnect`] for the fully ordered teardown.
#[derive(Debug)]
pub struct SerialConnection {
    /// Snapshot watch receiver
    snapshots: watch::Receiver<Option<Arc<DecodedSnapshot>>>,

    /// Link-state watch receiver
    link: watch::Receiver<LinkState>,

    /// Snapshots per second at the configured poll cadence
    native_hz: f64,

    /// Session plumbing, taken by disconnect
    channels: Option<DriverChannels>,
}

impl SerialConnection {
    /// Create a new serial connection.
    ///
    /// Validates the configuration, opens the configured device, and starts
    /// the session tasks. The first published snapshot maps every
    /// configured label to the placeholder; real values follow as soon as a
    /// complete frame arrives.
    pub async fn connect(config: &DecoderConfig) -> Result<Self> {
        config.validate()?;

        info!(port = %config.connection.serial.com_port, "connecting live telemetry");

        let transport = SerialTransport::open(&config.connection.serial)?;
        let channels = Driver::spawn(transport, config);

        info!(
            native_hz = config.native_hz(),
            fields = config.fields.len(),
            "live connection established"
        );

        Ok(Self {
            snapshots: channels.snapshots.clone(),
            link: channels.link.clone(),
            native_hz: config.native_hz(),
            channels: Some(channels),
        })
    }

    /// Subscribe to decoded snapshots.
    ///
    /// Delivery is latest-wins: a subscriber that polls slower than the
    /// decode cadence sees the most recent snapshot, never a backlog. The
    /// stream ends when the session is torn down.
    pub fn snapshots(&self, rate: SampleRate) -> impl Stream<Item = Arc<DecodedSnapshot>> + 'static {
        let snapshots =
            WatchStream::new(self.snapshots.clone()).filter_map(|opt| async move { opt });

        match rate.pace_period(self.native_hz) {
            None => snapshots.boxed(),
            Some(period) => snapshots.pace(period).boxed(),
        }
    }

    /// The most recently published snapshot, if any.
    pub fn current_snapshot(&self) -> Option<Arc<DecodedSnapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Current connection lifecycle state.
    pub fn link_state(&self) -> LinkState {
        *self.link.borrow()
    }

    /// Link-state changes as a stream, current state first.
    pub fn link_updates(&self) -> impl Stream<Item = LinkState> + 'static {
        WatchStream::new(self.link.clone())
    }

    /// Snapshots per second at the configured poll cadence.
    pub fn native_hz(&self) -> f64 {
        self.native_hz
    }

    /// Ordered teardown: cancel the reader, await both session tasks, close
    /// the device, clear the buffer and the published snapshot.
    pub async fn disconnect(mut self) {
        if let Some(channels) = self.channels.take() {
            channels.shutdown().await;
        }
    }
}

impl Drop for SerialConnection {
    fn drop(&mut self) {
        if let Some(channels) = &self.channels {
            debug!("dropping live connection");
            channels.cancel.cancel();
        }
    }
}
