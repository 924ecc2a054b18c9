//! Driver spawns and manages the decode session tasks.
//!
//! One session owns two cooperating tasks:
//! - the **read task**, push-driven, awaiting the transport and appending
//!   every received chunk to the shared rolling buffer;
//! - the **decode task**, pull-driven, waking on a fixed interval to frame
//!   and extract against one consistent buffer snapshot per tick.
//!
//! The two are intentionally decoupled: polling caps decode work at a fixed
//! rate no matter how fast the device streams, trading one interval of
//! latency for a predictable CPU cost and render rate.

use std::sync::{Arc, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::buffer::{RollingBuffer, SharedBuffer};
use crate::config::DecoderConfig;
use crate::decode::{decode_fields, locate_frame};
use crate::transport::Transport;
use crate::types::{DecodedSnapshot, FieldMapping, ParsingConfig};

/// Per-tick framing looks at no more than this many trailing characters.
const DECODE_WINDOW_CHARS: usize = 4096;

/// Buffer capacity: a few frames of slack beyond the decode window.
fn buffer_cap(frame_length: usize) -> usize {
    (frame_length.saturating_mul(8)).max(DECODE_WINDOW_CHARS)
}

/// Connection lifecycle as seen by consumers.
///
/// There is no reconnecting state: after the stream ends or is torn down,
/// a new connection is a fresh user-initiated connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// Result of spawning the session tasks.
#[derive(Debug)]
pub struct DriverChannels {
    /// Receiver for published snapshots. `None` until the initial pending
    /// snapshot lands and again after teardown.
    pub snapshots: watch::Receiver<Option<Arc<DecodedSnapshot>>>,
    /// Receiver for connection lifecycle updates.
    pub link: watch::Receiver<LinkState>,
    /// The session's rolling buffer.
    pub buffer: SharedBuffer,
    /// Cancellation token for coordinated shutdown.
    pub cancel: CancellationToken,
    /// Read task handle.
    pub reader: JoinHandle<()>,
    /// Decode task handle.
    pub decoder: JoinHandle<()>,
}

impl DriverChannels {
    /// Ordered session teardown.
    ///
    /// Cancels the reader (which closes the transport handle when its task
    /// ends), awaits both tasks, then clears the rolling buffer. The decode
    /// task publishes the cleared (`None`) snapshot on its way out. Every
    /// step runs even if an earlier one fails, so a session is never left
    /// half-closed.
    pub async fn shutdown(self) {
        debug!("session teardown started");
        self.cancel.cancel();
        let _ = self.reader.await;
        let _ = self.decoder.await;
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner).clear();
        info!("session teardown complete");
    }
}

/// Driver spawns and manages the decode session tasks
pub struct Driver;

impl Driver {
    /// Spawn the read and decode tasks for one validated configuration.
    ///
    /// The initial published snapshot maps every configured label to the
    /// placeholder so consumers can render before the first frame resolves.
    pub fn spawn<T>(transport: T, config: &DecoderConfig) -> DriverChannels
    where
        T: Transport,
    {
        let fields: Arc<[FieldMapping]> = config.fields.clone().into();
        let parsing = config.parsing.clone();
        let poll_interval = config.poll_interval();

        let buffer = RollingBuffer::shared(buffer_cap(parsing.frame_length));
        let pending = DecodedSnapshot::pending(&fields);
        let (snapshot_tx, snapshot_rx) = watch::channel(Some(Arc::new(pending)));
        let (link_tx, link_rx) = watch::channel(LinkState::Connecting);

        let cancel = CancellationToken::new();

        let reader = tokio::spawn(Self::read_task(
            transport,
            Arc::clone(&buffer),
            link_tx,
            cancel.clone(),
        ));
        let decoder = tokio::spawn(Self::decode_task(
            Arc::clone(&buffer),
            parsing,
            fields,
            poll_interval,
            snapshot_tx,
            cancel.clone(),
        ));

        DriverChannels { snapshots: snapshot_rx, link: link_rx, buffer, cancel, reader, decoder }
    }

    /// Read task - appends transport chunks to the rolling buffer.
    ///
    /// Terminates when the transport signals end-of-data, when a read
    /// fails, or when cancelled; in every case the link state flips to
    /// [`LinkState::Disconnected`] and nothing is thrown to the consumer.
    async fn read_task<T>(
        mut transport: T,
        buffer: SharedBuffer,
        link_tx: watch::Sender<LinkState>,
        cancel: CancellationToken,
    ) where
        T: Transport,
    {
        let source = transport.descriptor();
        info!(%source, "read task started");
        let _ = link_tx.send(LinkState::Connected);

        let mut chunk_count = 0u64;

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!(%source, "read task cancelled");
                    break;
                }
                result = transport.next_chunk() => result,
            };

            match result {
                Ok(Some(chunk)) => {
                    chunk_count += 1;
                    trace!(%source, chunk_count, len = chunk.len(), "chunk received");
                    buffer.lock().unwrap_or_else(PoisonError::into_inner).push(&chunk);
                }
                Ok(None) => {
                    info!(%source, chunk_count, "stream ended");
                    break;
                }
                Err(err) => {
                    // Logged and terminal: mid-stream failures surface to
                    // the UI through the link state, not as an error.
                    error!(%source, %err, "read failure, stopping");
                    break;
                }
            }
        }

        let _ = link_tx.send(LinkState::Disconnected);
        info!(%source, chunk_count, "read task ended");
    }

    /// Decode task - polls the buffer on a fixed cadence and publishes
    /// snapshots.
    ///
    /// Each tick takes one consistent snapshot of the buffer tail. When no
    /// complete frame is present the previous snapshot stands untouched, so
    /// fields hold their last known value instead of flashing empty.
    async fn decode_task(
        buffer: SharedBuffer,
        parsing: ParsingConfig,
        fields: Arc<[FieldMapping]>,
        poll_interval: std::time::Duration,
        snapshot_tx: watch::Sender<Option<Arc<DecodedSnapshot>>>,
        cancel: CancellationToken,
    ) {
        info!(fields = fields.len(), interval_ms = poll_interval.as_millis() as u64, "decode task started");

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick_count = 0u64;
        let mut frame_count = 0u64;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("decode task cancelled");
                    break;
                }
                _ = ticker.tick() => {}
            }

            tick_count += 1;

            // One consistent window per tick; framing and every field
            // extraction see the same characters.
            let window = {
                let buf = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                buf.tail(DECODE_WINDOW_CHARS).to_owned()
            };

            match locate_frame(&window, &parsing) {
                Some(frame) => {
                    frame_count += 1;
                    trace!(tick_count, frame_len = frame.len(), "frame decoded");
                    let snapshot = decode_fields(frame, &fields);
                    if snapshot_tx.send(Some(Arc::new(snapshot))).is_err() {
                        debug!("snapshot receiver dropped, shutting down");
                        break;
                    }
                }
                None => {
                    trace!(tick_count, buffered = window.len(), "no complete frame this tick");
                }
            }
        }

        // Cleared snapshot is part of teardown.
        let _ = snapshot_tx.send(None);
        info!(tick_count, frame_count, "decode task ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_cap_scales_with_frame_length_but_never_shrinks() {
        assert_eq!(buffer_cap(10), DECODE_WINDOW_CHARS);
        assert_eq!(buffer_cap(1024), 8192);
    }
}
