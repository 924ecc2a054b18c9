//! Serial transport over `tokio-serial`.

use tokio::io::AsyncReadExt;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info, warn};

use crate::config::{Parity, SerialConfig};
use crate::error::{DecoderError, Result};
use crate::transport::Transport;

/// Read granularity. Telemetry lines are short; one page is plenty.
const READ_CHUNK: usize = 512;

/// Serial transport that owns one open device handle.
///
/// The handle closes when the transport is dropped, which happens when the
/// read task that owns it ends.
pub struct SerialTransport {
    port_name: String,
    stream: SerialStream,
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port_name", &self.port_name)
            .finish_non_exhaustive()
    }
}

impl SerialTransport {
    /// Open the configured serial device.
    ///
    /// Validates the parameters, then requests the handle from the host with
    /// the configured baud rate, data bits, parity and stop bits.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        config.validate()?;

        debug!(port = %config.com_port, baud = config.baud_rate, "opening serial port");

        let builder = tokio_serial::new(&config.com_port, config.baud_rate)
            .data_bits(map_data_bits(config.data_bits))
            .parity(map_parity(config.parity))
            .stop_bits(map_stop_bits(config.stop_bits));

        let stream = builder.open_native_async().map_err(|err| {
            DecoderError::transport_failed_with_source(
                &config.com_port,
                "could not acquire serial device",
                Box::new(err),
            )
        })?;

        #[cfg(unix)]
        let mut stream = stream;
        #[cfg(unix)]
        if let Err(err) = stream.set_exclusive(false) {
            warn!(port = %config.com_port, %err, "could not clear exclusive mode");
        }

        info!(port = %config.com_port, baud = config.baud_rate, "serial port open");

        Ok(Self { port_name: config.com_port.clone(), stream })
    }
}

#[async_trait::async_trait]
impl Transport for SerialTransport {
    async fn next_chunk(&mut self) -> Result<Option<String>> {
        let mut buf = [0u8; READ_CHUNK];
        match self.stream.read(&mut buf).await {
            Ok(0) => Ok(None),
            // Devices stream plain ASCII; anything undecodable is replaced
            // rather than tearing down the session.
            Ok(n) => Ok(Some(String::from_utf8_lossy(&buf[..n]).into_owned())),
            Err(err) => Err(DecoderError::Io { source: err }),
        }
    }

    fn descriptor(&self) -> String {
        self.port_name.clone()
    }
}

fn map_data_bits(bits: u8) -> tokio_serial::DataBits {
    match bits {
        5 => tokio_serial::DataBits::Five,
        6 => tokio_serial::DataBits::Six,
        7 => tokio_serial::DataBits::Seven,
        _ => tokio_serial::DataBits::Eight,
    }
}

fn map_parity(parity: Parity) -> tokio_serial::Parity {
    match parity {
        Parity::None => tokio_serial::Parity::None,
        Parity::Even => tokio_serial::Parity::Even,
        Parity::Odd => tokio_serial::Parity::Odd,
    }
}

fn map_stop_bits(bits: f32) -> tokio_serial::StopBits {
    if bits == 1.0 {
        tokio_serial::StopBits::One
    } else {
        // The host serial stack has no 1.5 setting; 2 is the nearest.
        if bits == 1.5 {
            warn!("1.5 stop bits unsupported by the host serial stack, using 2");
        }
        tokio_serial::StopBits::Two
    }
}
