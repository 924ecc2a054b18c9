//! Decoder configuration: the external settings-store schema.
//!
//! A configuration is persisted by the settings screens as a single named
//! YAML blob and loaded once when a decoding session starts; it is immutable
//! for the lifetime of the session (edits take effect on the next connect).
//! [`DecoderConfig::validate`] runs before any connection is attempted — an
//! invalid configuration never starts a session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DecoderError, Result};
use crate::types::{Addressing, FieldMapping, ParsingConfig};

const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Top-level decoder configuration for one structure's telemetry feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoderConfig {
    /// Asset/structure classification. Carried for the record; the decoder
    /// itself does not interpret it.
    #[serde(default)]
    pub structure_type: String,

    /// Transport selection and parameters.
    pub connection: ConnectionConfig,

    /// Frame boundary detection.
    pub parsing: ParsingConfig,

    /// Configured telemetry fields. May be empty.
    #[serde(default)]
    pub fields: Vec<FieldMapping>,

    /// Decode loop cadence in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Transport selection: exactly one of the nested configs applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    #[serde(rename = "type")]
    pub kind: TransportKind,

    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Which transport the connection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Serial,
    Network,
}

/// Serial device parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub com_port: String,
    pub baud_rate: u32,
    /// 5, 6, 7 or 8.
    pub data_bits: u8,
    #[serde(default)]
    pub parity: Parity,
    /// 1, 1.5 or 2.
    pub stop_bits: f32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            com_port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1.0,
        }
    }
}

/// Serial parity setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

/// Network transport parameters. Configured but not yet implemented;
/// connecting with `type: network` is rejected with a clear error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub port: u16,
}

impl DecoderConfig {
    /// Parse a configuration blob as stored by the settings screens.
    pub fn from_yaml(blob: &str) -> Result<Self> {
        let config: DecoderConfig = serde_yaml_ng::from_str(blob)?;
        Ok(config)
    }

    /// Decode loop cadence.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Snapshots per second at the configured cadence.
    pub fn native_hz(&self) -> f64 {
        1000.0 / self.poll_interval_ms as f64
    }

    /// Reject configurations the decoder cannot run with.
    ///
    /// Field labels must be unique: the label is the snapshot key, so a
    /// collision would silently drop data.
    pub fn validate(&self) -> Result<()> {
        if self.parsing.frame_length == 0 {
            return Err(DecoderError::config("parsing.stringLength must be positive"));
        }
        if self.poll_interval_ms == 0 {
            return Err(DecoderError::config("pollIntervalMs must be positive"));
        }

        match self.connection.kind {
            TransportKind::Serial => self.connection.serial.validate()?,
            TransportKind::Network => {
                if self.connection.network.port == 0 {
                    return Err(DecoderError::config("network.port must be positive"));
                }
            }
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.id.is_empty() {
                return Err(DecoderError::config("field id must not be empty"));
            }
            if field.label.is_empty() {
                return Err(DecoderError::config(format!(
                    "field '{}': label must not be empty",
                    field.id
                )));
            }
            if !seen.insert(field.label.as_str()) {
                return Err(DecoderError::config(format!(
                    "duplicate field label '{}'",
                    field.label
                )));
            }
            match &field.addressing {
                Addressing::Position { length, .. } | Addressing::Tag { length, .. } => {
                    if *length == 0 {
                        return Err(DecoderError::config(format!(
                            "field '{}': length must be positive",
                            field.label
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl SerialConfig {
    /// Validate device parameters against what a serial line can carry.
    pub fn validate(&self) -> Result<()> {
        if self.com_port.is_empty() {
            return Err(DecoderError::config("serial.comPort must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(DecoderError::config("serial.baudRate must be positive"));
        }
        if ![5, 6, 7, 8].contains(&self.data_bits) {
            return Err(DecoderError::config("serial.dataBits must be 5, 6, 7 or 8"));
        }
        if ![1.0, 1.5, 2.0].contains(&self.stop_bits) {
            return Err(DecoderError::config("serial.stopBits must be 1, 1.5 or 2"));
        }
        Ok(())
    }
}
