//! Rate control for snapshot subscriptions.

use serde::{Deserialize, Serialize};

/// Delivery rate for a snapshot subscription.
///
/// The decoder produces snapshots at its native poll rate; a subscriber that
/// renders slower than that can cap delivery and receive only the most
/// recent snapshot per period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleRate {
    /// Every published snapshot, at the decode loop's native rate.
    Native,

    /// At most `hz` snapshots per second, latest-wins.
    /// A requested rate at or above the native rate degrades to `Native`.
    Max(u32),
}

impl SampleRate {
    /// Normalize against the decoder's native poll rate.
    pub fn normalize(self, native_hz: f64) -> Self {
        match self {
            SampleRate::Native => SampleRate::Native,
            SampleRate::Max(hz) if hz as f64 >= native_hz => SampleRate::Native,
            SampleRate::Max(hz) => SampleRate::Max(hz),
        }
    }

    /// Pacing period for the subscription, if one is needed.
    pub fn pace_period(self, native_hz: f64) -> Option<std::time::Duration> {
        match self.normalize(native_hz) {
            SampleRate::Native => None,
            SampleRate::Max(hz) => Some(std::time::Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}
