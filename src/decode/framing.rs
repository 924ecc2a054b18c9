//! Frame boundary location inside a rolling buffer.

use tracing::trace;

use crate::types::ParsingConfig;

/// Find the most recent complete frame window in `buffer`.
///
/// Telemetry devices emit fixed-length frames back-to-back, each opening
/// with the configured start marker. The freshest fully received frame wins:
/// the search starts at the *last* marker occurrence and walks backwards one
/// occurrence at a time while the candidate window would run past the end of
/// the buffer (i.e. the newest frame is still arriving). Skipping a frame
/// under heavy load is accepted in exchange for minimum display latency.
///
/// An empty start marker disables framing and the whole buffer is the frame.
/// Returns `None` while no complete frame has been received.
///
/// A marker byte occurring inside a field's payload is indistinguishable
/// from a true frame start; the protocol has no escaping, so a payload hit
/// can shift the window for one tick until more data arrives. Inherited
/// protocol limitation, not resolvable here.
pub fn locate_frame<'a>(buffer: &'a str, cfg: &ParsingConfig) -> Option<&'a str> {
    if cfg.start_marker.is_empty() {
        return Some(buffer);
    }

    let mut search_end = buffer.len();
    loop {
        let start = buffer[..search_end].rfind(&cfg.start_marker)?;
        match char_window(&buffer[start..], cfg.frame_length) {
            Some(window) => return Some(window),
            None => {
                trace!(start, "frame at marker still arriving, trying previous marker");
                search_end = start;
            }
        }
    }
}

/// The first `len` characters of `s`, or `None` if `s` is shorter.
fn char_window(s: &str, len: usize) -> Option<&str> {
    if len == 0 {
        return Some("");
    }
    let mut seen = 0;
    for (idx, ch) in s.char_indices() {
        seen += 1;
        if seen == len {
            return Some(&s[..idx + ch.len_utf8()]);
        }
    }
    None
}
