use log::{debug, trace};

use crate::err::{DeserializationError, FlpError, Result};
use crate::event_table::{self, EventKind, ids};
use crate::flp_event::FlpEvent;
use crate::flp_file_header::{
    DATA_MAGIC, EVENT_DATA_OFFSET, FILE_HEADER_SIZE, FlpFileHeader,
};
use crate::utils::{bytes, utf16, vli};

/// Version reported when no parsable FL version event is present.
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Largest payload the variable reading of an uncatalogued DWORD-range id
/// may declare; anything bigger is taken as evidence of a fixed payload.
const MAX_AMBIGUOUS_PAYLOAD: u64 = 100_000;

/// How many bytes the look-ahead walker consumes when scoring a hypothesis.
const LOOKAHEAD_WINDOW: usize = 200;

/// Margin the variable hypothesis must clear. Ties go to the range default
/// so the heuristic cannot oscillate on uninformative inputs.
const SCORE_MARGIN: i32 = 2;

/// A parsed project file.
///
/// Holds the outer header and inner chunk magic verbatim, the decoded event
/// sequence, and any bytes found past the declared event data. Serializing
/// an untouched `FlpFile` reproduces the source bytes exactly; only the
/// event-data length field is ever recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlpFile {
    pub(crate) header: FlpFileHeader,
    pub(crate) data_chunk_header: [u8; 8],
    pub events: Vec<FlpEvent>,
    pub(crate) trailing: Vec<u8>,
    pub(crate) version: String,
    pub(crate) use_unicode: bool,
}

impl FlpFile {
    pub fn header(&self) -> &FlpFileHeader {
        &self.header
    }

    /// The FL version string from the first version event, or `"0.0.0"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// True for projects saved by FL 11.5 or later; gates text decoding
    /// between the legacy single-byte encoding and UTF-16LE.
    pub fn use_unicode(&self) -> bool {
        self.use_unicode
    }

    /// Bytes found past the declared event data. No known producer writes
    /// any, but they are preserved opaquely.
    pub fn trailing(&self) -> &[u8] {
        &self.trailing
    }

    pub fn find_first(&self, id: u8) -> Option<&FlpEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn find_all(&self, id: u8) -> impl Iterator<Item = &FlpEvent> {
        self.events.iter().filter(move |event| event.id == id)
    }
}

/// Parse a whole `.flp` buffer.
///
/// The returned `FlpFile` owns copies of everything it needs; the caller may
/// drop `data` immediately.
pub fn parse(data: &[u8]) -> Result<FlpFile> {
    let header = FlpFileHeader::from_bytes(data)?;

    let magic = bytes::read_array_r::<4>(data, FILE_HEADER_SIZE, "data chunk magic")?;
    if magic != DATA_MAGIC {
        return Err(FlpError::BadMagic {
            chunk: "data",
            expected: DATA_MAGIC,
            found: magic,
        });
    }

    let declared = bytes::read_u32_le_r(data, FILE_HEADER_SIZE + 4, "event data length")?;
    let data_end = EVENT_DATA_OFFSET + declared as usize;
    if data.len() < data_end {
        return Err(FlpError::LengthMismatch {
            declared,
            actual: data.len() as u64,
        });
    }

    let stream = &data[EVENT_DATA_OFFSET..data_end];
    let trailing = data[data_end..].to_vec();
    if !trailing.is_empty() {
        debug!(
            "{} bytes past the declared event data, preserving verbatim",
            trailing.len()
        );
    }

    let mut data_chunk_header = [0u8; 8];
    data_chunk_header.copy_from_slice(&data[FILE_HEADER_SIZE..EVENT_DATA_OFFSET]);

    let (events, version, use_unicode) = decode_events(stream)?;

    Ok(FlpFile {
        header,
        data_chunk_header,
        events,
        trailing,
        version,
        use_unicode,
    })
}

/// How an uncatalogued DWORD-range id is read.
enum DwordResolution {
    Fixed,
    Variable { vli_width: usize, payload_len: usize },
}

fn decode_events(data: &[u8]) -> Result<(Vec<FlpEvent>, String, bool)> {
    let end = data.len();
    let mut events = Vec::new();
    let mut pos = 0usize;

    let mut version = String::from(UNKNOWN_VERSION);
    let mut use_unicode = false;
    let mut version_seen = false;

    while pos < end {
        let id = data[pos];
        let mut kind = event_table::kind_of(id);

        let (framing_len, payload_len) = if let Some(size) = event_table::fixed_size(id) {
            if size == 4 && !event_table::is_known_dword_range_id(id) {
                match resolve_unknown_dword(data, pos, end) {
                    DwordResolution::Fixed => (1, 4),
                    DwordResolution::Variable {
                        vli_width,
                        payload_len,
                    } => {
                        // The payload is not four LE bytes; refuse to call
                        // it a u32.
                        kind = EventKind::Unknown;
                        (1 + vli_width, payload_len)
                    }
                }
            } else {
                (1, size)
            }
        } else {
            let (size, width) = vli::decode_raw(data, pos + 1, end)?;
            (1 + width, size as usize)
        };

        let payload_start = pos + framing_len;
        let payload_end = payload_start.checked_add(payload_len).filter(|&e| e <= end);
        let Some(payload_end) = payload_end else {
            return Err(DeserializationError::TruncatedEvent {
                id,
                offset: pos as u64,
                size: payload_len,
                have: end.saturating_sub(payload_start),
            }
            .into());
        };

        trace!(
            "event {:#04x} at {}: {:?}, {} payload bytes",
            id, pos, kind, payload_len
        );

        let payload = data[payload_start..payload_end].to_vec();

        if id == ids::VERSION && !version_seen {
            version_seen = true;
            let candidate = utf16::decode_ascii_z(&payload);
            if is_dotted_version(&candidate) {
                use_unicode = unicode_gate(&candidate);
                debug!("FL version {candidate}, unicode text: {use_unicode}");
                version = candidate;
            }
        }

        events.push(FlpEvent::parsed(
            id,
            kind,
            data[pos..payload_start].to_vec(),
            payload,
        ));
        pos = payload_end;
    }

    Ok((events, version, use_unicode))
}

/// Decide between the two readings of an uncatalogued DWORD-range id at
/// `pos`: a fixed 4-byte payload (the range default) or a VLI-prefixed
/// variable payload.
///
/// The variable reading is rejected outright when its VLI is malformed,
/// implausibly large, or over-runs the stream. Otherwise both readings are
/// scored by walking the stream that would follow each, and the variable
/// reading only wins by a clear margin. A rejected or outscored hypothesis
/// simply loses; this choice can never fail the decode by itself.
fn resolve_unknown_dword(data: &[u8], pos: usize, end: usize) -> DwordResolution {
    let variable = match vli::decode_raw(data, pos + 1, end) {
        Ok((size, width)) if size <= MAX_AMBIGUOUS_PAYLOAD => {
            let next = pos + 1 + width + size as usize;
            if next <= end {
                Some((width, size as usize, next))
            } else {
                None
            }
        }
        _ => None,
    };

    let Some((vli_width, payload_len, variable_next)) = variable else {
        return DwordResolution::Fixed;
    };

    // A 5-byte variable event is indistinguishable from the fixed reading;
    // prefer the fixed one so the framing stays minimal and deterministic.
    if payload_len == 3 {
        return DwordResolution::Fixed;
    }

    let fixed_score = lookahead_score(data, pos + 5, end);
    let variable_score = lookahead_score(data, variable_next, end);
    trace!(
        "ambiguous event {:#04x} at {pos}: fixed {fixed_score}, variable {variable_score}",
        data[pos]
    );

    if variable_score > fixed_score + SCORE_MARGIN {
        DwordResolution::Variable {
            vli_width,
            payload_len,
        }
    } else {
        DwordResolution::Fixed
    }
}

/// Walk up to `LOOKAHEAD_WINDOW` bytes from `start` as if they were an event
/// stream and score how plausible the alignment looks.
///
/// Reaching TEXT/DATA events is a strong positive signal; runs of small
/// BYTE-range ids are what mid-text misalignment (e.g. walking UTF-16
/// payload bytes) produces, and count against. An invalid VLI where a
/// TEXT/DATA size must be disqualifies the hypothesis.
fn lookahead_score(data: &[u8], start: usize, end: usize) -> i32 {
    let limit = end.min(start.saturating_add(LOOKAHEAD_WINDOW));
    let mut q = start;

    let mut text_data_count = 0i32;
    let mut consecutive_small = 0i32;
    let mut max_consecutive_small = 0i32;

    while q < limit {
        let id = data[q];
        if id < event_table::WORD {
            if id < 32 {
                consecutive_small += 1;
                max_consecutive_small = max_consecutive_small.max(consecutive_small);
            } else {
                consecutive_small = 0;
            }
            q += 2;
        } else if id < event_table::DWORD {
            consecutive_small = 0;
            q += 3;
        } else if id < event_table::TEXT {
            consecutive_small = 0;
            q += 5;
        } else {
            match vli::decode_raw(data, q + 1, end) {
                Ok((size, width)) if q + 1 + width + (size as usize) <= end => {
                    text_data_count += 1;
                    consecutive_small = 0;
                    q += 1 + width + size as usize;
                }
                _ => return -100,
            }
        }
    }

    10 * text_data_count - 3 * max_consecutive_small
}

/// `^\d+(\.\d+)+$`: digit runs joined by dots, at least two of them.
fn is_dotted_version(s: &str) -> bool {
    let mut segments = 0;
    for part in s.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

/// UTF-16LE text arrived with FL 11.5.
fn unicode_gate(version: &str) -> bool {
    let mut parts = version.split('.');
    let major: u64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(u64::MAX);
    let minor: u64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    major > 11 || (major == 11 && minor >= 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_version_shape() {
        assert!(is_dotted_version("21.0.3"));
        assert!(is_dotted_version("11.5"));
        assert!(!is_dotted_version("21"));
        assert!(!is_dotted_version(""));
        assert!(!is_dotted_version("21."));
        assert!(!is_dotted_version(".5"));
        assert!(!is_dotted_version("12.0b1"));
        assert!(!is_dotted_version("banana"));
    }

    #[test]
    fn unicode_gate_boundary() {
        assert!(!unicode_gate("10.9.9"));
        assert!(!unicode_gate("11.4.9"));
        assert!(unicode_gate("11.5"));
        assert!(unicode_gate("11.5.1"));
        assert!(unicode_gate("12.0"));
        assert!(unicode_gate("21.0.3"));
    }

    #[test]
    fn walker_rewards_reachable_text_events() {
        // A TEXT event right at the probe offset.
        let stream = [0xC2, 0x03, 0x41, 0x42, 0x43];
        assert_eq!(lookahead_score(&stream, 0, stream.len()), 10);
    }

    #[test]
    fn walker_penalizes_runs_of_small_ids() {
        // Three small BYTE-range ids in a row, nothing else.
        let stream = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00];
        assert_eq!(lookahead_score(&stream, 0, stream.len()), -9);
    }

    #[test]
    fn walker_disqualifies_invalid_text_sizes() {
        // TEXT id whose VLI over-runs the stream.
        let stream = [0xC2, 0xFF];
        assert_eq!(lookahead_score(&stream, 0, stream.len()), -100);
    }

    #[test]
    fn walker_score_is_zero_past_the_end() {
        let stream = [0x00, 0x00];
        assert_eq!(lookahead_score(&stream, 5, stream.len()), 0);
    }
}
