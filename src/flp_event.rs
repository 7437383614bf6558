use crate::err::{FlpError, Result};
use crate::event_table::{self, EventKind};
use crate::utils::{utf16, vli};

/// A single event from the event stream.
///
/// Parsed events keep the exact bytes that framed them in the source file
/// (the id byte, plus the VLI size prefix for variable-length events), so
/// that an untouched event re-serializes byte-identically even when the
/// original writer used a non-minimal VLI width. `framing` is empty only for
/// events synthesized after parsing; the serializer rebuilds it from the id
/// and payload length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlpEvent {
    pub id: u8,
    pub kind: EventKind,
    framing: Vec<u8>,
    payload: Vec<u8>,
}

impl FlpEvent {
    /// Create a new event with `kind` taken from the catalogue and no
    /// original framing.
    pub fn new(id: u8, payload: Vec<u8>) -> Self {
        FlpEvent {
            id,
            kind: event_table::kind_of(id),
            framing: Vec::new(),
            payload,
        }
    }

    pub(crate) fn parsed(id: u8, kind: EventKind, framing: Vec<u8>, payload: Vec<u8>) -> Self {
        FlpEvent {
            id,
            kind,
            framing,
            payload,
        }
    }

    /// The original framing bytes, or empty for synthesized events.
    pub fn framing(&self) -> &[u8] {
        &self.framing
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Replace the payload, re-framing per the conservative patching rule:
    /// an original VLI size prefix is rebuilt, a bare id byte is kept.
    pub(crate) fn with_payload(&self, payload: Vec<u8>) -> Self {
        let framing = if self.framing.len() > 1 {
            framing_for(self.id, payload.len(), true)
        } else {
            self.framing.clone()
        };

        FlpEvent {
            id: self.id,
            kind: self.kind,
            framing,
            payload,
        }
    }

    /// Bytes this event occupies when serialized.
    pub fn serialized_len(&self) -> usize {
        if self.framing.is_empty() {
            framing_for(self.id, self.payload.len(), false).len() + self.payload.len()
        } else {
            self.framing.len() + self.payload.len()
        }
    }

    pub(crate) fn write_into(&self, out: &mut Vec<u8>) {
        if self.framing.is_empty() {
            out.extend_from_slice(&framing_for(self.id, self.payload.len(), false));
        } else {
            out.extend_from_slice(&self.framing);
        }
        out.extend_from_slice(&self.payload);
    }

    fn numeric(&self, requested: &'static str, width: usize) -> Result<&[u8]> {
        match self.kind {
            EventKind::Text | EventKind::Data | EventKind::Unknown => Err(FlpError::KindMismatch {
                id: self.id,
                requested,
                actual: self.kind.as_str(),
            }),
            _ if self.payload.len() != width => Err(FlpError::KindMismatch {
                id: self.id,
                requested,
                actual: self.kind.as_str(),
            }),
            _ => Ok(&self.payload),
        }
    }

    pub fn u8(&self) -> Result<u8> {
        Ok(self.numeric("u8", 1)?[0])
    }

    pub fn i8(&self) -> Result<i8> {
        Ok(self.numeric("i8", 1)?[0] as i8)
    }

    pub fn u16(&self) -> Result<u16> {
        let b = self.numeric("u16", 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn i16(&self) -> Result<i16> {
        let b = self.numeric("i16", 2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32(&self) -> Result<u32> {
        let b = self.numeric("u32", 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn i32(&self) -> Result<i32> {
        let b = self.numeric("i32", 4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn f32(&self) -> Result<f32> {
        let b = self.numeric("f32", 4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Decode a NUL-terminated text payload. `use_unicode` selects between
    /// the pre-11.5 single-byte encoding and UTF-16LE.
    pub fn text(&self, use_unicode: bool) -> Result<String> {
        if self.kind != EventKind::Text {
            return Err(FlpError::KindMismatch {
                id: self.id,
                requested: "text",
                actual: self.kind.as_str(),
            });
        }

        // The version string is ASCII in every era; it is the event the
        // unicode gate itself is derived from.
        if use_unicode && self.id != event_table::ids::VERSION {
            Ok(utf16::decode_utf16le_bytes_z_lossy(&self.payload))
        } else {
            Ok(utf16::decode_ascii_z(&self.payload))
        }
    }
}

/// Encode `s` as a NUL-terminated text payload in the file's encoding.
pub fn encode_text_payload(s: &str, use_unicode: bool) -> Vec<u8> {
    if use_unicode {
        utf16::encode_utf16le_z(s)
    } else {
        utf16::encode_ascii_z(s)
    }
}

/// Framing for an event that has none: the id byte, plus a VLI size for the
/// variable-length ranges. `force_vli` is set when rebuilding the framing of
/// a parsed variable-length event regardless of its range.
fn framing_for(id: u8, payload_len: usize, force_vli: bool) -> Vec<u8> {
    let mut framing = vec![id];
    if force_vli || event_table::fixed_size(id).is_none() {
        vli::encode_into(&mut framing, payload_len as u64);
    }
    framing
}
