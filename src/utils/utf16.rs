//! UTF-16LE helpers for text payloads.
//!
//! Text events are NUL-terminated: ASCII in projects saved by old FL
//! versions, UTF-16LE from 11.5 onwards. Decoding stops at the first NUL;
//! encoding always appends one.

/// Decode a UTF-16LE byte slice until the first NUL (0x0000), if present.
///
/// Unpaired surrogates become replacement characters and a trailing odd
/// byte is dropped; payloads are caller data, not something to fail on.
pub(crate) fn decode_utf16le_bytes_z_lossy(bytes: &[u8]) -> String {
    let mut units = Vec::with_capacity(bytes.len() / 2);
    for chunk in bytes.chunks_exact(2) {
        units.push(u16::from_le_bytes([chunk[0], chunk[1]]));
    }

    let end = units.iter().position(|&c| c == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}

/// Encode `s` as UTF-16LE with a terminating NUL code unit.
pub(crate) fn encode_utf16le_z(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2 + 2);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out.extend_from_slice(&[0, 0]);
    out
}

/// Decode a single-byte string until the first NUL, lossily.
///
/// Pre-11.5 projects store text in the system codepage; anything non-ASCII
/// is surfaced as a replacement character rather than failing the caller.
pub(crate) fn decode_ascii_z(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Encode `s` as single-byte text with a terminating NUL.
///
/// Code points above U+00FF cannot be represented and become `?`.
pub(crate) fn encode_ascii_z(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 1);
    for c in s.chars() {
        let code = u32::from(c);
        out.push(if code <= 0xFF { code as u8 } else { b'?' });
    }
    out.push(0);
    out
}
