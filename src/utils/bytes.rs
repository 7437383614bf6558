//! Byte-slice utilities for bounds-oriented parsing.
//!
//! Two layers:
//! - **Option layer** (`read_*`): zero-cost helpers that return `Option<T>`.
//!   Use these when you want to map failures to your own error type.
//! - **Result layer** (`*_r`): wrappers that map `None` to
//!   `DeserializationError::EndOfBuffer`, labelled with a `what` string for
//!   error messages.
//!
//! All numeric reads are **little-endian** (everything in an FLP is LE).
//! Offsets are interpreted relative to the slice you pass in.

use crate::err::DeserializationError;

/// Read `N` raw bytes at `offset`.
///
/// Returns `None` if the range is out of bounds.
pub(crate) fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    let bytes: [u8; N] = buf.get(offset..end)?.try_into().ok()?;
    Some(bytes)
}

/// Read a single byte at `offset`.
pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

/// Read a `u16` (little-endian) at `offset`.
pub(crate) fn read_u16_le(buf: &[u8], offset: usize) -> Option<u16> {
    Some(u16::from_le_bytes(read_array::<2>(buf, offset)?))
}

/// Read an `i16` (little-endian) at `offset`.
pub(crate) fn read_i16_le(buf: &[u8], offset: usize) -> Option<i16> {
    Some(i16::from_le_bytes(read_array::<2>(buf, offset)?))
}

/// Read a `u32` (little-endian) at `offset`.
pub(crate) fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    Some(u32::from_le_bytes(read_array::<4>(buf, offset)?))
}

#[inline]
fn end_of_buffer(
    what: &'static str,
    offset: usize,
    need: usize,
    len: usize,
) -> DeserializationError {
    DeserializationError::EndOfBuffer {
        what,
        offset: offset as u64,
        need,
        have: len.saturating_sub(offset),
    }
}

pub(crate) fn slice_r<'a>(
    buf: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], DeserializationError> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| end_of_buffer(what, offset, len, buf.len()))?;
    buf.get(offset..end)
        .ok_or_else(|| end_of_buffer(what, offset, len, buf.len()))
}

/// Read `N` raw bytes at `offset`, or return `DeserializationError::EndOfBuffer`.
pub(crate) fn read_array_r<const N: usize>(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<[u8; N], DeserializationError> {
    read_array::<N>(buf, offset).ok_or_else(|| end_of_buffer(what, offset, N, buf.len()))
}

/// Read a single byte at `offset`, or return `DeserializationError::EndOfBuffer`.
pub(crate) fn read_u8_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u8, DeserializationError> {
    read_u8(buf, offset).ok_or_else(|| end_of_buffer(what, offset, 1, buf.len()))
}

/// Read a `u16` (little-endian) at `offset`, or return `DeserializationError::EndOfBuffer`.
pub(crate) fn read_u16_le_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u16, DeserializationError> {
    read_u16_le(buf, offset).ok_or_else(|| end_of_buffer(what, offset, 2, buf.len()))
}

/// Read an `i16` (little-endian) at `offset`, or return `DeserializationError::EndOfBuffer`.
pub(crate) fn read_i16_le_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<i16, DeserializationError> {
    read_i16_le(buf, offset).ok_or_else(|| end_of_buffer(what, offset, 2, buf.len()))
}

/// Read a `u32` (little-endian) at `offset`, or return `DeserializationError::EndOfBuffer`.
pub(crate) fn read_u32_le_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u32, DeserializationError> {
    read_u32_le(buf, offset).ok_or_else(|| end_of_buffer(what, offset, 4, buf.len()))
}
