use crate::err::{DeserializationError, DeserializationResult};
use crate::utils::{bytes, vli};

/// A lightweight cursor over an immutable byte slice.
///
/// This is the slice/offset equivalent of `Cursor<&[u8]>`, intended for
/// hot-path parsing where the data is already in memory and we want explicit
/// bounds/offset control without IO-style error plumbing.
///
/// All reads are little-endian and advance the cursor on success.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

#[allow(dead_code)]
impl<'a> ByteCursor<'a> {
    #[inline]
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub(crate) fn buf(&self) -> &'a [u8] {
        self.buf
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: usize, what: &'static str) -> DeserializationResult<()> {
        // Allow pos == len (EOF), reject pos > len.
        let _ = bytes::slice_r(self.buf, pos, 0, what)?;
        self.pos = pos;
        Ok(())
    }

    #[inline]
    pub(crate) fn skip(&mut self, n: usize, what: &'static str) -> DeserializationResult<()> {
        let new_pos = self
            .pos
            .checked_add(n)
            .ok_or(DeserializationError::EndOfBuffer {
                what,
                offset: self.pos as u64,
                need: n,
                have: self.remaining(),
            })?;
        self.set_pos(new_pos, what)
    }

    #[inline]
    pub(crate) fn peek_u8(&self) -> Option<u8> {
        bytes::read_u8(self.buf, self.pos)
    }

    #[inline]
    pub(crate) fn take_bytes(
        &mut self,
        len: usize,
        what: &'static str,
    ) -> DeserializationResult<&'a [u8]> {
        let out = bytes::slice_r(self.buf, self.pos, len, what)?;
        self.pos += len;
        Ok(out)
    }

    #[inline]
    pub(crate) fn u8(&mut self, what: &'static str) -> DeserializationResult<u8> {
        let b = bytes::read_u8_r(self.buf, self.pos, what)?;
        self.pos += 1;
        Ok(b)
    }

    #[inline]
    pub(crate) fn i8(&mut self, what: &'static str) -> DeserializationResult<i8> {
        Ok(self.u8(what)? as i8)
    }

    #[inline]
    pub(crate) fn u16(&mut self, what: &'static str) -> DeserializationResult<u16> {
        let v = bytes::read_u16_le_r(self.buf, self.pos, what)?;
        self.pos += 2;
        Ok(v)
    }

    #[inline]
    pub(crate) fn i16(&mut self, what: &'static str) -> DeserializationResult<i16> {
        let v = bytes::read_i16_le_r(self.buf, self.pos, what)?;
        self.pos += 2;
        Ok(v)
    }

    #[inline]
    pub(crate) fn u32(&mut self, what: &'static str) -> DeserializationResult<u32> {
        let v = bytes::read_u32_le_r(self.buf, self.pos, what)?;
        self.pos += 4;
        Ok(v)
    }

    #[inline]
    pub(crate) fn i32(&mut self, what: &'static str) -> DeserializationResult<i32> {
        Ok(self.u32(what)? as i32)
    }

    #[inline]
    pub(crate) fn f32(&mut self, what: &'static str) -> DeserializationResult<f32> {
        Ok(f32::from_bits(self.u32(what)?))
    }

    #[inline]
    pub(crate) fn f64(&mut self, what: &'static str) -> DeserializationResult<f64> {
        let v = bytes::read_array_r::<8>(self.buf, self.pos, what)?;
        self.pos += 8;
        Ok(f64::from_le_bytes(v))
    }

    /// Decode a VLI at the cursor and advance past it.
    #[inline]
    pub(crate) fn vli(&mut self) -> DeserializationResult<u64> {
        let (value, width) = vli::decode_raw(self.buf, self.pos, self.buf.len())?;
        self.pos += width;
        Ok(value)
    }
}
