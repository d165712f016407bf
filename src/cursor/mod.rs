//! Sequential reads and writes over in-memory buffers.
//!
//! [ByteCursor] borrows the whole input and only moves forward; every read
//! either returns exactly the requested bytes or fails with
//! [TtfsError::TruncatedInput] without advancing.

use bytes::{BufMut, Bytes, BytesMut};
use core::mem::size_of;
use zerocopy::{FromBytes, Immutable, IntoBytes, LittleEndian, I32, U16, U32};

use crate::{
    chunk::Tag,
    error::{TtfsError, TtfsResult},
};

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    pub fn read_exact(&mut self, n: usize) -> TtfsResult<&'a [u8]> {
        let buf: &'a [u8] = self.buf;
        let (bytes, _) = buf[self.pos..]
            .split_at_checked(n)
            .ok_or(TtfsError::TruncatedInput {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            })?;

        self.pos += n;
        Ok(bytes)
    }

    /// Reads a plain-old-data value laid out exactly as `T`.
    pub fn read_as<T: FromBytes>(&mut self) -> TtfsResult<T> {
        let offset = self.pos;
        let bytes = self.read_exact(size_of::<T>())?;

        T::read_from_bytes(bytes).map_err(|_| TtfsError::TruncatedInput {
            offset,
            needed: size_of::<T>(),
            remaining: bytes.len(),
        })
    }

    pub fn read_array<const N: usize>(&mut self) -> TtfsResult<[u8; N]> {
        self.read_as::<[u8; N]>()
    }

    pub fn read_u16_le(&mut self) -> TtfsResult<u16> {
        self.read_as::<U16<LittleEndian>>().map(|v| v.get())
    }

    pub fn read_u32_le(&mut self) -> TtfsResult<u32> {
        self.read_as::<U32<LittleEndian>>().map(|v| v.get())
    }

    pub fn read_i32_le(&mut self) -> TtfsResult<i32> {
        self.read_as::<I32<LittleEndian>>().map(|v| v.get())
    }

    pub fn read_tag(&mut self) -> TtfsResult<Tag> {
        self.read_u32_le().map(Tag::new)
    }

    pub fn read_text(&mut self, n: usize) -> TtfsResult<String> {
        let offset = self.pos;
        let bytes = self.read_exact(n)?;

        core::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|source| TtfsError::InvalidEncoding { offset, source })
    }

    /// `u16` byte count followed by that many bytes of UTF-8.
    pub fn read_text_u16(&mut self) -> TtfsResult<String> {
        let len = self.read_u16_le()?;
        self.read_text(len as usize)
    }
}

/// Mirror image of [ByteCursor]: appends fields to a growing buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn put_as<T: IntoBytes + Immutable>(&mut self, value: &T) {
        self.buf.put_slice(value.as_bytes());
    }

    pub fn put_u16_le(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn put_u32_le(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn put_i32_le(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    pub fn put_tag(&mut self, tag: Tag) {
        self.buf.put_u32_le(tag.get());
    }

    /// Writes `text` with a `u16` byte count in front of it.
    pub fn put_text_u16(&mut self, field: &'static str, text: &str) -> TtfsResult<()> {
        let len = u16::try_from(text.len()).map_err(|_| TtfsError::FieldTooLong {
            field,
            len: text.len(),
            max: u16::MAX as usize,
        })?;

        self.buf.put_u16_le(len);
        self.buf.put_slice(text.as_bytes());
        Ok(())
    }

    /// Writes a `u32` length of `payload` followed by the payload itself.
    pub fn put_sized(&mut self, field: &'static str, payload: &[u8]) -> TtfsResult<()> {
        let len = u32::try_from(payload.len()).map_err(|_| TtfsError::FieldTooLong {
            field,
            len: payload.len(),
            max: u32::MAX as usize,
        })?;

        self.buf.put_u32_le(len);
        self.buf.put_slice(payload);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}
