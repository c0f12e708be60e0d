//! The mutable byte store behind a metadata segment.

use crate::endian::{EndianCursor, Endianness};
use crate::error::{ExifError, ExifResult};

/// Owned bytes of a metadata segment body, starting at the TIFF header.
///
/// Every offset stored in the segment is relative to the start of this buffer. The buffer never
/// grows implicitly: only [`splice_insert_zero`][Self::splice_insert_zero] makes it longer and only
/// [`splice_delete`][Self::splice_delete] makes it shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBuffer {
    data: Vec<u8>,
}

impl SegmentBuffer {
    /// Wrap a copy of `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The full contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn check(&self, offset: usize, n: usize) -> ExifResult<()> {
        match offset.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(ExifError::OutOfBounds {
                offset,
                len: n,
                buffer_len: self.data.len(),
            }),
        }
    }

    /// Borrow `n` bytes starting at `offset`.
    pub fn read(&self, offset: usize, n: usize) -> ExifResult<&[u8]> {
        self.check(offset, n)?;
        Ok(&self.data[offset..offset + n])
    }

    /// Overwrite `bytes.len()` bytes starting at `offset`.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> ExifResult<()> {
        self.check(offset, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Overwrite `n` bytes starting at `offset` with zeros.
    pub fn zero(&mut self, offset: usize, n: usize) -> ExifResult<()> {
        self.check(offset, n)?;
        self.data[offset..offset + n].fill(0);
        Ok(())
    }

    /// Remove `n` bytes at `offset`, shifting the remainder left.
    pub fn splice_delete(&mut self, offset: usize, n: usize) -> ExifResult<()> {
        self.check(offset, n)?;
        self.data.drain(offset..offset + n);
        Ok(())
    }

    /// Insert `n` zero bytes at `offset`, shifting the remainder right.
    ///
    /// `offset` may equal the buffer length, which appends.
    pub fn splice_insert_zero(&mut self, offset: usize, n: usize) -> ExifResult<()> {
        self.check(offset, 0)?;
        let tail = self.data.split_off(offset);
        self.data.resize(offset + n, 0);
        self.data.extend_from_slice(&tail);
        Ok(())
    }

    /// A cursor reading scalars in `endianness` from `offset` onward.
    pub(crate) fn cursor(&self, endianness: Endianness, offset: usize) -> EndianCursor<'_> {
        EndianCursor::new(self.as_slice(), endianness).with_offset(offset)
    }

    /// Read a u16 in `endianness` at `offset`.
    pub fn read_u16(&self, endianness: Endianness, offset: usize) -> ExifResult<u16> {
        Ok(endianness.read_u16(self.read(offset, 2)?))
    }

    /// Read a u32 in `endianness` at `offset`.
    pub fn read_u32(&self, endianness: Endianness, offset: usize) -> ExifResult<u32> {
        Ok(endianness.read_u32(self.read(offset, 4)?))
    }

    /// Overwrite a u16 in `endianness` at `offset`.
    pub fn write_u16(
        &mut self,
        endianness: Endianness,
        offset: usize,
        value: u16,
    ) -> ExifResult<()> {
        self.write(offset, &endianness.u16_bytes(value))
    }

    /// Overwrite a u32 in `endianness` at `offset`.
    pub fn write_u32(
        &mut self,
        endianness: Endianness,
        offset: usize,
        value: u32,
    ) -> ExifResult<()> {
        self.write(offset, &endianness.u32_bytes(value))
    }
}

impl AsRef<[u8]> for SegmentBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
