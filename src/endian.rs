//! Byte order handling for the fixed-width scalars stored in a segment.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{ExifError, ExifResult};

/// Endianness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Little Endian, marked `II`
    LittleEndian,
    /// Big Endian, marked `MM`
    BigEndian,
}

impl Endianness {
    /// Parse the two-byte marker that opens a TIFF header.
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(Self::LittleEndian),
            b"MM" => Some(Self::BigEndian),
            _ => None,
        }
    }

    /// The two-byte marker for this byte order.
    pub fn marker(self) -> [u8; 2] {
        match self {
            Self::LittleEndian => *b"II",
            Self::BigEndian => *b"MM",
        }
    }

    /// Decode the first two bytes of `buf`. Panics if `buf` is shorter.
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Self::LittleEndian => LittleEndian::read_u16(buf),
            Self::BigEndian => BigEndian::read_u16(buf),
        }
    }

    /// Decode the first two bytes of `buf`. Panics if `buf` is shorter.
    pub fn read_i16(self, buf: &[u8]) -> i16 {
        match self {
            Self::LittleEndian => LittleEndian::read_i16(buf),
            Self::BigEndian => BigEndian::read_i16(buf),
        }
    }

    /// Decode the first four bytes of `buf`. Panics if `buf` is shorter.
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Self::LittleEndian => LittleEndian::read_u32(buf),
            Self::BigEndian => BigEndian::read_u32(buf),
        }
    }

    /// Decode the first four bytes of `buf`. Panics if `buf` is shorter.
    pub fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Self::LittleEndian => LittleEndian::read_i32(buf),
            Self::BigEndian => BigEndian::read_i32(buf),
        }
    }

    /// Encode `value` in this byte order.
    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        let mut out = [0; 2];
        match self {
            Self::LittleEndian => LittleEndian::write_u16(&mut out, value),
            Self::BigEndian => BigEndian::write_u16(&mut out, value),
        }
        out
    }

    /// Encode `value` in this byte order.
    pub fn i16_bytes(self, value: i16) -> [u8; 2] {
        let mut out = [0; 2];
        match self {
            Self::LittleEndian => LittleEndian::write_i16(&mut out, value),
            Self::BigEndian => BigEndian::write_i16(&mut out, value),
        }
        out
    }

    /// Encode `value` in this byte order.
    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        let mut out = [0; 4];
        match self {
            Self::LittleEndian => LittleEndian::write_u32(&mut out, value),
            Self::BigEndian => BigEndian::write_u32(&mut out, value),
        }
        out
    }

    /// Encode `value` in this byte order.
    pub fn i32_bytes(self, value: i32) -> [u8; 4] {
        let mut out = [0; 4];
        match self {
            Self::LittleEndian => LittleEndian::write_i32(&mut out, value),
            Self::BigEndian => BigEndian::write_i32(&mut out, value),
        }
        out
    }
}

/// Sequential reader over a byte slice that decodes scalars in a fixed byte order.
///
/// Reads past the end of the slice fail with [`ExifError::OutOfBounds`] instead of panicking.
pub(crate) struct EndianCursor<'a> {
    data: &'a [u8],
    offset: usize,
    endianness: Endianness,
}

impl<'a> EndianCursor<'a> {
    pub(crate) fn new(data: &'a [u8], endianness: Endianness) -> Self {
        Self {
            data,
            offset: 0,
            endianness,
        }
    }

    pub(crate) fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Read `n` bytes, advancing the cursor by `n`.
    pub(crate) fn read(&mut self, n: usize) -> ExifResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or(ExifError::OutOfBounds {
                offset: self.offset,
                len: n,
                buffer_len: self.data.len(),
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub(crate) fn read_u16(&mut self) -> ExifResult<u16> {
        Ok(self.endianness.read_u16(self.read(2)?))
    }

    pub(crate) fn read_u32(&mut self) -> ExifResult<u32> {
        Ok(self.endianness.read_u32(self.read(4)?))
    }
}
