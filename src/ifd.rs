//! Image File Directory structures: the 12-byte entry, the count-prefixed section and the
//! handle that locates one tag's value inside the segment.

use std::ops::Range;

use crate::buffer::SegmentBuffer;
use crate::codec::TagCodec;
use crate::endian::{EndianCursor, Endianness};
use crate::error::{ExifError, ExifResult};
use crate::tiff::tags::{Tag, Type};

/// Size in bytes of one directory entry.
pub const ENTRY_SIZE: usize = 12;

/// Identifies one directory of the segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IfdKind {
    /// Position in the `next`-linked chain.
    Chain(usize),
    /// The Exif private tag directory, reached from the primary directory.
    Exif,
    /// The GPS directory, reached from the primary directory.
    Gps,
}

impl IfdKind {
    /// The primary image directory, first in the chain.
    pub const PRIMARY: Self = IfdKind::Chain(0);
    /// The thumbnail directory, second in the chain.
    pub const THUMBNAIL: Self = IfdKind::Chain(1);
}

/// One raw directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag id.
    pub tag: u16,
    /// Field type code.
    pub type_code: u16,
    /// Number of elements, or bytes for ASCII and UNDEFINED.
    pub count: u32,
    /// The value itself when it fits, otherwise the offset of the value.
    pub value_field: [u8; 4],
}

impl IfdEntry {
    /// The all-zero entry that pads a directory after a delete.
    pub const ZERO: Self = IfdEntry {
        tag: 0,
        type_code: 0,
        count: 0,
        value_field: [0; 4],
    };

    pub(crate) fn read(cursor: &mut EndianCursor<'_>) -> ExifResult<Self> {
        let tag = cursor.read_u16()?;
        let type_code = cursor.read_u16()?;
        let count = cursor.read_u32()?;
        let mut value_field = [0; 4];
        value_field.copy_from_slice(cursor.read(4)?);
        Ok(Self {
            tag,
            type_code,
            count,
            value_field,
        })
    }

    /// Encode into the 12-byte on-disk layout.
    pub fn encode(&self, endianness: Endianness) -> [u8; ENTRY_SIZE] {
        let mut out = [0; ENTRY_SIZE];
        out[0..2].copy_from_slice(&endianness.u16_bytes(self.tag));
        out[2..4].copy_from_slice(&endianness.u16_bytes(self.type_code));
        out[4..8].copy_from_slice(&endianness.u32_bytes(self.count));
        out[8..12].copy_from_slice(&self.value_field);
        out
    }

    /// The field type, if the type code is known.
    pub fn field_type(&self) -> Option<Type> {
        Type::try_from(self.type_code).ok()
    }

    /// Number of bytes the value occupies, if the type code is known.
    pub fn value_len(&self) -> Option<usize> {
        self.field_type()?.size().checked_mul(self.count as usize)
    }

    /// Returns `true` if the value lives in the entry itself.
    pub fn is_inline(&self) -> bool {
        self.value_len().map_or(true, |len| len <= 4)
    }

    /// The value field read as an offset.
    pub fn value_offset(&self, endianness: Endianness) -> u32 {
        endianness.read_u32(&self.value_field)
    }

    /// Returns `true` for the padding entry.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// A directory: entry count, entries, and the offset of the next directory in the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfdSection {
    /// Offset of the entry count.
    pub offset: usize,
    /// Entries in stored order.
    pub entries: Vec<IfdEntry>,
    /// Offset of the next directory; `None` if the trailing offset could not be read.
    pub next: Option<u32>,
}

impl IfdSection {
    /// Read the directory starting at `offset`.
    ///
    /// A section declaring more than `max_entries` entries is rejected as corrupt.
    pub fn read(
        buffer: &SegmentBuffer,
        offset: usize,
        endianness: Endianness,
        max_entries: usize,
    ) -> ExifResult<Self> {
        let mut cursor = buffer.cursor(endianness, offset);
        let entry_count = cursor.read_u16()? as usize;
        if entry_count > max_entries {
            return Err(ExifError::OutOfBounds {
                offset,
                len: 2 + entry_count * ENTRY_SIZE,
                buffer_len: buffer.len(),
            });
        }
        let entries = (0..entry_count)
            .map(|_| IfdEntry::read(&mut cursor))
            .collect::<ExifResult<Vec<_>>>()?;
        let next = cursor.read_u32().ok();
        Ok(Self {
            offset,
            entries,
            next,
        })
    }

    /// Offset of the entry at `index`.
    pub fn entry_offset(&self, index: usize) -> usize {
        self.offset + 2 + index * ENTRY_SIZE
    }

    /// Encoded length, including the next-directory offset.
    pub fn encoded_len(&self) -> usize {
        2 + self.entries.len() * ENTRY_SIZE + 4
    }

    /// First byte after the encoded section.
    pub fn end(&self) -> usize {
        self.offset + self.encoded_len()
    }

    /// The next directory's offset, with 0 meaning the chain ends.
    pub fn next_offset(&self) -> Option<usize> {
        self.next.filter(|next| *next != 0).map(|next| next as usize)
    }

    /// Encode count, entries and next offset. A missing next offset is written as 0.
    pub fn encode(&self, endianness: Endianness) -> ExifResult<Vec<u8>> {
        let count = u16::try_from(self.entries.len()).map_err(|_| ExifError::OutOfBounds {
            offset: self.offset,
            len: self.encoded_len(),
            buffer_len: u16::MAX as usize,
        })?;
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&endianness.u16_bytes(count));
        for entry in &self.entries {
            out.extend_from_slice(&entry.encode(endianness));
        }
        out.extend_from_slice(&endianness.u32_bytes(self.next.unwrap_or(0)));
        Ok(out)
    }
}

/// Locates one present tag: its directory entry, owning directory and value bytes.
///
/// Handles are produced by a directory walk and describe the buffer as it was at that walk.
#[derive(Clone, Debug, PartialEq)]
pub struct TagHandle {
    pub(crate) tag: Tag,
    pub(crate) ifd: IfdKind,
    pub(crate) entry_offset: usize,
    pub(crate) entry: IfdEntry,
    pub(crate) value_offset: usize,
    pub(crate) codec: TagCodec,
}

impl TagHandle {
    pub(crate) fn new(
        ifd: IfdKind,
        entry_offset: usize,
        entry: IfdEntry,
        endianness: Endianness,
    ) -> Self {
        let tag = Tag::from_u16_exhaustive(entry.tag);
        let value_offset = if entry.is_inline() {
            entry_offset + 8
        } else {
            entry.value_offset(endianness) as usize
        };
        Self {
            tag,
            ifd,
            entry_offset,
            entry,
            value_offset,
            codec: TagCodec::for_entry(entry.tag, entry.field_type()),
        }
    }

    /// The tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The directory holding the entry.
    pub fn ifd(&self) -> IfdKind {
        self.ifd
    }

    /// Offset of the 12-byte entry.
    pub fn entry_offset(&self) -> usize {
        self.entry_offset
    }

    /// Raw field type code.
    pub fn type_code(&self) -> u16 {
        self.entry.type_code
    }

    /// The field type, if the type code is known.
    pub fn field_type(&self) -> Option<Type> {
        self.entry.field_type()
    }

    /// Element count.
    pub fn count(&self) -> u32 {
        self.entry.count
    }

    /// Returns `true` if the value is stored in the entry's value field.
    pub fn is_inline(&self) -> bool {
        self.entry.is_inline()
    }

    /// Offset of the first value byte: inside the entry when inline, else the stored offset.
    pub fn value_offset(&self) -> usize {
        self.value_offset
    }

    /// Bytes of the value, if the field type is known.
    pub fn value_len(&self) -> Option<usize> {
        self.entry.value_len()
    }

    /// The byte range of an out-of-line value.
    pub fn out_of_line_span(&self) -> Option<Range<usize>> {
        if self.is_inline() {
            return None;
        }
        let len = self.value_len()?;
        Some(self.value_offset..self.value_offset.saturating_add(len))
    }
}
