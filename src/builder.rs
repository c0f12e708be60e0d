//! Writing a fresh segment.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::codec::{Encoded, TagCodec};
use crate::endian::Endianness;
use crate::error::{ExifError, ExifResult};
use crate::ifd::{IfdEntry, IfdKind, IfdSection, ENTRY_SIZE};
use crate::metadata::{TIFF_HEADER_LEN, TIFF_MAGIC};
use crate::segment::MetadataSegment;
use crate::tiff::tags::{Tag, Type};
use crate::value::Value;

const EXIF_VERSION: &[u8; 4] = b"0230";

/// Directories in the order they are laid out.
const LAYOUT: [IfdKind; 4] = [
    IfdKind::PRIMARY,
    IfdKind::Exif,
    IfdKind::Gps,
    IfdKind::THUMBNAIL,
];

/// Builds a segment with a primary, Exif and GPS directory, and optionally a thumbnail.
///
/// Every directory is followed by all-zero entry slots, so tags can later be added with
/// [`MetadataSegment::set`] without moving any data. The Exif directory always carries
/// `ExifVersion` "0230".
///
/// ```
/// use exif_segment::tiff::tags::Tag;
/// use exif_segment::{Endianness, SegmentBuilder, Value};
///
/// let segment = SegmentBuilder::new(Endianness::LittleEndian)
///     .entry(Tag::Make, "Acme")
///     .entry(Tag::FNumber, 2.8)
///     .build()?;
/// assert_eq!(segment.get(Tag::FNumber)?, Value::Rational(2.8));
/// # Ok::<(), exif_segment::error::ExifError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    endianness: Endianness,
    reserved_slots: usize,
    entries: Vec<(Tag, Value)>,
    thumbnail: Option<Bytes>,
}

/// An entry with its value already encoded.
struct Field {
    field_type: Type,
    encoded: Encoded,
}

type Fields = BTreeMap<u16, Field>;

impl Field {
    fn long(value: usize, endianness: Endianness) -> ExifResult<Self> {
        Ok(Field {
            field_type: Type::LONG,
            encoded: Encoded {
                count: 1,
                bytes: endianness.u32_bytes(offset_u32(value)?).to_vec(),
            },
        })
    }

    /// Bytes taken in the value area after the directory.
    fn out_of_line_len(&self) -> usize {
        match self.encoded.bytes.len() {
            len if len > 4 => len + len % 2,
            _ => 0,
        }
    }
}

fn offset_u32(offset: usize) -> ExifResult<u32> {
    u32::try_from(offset).map_err(|_| ExifError::OutOfBounds {
        offset,
        len: 0,
        buffer_len: u32::MAX as usize,
    })
}

impl SegmentBuilder {
    /// Start a segment in the given byte order, reserving four free slots per directory.
    pub fn new(endianness: Endianness) -> Self {
        Self {
            endianness,
            reserved_slots: 4,
            entries: Vec::new(),
            thumbnail: None,
        }
    }

    /// Number of all-zero entry slots written after each directory.
    pub fn reserve_slots(mut self, slots: usize) -> Self {
        self.reserved_slots = slots;
        self
    }

    /// Add a tag to its canonical directory. A later entry for the same tag replaces it.
    pub fn entry(mut self, tag: Tag, value: impl Into<Value>) -> Self {
        self.entries.push((tag, value.into()));
        self
    }

    /// Append a thumbnail directory pointing at `jpeg`.
    pub fn thumbnail(mut self, jpeg: impl Into<Bytes>) -> Self {
        self.thumbnail = Some(jpeg.into());
        self
    }

    /// Encode the TIFF header, the directories and the thumbnail.
    pub fn to_bytes(&self) -> ExifResult<Vec<u8>> {
        let endianness = self.endianness;
        let mut directories: BTreeMap<IfdKind, Fields> = BTreeMap::new();
        for kind in [IfdKind::PRIMARY, IfdKind::Exif, IfdKind::Gps] {
            directories.insert(kind, Fields::new());
        }
        if self.thumbnail.is_some() {
            directories.insert(IfdKind::THUMBNAIL, Fields::new());
        }

        for (tag, value) in &self.entries {
            let (Some(kind), Some(field_type)) = (tag.canonical_ifd(), tag.canonical_type())
            else {
                return Err(ExifError::UnknownTag(tag.to_u16()));
            };
            if tag.is_structural_pointer() {
                return Err(ExifError::UnsupportedMutation {
                    tag: *tag,
                    reason: "value locates other data in the segment",
                });
            }
            let encoded = TagCodec::for_entry(tag.to_u16(), Some(field_type))
                .encode(*tag, value, endianness)?;
            directories
                .entry(kind)
                .or_default()
                .insert(tag.to_u16(), Field { field_type, encoded });
        }
        if let Some(exif) = directories.get_mut(&IfdKind::Exif) {
            let encoded = Encoded {
                count: 4,
                bytes: EXIF_VERSION.to_vec(),
            };
            exif.insert(
                Tag::ExifVersion.to_u16(),
                Field {
                    field_type: Type::UNDEFINED,
                    encoded,
                },
            );
        }

        // Structural entries hold placeholders until every directory has an offset.
        let mut pointers = vec![
            (IfdKind::PRIMARY, Tag::ExifIfdPointer),
            (IfdKind::PRIMARY, Tag::GpsIfdPointer),
        ];
        if let Some(jpeg) = &self.thumbnail {
            pointers.push((IfdKind::THUMBNAIL, Tag::JpegInterchangeFormat));
            if let Some(thumbnail) = directories.get_mut(&IfdKind::THUMBNAIL) {
                thumbnail.insert(
                    Tag::JpegInterchangeFormatLength.to_u16(),
                    Field::long(jpeg.len(), endianness)?,
                );
            }
        }
        for (kind, tag) in &pointers {
            if let Some(fields) = directories.get_mut(kind) {
                fields.insert(tag.to_u16(), Field::long(0, endianness)?);
            }
        }

        let mut offsets = BTreeMap::new();
        let mut end = TIFF_HEADER_LEN;
        for kind in LAYOUT {
            if let Some(fields) = directories.get(&kind) {
                offsets.insert(kind, end);
                end += self.directory_len(fields);
            }
        }

        for (kind, tag) in pointers {
            let target = match tag {
                Tag::ExifIfdPointer => offsets.get(&IfdKind::Exif).copied(),
                Tag::GpsIfdPointer => offsets.get(&IfdKind::Gps).copied(),
                _ => Some(end),
            };
            if let (Some(fields), Some(target)) = (directories.get_mut(&kind), target) {
                fields.insert(tag.to_u16(), Field::long(target, endianness)?);
            }
        }

        let mut out = Vec::with_capacity(end + self.thumbnail.as_ref().map_or(0, Bytes::len));
        out.extend_from_slice(&endianness.marker());
        out.extend_from_slice(&endianness.u16_bytes(TIFF_MAGIC));
        out.extend_from_slice(&endianness.u32_bytes(offset_u32(TIFF_HEADER_LEN)?));
        for kind in LAYOUT {
            let Some(fields) = directories.get(&kind) else {
                continue;
            };
            let next = match kind {
                IfdKind::PRIMARY => offsets.get(&IfdKind::THUMBNAIL).copied().unwrap_or(0),
                _ => 0,
            };
            self.write_directory(&mut out, fields, offset_u32(next)?)?;
        }
        if let Some(jpeg) = &self.thumbnail {
            out.extend_from_slice(jpeg);
        }
        Ok(out)
    }

    /// Encode and parse the segment.
    pub fn build(&self) -> ExifResult<MetadataSegment> {
        MetadataSegment::parse(self.to_bytes()?)
    }

    /// Section, free slots and value area.
    fn section_len(&self, fields: &Fields) -> usize {
        2 + (fields.len() + self.reserved_slots) * ENTRY_SIZE + 4
    }

    fn directory_len(&self, fields: &Fields) -> usize {
        let values: usize = fields.values().map(Field::out_of_line_len).sum();
        self.section_len(fields) + values
    }

    fn write_directory(&self, out: &mut Vec<u8>, fields: &Fields, next: u32) -> ExifResult<()> {
        let endianness = self.endianness;
        let offset = out.len();
        let mut value_offset = offset + self.section_len(fields);
        let mut values = Vec::new();
        let mut section = IfdSection {
            offset,
            entries: Vec::with_capacity(fields.len()),
            next: Some(next),
        };
        for (tag, field) in fields {
            let bytes = &field.encoded.bytes;
            let mut value_field = [0; 4];
            if bytes.len() <= 4 {
                value_field[..bytes.len()].copy_from_slice(bytes);
            } else {
                value_field = endianness.u32_bytes(offset_u32(value_offset)?);
                values.extend_from_slice(bytes);
                values.resize(values.len() + bytes.len() % 2, 0);
                value_offset += field.out_of_line_len();
            }
            section.entries.push(IfdEntry {
                tag: *tag,
                type_code: field.field_type.into(),
                count: field.encoded.count,
                value_field,
            });
        }
        out.extend_from_slice(&section.encode(endianness)?);
        out.resize(out.len() + self.reserved_slots * ENTRY_SIZE, 0);
        out.extend_from_slice(&values);
        Ok(())
    }
}

impl MetadataSegment {
    /// A segment with empty primary, Exif and GPS directories, each with four free slots.
    pub fn empty(endianness: Endianness) -> ExifResult<Self> {
        SegmentBuilder::new(endianness).build()
    }
}
