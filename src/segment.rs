//! The public view of one metadata segment.

use bytes::{Bytes, BytesMut};

use crate::buffer::SegmentBuffer;
use crate::codec::Decoded;
use crate::edit;
use crate::endian::Endianness;
use crate::error::{ExifError, ExifResult};
use crate::ifd::{IfdKind, TagHandle};
use crate::metadata::{Directories, ParseOptions, TiffHeader};
use crate::thumbnail;
use crate::tiff::tags::Tag;
use crate::value::Value;

/// Identifier that precedes the TIFF header in a JPEG APP1 segment.
pub const EXIF_IDENTIFIER: &[u8] = b"Exif\0\0";

/// A parsed metadata segment that can be read and edited in place.
///
/// Reads go through an index of every tag, built by walking the directories. Edits change the
/// bytes directly and never move a value that another entry points at: a modified value keeps
/// its allocation, a deleted entry leaves a zero entry behind, and an added entry takes the
/// place of a zero entry. The index is rebuilt after every successful edit.
#[derive(Debug, Clone)]
pub struct MetadataSegment {
    identifier: Bytes,
    buffer: SegmentBuffer,
    header: TiffHeader,
    directories: Directories,
    options: ParseOptions,
}

fn lookup(directories: &Directories, tag: Tag) -> ExifResult<&TagHandle> {
    match directories.get(tag.to_u16()) {
        Some(handle) => Ok(handle),
        None => match tag {
            Tag::Unknown(id) => Err(ExifError::UnknownTag(id)),
            _ => Err(ExifError::TagNotPresent(tag)),
        },
    }
}

impl MetadataSegment {
    /// Parse a segment body, starting at the TIFF header or at the `Exif\0\0` identifier.
    pub fn parse(bytes: impl AsRef<[u8]>) -> ExifResult<Self> {
        Self::parse_with_options(bytes, ParseOptions::default())
    }

    /// Parse a segment body with custom limits. The options also apply to every re-walk.
    pub fn parse_with_options(bytes: impl AsRef<[u8]>, options: ParseOptions) -> ExifResult<Self> {
        let bytes = bytes.as_ref();
        let (identifier, body) = match bytes.strip_prefix(EXIF_IDENTIFIER) {
            Some(body) => (Bytes::from_static(EXIF_IDENTIFIER), body),
            None => (Bytes::new(), bytes),
        };
        let buffer = SegmentBuffer::new(body);
        let header = TiffHeader::parse(&buffer)?;
        let directories = Directories::walk(&buffer, &header, &options)?;
        log::debug!(
            "parsed {:?} segment of {} bytes with {} tags",
            header.endianness,
            buffer.len(),
            directories.len()
        );
        Ok(Self {
            identifier,
            buffer,
            header,
            directories,
            options,
        })
    }

    fn rewalk(&mut self) -> ExifResult<()> {
        self.directories = Directories::walk(&self.buffer, &self.header, &self.options)?;
        Ok(())
    }

    /// Read a tag's value. A short ASCII run is logged and its readable part returned.
    pub fn get(&self, tag: Tag) -> ExifResult<Value> {
        let decoded = self.get_decoded(tag)?;
        if let Some(warning) = &decoded.warning {
            log::warn!("{warning}");
        }
        Ok(decoded.value)
    }

    /// Read a tag's value together with any decoding warning.
    ///
    /// Fails with [`ExifError::UnknownTag`] for an unrecognized id that is absent, and with
    /// [`ExifError::TagNotPresent`] for a recognized tag that is absent. Present entries with an
    /// unrecognized id are readable.
    pub fn get_decoded(&self, tag: Tag) -> ExifResult<Decoded> {
        let handle = lookup(&self.directories, tag)?;
        handle.codec.read(handle, &self.buffer, self.header.endianness)
    }

    /// Write a tag's value.
    ///
    /// A present tag is rewritten in place. An absent tag is added to its canonical directory,
    /// which needs a free zero slot.
    pub fn set(&mut self, tag: Tag, value: impl Into<Value>) -> ExifResult<()> {
        let value = value.into();
        let endianness = self.header.endianness;
        if !self.contains(tag) {
            if let Tag::Unknown(id) = tag {
                return Err(ExifError::UnknownTag(id));
            }
            edit::add_tag(&mut self.buffer, &self.directories, endianness, tag, &value)?;
            self.rewalk()?;
        }
        let handle = lookup(&self.directories, tag)?;
        handle
            .codec
            .modify(handle, &mut self.buffer, endianness, &value)?;
        self.rewalk()
    }

    /// Remove a tag. The segment keeps its length and every other value keeps its offset.
    pub fn delete(&mut self, tag: Tag) -> ExifResult<()> {
        let handle = lookup(&self.directories, tag)?;
        edit::delete_tag(
            &mut self.buffer,
            &self.directories,
            self.header.endianness,
            handle,
        )?;
        self.rewalk()
    }

    /// Remove every tag except the Exif and GPS pointers, returning the number of entries
    /// removed.
    ///
    /// The pointers stay so both sub-directories remain reachable and can take new tags.
    /// Entries that surface once a shadowing entry is gone are removed as well.
    pub fn delete_all(&mut self) -> ExifResult<usize> {
        let mut removed = 0;
        loop {
            let next = self
                .directories
                .handles()
                .map(TagHandle::tag)
                .find(|tag| !matches!(tag, Tag::ExifIfdPointer | Tag::GpsIfdPointer));
            let Some(tag) = next else {
                break;
            };
            self.delete(tag)?;
            removed += 1;
        }
        log::debug!("deleted {removed} entries");
        Ok(removed)
    }

    /// Present tags in ascending id order.
    pub fn tag_ids(&self) -> impl Iterator<Item = Tag> + '_ {
        self.directories.handles().map(TagHandle::tag)
    }

    /// Returns `true` if the tag is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.directories.get(tag.to_u16()).is_some()
    }

    /// Where a present tag lives: owning directory, field type, count and value offset.
    pub fn entry(&self, tag: Tag) -> Option<&TagHandle> {
        self.directories.get(tag.to_u16())
    }

    /// The identifier, if parsed with one, followed by the current buffer.
    pub fn serialize(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.identifier.len() + self.buffer.len());
        out.extend_from_slice(&self.identifier);
        out.extend_from_slice(self.buffer.as_slice());
        out.freeze()
    }

    /// The embedded JPEG thumbnail, if the segment has one.
    pub fn thumbnail(&self) -> Option<Bytes> {
        thumbnail::locate(&self.buffer, &self.directories, self.header.endianness)
            .and_then(|span| self.buffer.as_slice().get(span))
            .map(Bytes::copy_from_slice)
    }

    /// Byte order of the segment.
    pub fn endianness(&self) -> Endianness {
        self.header.endianness
    }

    /// Every directory found and its offset from the TIFF header.
    pub fn ifd_offsets(&self) -> impl Iterator<Item = (IfdKind, usize)> + '_ {
        self.directories.sections()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::SegmentBuilder;
    use crate::tiff::enums::Orientation;

    fn segment() -> MetadataSegment {
        SegmentBuilder::new(Endianness::BigEndian)
            .entry(Tag::Make, "Acme")
            .entry(Tag::Model, "MyCamera")
            .entry(Tag::Orientation, Orientation::TopLeft)
            .build()
            .unwrap()
    }

    #[test]
    fn identifier_is_kept() {
        let body = segment().serialize();
        let mut bytes = EXIF_IDENTIFIER.to_vec();
        bytes.extend_from_slice(&body);

        let segment = MetadataSegment::parse(&bytes).unwrap();
        assert_eq!(segment.serialize(), bytes);
        assert_eq!(segment.get(Tag::Make).unwrap(), Value::from("Acme"));
        assert_eq!(segment.entry(Tag::Make).unwrap().value_offset() % 2, 0);
    }

    #[test]
    fn unknown_and_absent_tags() {
        let segment = segment();
        assert!(matches!(
            segment.get(Tag::Unknown(0xC000)),
            Err(ExifError::UnknownTag(0xC000))
        ));
        assert!(matches!(
            segment.get(Tag::Artist),
            Err(ExifError::TagNotPresent(Tag::Artist))
        ));
    }

    #[test]
    fn set_adds_then_modifies() {
        let mut segment = segment();
        segment.set(Tag::Artist, "Jane Doe").unwrap();
        assert_eq!(segment.get(Tag::Artist).unwrap(), Value::from("Jane Doe"));
        segment.set(Tag::Artist, "J. Doe").unwrap();
        assert_eq!(segment.get(Tag::Artist).unwrap(), Value::from("J. Doe"));
        assert_eq!(segment.entry(Tag::Artist).unwrap().count(), 7);
    }

    #[test]
    fn delete_all_empties_every_directory() {
        let mut segment = SegmentBuilder::new(Endianness::LittleEndian)
            .entry(Tag::Make, "Acme")
            .entry(Tag::WhiteBalance, crate::tiff::enums::WhiteBalance::Auto)
            .entry(Tag::GpsAltitude, 12.5)
            .thumbnail(vec![0xFF, 0xD8, 0xFF, 0xD9])
            .build()
            .unwrap();
        let len = segment.serialize().len();
        // make, white balance, exif version, altitude, two thumbnail tags
        assert_eq!(segment.delete_all().unwrap(), 6);
        assert_eq!(
            segment.tag_ids().collect::<Vec<_>>(),
            vec![Tag::ExifIfdPointer, Tag::GpsIfdPointer]
        );
        assert_eq!(segment.serialize().len(), len);
    }
}
