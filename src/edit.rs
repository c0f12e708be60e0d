//! Structural edits that keep every other offset in the segment valid.
//!
//! A delete shrinks a directory by one entry and pads the gap with an all-zero entry, so the
//! buffer keeps its length. An add grows a directory into such a padding entry. Neither moves
//! the next-directory offset's target or any out-of-line value.

use std::ops::Range;

use crate::buffer::SegmentBuffer;
use crate::codec::TagCodec;
use crate::endian::Endianness;
use crate::error::{ExifError, ExifResult};
use crate::ifd::{IfdEntry, IfdSection, TagHandle, ENTRY_SIZE};
use crate::metadata::Directories;
use crate::tiff::tags::Tag;
use crate::value::Value;

/// Re-reads a directory that the walk already accepted.
fn reread(
    buffer: &SegmentBuffer,
    offset: usize,
    endianness: Endianness,
) -> ExifResult<IfdSection> {
    let section = IfdSection::read(buffer, offset, endianness, u16::MAX as usize)?;
    // the section and its next offset must be whole before anything moves
    buffer.read(section.offset, section.encoded_len())?;
    Ok(section)
}

/// Remove the entry behind `handle`.
pub(crate) fn delete_tag(
    buffer: &mut SegmentBuffer,
    directories: &Directories,
    endianness: Endianness,
    handle: &TagHandle,
) -> ExifResult<()> {
    let ifd = handle.ifd();
    let section_offset = directories
        .section_offset(ifd)
        .ok_or(ExifError::IfdNotPresent(ifd))?;
    let section = reread(buffer, section_offset, endianness)?;
    let listed = (0..section.entries.len())
        .any(|index| section.entry_offset(index) == handle.entry_offset());
    if !listed {
        return Err(ExifError::TagNotPresent(handle.tag()));
    }
    let entry_count = (section.entries.len() - 1) as u16;

    // values may be shared between entries, those bytes stay
    let shared: Vec<Range<usize>> = directories
        .handles()
        .filter(|other| other.entry_offset() != handle.entry_offset())
        .filter_map(TagHandle::out_of_line_span)
        .collect();
    match handle.codec.wipe(handle, buffer, &shared) {
        Err(ExifError::OutOfBounds { .. }) => {
            log::warn!("{:?} points past the end of the segment, nothing to wipe", handle.tag());
        }
        other => other?,
    }
    buffer.write_u16(endianness, section.offset, entry_count)?;
    buffer.splice_delete(handle.entry_offset(), ENTRY_SIZE)?;
    buffer.splice_insert_zero(section.end() - ENTRY_SIZE, ENTRY_SIZE)?;

    log::debug!(
        "deleted {:?} at offset {} from {ifd:?}, {entry_count} entries left",
        handle.tag(),
        handle.entry_offset()
    );
    Ok(())
}

/// Add an entry for `tag` to its canonical directory, with a zeroed value of the right size.
///
/// The caller writes the value through the new entry once the directories are walked again.
/// Nothing is written unless the directory has a free slot and `value` encodes for the tag.
pub(crate) fn add_tag(
    buffer: &mut SegmentBuffer,
    directories: &Directories,
    endianness: Endianness,
    tag: Tag,
    value: &Value,
) -> ExifResult<()> {
    let (ifd, field_type) = match (tag.canonical_ifd(), tag.canonical_type()) {
        (Some(ifd), Some(field_type)) => (ifd, field_type),
        _ => return Err(ExifError::UnknownTag(tag.to_u16())),
    };
    if tag.is_structural_pointer() {
        return Err(ExifError::UnsupportedMutation {
            tag,
            reason: "value locates other data in the segment",
        });
    }
    let section_offset = directories
        .section_offset(ifd)
        .ok_or(ExifError::IfdNotPresent(ifd))?;
    let mut section = reread(buffer, section_offset, endianness)?;

    let slot = section.end()..section.end() + ENTRY_SIZE;
    let slot_is_free = buffer
        .read(slot.start, ENTRY_SIZE)
        .map(|bytes| bytes.iter().all(|byte| *byte == 0))
        .unwrap_or(false);
    if !slot_is_free || directories.is_occupied(&slot) {
        return Err(ExifError::NoSpaceForTag { tag, ifd });
    }

    let codec = TagCodec::for_entry(tag.to_u16(), Some(field_type));
    let encoded = codec.encode(tag, value, endianness)?;

    let mut entry = IfdEntry {
        tag: tag.to_u16(),
        type_code: field_type.into(),
        count: encoded.count,
        value_field: [0; 4],
    };
    if encoded.bytes.len() > 4 {
        let start = buffer.len() + buffer.len() % 2;
        let offset = u32::try_from(start).map_err(|_| ExifError::OutOfBounds {
            offset: start,
            len: encoded.bytes.len(),
            buffer_len: buffer.len(),
        })?;
        buffer.splice_insert_zero(buffer.len(), start - buffer.len() + encoded.bytes.len())?;
        entry.value_field = endianness.u32_bytes(offset);
    }

    let position = section
        .entries
        .iter()
        .position(|existing| existing.tag > entry.tag)
        .unwrap_or(section.entries.len());
    section.entries.insert(position, entry);
    buffer.write(section.offset, &section.encode(endianness)?)?;

    log::debug!(
        "added {tag:?} to {ifd:?} at offset {}",
        section.entry_offset(position)
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ifd::IfdKind;
    use crate::metadata::{ParseOptions, TiffHeader};

    #[rustfmt::skip]
    fn fixture() -> Vec<u8> {
        vec![
            b'M', b'M', 0, 42, 0, 0, 0, 8,
            // 8: primary, two entries, then one free slot
            0, 2,
            0x01, 0x10, 0, 2, 0, 0, 0, 9, 0, 0, 0, 50,      // model -> 50
            0x01, 0x12, 0, 3, 0, 0, 0, 1, 0, 1, 0, 0,       // orientation = 1
            0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            // 50: model value
            b'M', b'y', b'C', b'a', b'm', b'e', b'r', b'a', 0,
        ]
    }

    fn walk(buffer: &SegmentBuffer) -> Directories {
        let header = TiffHeader::parse(buffer).unwrap();
        Directories::walk(buffer, &header, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn delete_pads_with_zero_entry() {
        let mut buffer = SegmentBuffer::new(fixture());
        let directories = walk(&buffer);
        let handle = directories.get(272).unwrap().clone();
        delete_tag(&mut buffer, &directories, Endianness::BigEndian, &handle).unwrap();

        assert_eq!(buffer.len(), 59);
        assert_eq!(buffer.read(8, 2).unwrap(), &[0, 1]);
        assert_eq!(buffer.read(10, 2).unwrap(), &[0x01, 0x12]);
        assert_eq!(buffer.read(22, 28).unwrap(), &[0; 28]);
        assert_eq!(buffer.read(50, 9).unwrap(), &[0; 9]);

        let directories = walk(&buffer);
        assert!(directories.get(272).is_none());
        assert_eq!(directories.get(274).unwrap().value_offset(), 18);
    }

    #[test]
    fn add_fills_free_slot_in_tag_order() {
        let mut buffer = SegmentBuffer::new(fixture());
        let directories = walk(&buffer);
        add_tag(
            &mut buffer,
            &directories,
            Endianness::BigEndian,
            Tag::Make,
            &Value::from("Acme Optics"),
        )
        .unwrap();

        // value appended at the next even offset
        assert_eq!(buffer.len(), 60 + 12);
        assert_eq!(buffer.read(8, 2).unwrap(), &[0, 3]);
        assert_eq!(
            buffer.read(10, 12).unwrap(),
            &[0x01, 0x0F, 0, 2, 0, 0, 0, 12, 0, 0, 0, 60]
        );

        let directories = walk(&buffer);
        assert_eq!(directories.owner(271), Some(IfdKind::PRIMARY));
        assert_eq!(directories.get(272).unwrap().entry_offset(), 22);
        assert_eq!(directories.get(272).unwrap().value_offset(), 50);
    }

    #[test]
    fn add_needs_a_free_slot() {
        let mut buffer = SegmentBuffer::new(fixture());
        let directories = walk(&buffer);
        add_tag(&mut buffer, &directories, Endianness::BigEndian, Tag::Software, &"a".into())
            .unwrap();
        let before = buffer.clone();

        let directories = walk(&buffer);
        let err = add_tag(&mut buffer, &directories, Endianness::BigEndian, Tag::Artist, &"b".into())
            .unwrap_err();
        assert!(matches!(
            err,
            ExifError::NoSpaceForTag {
                tag: Tag::Artist,
                ifd: IfdKind::PRIMARY
            }
        ));
        assert_eq!(buffer, before);
    }

    #[test]
    fn add_checks_value_before_writing() {
        let mut buffer = SegmentBuffer::new(fixture());
        let directories = walk(&buffer);
        let err = add_tag(
            &mut buffer,
            &directories,
            Endianness::BigEndian,
            Tag::XResolution,
            &"seventy-two".into(),
        )
        .unwrap_err();
        assert!(matches!(err, ExifError::InvalidValue { .. }));
        assert_eq!(buffer.as_slice(), fixture().as_slice());
    }

    #[test]
    fn add_needs_the_directory() {
        let mut buffer = SegmentBuffer::new(fixture());
        let directories = walk(&buffer);
        let err = add_tag(
            &mut buffer,
            &directories,
            Endianness::BigEndian,
            Tag::GpsAltitude,
            &Value::Rational(12.0),
        )
        .unwrap_err();
        assert!(matches!(err, ExifError::IfdNotPresent(IfdKind::Gps)));

        let err = add_tag(
            &mut buffer,
            &directories,
            Endianness::BigEndian,
            Tag::Unknown(0xC000),
            &Value::Byte(1),
        )
        .unwrap_err();
        assert!(matches!(err, ExifError::UnknownTag(0xC000)));
    }
}
