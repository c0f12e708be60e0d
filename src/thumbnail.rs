//! Locating the embedded JPEG thumbnail.

use std::ops::Range;

use crate::buffer::SegmentBuffer;
use crate::endian::Endianness;
use crate::ifd::IfdKind;
use crate::metadata::Directories;
use crate::tiff::tags::Tag;

const SOI: [u8; 2] = [0xFF, 0xD8];
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Byte range of the thumbnail JPEG, from its SOI marker through its EOI marker.
///
/// The JPEG interchange format tags of the thumbnail directory are trusted when they describe
/// a complete JPEG. Otherwise the bytes after the thumbnail directory are scanned for markers.
pub(crate) fn locate(
    buffer: &SegmentBuffer,
    directories: &Directories,
    endianness: Endianness,
) -> Option<Range<usize>> {
    let section = directories.section_span(IfdKind::THUMBNAIL)?;
    from_tags(buffer, directories, endianness).or_else(|| scan(buffer.as_slice(), section.end))
}

fn from_tags(
    buffer: &SegmentBuffer,
    directories: &Directories,
    endianness: Endianness,
) -> Option<Range<usize>> {
    let long = |tag: Tag| {
        let handle = directories
            .get(tag.to_u16())
            .filter(|handle| handle.ifd() == IfdKind::THUMBNAIL)?;
        let decoded = handle.codec.read(handle, buffer, endianness).ok()?;
        decoded.value.as_u32().map(|val| val as usize)
    };
    let start = long(Tag::JpegInterchangeFormat)?;
    let len = long(Tag::JpegInterchangeFormatLength)?;
    let bytes = buffer.read(start, len).ok()?;
    if bytes.starts_with(&SOI) && bytes.ends_with(&EOI) {
        Some(start..start + len)
    } else {
        log::debug!("thumbnail tags do not describe a JPEG, scanning for markers");
        None
    }
}

fn scan(data: &[u8], from: usize) -> Option<Range<usize>> {
    let tail = data.get(from..)?;
    let start = from + find(tail, &SOI)?;
    let end = start + SOI.len() + find(&data[start + SOI.len()..], &EOI)? + EOI.len();
    Some(start..end)
}

fn find(haystack: &[u8], marker: &[u8; 2]) -> Option<usize> {
    haystack.windows(2).position(|window| window == marker)
}
