use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use crate::buffer::SegmentBuffer;
use crate::endian::Endianness;
use crate::error::{ExifError, ExifResult};
use crate::ifd::{IfdKind, IfdSection, TagHandle};
use crate::metadata::ParseOptions;
use crate::tiff::tags::Tag;

/// The TIFF version number following the byte-order marker.
pub const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header: marker, magic number and first directory offset.
pub const TIFF_HEADER_LEN: usize = 8;

/// The fixed 8-byte header at the start of the segment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order of every scalar in the segment.
    pub endianness: Endianness,
    /// Offset of the primary directory.
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Validate the byte-order marker and magic number, and read the first directory offset.
    pub fn parse(buffer: &SegmentBuffer) -> ExifResult<Self> {
        let marker = buffer
            .read(0, 2)
            .map_err(|_| ExifError::BadHeader("segment is shorter than a TIFF header".into()))?;

        // Should be b"II" for little endian or b"MM" for big endian
        let endianness = Endianness::from_marker(marker).ok_or_else(|| {
            ExifError::BadHeader(format!("unexpected byte-order marker {marker:?}"))
        })?;

        let mut cursor = buffer.cursor(endianness, 2);
        let magic = cursor
            .read_u16()
            .map_err(|_| ExifError::BadHeader("missing TIFF magic number".into()))?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::BadHeader(format!(
                "unexpected TIFF magic number {magic}"
            )));
        }
        let first_ifd_offset = cursor
            .read_u32()
            .map_err(|_| ExifError::BadHeader("missing first directory offset".into()))?;

        Ok(Self {
            endianness,
            first_ifd_offset,
        })
    }
}

/// The tag index of a segment: every directory found by the walk and every tag they hold.
///
/// This is a snapshot of the buffer at the time of the walk. Any structural change to the
/// buffer invalidates it and a new walk must replace it.
#[derive(Debug, Clone, Default)]
pub struct Directories {
    sections: BTreeMap<IfdKind, Range<usize>>,
    tags: BTreeMap<u16, TagHandle>,
}

impl Directories {
    /// Walk the `next` chain from the primary directory, then the Exif and GPS directories it
    /// points to, indexing every entry.
    ///
    /// When a tag id appears more than once, the first directory in the order primary, Exif,
    /// GPS, thumbnail, later chain members owns it.
    pub fn walk(
        buffer: &SegmentBuffer,
        header: &TiffHeader,
        options: &ParseOptions,
    ) -> ExifResult<Self> {
        let endianness = header.endianness;
        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        let mut exif_offset = None;
        let mut gps_offset = None;

        let mut next = Some(header.first_ifd_offset as usize).filter(|offset| *offset != 0);
        while let Some(offset) = next {
            let index = chain.len();
            if index >= options.max_chain_len {
                log::warn!("directory chain longer than {index}, ignoring the rest");
                break;
            }
            if !visited.insert(offset) {
                log::warn!("directory chain loops back to offset {offset}");
                break;
            }
            let section = match IfdSection::read(buffer, offset, endianness, options.max_entries)
            {
                Ok(section) => section,
                Err(err) if index == 0 => return Err(err),
                Err(err) => {
                    log::warn!("skipping directory {index} at offset {offset}: {err}");
                    break;
                }
            };
            for entry in &section.entries {
                let pointer = Some(entry.value_offset(endianness) as usize);
                match Tag::from_u16(entry.tag) {
                    Some(Tag::ExifIfdPointer) if exif_offset.is_none() => exif_offset = pointer,
                    Some(Tag::GpsIfdPointer) if gps_offset.is_none() => gps_offset = pointer,
                    _ => {}
                }
            }
            if section.next.is_none() {
                log::debug!("directory {index} has no readable next offset, ending chain");
            }
            next = section.next_offset();
            chain.push(section);
        }

        let mut sub_directories = Vec::new();
        for (kind, offset) in [(IfdKind::Exif, exif_offset), (IfdKind::Gps, gps_offset)] {
            let Some(offset) = offset else { continue };
            if !visited.insert(offset) {
                log::warn!("{kind:?} directory at offset {offset} is already part of the chain");
                continue;
            }
            match IfdSection::read(buffer, offset, endianness, options.max_entries) {
                Ok(section) => sub_directories.push((kind, section)),
                Err(err) => log::warn!("skipping {kind:?} directory at offset {offset}: {err}"),
            }
        }

        let mut directories = Directories::default();
        let mut chain = chain.into_iter().enumerate();
        if let Some((index, primary)) = chain.next() {
            directories.insert(IfdKind::Chain(index), &primary, endianness);
        }
        for (kind, section) in &sub_directories {
            directories.insert(*kind, section, endianness);
        }
        for (index, section) in chain {
            directories.insert(IfdKind::Chain(index), &section, endianness);
        }
        Ok(directories)
    }

    fn insert(&mut self, kind: IfdKind, section: &IfdSection, endianness: Endianness) {
        self.sections.insert(kind, section.offset..section.end());
        for (index, entry) in section.entries.iter().enumerate() {
            if entry.is_zero() {
                continue;
            }
            self.tags.entry(entry.tag).or_insert_with(|| {
                TagHandle::new(kind, section.entry_offset(index), *entry, endianness)
            });
        }
    }

    /// Offset of a directory, if the segment has it.
    pub fn section_offset(&self, kind: IfdKind) -> Option<usize> {
        self.sections.get(&kind).map(|span| span.start)
    }

    /// Byte range of a directory's encoded section.
    pub fn section_span(&self, kind: IfdKind) -> Option<Range<usize>> {
        self.sections.get(&kind).cloned()
    }

    /// Every directory found and its offset.
    pub fn sections(&self) -> impl Iterator<Item = (IfdKind, usize)> + '_ {
        self.sections.iter().map(|(kind, span)| (*kind, span.start))
    }

    /// The handle of a present tag.
    pub fn get(&self, tag: u16) -> Option<&TagHandle> {
        self.tags.get(&tag)
    }

    /// The directory that owns a present tag.
    pub fn owner(&self, tag: u16) -> Option<IfdKind> {
        self.get(tag).map(|handle| handle.ifd())
    }

    /// Handles of all present tags, by ascending tag id.
    pub fn handles(&self) -> impl Iterator<Item = &TagHandle> + '_ {
        self.tags.values()
    }

    /// Number of indexed tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if no tag was found.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns `true` if `range` intersects a directory or an out-of-line value.
    pub fn is_occupied(&self, range: &Range<usize>) -> bool {
        let intersects = |span: &Range<usize>| span.start < range.end && range.start < span.end;
        self.sections.values().any(intersects)
            || self
                .tags
                .values()
                .filter_map(TagHandle::out_of_line_span)
                .any(|span| intersects(&span))
    }
}
