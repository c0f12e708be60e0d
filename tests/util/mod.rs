#![allow(dead_code)]

use exif_segment::tiff::enums::{ResolutionUnit, WhiteBalance};
use exif_segment::tiff::tags::Tag;
use exif_segment::{Endianness, MetadataSegment, SegmentBuilder, Value};

pub(crate) const BYTE_ORDERS: [Endianness; 2] = [Endianness::BigEndian, Endianness::LittleEndian];

/// SOI, an APP0 stub and EOI.
pub(crate) const THUMBNAIL_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x4A, 0x46, 0xFF, 0xD9];

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A segment shaped like camera output: primary, Exif and GPS tags plus a thumbnail.
pub(crate) fn camera(endianness: Endianness) -> MetadataSegment {
    init_logger();
    SegmentBuilder::new(endianness)
        .entry(Tag::Make, "Acme")
        .entry(Tag::Model, "MyCamera")
        .entry(Tag::Orientation, 1u16)
        .entry(Tag::XResolution, 72.0)
        .entry(Tag::YResolution, 72.0)
        .entry(Tag::ResolutionUnit, ResolutionUnit::Inches)
        .entry(Tag::DateTime, "2024:05:01 10:00:00")
        .entry(Tag::ExposureTime, 1.0 / 125.0)
        .entry(Tag::FNumber, 2.8)
        .entry(Tag::UserComment, "ASCII comment")
        .entry(Tag::WhiteBalance, WhiteBalance::Auto)
        .entry(Tag::GpsLatitudeRef, "N")
        .entry(Tag::GpsLatitude, vec![41.0, 24.0, 5.5])
        .entry(Tag::GpsLongitudeRef, "E")
        .entry(Tag::GpsLongitude, vec![2.0, 10.0, 30.25])
        .entry(Tag::GpsAltitude, 12.5)
        .thumbnail(THUMBNAIL_JPEG)
        .build()
        .unwrap()
}

/// A segment with a single primary directory holding `entries` as
/// `(tag, type code, count, value bytes)`. Values longer than four bytes follow the directory.
pub(crate) fn raw_segment(endianness: Endianness, entries: &[(u16, u16, u32, &[u8])]) -> Vec<u8> {
    let mut out = endianness.marker().to_vec();
    out.extend_from_slice(&endianness.u16_bytes(42));
    out.extend_from_slice(&endianness.u32_bytes(8));
    out.extend_from_slice(&endianness.u16_bytes(entries.len() as u16));

    let mut value_offset = 8 + 2 + entries.len() * 12 + 4;
    let mut values = Vec::new();
    for (tag, type_code, count, value) in entries {
        out.extend_from_slice(&endianness.u16_bytes(*tag));
        out.extend_from_slice(&endianness.u16_bytes(*type_code));
        out.extend_from_slice(&endianness.u32_bytes(*count));
        if value.len() <= 4 {
            let mut field = [0; 4];
            field[..value.len()].copy_from_slice(value);
            out.extend_from_slice(&field);
        } else {
            out.extend_from_slice(&endianness.u32_bytes(value_offset as u32));
            values.extend_from_slice(value);
            value_offset += value.len();
        }
    }
    out.extend_from_slice(&endianness.u32_bytes(0));
    out.extend_from_slice(&values);
    out
}

/// Every present tag with its decoded value.
pub(crate) fn decoded(segment: &MetadataSegment) -> Vec<(Tag, Value)> {
    segment
        .tag_ids()
        .map(|tag| (tag, segment.get(tag).unwrap()))
        .collect()
}
