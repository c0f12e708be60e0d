//! API for locating metadata inside a TIFF-structured segment.
//!
//! ### Walking the directories
//!
//! [`TiffHeader::parse`] validates the byte-order marker and magic number. [`Directories::walk`]
//! then follows the `next` chain from the primary directory and the Exif and GPS pointers found
//! in the chain, building an index from tag id to [`TagHandle`][crate::TagHandle]:
//!
//! ```
//! use exif_segment::buffer::SegmentBuffer;
//! use exif_segment::metadata::{Directories, ParseOptions, TiffHeader};
//! use exif_segment::IfdKind;
//!
//! let buffer = SegmentBuffer::new(vec![
//!     b'I', b'I', 42, 0, 8, 0, 0, 0,
//!     1, 0,
//!     0x12, 0x01, 3, 0, 1, 0, 0, 0, 6, 0, 0, 0,
//!     0, 0, 0, 0,
//! ]);
//! let header = TiffHeader::parse(&buffer)?;
//! let directories = Directories::walk(&buffer, &header, &ParseOptions::default())?;
//! assert_eq!(directories.owner(274), Some(IfdKind::PRIMARY));
//! # Ok::<(), exif_segment::error::ExifError>(())
//! ```
//!
//! ### Limits
//!
//! A corrupt segment can declare huge directories or a `next` chain that never ends.
//! [`ParseOptions`] caps both; the defaults are generous for camera output.
//!
//! The index is a snapshot. Every structural change to the buffer is followed by a fresh walk;
//! [`MetadataSegment`][crate::MetadataSegment] takes care of that.

mod options;
mod reader;

pub use options::ParseOptions;
pub use reader::{Directories, TiffHeader, TIFF_HEADER_LEN, TIFF_MAGIC};
