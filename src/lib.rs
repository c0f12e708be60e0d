#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod buffer;
mod builder;
pub mod codec;
mod edit;
pub mod endian;
pub mod error;
mod ifd;
pub mod metadata;
pub mod rational;
mod segment;
mod thumbnail;
pub mod tiff;
pub mod value;

pub use builder::SegmentBuilder;
pub use codec::Decoded;
pub use endian::Endianness;
pub use ifd::{IfdEntry, IfdKind, IfdSection, TagHandle, ENTRY_SIZE};
pub use segment::{MetadataSegment, EXIF_IDENTIFIER};
pub use value::Value;
