//! Error handling.

use std::fmt;

use thiserror::Error;

use crate::ifd::IfdKind;
use crate::tiff::tags::Tag;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExifError {
    /// The byte-order marker or the TIFF magic number is not recognized.
    #[error("Bad header: {0}")]
    BadHeader(String),

    /// An offset or length implied by the directory lies outside the buffer.
    #[error("Out of bounds: {len} bytes at offset {offset} exceed buffer of {buffer_len} bytes")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Length of the buffer at the time of the request.
        buffer_len: usize,
    },

    /// The tag id is not part of the recognized tag table.
    #[error("Unknown tag {0:#06x}")]
    UnknownTag(u16),

    /// The tag is recognized but absent from this segment.
    #[error("Tag {0:?} is not present")]
    TagNotPresent(Tag),

    /// The new value does not fit the bytes allocated to the tag.
    #[error("Value too long for {tag:?}: needs {required} bytes, {available} available")]
    ValueTooLong {
        /// Tag being written.
        tag: Tag,
        /// Bytes the new value needs.
        required: usize,
        /// Bytes the tag currently owns.
        available: usize,
    },

    /// The tag or its field type cannot be written.
    #[error("Unsupported mutation of {tag:?}: {reason}")]
    UnsupportedMutation {
        /// Tag being written.
        tag: Tag,
        /// Why the write was refused.
        reason: &'static str,
    },

    /// The destination directory has no trailing all-zero entry to grow into.
    #[error("No space for {tag:?} in {ifd:?} directory")]
    NoSpaceForTag {
        /// Tag being added.
        tag: Tag,
        /// Directory the tag belongs in.
        ifd: IfdKind,
    },

    /// The directory a tag belongs in does not exist in this segment.
    #[error("Directory {0:?} is not present")]
    IfdNotPresent(IfdKind),

    /// The value does not match the tag's field type or range.
    #[error("Invalid value for {tag:?}: {reason}")]
    InvalidValue {
        /// Tag being written.
        tag: Tag,
        /// What is wrong with the value.
        reason: String,
    },

    /// The entry's type code is outside the TIFF type table.
    #[error("Unknown field type {type_code} for {tag:?}")]
    UnknownFieldType {
        /// Tag whose entry carries the type code.
        tag: Tag,
        /// The raw type code.
        type_code: u16,
    },
}

/// Crate-specific result type.
pub type ExifResult<T> = std::result::Result<T, ExifError>;

/// Non-fatal problems found while decoding a value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExifWarning {
    /// An ASCII run ended at a null byte before the length its count declares.
    ShortAsciiRun {
        /// Tag that was decoded.
        tag: Tag,
        /// Characters the entry's count declares, terminator excluded.
        declared: usize,
        /// Characters actually found before the first null byte.
        actual: usize,
    },
}

impl fmt::Display for ExifWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifWarning::ShortAsciiRun {
                tag,
                declared,
                actual,
            } => write!(
                f,
                "{tag:?}: ASCII run has {actual} characters, count declares {declared}"
            ),
        }
    }
}
