//! TIFF building blocks used by EXIF: tag ids, field types and enumerated values.

pub mod enums;
pub mod tags;
