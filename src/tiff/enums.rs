//! Named values of the enumerated EXIF tags.
#![allow(missing_docs)]

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum ColorSpace {
    Srgb = 1,
    Uncalibrated = 0xFFFF,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum ExposureMode {
    AutoExposure = 0,
    ManualExposure = 1,
    AutoBracket = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum ExposureProgram {
    NotDefined = 0,
    Manual = 1,
    NormalProgram = 2,
    AperturePriority = 3,
    ShutterPriority = 4,
    CreativeProgram = 5,
    ActionProgram = 6,
    PortraitMode = 7,
    LandscapeMode = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum MeteringMode {
    Unknown = 0,
    Average = 1,
    CenterWeightedAverage = 2,
    Spot = 3,
    MultiSpot = 4,
    Pattern = 5,
    Partial = 6,
    Other = 255,
}

/// Position of row 0 and column 0 of the stored image relative to the visual image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum Orientation {
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
    LeftTop = 5,
    RightTop = 6,
    RightBottom = 7,
    LeftBottom = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum ResolutionUnit {
    None = 1,
    Inches = 2,
    Centimeters = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum Saturation {
    Normal = 0,
    Low = 1,
    High = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum SceneCaptureType {
    Standard = 0,
    Landscape = 1,
    Portrait = 2,
    NightScene = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum SensingMethod {
    NotDefined = 1,
    OneChipColorArea = 2,
    TwoChipColorArea = 3,
    ThreeChipColorArea = 4,
    ColorSequentialArea = 5,
    Trilinear = 7,
    ColorSequentialLinear = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum Sharpness {
    Normal = 0,
    Soft = 1,
    Hard = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum WhiteBalance {
    Auto = 0,
    Manual = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum GpsAltitudeRef {
    AboveSeaLevel = 0,
    BelowSeaLevel = 1,
}
