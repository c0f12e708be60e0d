//! EXIF tag ids, field types and where each tag lives.
#![allow(missing_docs)]

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ifd::IfdKind;

const PRIMARY: IfdKind = IfdKind::PRIMARY;
const THUMBNAIL: IfdKind = IfdKind::THUMBNAIL;
const EXIF: IfdKind = IfdKind::Exif;
const GPS: IfdKind = IfdKind::Gps;

macro_rules! exif_tags {
    {
        // Permit arbitrary meta items, which include documentation.
        $( #[$enum_attr:meta] )*
        $vis:vis enum $name:ident {
            // Each of the `Name = Val => (Ifd, Type),` permitting documentation.
            $($(#[$ident_attr:meta])* $tag:ident = $val:expr => ($ifd:ident, $ty:ident),)*
        }
    } => {
        $( #[$enum_attr] )*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
        #[non_exhaustive]
        $vis enum $name {
            $($(#[$ident_attr])* $tag,)*
            /// A private, vendor or otherwise unrecognized tag
            Unknown(u16),
        }

        impl $name {
            #[inline(always)]
            pub const fn from_u16(val: u16) -> Option<Self> {
                match val {
                    $( $val => Some($name::$tag), )*
                    _ => None,
                }
            }

            #[inline(always)]
            pub const fn from_u16_exhaustive(val: u16) -> Self {
                match Self::from_u16(val) {
                    Some(tag) => tag,
                    None => $name::Unknown(val),
                }
            }

            #[inline(always)]
            pub const fn to_u16(&self) -> u16 {
                match *self {
                    $( $name::$tag => $val, )*
                    $name::Unknown(val) => val,
                }
            }

            /// The directory a new entry for this tag is written to.
            pub const fn canonical_ifd(&self) -> Option<IfdKind> {
                match *self {
                    $( $name::$tag => Some($ifd), )*
                    $name::Unknown(_) => None,
                }
            }

            /// The field type a new entry for this tag is written with.
            pub const fn canonical_type(&self) -> Option<Type> {
                match *self {
                    $( $name::$tag => Some(Type::$ty), )*
                    $name::Unknown(_) => None,
                }
            }
        }
    };
}

// Ordered as in the EXIF 2.3 tables: TIFF tags, Exif private tags, GPS tags.
exif_tags! {
/// EXIF and TIFF tags
pub enum Tag {
    // Image data structure
    ImageWidth = 256 => (PRIMARY, LONG),
    ImageLength = 257 => (PRIMARY, LONG),
    BitsPerSample = 258 => (PRIMARY, SHORT),
    Compression = 259 => (PRIMARY, SHORT),
    PhotometricInterpretation = 262 => (PRIMARY, SHORT),
    Orientation = 274 => (PRIMARY, SHORT),
    SamplesPerPixel = 277 => (PRIMARY, SHORT),
    PlanarConfiguration = 284 => (PRIMARY, SHORT),
    YCbCrSubSampling = 530 => (PRIMARY, SHORT),
    YCbCrPositioning = 531 => (PRIMARY, SHORT),
    XResolution = 282 => (PRIMARY, RATIONAL),
    YResolution = 283 => (PRIMARY, RATIONAL),
    ResolutionUnit = 296 => (PRIMARY, SHORT),
    // Recording offset
    StripOffsets = 273 => (PRIMARY, LONG),
    RowsPerStrip = 278 => (PRIMARY, LONG),
    StripByteCounts = 279 => (PRIMARY, LONG),
    JpegInterchangeFormat = 513 => (THUMBNAIL, LONG),
    JpegInterchangeFormatLength = 514 => (THUMBNAIL, LONG),
    // Image data characteristics
    TransferFunction = 301 => (PRIMARY, SHORT),
    WhitePoint = 318 => (PRIMARY, RATIONAL),
    PrimaryChromaticities = 319 => (PRIMARY, RATIONAL),
    YCbCrCoefficients = 529 => (PRIMARY, RATIONAL),
    ReferenceBlackWhite = 532 => (PRIMARY, RATIONAL),
    // Other
    DateTime = 306 => (PRIMARY, ASCII),
    ImageDescription = 270 => (PRIMARY, ASCII),
    Make = 271 => (PRIMARY, ASCII),
    Model = 272 => (PRIMARY, ASCII),
    Software = 305 => (PRIMARY, ASCII),
    Artist = 315 => (PRIMARY, ASCII),
    Copyright = 33432 => (PRIMARY, ASCII),
    // Sub-directory pointers
    ExifIfdPointer = 34665 => (PRIMARY, LONG),
    GpsIfdPointer = 34853 => (PRIMARY, LONG),
    // Windows XP, UCS-2 stored as bytes
    XpTitle = 40091 => (PRIMARY, BYTE),
    XpComment = 40092 => (PRIMARY, BYTE),
    XpAuthor = 40093 => (PRIMARY, BYTE),
    XpKeywords = 40094 => (PRIMARY, BYTE),
    XpSubject = 40095 => (PRIMARY, BYTE),

    // Exif version
    ExifVersion = 36864 => (EXIF, UNDEFINED),
    FlashpixVersion = 40960 => (EXIF, UNDEFINED),
    // Image data characteristics
    ColorSpace = 40961 => (EXIF, SHORT),
    Gamma = 42240 => (EXIF, RATIONAL),
    // Image configuration
    ComponentsConfiguration = 37121 => (EXIF, UNDEFINED),
    CompressedBitsPerPixel = 37122 => (EXIF, RATIONAL),
    PixelXDimension = 40962 => (EXIF, LONG),
    PixelYDimension = 40963 => (EXIF, LONG),
    // User information
    MakerNote = 37500 => (EXIF, UNDEFINED),
    UserComment = 37510 => (EXIF, UNDEFINED),
    // Related file
    RelatedSoundFile = 40964 => (EXIF, ASCII),
    // Date and time
    DateTimeOriginal = 36867 => (EXIF, ASCII),
    DateTimeDigitized = 36868 => (EXIF, ASCII),
    OffsetTime = 36880 => (EXIF, ASCII),
    OffsetTimeOriginal = 36881 => (EXIF, ASCII),
    OffsetTimeDigitized = 36882 => (EXIF, ASCII),
    SubsecTime = 37520 => (EXIF, ASCII),
    SubsecTimeOriginal = 37521 => (EXIF, ASCII),
    SubsecTimeDigitized = 37522 => (EXIF, ASCII),
    // Picture-taking conditions
    ExposureTime = 33434 => (EXIF, RATIONAL),
    FNumber = 33437 => (EXIF, RATIONAL),
    ExposureProgram = 34850 => (EXIF, SHORT),
    SpectralSensitivity = 34852 => (EXIF, ASCII),
    PhotographicSensitivity = 34855 => (EXIF, SHORT),
    Oecf = 34856 => (EXIF, UNDEFINED),
    SensitivityType = 34864 => (EXIF, SHORT),
    StandardOutputSensitivity = 34865 => (EXIF, LONG),
    RecommendedExposureIndex = 34866 => (EXIF, LONG),
    IsoSpeed = 34867 => (EXIF, LONG),
    IsoSpeedLatitudeYyy = 34868 => (EXIF, LONG),
    IsoSpeedLatitudeZzz = 34869 => (EXIF, LONG),
    ShutterSpeedValue = 37377 => (EXIF, SRATIONAL),
    ApertureValue = 37378 => (EXIF, RATIONAL),
    BrightnessValue = 37379 => (EXIF, SRATIONAL),
    ExposureBiasValue = 37380 => (EXIF, SRATIONAL),
    MaxApertureValue = 37381 => (EXIF, RATIONAL),
    SubjectDistance = 37382 => (EXIF, RATIONAL),
    MeteringMode = 37383 => (EXIF, SHORT),
    LightSource = 37384 => (EXIF, SHORT),
    Flash = 37385 => (EXIF, SHORT),
    FocalLength = 37386 => (EXIF, RATIONAL),
    SubjectArea = 37396 => (EXIF, SHORT),
    FlashEnergy = 41483 => (EXIF, RATIONAL),
    SpatialFrequencyResponse = 41484 => (EXIF, UNDEFINED),
    FocalPlaneXResolution = 41486 => (EXIF, RATIONAL),
    FocalPlaneYResolution = 41487 => (EXIF, RATIONAL),
    FocalPlaneResolutionUnit = 41488 => (EXIF, SHORT),
    SubjectLocation = 41492 => (EXIF, SHORT),
    ExposureIndex = 41493 => (EXIF, RATIONAL),
    SensingMethod = 41495 => (EXIF, SHORT),
    FileSource = 41728 => (EXIF, UNDEFINED),
    SceneType = 41729 => (EXIF, UNDEFINED),
    CfaPattern = 41730 => (EXIF, UNDEFINED),
    CustomRendered = 41985 => (EXIF, SHORT),
    ExposureMode = 41986 => (EXIF, SHORT),
    WhiteBalance = 41987 => (EXIF, SHORT),
    DigitalZoomRatio = 41988 => (EXIF, RATIONAL),
    FocalLengthIn35mmFilm = 41989 => (EXIF, SHORT),
    SceneCaptureType = 41990 => (EXIF, SHORT),
    GainControl = 41991 => (EXIF, SHORT),
    Contrast = 41992 => (EXIF, SHORT),
    Saturation = 41993 => (EXIF, SHORT),
    Sharpness = 41994 => (EXIF, SHORT),
    DeviceSettingDescription = 41995 => (EXIF, UNDEFINED),
    SubjectDistanceRange = 41996 => (EXIF, SHORT),
    // Shooting situation
    Temperature = 37888 => (EXIF, SRATIONAL),
    Humidity = 37889 => (EXIF, RATIONAL),
    Pressure = 37890 => (EXIF, RATIONAL),
    WaterDepth = 37891 => (EXIF, SRATIONAL),
    Acceleration = 37892 => (EXIF, RATIONAL),
    CameraElevationAngle = 37893 => (EXIF, SRATIONAL),
    // Other
    ImageUniqueId = 42016 => (EXIF, ASCII),
    CameraOwnerName = 42032 => (EXIF, ASCII),
    BodySerialNumber = 42033 => (EXIF, ASCII),
    LensSpecification = 42034 => (EXIF, RATIONAL),
    LensMake = 42035 => (EXIF, ASCII),
    LensModel = 42036 => (EXIF, ASCII),
    LensSerialNumber = 42037 => (EXIF, ASCII),
    InteroperabilityIfdPointer = 40965 => (EXIF, LONG),

    GpsVersionId = 0 => (GPS, BYTE),
    GpsLatitudeRef = 1 => (GPS, ASCII),
    GpsLatitude = 2 => (GPS, RATIONAL),
    GpsLongitudeRef = 3 => (GPS, ASCII),
    GpsLongitude = 4 => (GPS, RATIONAL),
    GpsAltitudeRef = 5 => (GPS, BYTE),
    GpsAltitude = 6 => (GPS, RATIONAL),
    GpsTimestamp = 7 => (GPS, RATIONAL),
    GpsSatellites = 8 => (GPS, ASCII),
    GpsStatus = 9 => (GPS, ASCII),
    GpsMeasureMode = 10 => (GPS, ASCII),
    GpsDop = 11 => (GPS, RATIONAL),
    GpsSpeedRef = 12 => (GPS, ASCII),
    GpsSpeed = 13 => (GPS, RATIONAL),
    GpsTrackRef = 14 => (GPS, ASCII),
    GpsTrack = 15 => (GPS, RATIONAL),
    GpsImgDirectionRef = 16 => (GPS, ASCII),
    GpsImgDirection = 17 => (GPS, RATIONAL),
    GpsMapDatum = 18 => (GPS, ASCII),
    GpsDestLatitudeRef = 19 => (GPS, ASCII),
    GpsDestLatitude = 20 => (GPS, RATIONAL),
    GpsDestLongitudeRef = 21 => (GPS, ASCII),
    GpsDestLongitude = 22 => (GPS, RATIONAL),
    GpsDestBearingRef = 23 => (GPS, ASCII),
    GpsDestBearing = 24 => (GPS, RATIONAL),
    GpsDestDistanceRef = 25 => (GPS, ASCII),
    GpsDestDistance = 26 => (GPS, RATIONAL),
    GpsProcessingMethod = 27 => (GPS, UNDEFINED),
    GpsAreaInformation = 28 => (GPS, UNDEFINED),
    GpsDateStamp = 29 => (GPS, ASCII),
    GpsDifferential = 30 => (GPS, SHORT),
    GpsHorizontalPositioningError = 31 => (GPS, RATIONAL),
}
}

/// Tag ids reserved for the Windows XP legacy string tags.
pub const WINDOWS_XP_TAGS: std::ops::RangeInclusive<u16> = 0x9C9B..=0x9C9F;

impl Tag {
    /// Returns `true` for the tags whose value is the offset of another structure in the
    /// segment. Rewriting those in place would detach what they point at.
    pub const fn is_structural_pointer(&self) -> bool {
        matches!(
            self,
            Tag::ExifIfdPointer
                | Tag::GpsIfdPointer
                | Tag::InteroperabilityIfdPointer
                | Tag::JpegInterchangeFormat
                | Tag::JpegInterchangeFormatLength
                | Tag::StripOffsets
                | Tag::StripByteCounts
        )
    }
}

/// The type of an IFD entry (a 2 byte field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
#[allow(clippy::upper_case_acronyms)]
pub enum Type {
    /// 8-bit unsigned integer
    BYTE = 1,
    /// 8-bit byte that contains a 7-bit ASCII code; the last byte must be zero
    ASCII = 2,
    /// 16-bit unsigned integer
    SHORT = 3,
    /// 32-bit unsigned integer
    LONG = 4,
    /// Fraction stored as two 32-bit unsigned integers
    RATIONAL = 5,
    /// 8-bit signed integer
    SBYTE = 6,
    /// 8-bit byte that may contain anything, depending on the field
    UNDEFINED = 7,
    /// 16-bit signed integer
    SSHORT = 8,
    /// 32-bit signed integer
    SLONG = 9,
    /// Fraction stored as two 32-bit signed integers
    SRATIONAL = 10,
    /// 32-bit IEEE floating point
    FLOAT = 11,
    /// 64-bit IEEE floating point
    DOUBLE = 12,
}

impl Type {
    /// Encoded size of a single element, in bytes.
    pub const fn size(self) -> usize {
        match self {
            Type::BYTE | Type::SBYTE | Type::ASCII | Type::UNDEFINED => 1,
            Type::SHORT | Type::SSHORT => 2,
            Type::LONG | Type::SLONG | Type::FLOAT => 4,
            Type::RATIONAL | Type::SRATIONAL | Type::DOUBLE => 8,
        }
    }
}
