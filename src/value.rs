//! Decoded tag values.

use crate::tiff::enums::{
    ColorSpace, ExposureMode, ExposureProgram, GpsAltitudeRef, MeteringMode, Orientation,
    ResolutionUnit, Saturation, SceneCaptureType, SensingMethod, Sharpness, WhiteBalance,
};
use crate::tiff::tags::Tag;

/// A decoded tag value.
///
/// Entries with a count of one decode to a scalar variant, longer entries to a [`Value::List`].
/// Rationals decode to their quotient.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// BYTE
    Byte(u8),
    /// SHORT
    Short(u16),
    /// SSHORT
    SignedShort(i16),
    /// LONG
    Unsigned(u32),
    /// SLONG
    Signed(i32),
    /// RATIONAL
    Rational(f64),
    /// SRATIONAL
    SRational(f64),
    /// ASCII, and the text of version, comment and Windows XP tags.
    Ascii(String),
    /// UNDEFINED, or any field type this crate does not interpret.
    Undefined(Vec<u8>),
    /// Multiple elements of one field type.
    List(Vec<Value>),
    /// A SHORT or BYTE whose tag has a named enumeration.
    Enumerated(Enumerated),
}

impl Value {
    /// The elements of a list, or the value itself as a single element.
    pub fn elements(&self) -> &[Value] {
        match self {
            Value::List(values) => values,
            value => std::slice::from_ref(value),
        }
    }

    /// Unsigned integer view of integral values.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Value::Byte(val) => Some(val.into()),
            Value::Short(val) => Some(val.into()),
            Value::Unsigned(val) => Some(val),
            Value::SignedShort(val) => u32::try_from(val).ok(),
            Value::Signed(val) => u32::try_from(val).ok(),
            Value::Enumerated(val) => Some(val.raw().into()),
            _ => None,
        }
    }

    /// Signed integer view of integral values.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::SignedShort(val) => Some(val.into()),
            Value::Signed(val) => Some(val.into()),
            _ => self.as_u32().map(i64::from),
        }
    }

    /// Floating point view of numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Rational(val) | Value::SRational(val) => Some(val),
            _ => self.as_i64().map(|val| val as f64),
        }
    }

    /// Text view of [`Value::Ascii`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Ascii(val) => Some(val),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(val: u8) -> Self {
        Value::Byte(val)
    }
}

impl From<u16> for Value {
    fn from(val: u16) -> Self {
        Value::Short(val)
    }
}

impl From<i16> for Value {
    fn from(val: i16) -> Self {
        Value::SignedShort(val)
    }
}

impl From<u32> for Value {
    fn from(val: u32) -> Self {
        Value::Unsigned(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Signed(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Rational(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Ascii(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Ascii(val)
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::Undefined(val)
    }
}

impl From<Vec<f64>> for Value {
    fn from(val: Vec<f64>) -> Self {
        Value::List(val.into_iter().map(Value::Rational).collect())
    }
}

impl From<Vec<u16>> for Value {
    fn from(val: Vec<u16>) -> Self {
        Value::List(val.into_iter().map(Value::Short).collect())
    }
}

macro_rules! enumerated {
    ($($name:ident),* $(,)?) => {
        /// A named value of an enumerated tag. Each variant belongs to the tag of the same name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        #[allow(missing_docs)]
        pub enum Enumerated {
            $( $name($name), )*
        }

        impl Enumerated {
            /// The number stored in the segment.
            pub fn raw(&self) -> u16 {
                match *self {
                    $( Enumerated::$name(val) => val.into(), )*
                }
            }

            /// The tag this value belongs to.
            pub fn tag(&self) -> Tag {
                match self {
                    $( Enumerated::$name(_) => Tag::$name, )*
                }
            }

            /// Returns `true` if `tag` decodes to a named enumeration.
            pub fn is_enumerated(tag: Tag) -> bool {
                matches!(tag, $( Tag::$name )|*)
            }

            /// Look up the named value of `raw` for `tag`.
            ///
            /// `None` if the tag has no enumeration or the number has no name.
            pub fn decode(tag: Tag, raw: u16) -> Option<Self> {
                match tag {
                    $( Tag::$name => $name::try_from(raw).ok().map(Enumerated::$name), )*
                    _ => None,
                }
            }
        }

        $(
        impl From<$name> for Value {
            fn from(val: $name) -> Self {
                Value::Enumerated(Enumerated::$name(val))
            }
        }
        )*
    };
}

enumerated!(
    ColorSpace,
    ExposureMode,
    ExposureProgram,
    MeteringMode,
    Orientation,
    ResolutionUnit,
    Saturation,
    SceneCaptureType,
    SensingMethod,
    Sharpness,
    WhiteBalance,
    GpsAltitudeRef,
);
