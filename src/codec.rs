//! Reading and writing tag values according to their field type.
//!
//! Most tags follow the generic rule for their field type. Three groups do not: the version
//! tags hold four unterminated characters, the user comment starts with an 8-byte character
//! code, and the Windows XP tags hold UCS-2 text in a BYTE field.

use std::ops::Range;

use crate::buffer::SegmentBuffer;
use crate::endian::Endianness;
use crate::error::{ExifError, ExifResult, ExifWarning};
use crate::ifd::TagHandle;
use crate::rational;
use crate::tiff::tags::{Tag, Type, WINDOWS_XP_TAGS};
use crate::value::{Enumerated, Value};

/// Length of the character code that opens a user comment.
pub const CHARACTER_CODE_LEN: usize = 8;

const ASCII_CODE: &[u8; CHARACTER_CODE_LEN] = b"ASCII\0\0\0";
const UNICODE_CODE: &[u8; CHARACTER_CODE_LEN] = b"UNICODE\0";
const JIS_CODE: &[u8; CHARACTER_CODE_LEN] = b"JIS\0\0\0\0\0";

/// How a tag's value is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagCodec {
    /// BYTE elements.
    Byte,
    /// Null-terminated ASCII; the count includes the terminator.
    Ascii,
    /// SHORT elements.
    Short,
    /// SSHORT elements.
    SignedShort,
    /// LONG elements.
    Long,
    /// SLONG elements.
    SignedLong,
    /// RATIONAL elements.
    Rational,
    /// SRATIONAL elements.
    SignedRational,
    /// Opaque UNDEFINED bytes.
    Undefined,
    /// Exif and Flashpix version: four characters, no terminator, always inline.
    ExifVersion,
    /// Character code followed by the comment text.
    UserComment,
    /// UCS-2 little endian text stored as BYTE.
    WindowsXp,
    /// A field type this crate does not interpret.
    Unknown,
}

/// A decoded value and any non-fatal problem found while decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Best-effort value.
    pub value: Value,
    /// Set when the stored bytes disagree with the entry.
    pub warning: Option<ExifWarning>,
}

impl From<Value> for Decoded {
    fn from(value: Value) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

/// A value converted to its stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Encoded {
    pub count: u32,
    pub bytes: Vec<u8>,
}

impl TagCodec {
    /// Choose the codec for an entry: the tag-specific encodings first, then the field type.
    pub fn for_entry(tag: u16, field_type: Option<Type>) -> Self {
        if WINDOWS_XP_TAGS.contains(&tag) {
            return TagCodec::WindowsXp;
        }
        match Tag::from_u16(tag) {
            Some(Tag::ExifVersion | Tag::FlashpixVersion) => return TagCodec::ExifVersion,
            Some(Tag::UserComment) => return TagCodec::UserComment,
            _ => {}
        }
        match field_type {
            Some(Type::BYTE) => TagCodec::Byte,
            Some(Type::ASCII) => TagCodec::Ascii,
            Some(Type::SHORT) => TagCodec::Short,
            Some(Type::SSHORT) => TagCodec::SignedShort,
            Some(Type::LONG) => TagCodec::Long,
            Some(Type::SLONG) => TagCodec::SignedLong,
            Some(Type::RATIONAL) => TagCodec::Rational,
            Some(Type::SRATIONAL) => TagCodec::SignedRational,
            Some(Type::UNDEFINED) => TagCodec::Undefined,
            Some(Type::SBYTE | Type::FLOAT | Type::DOUBLE) | None => TagCodec::Unknown,
        }
    }

    /// Decode the value the handle points at.
    pub fn read(
        &self,
        handle: &TagHandle,
        buffer: &SegmentBuffer,
        endianness: Endianness,
    ) -> ExifResult<Decoded> {
        let tag = handle.tag();
        let bytes = value_bytes(handle, buffer)?;
        let value = match self {
            TagCodec::Byte => collect(
                bytes
                    .iter()
                    .map(|byte| named_or(tag, (*byte).into(), Value::Byte(*byte))),
            ),
            TagCodec::Short => collect(bytes.chunks_exact(2).map(|chunk| {
                let raw = endianness.read_u16(chunk);
                named_or(tag, raw, Value::Short(raw))
            })),
            TagCodec::SignedShort => collect(
                bytes
                    .chunks_exact(2)
                    .map(|chunk| Value::SignedShort(endianness.read_i16(chunk))),
            ),
            TagCodec::Long => collect(
                bytes
                    .chunks_exact(4)
                    .map(|chunk| Value::Unsigned(endianness.read_u32(chunk))),
            ),
            TagCodec::SignedLong => collect(
                bytes
                    .chunks_exact(4)
                    .map(|chunk| Value::Signed(endianness.read_i32(chunk))),
            ),
            TagCodec::Rational => collect(bytes.chunks_exact(8).map(|chunk| {
                Value::Rational(rational::decode_unsigned(
                    endianness.read_u32(&chunk[..4]),
                    endianness.read_u32(&chunk[4..]),
                ))
            })),
            TagCodec::SignedRational => collect(bytes.chunks_exact(8).map(|chunk| {
                Value::SRational(rational::decode_signed(
                    endianness.read_i32(&chunk[..4]),
                    endianness.read_i32(&chunk[4..]),
                ))
            })),
            TagCodec::Undefined | TagCodec::Unknown => Value::Undefined(bytes.to_vec()),
            TagCodec::Ascii => return Ok(read_ascii(tag, bytes)),
            TagCodec::ExifVersion => Value::Ascii(String::from_utf8_lossy(bytes).into_owned()),
            TagCodec::UserComment => read_user_comment(bytes, endianness),
            TagCodec::WindowsXp => Value::Ascii(read_windows_xp(bytes)),
        };
        Ok(value.into())
    }

    /// Convert `value` to the bytes and count this codec stores for `tag`.
    pub(crate) fn encode(
        &self,
        tag: Tag,
        value: &Value,
        endianness: Endianness,
    ) -> ExifResult<Encoded> {
        let elements = value.elements();
        let mut bytes = Vec::new();
        match self {
            TagCodec::Byte => {
                for element in elements {
                    bytes.push(integer::<u8>(tag, element)?);
                }
            }
            TagCodec::Short => {
                for element in elements {
                    bytes.extend_from_slice(&endianness.u16_bytes(integer(tag, element)?));
                }
            }
            TagCodec::SignedShort => {
                for element in elements {
                    bytes.extend_from_slice(&endianness.i16_bytes(integer(tag, element)?));
                }
            }
            TagCodec::Long => {
                for element in elements {
                    bytes.extend_from_slice(&endianness.u32_bytes(integer(tag, element)?));
                }
            }
            TagCodec::SignedLong => {
                for element in elements {
                    bytes.extend_from_slice(&endianness.i32_bytes(integer(tag, element)?));
                }
            }
            TagCodec::Rational => {
                for element in elements {
                    let (numerator, denominator) = real(tag, element)
                        .and_then(|val| {
                            rational::encode_unsigned(val)
                                .ok_or_else(|| invalid(tag, format!("{val} is not a RATIONAL")))
                        })?;
                    bytes.extend_from_slice(&endianness.u32_bytes(numerator));
                    bytes.extend_from_slice(&endianness.u32_bytes(denominator));
                }
            }
            TagCodec::SignedRational => {
                for element in elements {
                    let (numerator, denominator) = real(tag, element)
                        .and_then(|val| {
                            rational::encode_signed(val)
                                .ok_or_else(|| invalid(tag, format!("{val} is not an SRATIONAL")))
                        })?;
                    bytes.extend_from_slice(&endianness.i32_bytes(numerator));
                    bytes.extend_from_slice(&endianness.i32_bytes(denominator));
                }
            }
            TagCodec::Undefined => match value {
                Value::Undefined(raw) => bytes.extend_from_slice(raw),
                other => return Err(invalid(tag, format!("expected raw bytes, got {other:?}"))),
            },
            TagCodec::Ascii => {
                let text = text(tag, value)?;
                bytes.extend_from_slice(text.as_bytes());
                bytes.push(0);
            }
            TagCodec::UserComment => {
                let text = text(tag, value)?;
                if text.is_ascii() {
                    bytes.extend_from_slice(ASCII_CODE);
                    bytes.extend_from_slice(text.as_bytes());
                } else {
                    bytes.extend_from_slice(UNICODE_CODE);
                    for unit in text.encode_utf16() {
                        bytes.extend_from_slice(&endianness.u16_bytes(unit));
                    }
                }
            }
            TagCodec::ExifVersion => {
                return Err(ExifError::UnsupportedMutation {
                    tag,
                    reason: "version tags identify the format",
                })
            }
            TagCodec::WindowsXp => {
                return Err(ExifError::UnsupportedMutation {
                    tag,
                    reason: "Windows XP tags are read-only",
                })
            }
            TagCodec::Unknown => {
                return Err(ExifError::UnsupportedMutation {
                    tag,
                    reason: "field type is not interpreted",
                })
            }
        }

        let count = match self {
            TagCodec::Ascii | TagCodec::Undefined | TagCodec::UserComment => bytes.len(),
            _ => elements.len(),
        };
        let count = u32::try_from(count).map_err(|_| invalid(tag, "value is too large".into()))?;
        Ok(Encoded { count, bytes })
    }

    /// Rewrite the value in place.
    ///
    /// Strings and comments may shrink, and update the entry's count when they do. Every
    /// other type must keep its element count.
    pub fn modify(
        &self,
        handle: &TagHandle,
        buffer: &mut SegmentBuffer,
        endianness: Endianness,
        value: &Value,
    ) -> ExifResult<()> {
        let tag = handle.tag();
        if tag.is_structural_pointer() {
            return Err(ExifError::UnsupportedMutation {
                tag,
                reason: "value locates other data in the segment",
            });
        }
        let encoded = self.encode(tag, value, endianness)?;
        match self {
            TagCodec::Ascii => modify_ascii(handle, buffer, endianness, encoded),
            TagCodec::UserComment => {
                let available = handle.count() as usize;
                let required = encoded.bytes.len();
                if required > available {
                    return Err(ExifError::ValueTooLong {
                        tag,
                        required,
                        available,
                    });
                }
                let mut padded = encoded.bytes;
                padded.resize(available, 0);
                buffer.write(handle.value_offset(), &padded)?;
                buffer.write_u32(endianness, handle.entry_offset() + 4, encoded.count)
            }
            _ => {
                let available = handle.value_len().unwrap_or(0);
                let required = encoded.bytes.len();
                if required > available {
                    return Err(ExifError::ValueTooLong {
                        tag,
                        required,
                        available,
                    });
                }
                if encoded.count != handle.count() {
                    return Err(invalid(
                        tag,
                        format!("expected {} elements, got {}", handle.count(), encoded.count),
                    ));
                }
                buffer.write(handle.value_offset(), &encoded.bytes)
            }
        }
    }

    /// Zero the out-of-line bytes of the value. Inline values are left to the entry.
    ///
    /// Bytes inside `shared`, the spans other live entries still read, are kept.
    pub fn wipe(
        &self,
        handle: &TagHandle,
        buffer: &mut SegmentBuffer,
        shared: &[Range<usize>],
    ) -> ExifResult<()> {
        let span = match self {
            TagCodec::ExifVersion => None,
            _ => handle.out_of_line_span(),
        };
        let Some(span) = span else {
            return Ok(());
        };
        buffer.read(span.start, span.len())?;
        for run in unshared(&span, shared) {
            buffer.zero(run.start, run.len())?;
        }
        Ok(())
    }
}

/// The parts of `span` outside every range in `shared`.
fn unshared(span: &Range<usize>, shared: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut cuts: Vec<&Range<usize>> = shared
        .iter()
        .filter(|cut| cut.start < span.end && span.start < cut.end)
        .collect();
    cuts.sort_by_key(|cut| cut.start);

    let mut runs = Vec::new();
    let mut start = span.start;
    for cut in cuts {
        if cut.start > start {
            runs.push(start..cut.start);
        }
        start = start.max(cut.end);
    }
    if start < span.end {
        runs.push(start..span.end);
    }
    runs
}

fn value_bytes<'a>(handle: &TagHandle, buffer: &'a SegmentBuffer) -> ExifResult<&'a [u8]> {
    let len = handle.value_len().ok_or(ExifError::UnknownFieldType {
        tag: handle.tag(),
        type_code: handle.type_code(),
    })?;
    buffer.read(handle.value_offset(), len)
}

fn collect(values: impl Iterator<Item = Value>) -> Value {
    let mut values: Vec<Value> = values.collect();
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::List(values)
    }
}

/// The named variant of `raw` when the tag has one, else `fallback`.
fn named_or(tag: Tag, raw: u16, fallback: Value) -> Value {
    match Enumerated::decode(tag, raw) {
        Some(named) => Value::Enumerated(named),
        None => {
            if Enumerated::is_enumerated(tag) {
                log::debug!("{tag:?} has no named value for {raw}");
            }
            fallback
        }
    }
}

fn read_ascii(tag: Tag, bytes: &[u8]) -> Decoded {
    let run = bytes.split(|byte| *byte == 0).next().unwrap_or(&[]);
    let declared = bytes.len().saturating_sub(1);
    let warning = (run.len() < declared).then_some(ExifWarning::ShortAsciiRun {
        tag,
        declared,
        actual: run.len(),
    });
    Decoded {
        value: Value::Ascii(String::from_utf8_lossy(run).into_owned()),
        warning,
    }
}

/// JIS text is returned as the raw bytes after the character code.
fn read_user_comment(bytes: &[u8], endianness: Endianness) -> Value {
    let split = CHARACTER_CODE_LEN.min(bytes.len());
    let (code, text) = bytes.split_at(split);
    match code {
        code if code == UNICODE_CODE => {
            let units: Vec<u16> = text
                .chunks_exact(2)
                .map(|chunk| endianness.read_u16(chunk))
                .take_while(|unit| *unit != 0)
                .collect();
            Value::Ascii(String::from_utf16_lossy(&units))
        }
        code if code == JIS_CODE => Value::Undefined(text.to_vec()),
        _ => {
            let run = text.split(|byte| *byte == 0).next().unwrap_or(&[]);
            Value::Ascii(String::from_utf8_lossy(run).into_owned())
        }
    }
}

fn read_windows_xp(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .take_while(|unit| *unit != 0);
    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

fn modify_ascii(
    handle: &TagHandle,
    buffer: &mut SegmentBuffer,
    endianness: Endianness,
    encoded: Encoded,
) -> ExifResult<()> {
    let tag = handle.tag();
    let available = if handle.is_inline() {
        4
    } else {
        handle.count() as usize
    };
    let required = encoded.bytes.len();
    if required > available {
        return Err(ExifError::ValueTooLong {
            tag,
            required,
            available,
        });
    }

    match handle.out_of_line_span() {
        Some(span) if required > 4 => {
            let mut padded = encoded.bytes;
            padded.resize(span.len(), 0);
            buffer.write(span.start, &padded)?;
        }
        span => {
            // The count decides the placement, so a string shrinking to 4 bytes moves inline.
            if let Some(span) = span {
                buffer.zero(span.start, span.len())?;
            }
            let mut field = [0; 4];
            field[..required].copy_from_slice(&encoded.bytes);
            buffer.write(handle.entry_offset() + 8, &field)?;
        }
    }
    buffer.write_u32(endianness, handle.entry_offset() + 4, encoded.count)
}

fn invalid(tag: Tag, reason: String) -> ExifError {
    ExifError::InvalidValue { tag, reason }
}

fn integer<T: TryFrom<i64>>(tag: Tag, value: &Value) -> ExifResult<T> {
    if let Value::Enumerated(named) = value {
        if named.tag() != tag {
            return Err(invalid(
                tag,
                format!("{named:?} belongs to {:?}", named.tag()),
            ));
        }
    }
    let raw = value
        .as_i64()
        .ok_or_else(|| invalid(tag, format!("expected an integer, got {value:?}")))?;
    T::try_from(raw).map_err(|_| invalid(tag, format!("{raw} is out of range")))
}

fn real(tag: Tag, value: &Value) -> ExifResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| invalid(tag, format!("expected a number, got {value:?}")))
}

fn text<'a>(tag: Tag, value: &'a Value) -> ExifResult<&'a str> {
    let text = value
        .as_str()
        .ok_or_else(|| invalid(tag, format!("expected text, got {value:?}")))?;
    if text.contains('\0') {
        return Err(invalid(tag, "text contains a null character".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ifd::{IfdEntry, IfdKind};
    use crate::tiff::enums::Orientation;

    const BE: Endianness = Endianness::BigEndian;
    const LE: Endianness = Endianness::LittleEndian;

    /// A buffer with one entry at offset 0 and a value area starting at offset 12.
    fn fixture(
        tag: Tag,
        field_type: Type,
        count: u32,
        value_field: [u8; 4],
        data: &[u8],
        endianness: Endianness,
    ) -> (TagHandle, SegmentBuffer) {
        let entry = IfdEntry {
            tag: tag.to_u16(),
            type_code: field_type.into(),
            count,
            value_field,
        };
        let mut bytes = entry.encode(endianness).to_vec();
        bytes.extend_from_slice(data);
        let handle = TagHandle::new(IfdKind::PRIMARY, 0, entry, endianness);
        (handle, SegmentBuffer::new(bytes))
    }

    fn read(handle: &TagHandle, buffer: &SegmentBuffer, endianness: Endianness) -> Decoded {
        handle.codec.read(handle, buffer, endianness).unwrap()
    }

    #[test]
    fn dispatch() {
        assert_eq!(TagCodec::for_entry(0x9C9B, Some(Type::BYTE)), TagCodec::WindowsXp);
        assert_eq!(TagCodec::for_entry(36864, Some(Type::UNDEFINED)), TagCodec::ExifVersion);
        assert_eq!(TagCodec::for_entry(40960, Some(Type::UNDEFINED)), TagCodec::ExifVersion);
        assert_eq!(TagCodec::for_entry(37510, Some(Type::UNDEFINED)), TagCodec::UserComment);
        assert_eq!(TagCodec::for_entry(274, Some(Type::SHORT)), TagCodec::Short);
        assert_eq!(TagCodec::for_entry(0xC4A5, Some(Type::UNDEFINED)), TagCodec::Undefined);
        assert_eq!(TagCodec::for_entry(1, Some(Type::DOUBLE)), TagCodec::Unknown);
        assert_eq!(TagCodec::for_entry(1, None), TagCodec::Unknown);
    }

    #[test]
    #[rustfmt::skip]
    fn inline_numbers() {
        let cases = [
            (Tag::Orientation,  Type::SHORT,  1, [0, 6, 0, 0],       BE, Value::from(Orientation::RightTop)),
            (Tag::Orientation,  Type::SHORT,  1, [6, 0, 0, 0],       LE, Value::from(Orientation::RightTop)),
            (Tag::Orientation,  Type::SHORT,  1, [0, 42, 0, 0],      BE, Value::Short(42)),
            (Tag::Flash,        Type::SHORT,  1, [0, 0x19, 0, 0],    BE, Value::Short(0x19)),
            (Tag::SubjectArea,  Type::SHORT,  2, [0, 1, 0, 2],       BE, Value::List(vec![Value::Short(1), Value::Short(2)])),
            (Tag::GpsVersionId, Type::BYTE,   4, [2, 3, 0, 0],       BE, Value::List(vec![Value::Byte(2), Value::Byte(3), Value::Byte(0), Value::Byte(0)])),
            (Tag::ImageWidth,   Type::LONG,   1, [0, 0, 0x0A, 0],    BE, Value::Unsigned(2560)),
            (Tag::ImageWidth,   Type::LONG,   1, [0, 0x0A, 0, 0],    LE, Value::Unsigned(2560)),
            (Tag::Unknown(0xC000), Type::SLONG,  1, [0xFF, 0xFF, 0xFF, 0xFE], BE, Value::Signed(-2)),
            (Tag::Unknown(0xC000), Type::SSHORT, 1, [0xFE, 0xFF, 0, 0], LE, Value::SignedShort(-2)),
        ];
        for (tag, field_type, count, value_field, endianness, expected) in cases {
            let (handle, buffer) = fixture(tag, field_type, count, value_field, &[], endianness);
            assert_eq!(read(&handle, &buffer, endianness).value, expected, "{tag:?}");
        }
    }

    #[test]
    fn out_of_line_rationals() {
        let data = [0, 0, 0, 41, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0F, 0xA0, 0, 0, 0, 100];
        let (handle, buffer) = fixture(Tag::GpsLatitude, Type::RATIONAL, 3, [0, 0, 0, 12], &data, BE);
        assert_eq!(
            read(&handle, &buffer, BE).value,
            Value::List(vec![Value::Rational(41.0), Value::Rational(0.0), Value::Rational(40.0)])
        );

        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 3];
        let (handle, buffer) =
            fixture(Tag::ExposureBiasValue, Type::SRATIONAL, 1, [0, 0, 0, 12], &data, BE);
        assert_eq!(read(&handle, &buffer, BE).value, Value::SRational(-1.0 / 3.0));
    }

    #[test]
    fn zero_rational_writes_sentinel() {
        let data = [0, 0, 0, 7, 0, 0, 0, 2];
        let (handle, mut buffer) =
            fixture(Tag::GpsAltitude, Type::RATIONAL, 1, [0, 0, 0, 12], &data, BE);
        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::Rational(0.0))
            .unwrap();
        assert_eq!(buffer.read(12, 8).unwrap(), &[0; 8]);
        assert_eq!(read(&handle, &buffer, BE).value, Value::Rational(0.0));

        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::Rational(2.5))
            .unwrap();
        assert_eq!(buffer.read(12, 8).unwrap(), &[0, 0, 0, 5, 0, 0, 0, 2]);
    }

    #[test]
    fn ascii_placement() {
        let (handle, buffer) = fixture(Tag::Make, Type::ASCII, 4, *b"ABC\0", &[], BE);
        assert!(handle.is_inline());
        assert_eq!(read(&handle, &buffer, BE), Value::Ascii("ABC".into()).into());

        let (handle, buffer) = fixture(Tag::Make, Type::ASCII, 5, [0, 0, 0, 12], b"ABCD\0", BE);
        assert!(!handle.is_inline());
        assert_eq!(read(&handle, &buffer, BE), Value::Ascii("ABCD".into()).into());
    }

    #[test]
    fn short_ascii_run_warns() {
        let (handle, buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 12], b"MyCam\0\0\0\0", BE);
        let decoded = read(&handle, &buffer, BE);
        assert_eq!(decoded.value, Value::Ascii("MyCam".into()));
        assert_eq!(
            decoded.warning,
            Some(ExifWarning::ShortAsciiRun {
                tag: Tag::Model,
                declared: 8,
                actual: 5
            })
        );
    }

    #[test]
    fn ascii_shrinks_in_place() {
        let (handle, mut buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 12], b"MyCamera\0", BE);
        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("MyCam"))
            .unwrap();
        assert_eq!(buffer.read(12, 9).unwrap(), b"MyCam\0\0\0\0");
        assert_eq!(buffer.read_u32(BE, 4).unwrap(), 6);
        assert_eq!(buffer.read(8, 4).unwrap(), &[0, 0, 0, 12]);

        let err = handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("MyCamera2"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExifError::ValueTooLong {
                required: 10,
                available: 9,
                ..
            }
        ));
    }

    #[test]
    fn ascii_moves_inline_when_short_enough() {
        let (handle, mut buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [12, 0, 0, 0], b"MyCamera\0", LE);
        handle
            .codec
            .modify(&handle, &mut buffer, LE, &Value::from("ab"))
            .unwrap();
        assert_eq!(buffer.read(8, 4).unwrap(), b"ab\0\0");
        assert_eq!(buffer.read(12, 9).unwrap(), &[0; 9]);
        assert_eq!(buffer.read_u32(LE, 4).unwrap(), 3);
    }

    #[test]
    fn inline_ascii_has_four_bytes() {
        let (handle, mut buffer) = fixture(Tag::GpsLatitudeRef, Type::ASCII, 2, *b"N\0\0\0", &[], BE);
        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("abc"))
            .unwrap();
        assert_eq!(buffer.read(8, 4).unwrap(), b"abc\0");
        assert!(handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("abcd"))
            .is_err());
    }

    #[test]
    fn numbers_keep_their_count() {
        let (handle, mut buffer) = fixture(Tag::Orientation, Type::SHORT, 1, [0, 1, 0, 0], &[], BE);
        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from(Orientation::BottomRight))
            .unwrap();
        assert_eq!(buffer.read(8, 4).unwrap(), &[0, 3, 0, 0]);

        let err = handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from(vec![1u16, 2]))
            .unwrap_err();
        assert!(matches!(err, ExifError::ValueTooLong { .. }));
        let err = handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::Unsigned(70_000))
            .unwrap_err();
        assert!(matches!(err, ExifError::InvalidValue { .. }));
        let err = handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from(crate::tiff::enums::ColorSpace::Srgb))
            .unwrap_err();
        assert!(matches!(err, ExifError::InvalidValue { .. }));
    }

    #[test]
    fn long_rewrites_in_place() {
        let (handle, mut buffer) =
            fixture(Tag::PixelXDimension, Type::LONG, 1, [0, 0, 0, 1], &[], LE);
        handle
            .codec
            .modify(&handle, &mut buffer, LE, &Value::Unsigned(4032))
            .unwrap();
        assert_eq!(read(&handle, &buffer, LE).value, Value::Unsigned(4032));
    }

    #[test]
    fn pointers_are_not_writable() {
        let (handle, mut buffer) =
            fixture(Tag::ExifIfdPointer, Type::LONG, 1, [0, 0, 0, 26], &[], BE);
        assert!(matches!(
            handle.codec.modify(&handle, &mut buffer, BE, &Value::Unsigned(40)),
            Err(ExifError::UnsupportedMutation { .. })
        ));
    }

    #[test]
    fn version_tags() {
        let (handle, mut buffer) =
            fixture(Tag::ExifVersion, Type::UNDEFINED, 4, *b"0230", &[], BE);
        assert_eq!(read(&handle, &buffer, BE).value, Value::Ascii("0230".into()));
        assert!(matches!(
            handle.codec.modify(&handle, &mut buffer, BE, &Value::from("0231")),
            Err(ExifError::UnsupportedMutation { .. })
        ));
        handle.codec.wipe(&handle, &mut buffer, &[]).unwrap();
        assert_eq!(buffer.read(8, 4).unwrap(), b"0230");
    }

    #[test]
    fn user_comment() {
        let mut data = b"ASCII\0\0\0Hello".to_vec();
        data.extend_from_slice(&[0; 3]);
        let (handle, mut buffer) =
            fixture(Tag::UserComment, Type::UNDEFINED, 16, [0, 0, 0, 12], &data, BE);
        assert_eq!(read(&handle, &buffer, BE).value, Value::Ascii("Hello".into()));

        handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("Hi"))
            .unwrap();
        assert_eq!(buffer.read(12, 16).unwrap(), b"ASCII\0\0\0Hi\0\0\0\0\0\0");
        assert_eq!(buffer.read_u32(BE, 4).unwrap(), 10);

        let err = handle
            .codec
            .modify(&handle, &mut buffer, BE, &Value::from("Far too long"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExifError::ValueTooLong {
                required: 20,
                available: 16,
                ..
            }
        ));
    }

    #[test]
    fn unicode_user_comment() {
        let mut data = b"UNICODE\0".to_vec();
        data.extend_from_slice(&[0x00, 0xE9, 0x00, 0x74, 0x00, 0xE9, 0, 0]);
        let (handle, buffer) =
            fixture(Tag::UserComment, Type::UNDEFINED, 16, [0, 0, 0, 12], &data, BE);
        assert_eq!(read(&handle, &buffer, BE).value, Value::Ascii("été".into()));

        let encoded = TagCodec::UserComment
            .encode(Tag::UserComment, &Value::from("été"), LE)
            .unwrap();
        assert_eq!(&encoded.bytes[..8], b"UNICODE\0");
        assert_eq!(&encoded.bytes[8..], &[0xE9, 0x00, 0x74, 0x00, 0xE9, 0x00]);
        assert_eq!(encoded.count, 14);
    }

    #[test]
    fn jis_and_undefined_user_comments() {
        let mut data = b"JIS\0\0\0\0\0".to_vec();
        data.extend_from_slice(&[0x46, 0x7C, 0x4B, 0x5C]);
        let (handle, buffer) =
            fixture(Tag::UserComment, Type::UNDEFINED, 12, [0, 0, 0, 12], &data, BE);
        assert_eq!(
            read(&handle, &buffer, BE).value,
            Value::Undefined(vec![0x46, 0x7C, 0x4B, 0x5C])
        );

        let mut data = vec![0; 8];
        data.extend_from_slice(b"plain\0");
        let (handle, buffer) =
            fixture(Tag::UserComment, Type::UNDEFINED, 14, [12, 0, 0, 0], &data, LE);
        assert_eq!(read(&handle, &buffer, LE).value, Value::Ascii("plain".into()));
    }

    #[test]
    fn windows_xp_text() {
        let data = [b'J', 0, b'o', 0, b'e', 0, 0, 0];
        let (handle, mut buffer) = fixture(Tag::XpAuthor, Type::BYTE, 8, [12, 0, 0, 0], &data, LE);
        assert_eq!(read(&handle, &buffer, LE).value, Value::Ascii("Joe".into()));
        assert!(matches!(
            handle.codec.modify(&handle, &mut buffer, LE, &Value::from("Ann")),
            Err(ExifError::UnsupportedMutation { .. })
        ));
    }

    #[test]
    fn wipe_zeroes_out_of_line_bytes() {
        let (handle, mut buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 12], b"MyCamera\0", BE);
        handle.codec.wipe(&handle, &mut buffer, &[]).unwrap();
        assert_eq!(buffer.read(12, 9).unwrap(), &[0; 9]);

        let (handle, mut buffer) = fixture(Tag::Orientation, Type::SHORT, 1, [0, 1, 0, 0], &[], BE);
        handle.codec.wipe(&handle, &mut buffer, &[]).unwrap();
        assert_eq!(buffer.read(8, 4).unwrap(), &[0, 1, 0, 0]);
    }

    #[test]
    fn wipe_keeps_shared_bytes() {
        let (handle, mut buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 12], b"MyCamera\0", BE);
        handle
            .codec
            .wipe(&handle, &mut buffer, &[14..16, 19..30])
            .unwrap();
        assert_eq!(buffer.read(12, 9).unwrap(), b"\0\0Ca\0\0\0a\0");

        let (handle, mut buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 12], b"MyCamera\0", BE);
        handle.codec.wipe(&handle, &mut buffer, &[0..40]).unwrap();
        assert_eq!(buffer.read(12, 9).unwrap(), b"MyCamera\0");
    }

    #[test]
    fn unshared_runs() {
        assert_eq!(unshared(&(10..20), &[]), vec![10..20]);
        assert_eq!(unshared(&(10..20), &[15..17, 8..12]), vec![12..15, 17..20]);
        assert_eq!(unshared(&(10..20), &[10..20]), vec![]);
        assert_eq!(unshared(&(10..20), &[0..5, 20..30]), vec![10..20]);
    }

    #[test]
    fn value_past_the_end() {
        let (handle, buffer) =
            fixture(Tag::Model, Type::ASCII, 9, [0, 0, 0, 0x40], b"MyCamera\0", BE);
        assert!(matches!(
            handle.codec.read(&handle, &buffer, BE),
            Err(ExifError::OutOfBounds { .. })
        ));
    }
}
