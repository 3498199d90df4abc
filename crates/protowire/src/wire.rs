//! Wire types and tag packing.
//!
//! Every encoded field starts with a tag: a varint of
//! `(field_number << 3) | wire_type`. The wire type tells a decoder how to
//! consume the bytes that follow, whether or not it knows the field.

use std::fmt;

use crate::error::DecodeError;

/// Largest valid protobuf field number (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How the bytes following a tag are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Unsigned LEB128 of the value's bit pattern (int32/int64/bool).
    Varint = 0,
    /// 8 bytes little-endian.
    Fixed64 = 1,
    /// Varint length prefix + exactly that many bytes (strings, embedded
    /// messages, each element of an unpacked repeated field).
    LengthDelimited = 2,
    /// 4 bytes little-endian (IEEE-754 single precision for `float`).
    Fixed32 = 5,
}

impl WireType {
    /// Decodes the low three bits of a tag.
    pub fn from_tag_bits(bits: u8) -> Result<WireType, DecodeError> {
        match bits {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            other => Err(DecodeError::UnsupportedWireType(other)),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::Fixed32 => "fixed32",
        };
        write!(f, "{name}")
    }
}

/// Packs a field number and wire type into a tag value.
pub const fn pack_tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | wire_type as u64
}

/// Splits a decoded tag varint into `(field_number, wire_type)`.
///
/// Field number zero and field numbers above [`MAX_FIELD_NUMBER`] cannot
/// appear in a well-formed stream; both mean the tag run is corrupt.
pub fn unpack_tag(tag: u64) -> Result<(u32, WireType), DecodeError> {
    let wire_type = WireType::from_tag_bits((tag & 0x07) as u8)?;
    let field_number = tag >> 3;
    if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
        return Err(DecodeError::MalformedVarint);
    }
    Ok((field_number as u32, wire_type))
}
