//! Static message schemas.
//!
//! A [`Schema`] is an ordered field table: one [`FieldSpec`] per field,
//! sorted by ascending tag. Schemas are `const`-constructible so the whole
//! schema set lives in statics, and message-typed fields reference their
//! child schema directly via `&'static Schema`. This replaces the dynamic
//! tag→descriptor reflection of runtime-typed codecs with tables the
//! compiler checks.

use crate::wire::WireType;

/// The scalar value types a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Str,
    Int32,
    Int64,
    Bool,
    Float,
}

impl ScalarType {
    /// The wire type this scalar is encoded with.
    pub const fn wire_type(self) -> WireType {
        match self {
            ScalarType::Str => WireType::LengthDelimited,
            ScalarType::Int32 | ScalarType::Int64 | ScalarType::Bool => WireType::Varint,
            ScalarType::Float => WireType::Fixed32,
        }
    }
}

/// The declared kind of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Singular scalar; absence reads as the proto3 zero default.
    Scalar(ScalarType),
    /// Optional embedded message; presence tracked by assignment.
    Message(&'static Schema),
    /// Repeated scalar, unpacked encoding, order-significant.
    RepeatedScalar(ScalarType),
    /// Repeated embedded message, order-significant.
    RepeatedMessage(&'static Schema),
}

impl FieldKind {
    /// The wire type of this field (per element, for repeated kinds).
    pub const fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Scalar(t) | FieldKind::RepeatedScalar(t) => t.wire_type(),
            FieldKind::Message(_) | FieldKind::RepeatedMessage(_) => WireType::LengthDelimited,
        }
    }
}

/// One field of a message schema.
#[derive(Debug)]
pub struct FieldSpec {
    /// Positive tag, unique within the schema.
    pub tag: u32,
    /// Field name, used by the object projection.
    pub name: &'static str,
    pub kind: FieldKind,
}

/// An ordered field table for one message type.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    /// Fields sorted by ascending tag.
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Looks up a field by tag (decode dispatch).
    pub fn field(&self, tag: u32) -> Option<&'static FieldSpec> {
        debug_assert!(
            self.fields.windows(2).all(|w| w[0].tag < w[1].tag),
            "schema {} field tags must be unique and ascending",
            self.name
        );
        self.fields
            .binary_search_by_key(&tag, |spec| spec.tag)
            .ok()
            .map(|i| &self.fields[i])
    }

    /// True when both references point at the same static schema.
    pub fn same_as(&'static self, other: &'static Schema) -> bool {
        std::ptr::eq(self, other)
    }
}
