//! Decode error type.

use thiserror::Error;

use crate::wire::WireType;

/// Error type for wire decoding operations.
///
/// Any of these aborts the whole message decode; no partial message is
/// ever returned. An unknown field tag is not an error (unknown fields are
/// skipped for forward compatibility).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A varint did not terminate within 10 bytes, ran past the end of the
    /// buffer, or encoded an invalid tag.
    #[error("malformed varint")]
    MalformedVarint,
    /// A declared length or fixed-width value exceeds the remaining bytes.
    #[error("truncated input")]
    Truncated,
    /// The wire type of a known field does not match its declared kind.
    #[error("wire type mismatch for field {field_number}: expected {expected}, got {actual}")]
    WireTypeMismatch {
        field_number: u32,
        expected: WireType,
        actual: WireType,
    },
    /// A tag carries a wire type this codec does not speak (the deprecated
    /// group types 3/4, or the reserved 6/7). Skipping such a field is
    /// impossible without desynchronizing the stream.
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),
}
