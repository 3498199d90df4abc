//! Per-field wire writer.
//!
//! Sits on top of [`Writer`] and emits `(tag, payload)` pairs. Singular
//! scalar writes omit the field entirely when the value equals its type
//! default (the decoder reconstructs the default from absence). Repeated
//! element writes always emit, because a default-valued element of a
//! sequence is real data. Message fields always emit once present, even
//! when the child payload is zero bytes; presence, not content, controls
//! emission there.

use protowire_buffers::Writer;

use crate::varint::{varint_len, write_varint, MAX_VARINT_LEN};
use crate::wire::{pack_tag, WireType};

/// Wire-format field writer. Single-use per serialize call: the owner
/// resets and flushes the inner [`Writer`] around each message.
pub struct FieldWriter {
    pub writer: Writer,
}

impl Default for FieldWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Writes the tag varint for `(field_number, wire_type)`.
    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        write_varint(&mut self.writer, pack_tag(field_number, wire_type));
    }

    // ---------------------------------------------------------------- singular

    /// Varint field from the raw bit pattern; omitted when zero.
    pub fn write_varint_field(&mut self, field_number: u32, value: u64) {
        if value == 0 {
            return;
        }
        self.write_tag(field_number, WireType::Varint);
        write_varint(&mut self.writer, value);
    }

    /// `int32` field; negative values sign-extend to the full 10-byte
    /// varint, as proto3 does.
    pub fn write_int32_field(&mut self, field_number: u32, value: i32) {
        self.write_varint_field(field_number, value as i64 as u64);
    }

    /// `int64` field; omitted when zero.
    pub fn write_int64_field(&mut self, field_number: u32, value: i64) {
        self.write_varint_field(field_number, value as u64);
    }

    /// `bool` field; omitted when false.
    pub fn write_bool_field(&mut self, field_number: u32, value: bool) {
        if value {
            self.write_tag(field_number, WireType::Varint);
            write_varint(&mut self.writer, 1);
        }
    }

    /// UTF-8 string field; omitted when empty.
    pub fn write_string_field(&mut self, field_number: u32, value: &str) {
        if value.is_empty() {
            return;
        }
        self.write_string_element(field_number, value);
    }

    /// `float` field (fixed32); omitted when zero.
    pub fn write_float_field(&mut self, field_number: u32, value: f32) {
        if value == 0.0 {
            return;
        }
        self.write_float_element(field_number, value);
    }

    /// `fixed64` field from the raw bit pattern; omitted when zero.
    pub fn write_fixed64_field(&mut self, field_number: u32, value: u64) {
        if value == 0 {
            return;
        }
        self.write_tag(field_number, WireType::Fixed64);
        self.writer.u64_le(value);
    }

    /// `double` field (fixed64); omitted when zero.
    pub fn write_double_field(&mut self, field_number: u32, value: f64) {
        if value != 0.0 {
            self.write_fixed64_field(field_number, value.to_bits());
        }
    }

    /// Embedded message field: `(tag, varint(len), payload)`. Always
    /// emitted, even for a zero-byte payload.
    pub fn write_message_field(&mut self, field_number: u32, payload: &[u8]) {
        self.write_tag(field_number, WireType::LengthDelimited);
        write_varint(&mut self.writer, payload.len() as u64);
        self.writer.buf(payload);
    }

    // ---------------------------------------------------------------- elements

    /// One element of a repeated varint field; always emitted.
    pub fn write_varint_element(&mut self, field_number: u32, value: u64) {
        self.write_tag(field_number, WireType::Varint);
        write_varint(&mut self.writer, value);
    }

    /// One element of a repeated string field; always emitted.
    pub fn write_string_element(&mut self, field_number: u32, value: &str) {
        let bytes = value.as_bytes();
        self.write_tag(field_number, WireType::LengthDelimited);
        self.writer
            .ensure_capacity(MAX_VARINT_LEN + bytes.len());
        write_varint(&mut self.writer, bytes.len() as u64);
        self.writer.buf(bytes);
    }

    /// One element of a repeated float field; always emitted.
    pub fn write_float_element(&mut self, field_number: u32, value: f32) {
        let tag = pack_tag(field_number, WireType::Fixed32);
        if tag < 0x80 {
            // Single-byte tag: fused write.
            self.writer.u8u32(tag as u8, value.to_bits());
        } else {
            self.write_tag(field_number, WireType::Fixed32);
            self.writer.f32_le(value);
        }
    }

    /// Bytes this writer would spend on a `(tag, len, payload)` triple.
    pub fn message_field_len(field_number: u32, payload_len: usize) -> usize {
        varint_len(pack_tag(field_number, WireType::LengthDelimited))
            + varint_len(payload_len as u64)
            + payload_len
    }
}
