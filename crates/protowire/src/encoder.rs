//! Message serializer.
//!
//! Walks the schema's field table in ascending tag order, reads the
//! current value of each field, applies the omit-if-default rule, and
//! delegates to the matching [`FieldWriter`] primitive. Message and
//! repeated-message fields recurse depth-first: the child is serialized to
//! a temporary buffer and then written length-prefixed. Output is
//! deterministic for identical field contents and insertion order.

use crate::message::{MessageInstance, ScalarValue};
use crate::schema::{FieldKind, ScalarType};
use crate::writer::FieldWriter;

/// Serializes [`MessageInstance`] trees to wire bytes.
pub struct MessageEncoder {
    pub writer: FieldWriter,
}

impl Default for MessageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageEncoder {
    pub fn new() -> Self {
        Self {
            writer: FieldWriter::new(),
        }
    }

    /// Encodes a message and returns the wire bytes.
    pub fn encode(&mut self, msg: &MessageInstance) -> Vec<u8> {
        self.writer.writer.reset();
        self.write_fields(msg);
        self.writer.writer.flush()
    }

    fn write_fields(&mut self, msg: &MessageInstance) {
        for spec in msg.schema().fields {
            let tag = spec.tag;
            match spec.kind {
                FieldKind::Scalar(ScalarType::Str) => {
                    self.writer.write_string_field(tag, msg.get_str(tag));
                }
                FieldKind::Scalar(ScalarType::Int32) => {
                    self.writer.write_int32_field(tag, msg.get_i32(tag));
                }
                FieldKind::Scalar(ScalarType::Int64) => {
                    self.writer.write_int64_field(tag, msg.get_i64(tag));
                }
                FieldKind::Scalar(ScalarType::Bool) => {
                    self.writer.write_bool_field(tag, msg.get_bool(tag));
                }
                FieldKind::Scalar(ScalarType::Float) => {
                    self.writer.write_float_field(tag, msg.get_f32(tag));
                }
                FieldKind::Message(_) => {
                    if let Some(child) = msg.get_message(tag) {
                        let payload = encode_nested(child);
                        self.writer.write_message_field(tag, &payload);
                    }
                }
                FieldKind::RepeatedScalar(_) => {
                    for value in msg.repeated_scalars(tag) {
                        self.write_element(tag, value);
                    }
                }
                FieldKind::RepeatedMessage(_) => {
                    for child in msg.repeated_messages(tag) {
                        let payload = encode_nested(child);
                        self.writer.write_message_field(tag, &payload);
                    }
                }
            }
        }
    }

    fn write_element(&mut self, tag: u32, value: &ScalarValue) {
        match value {
            ScalarValue::Str(s) => self.writer.write_string_element(tag, s),
            ScalarValue::Int32(n) => self.writer.write_varint_element(tag, *n as i64 as u64),
            ScalarValue::Int64(n) => self.writer.write_varint_element(tag, *n as u64),
            ScalarValue::Bool(b) => self.writer.write_varint_element(tag, *b as u64),
            ScalarValue::Float(f) => self.writer.write_float_element(tag, *f),
        }
    }
}

fn encode_nested(msg: &MessageInstance) -> Vec<u8> {
    MessageEncoder::new().encode(msg)
}
