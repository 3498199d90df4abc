//! Per-field wire reader.
//!
//! Drives a tag-dispatch loop over a borrowed buffer: `next_field()`
//! advances past one tag run and exposes `(field_number, wire_type)`;
//! typed reads then consume the payload, validating that the wire type on
//! the buffer matches what the caller's schema expects. `skip_field()`
//! discards the current payload without materializing a value, which is
//! what keeps unknown tags forward-compatible.

use protowire_buffers::Reader;

use crate::error::DecodeError;
use crate::varint::read_varint;
use crate::wire::{unpack_tag, WireType};

/// Wire-format field reader over a borrowed byte slice.
pub struct FieldReader<'a> {
    pub reader: Reader<'a>,
    field_number: u32,
    wire_type: WireType,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            field_number: 0,
            wire_type: WireType::Varint,
        }
    }

    /// Advances past one tag run. Returns `false` at end of buffer.
    pub fn next_field(&mut self) -> Result<bool, DecodeError> {
        if self.reader.size() == 0 {
            return Ok(false);
        }
        let tag = read_varint(&mut self.reader)?;
        let (field_number, wire_type) = unpack_tag(tag)?;
        self.field_number = field_number;
        self.wire_type = wire_type;
        Ok(true)
    }

    /// Field number of the just-read tag.
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Wire type of the just-read tag.
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Group wire types do not exist in proto3; kept as a compatibility
    /// hook for callers ported from proto2-shaped read loops.
    pub fn is_end_group(&self) -> bool {
        false
    }

    fn expect(&self, expected: WireType) -> Result<(), DecodeError> {
        if self.wire_type == expected {
            Ok(())
        } else {
            Err(DecodeError::WireTypeMismatch {
                field_number: self.field_number,
                expected,
                actual: self.wire_type,
            })
        }
    }

    fn need(&self, size: usize) -> Result<(), DecodeError> {
        if self.reader.size() < size {
            Err(DecodeError::Truncated)
        } else {
            Ok(())
        }
    }

    // ---------------------------------------------------------------- typed reads

    /// Raw varint payload.
    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        self.expect(WireType::Varint)?;
        read_varint(&mut self.reader)
    }

    /// `int32`: the low 32 bits of the sign-extended varint.
    pub fn read_int32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_varint()? as i32)
    }

    /// `int64`: the varint reinterpreted as two's complement.
    pub fn read_int64(&mut self) -> Result<i64, DecodeError> {
        Ok(self.read_varint()? as i64)
    }

    /// `bool`: any non-zero varint reads as true.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_varint()? != 0)
    }

    /// `float` (fixed32, little-endian).
    pub fn read_float(&mut self) -> Result<f32, DecodeError> {
        self.expect(WireType::Fixed32)?;
        self.need(4)?;
        Ok(self.reader.f32_le())
    }

    /// `fixed64` raw bits (little-endian).
    pub fn read_fixed64(&mut self) -> Result<u64, DecodeError> {
        self.expect(WireType::Fixed64)?;
        self.need(8)?;
        Ok(self.reader.u64_le())
    }

    /// `double` (fixed64, little-endian).
    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_fixed64()?))
    }

    /// Length-delimited payload: the declared-length slice of the buffer.
    /// The returned slice is exactly `[cursor, cursor + len)`, so a
    /// recursive sub-decode cannot consume bytes belonging to the outer
    /// message.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        self.expect(WireType::LengthDelimited)?;
        let len = read_varint(&mut self.reader)?;
        if len > self.reader.size() as u64 {
            return Err(DecodeError::Truncated);
        }
        Ok(self.reader.buf(len as usize))
    }

    /// UTF-8 string payload. Invalid sequences decode lossily, matching
    /// the text-decoder behavior of the JS peers this wire format talks to.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        Ok(String::from_utf8_lossy(self.read_bytes()?).into_owned())
    }

    // ---------------------------------------------------------------- skipping

    /// Consumes and discards the current field's payload. For
    /// length-delimited fields the length prefix is read first; skipping
    /// it blind would desynchronize the entire remaining stream.
    pub fn skip_field(&mut self) -> Result<(), DecodeError> {
        match self.wire_type {
            WireType::Varint => {
                read_varint(&mut self.reader)?;
            }
            WireType::Fixed64 => {
                self.need(8)?;
                self.reader.skip(8);
            }
            WireType::LengthDelimited => {
                let len = read_varint(&mut self.reader)?;
                if len > self.reader.size() as u64 {
                    return Err(DecodeError::Truncated);
                }
                self.reader.skip(len as usize);
            }
            WireType::Fixed32 => {
                self.need(4)?;
                self.reader.skip(4);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::FieldWriter;

    #[test]
    fn tag_loop_over_mixed_fields() {
        let mut w = FieldWriter::new();
        w.write_string_field(1, "example.com");
        w.write_int32_field(2, 87);
        w.write_float_field(4, 2.5);
        let data = w.writer.flush();

        let mut r = FieldReader::new(&data);

        assert!(r.next_field().unwrap());
        assert_eq!(r.field_number(), 1);
        assert_eq!(r.wire_type(), WireType::LengthDelimited);
        assert!(!r.is_end_group());
        assert_eq!(r.read_string().unwrap(), "example.com");

        assert!(r.next_field().unwrap());
        assert_eq!(r.field_number(), 2);
        assert_eq!(r.read_int32().unwrap(), 87);

        assert!(r.next_field().unwrap());
        assert_eq!(r.field_number(), 4);
        assert_eq!(r.read_float().unwrap(), 2.5);

        assert!(!r.next_field().unwrap());
    }

    #[test]
    fn wire_type_mismatch_is_detected() {
        let mut w = FieldWriter::new();
        w.write_int32_field(2, 87);
        let data = w.writer.flush();

        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(
            r.read_string(),
            Err(DecodeError::WireTypeMismatch {
                field_number: 2,
                expected: WireType::LengthDelimited,
                actual: WireType::Varint,
            })
        );
    }

    #[test]
    fn skip_every_wire_type() {
        let mut w = FieldWriter::new();
        w.write_int64_field(1, 1 << 40);
        w.write_fixed64_field(2, 0x0102_0304_0506_0708);
        w.write_string_field(3, "payload");
        w.write_float_field(4, 1.0);
        w.write_int32_field(5, 7); // the field we actually read
        let data = w.writer.flush();

        let mut r = FieldReader::new(&data);
        let mut value = None;
        while r.next_field().unwrap() {
            if r.field_number() == 5 {
                value = Some(r.read_int32().unwrap());
            } else {
                r.skip_field().unwrap();
            }
        }
        assert_eq!(value, Some(7));
    }

    #[test]
    fn skip_length_delimited_reads_prefix_first() {
        // Field 1 string "abc", then field 2 varint. Skipping field 1
        // without honoring the length prefix would land mid-payload.
        let data = [0x0a, 0x03, b'a', b'b', b'c', 0x10, 0x2a];
        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        r.skip_field().unwrap();
        assert!(r.next_field().unwrap());
        assert_eq!(r.field_number(), 2);
        assert_eq!(r.read_int32().unwrap(), 42);
    }

    #[test]
    fn declared_length_beyond_buffer_is_truncated() {
        // Field 1, length 5, only 2 payload bytes.
        let data = [0x0a, 0x05, b'a', b'b'];
        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_bytes(), Err(DecodeError::Truncated));
    }

    #[test]
    fn truncated_fixed_width_payloads() {
        let data = [0x25, 0x00, 0x00]; // field 4 fixed32, 2 of 4 bytes
        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_float(), Err(DecodeError::Truncated));

        let data = [0x11, 0x00]; // field 2 fixed64, 1 of 8 bytes
        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_fixed64(), Err(DecodeError::Truncated));
    }

    #[test]
    fn fixed64_and_double_payloads() {
        let mut w = FieldWriter::new();
        w.write_fixed64_field(2, 0x0102_0304_0506_0708);
        w.write_double_field(3, -2.5);
        let data = w.writer.flush();

        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_fixed64().unwrap(), 0x0102_0304_0506_0708);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_double().unwrap(), -2.5);
    }

    #[test]
    fn dangling_tag_varint_is_malformed() {
        let data = [0x80]; // continuation bit set, no next byte
        let mut r = FieldReader::new(&data);
        assert_eq!(r.next_field(), Err(DecodeError::MalformedVarint));
    }

    #[test]
    fn group_wire_type_is_unsupported() {
        let data = [(1 << 3) | 3];
        let mut r = FieldReader::new(&data);
        assert_eq!(r.next_field(), Err(DecodeError::UnsupportedWireType(3)));
    }

    #[test]
    fn lossy_utf8_string() {
        let data = [0x0a, 0x03, 0xff, b'o', b'k'];
        let mut r = FieldReader::new(&data);
        assert!(r.next_field().unwrap());
        assert_eq!(r.read_string().unwrap(), "\u{fffd}ok");
    }
}
