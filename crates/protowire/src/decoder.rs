//! Message deserializer.
//!
//! Drives the [`FieldReader`] tag loop: known field numbers route into the
//! instance through typed reads, unknown numbers are skipped. Decoding
//! never fails solely because a buffer carries fields this schema does not
//! know (the protobuf forward-compatibility guarantee). Any decode error
//! is terminal; no partial message is ever returned.

use crate::error::DecodeError;
use crate::message::{MessageInstance, ScalarValue};
use crate::reader::FieldReader;
use crate::schema::{FieldKind, FieldSpec, ScalarType, Schema};

/// Hydrates [`MessageInstance`] trees from wire bytes.
pub struct MessageDecoder;

impl Default for MessageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one message of the given schema from `data`.
    pub fn decode(
        &self,
        schema: &'static Schema,
        data: &[u8],
    ) -> Result<MessageInstance, DecodeError> {
        let mut reader = FieldReader::new(data);
        let mut msg = MessageInstance::new(schema);
        while reader.next_field()? {
            match schema.field(reader.field_number()) {
                None => reader.skip_field()?,
                Some(spec) => self.read_field(&mut reader, &mut msg, spec)?,
            }
        }
        Ok(msg)
    }

    fn read_field(
        &self,
        reader: &mut FieldReader<'_>,
        msg: &mut MessageInstance,
        spec: &'static FieldSpec,
    ) -> Result<(), DecodeError> {
        let tag = spec.tag;
        match spec.kind {
            // Duplicate singular fields on the wire: last value wins.
            FieldKind::Scalar(t) => {
                let value = read_scalar(reader, t)?;
                msg.set_scalar(tag, value);
            }
            FieldKind::Message(sub) => {
                let payload = reader.read_bytes()?;
                msg.set_message(tag, self.decode(sub, payload)?);
            }
            FieldKind::RepeatedScalar(t) => {
                let value = read_scalar(reader, t)?;
                msg.add_scalar(tag, value);
            }
            FieldKind::RepeatedMessage(sub) => {
                let payload = reader.read_bytes()?;
                msg.add_message(tag, self.decode(sub, payload)?);
            }
        }
        Ok(())
    }
}

fn read_scalar(reader: &mut FieldReader<'_>, t: ScalarType) -> Result<ScalarValue, DecodeError> {
    Ok(match t {
        ScalarType::Str => ScalarValue::Str(reader.read_string()?),
        ScalarType::Int32 => ScalarValue::Int32(reader.read_int32()?),
        ScalarType::Int64 => ScalarValue::Int64(reader.read_int64()?),
        ScalarType::Bool => ScalarValue::Bool(reader.read_bool()?),
        ScalarType::Float => ScalarValue::Float(reader.read_float()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::MessageEncoder;
    use crate::schemas::{DOMAIN_REPORT, SCAN_RESULT, TIMESTAMP};
    use crate::writer::FieldWriter;

    fn decode(schema: &'static Schema, data: &[u8]) -> Result<MessageInstance, DecodeError> {
        MessageDecoder::new().decode(schema, data)
    }

    #[test]
    fn concrete_scenario_decodes() {
        let mut data = vec![0x0a, 0x0b];
        data.extend_from_slice(b"example.com");
        data.extend_from_slice(&[0x10, 0x57]);

        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert_eq!(msg.get_str(1), "example.com");
        assert_eq!(msg.get_i32(2), 87);
        assert!(!msg.has(5));
    }

    #[test]
    fn unknown_fields_are_skipped_not_errors() {
        let mut w = FieldWriter::new();
        w.write_string_field(1, "example.com");
        // Unknown to DomainReport: field 9 varint, field 10 string,
        // field 11 fixed32, field 12 fixed64.
        w.write_varint_element(9, 12345);
        w.write_string_element(10, "future");
        w.write_float_element(11, 9.5);
        w.write_fixed64_field(12, 0xdead_beef);
        w.write_int32_field(2, 87);
        let data = w.writer.flush();

        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert_eq!(msg.get_str(1), "example.com");
        assert_eq!(msg.get_i32(2), 87);
    }

    #[test]
    fn explicit_zero_on_wire_reads_as_default() {
        // A peer may emit scalars at their zero value; decoding one is
        // indistinguishable from absence.
        let mut w = FieldWriter::new();
        w.write_varint_element(2, 0); // score = 0, explicitly
        let data = w.writer.flush();

        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert_eq!(msg.get_i32(2), 0);
        assert_eq!(msg, MessageInstance::new(&DOMAIN_REPORT));
    }

    #[test]
    fn duplicate_singular_field_last_wins() {
        let mut w = FieldWriter::new();
        w.write_int32_field(2, 1);
        w.write_int32_field(2, 99);
        let data = w.writer.flush();
        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert_eq!(msg.get_i32(2), 99);
    }

    #[test]
    fn zero_length_child_is_present() {
        let data = [0x2a, 0x00];
        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert!(msg.has(5));
        assert!(msg.get_message(5).unwrap().is_empty());
    }

    #[test]
    fn nested_decode_is_scoped_to_declared_length() {
        // Outer: tag5 LEN 2 carrying an inner Timestamp whose own field
        // claims more bytes than the inner window has. The inner decode
        // must fail rather than consume the outer's trailing field.
        let data = [0x2a, 0x02, 0x0a, 0x20, 0x10, 0x57];
        assert_eq!(decode(&DOMAIN_REPORT, &data), Err(DecodeError::Truncated));
    }

    #[test]
    fn negative_int32_roundtrip() {
        let mut w = FieldWriter::new();
        w.write_int32_field(2, -42);
        let data = w.writer.flush();
        let msg = decode(&DOMAIN_REPORT, &data).unwrap();
        assert_eq!(msg.get_i32(2), -42);
    }

    #[test]
    fn repeated_fields_preserve_wire_order() {
        let mut src = MessageInstance::new(&SCAN_RESULT);
        for t in ["c", "a", "b"] {
            src.add_str(6, t);
        }
        let data = MessageEncoder::new().encode(&src);
        let msg = decode(&SCAN_RESULT, &data).unwrap();
        let tags: Vec<&str> = msg
            .repeated_scalars(6)
            .iter()
            .map(|v| match v {
                ScalarValue::Str(s) => s.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(tags, ["c", "a", "b"]);
    }

    #[test]
    fn full_roundtrip_every_field_kind() {
        let mut ts = MessageInstance::new(&TIMESTAMP);
        ts.set_i64(1, 1_724_803_200);
        ts.set_i32(2, 500_000_000);

        let mut rec = MessageInstance::new(&crate::schemas::DNS_RECORD);
        rec.set_str(1, "A");
        rec.set_str(2, "93.184.216.34");
        rec.set_i32(3, 3600);

        let mut src = MessageInstance::new(&SCAN_RESULT);
        src.set_str(1, "example.com");
        src.set_i32(2, 443);
        src.set_bool(3, true);
        src.set_f32(4, 12.5);
        src.set_message(5, ts);
        src.add_str(6, "tls");
        src.add_str(6, "http2");
        src.add_message(7, rec);
        src.set_i64(8, 1 << 33);

        let data = MessageEncoder::new().encode(&src);
        let out = decode(&SCAN_RESULT, &data).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn decode_error_yields_no_partial_message() {
        let mut w = FieldWriter::new();
        w.write_string_field(1, "example.com");
        let mut data = w.writer.flush();
        data.push(0x80); // dangling tag varint after a valid field
        assert_eq!(
            decode(&DOMAIN_REPORT, &data),
            Err(DecodeError::MalformedVarint)
        );
    }
}
