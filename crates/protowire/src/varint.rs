//! Unsigned LEB128 varint encoding.
//!
//! Varints carry tags, length prefixes, and integer field values: 7
//! payload bits per byte, least-significant group first, high bit set on
//! every byte except the last. Signed integers are encoded as the plain
//! varint of their two's-complement bit pattern (proto3 `int32`/`int64`,
//! no zigzag).

use protowire_buffers::{Reader, Writer};

use crate::error::DecodeError;

/// A u64 varint never takes more than 10 bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Writes `value` as an unsigned LEB128 varint.
pub fn write_varint(writer: &mut Writer, mut value: u64) {
    writer.ensure_capacity(MAX_VARINT_LEN);
    while value >= 0x80 {
        writer.u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    writer.u8(value as u8);
}

/// Number of bytes [`write_varint`] emits for `value`.
pub fn varint_len(value: u64) -> usize {
    let mut len = 1;
    let mut v = value;
    while v >= 0x80 {
        v >>= 7;
        len += 1;
    }
    len
}

/// Reads an unsigned LEB128 varint from the reader.
///
/// Fails with [`DecodeError::MalformedVarint`] if the continuation bit
/// never clears within 10 bytes or the input runs out mid-run.
pub fn read_varint(reader: &mut Reader) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        if reader.size() == 0 {
            return Err(DecodeError::MalformedVarint);
        }
        let byte = reader.u8();
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(DecodeError::MalformedVarint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut w = Writer::new();
        write_varint(&mut w, value);
        w.flush()
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(1), [0x01]);
        assert_eq!(encode(127), [0x7f]);
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(300), [0xac, 0x02]);
        assert_eq!(
            encode(u64::MAX),
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn negative_int64_takes_ten_bytes() {
        // -1 as two's complement u64 is all ones.
        assert_eq!(encode(-1i64 as u64).len(), 10);
    }

    #[test]
    fn len_matches_encoding() {
        for value in [0, 1, 127, 128, 300, 16383, 16384, u64::MAX] {
            assert_eq!(varint_len(value), encode(value).len(), "value {value}");
        }
    }

    #[test]
    fn roundtrip() {
        for value in [0u64, 1, 127, 128, 300, 65535, u32::MAX as u64, u64::MAX] {
            let bytes = encode(value);
            let mut r = Reader::new(&bytes);
            assert_eq!(read_varint(&mut r).unwrap(), value);
            assert_eq!(r.size(), 0);
        }
    }

    #[test]
    fn exhausted_input_is_malformed() {
        let mut r = Reader::new(&[]);
        assert_eq!(read_varint(&mut r), Err(DecodeError::MalformedVarint));

        // Continuation bit set on the last available byte.
        let mut r = Reader::new(&[0x80]);
        assert_eq!(read_varint(&mut r), Err(DecodeError::MalformedVarint));
    }

    #[test]
    fn unterminated_after_ten_bytes_is_malformed() {
        let bytes = [0x80u8; 11];
        let mut r = Reader::new(&bytes);
        assert_eq!(read_varint(&mut r), Err(DecodeError::MalformedVarint));
    }
}
