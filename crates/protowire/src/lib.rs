//! Schema-driven protobuf-style binary message codec.
//!
//! Messages are defined by static [`Schema`] field tables, built up as
//! [`MessageInstance`] trees, encoded to the protobuf wire format
//! (varint/fixed64/length-delimited/fixed32), decoded back with
//! forward-compatible unknown-field skipping, and projected into plain
//! [`serde_json::Value`] trees for application code.
//!
//! # Example
//!
//! ```
//! use protowire::schemas::DOMAIN_REPORT;
//! use protowire::{MessageCodec, MessageInstance};
//!
//! let mut msg = MessageInstance::new(&DOMAIN_REPORT);
//! msg.set_str(1, "example.com");
//! msg.set_i32(2, 87);
//!
//! let mut codec = MessageCodec::new(&DOMAIN_REPORT);
//! let bytes = codec.serialize(&msg);
//! let back = codec.deserialize(&bytes).unwrap();
//! assert_eq!(back.get_i32(2), 87);
//! ```

mod decoder;
mod encoder;
mod error;
mod message;
mod project;
mod reader;
mod schema;
mod varint;
mod wire;
mod writer;

pub mod codecs;
pub mod schemas;

pub use codecs::{MessageCodec, SchemaCodec};
pub use decoder::MessageDecoder;
pub use encoder::MessageEncoder;
pub use error::DecodeError;
pub use message::{MessageInstance, ScalarValue};
pub use project::project;
pub use reader::FieldReader;
pub use schema::{FieldKind, FieldSpec, ScalarType, Schema};
pub use varint::{read_varint, varint_len, write_varint, MAX_VARINT_LEN};
pub use wire::{pack_tag, unpack_tag, WireType, MAX_FIELD_NUMBER};
pub use writer::FieldWriter;
