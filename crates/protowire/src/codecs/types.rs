//! Common codec trait.

use serde_json::Value;

use crate::error::DecodeError;
use crate::message::MessageInstance;
use crate::schema::Schema;

/// Trait for schema-bound codecs that move messages across a byte
/// boundary. The transport layer frames these bytes and attaches its
/// out-of-band metadata; the codec itself never touches I/O.
pub trait SchemaCodec {
    fn schema(&self) -> &'static Schema;
    fn serialize(&mut self, msg: &MessageInstance) -> Vec<u8>;
    fn deserialize(&mut self, bytes: &[u8]) -> Result<MessageInstance, DecodeError>;
    /// Decodes and immediately projects into a plain data tree.
    fn project(&mut self, bytes: &[u8]) -> Result<Value, DecodeError>;
}
