//! Message codec wrapper.

use serde_json::Value;

use super::types::SchemaCodec;
use crate::decoder::MessageDecoder;
use crate::encoder::MessageEncoder;
use crate::error::DecodeError;
use crate::message::MessageInstance;
use crate::project::project;
use crate::schema::Schema;

/// Bundles an encoder and decoder for one message schema.
pub struct MessageCodec {
    pub schema: &'static Schema,
    pub encoder: MessageEncoder,
    pub decoder: MessageDecoder,
}

impl MessageCodec {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            encoder: MessageEncoder::new(),
            decoder: MessageDecoder::new(),
        }
    }

    pub fn serialize(&mut self, msg: &MessageInstance) -> Vec<u8> {
        assert!(
            self.schema.same_as(msg.schema()),
            "codec for {} cannot serialize a {} message",
            self.schema.name,
            msg.schema().name
        );
        self.encoder.encode(msg)
    }

    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<MessageInstance, DecodeError> {
        self.decoder.decode(self.schema, bytes)
    }

    pub fn project(&mut self, bytes: &[u8]) -> Result<Value, DecodeError> {
        Ok(project(&self.deserialize(bytes)?))
    }
}

impl SchemaCodec for MessageCodec {
    fn schema(&self) -> &'static Schema {
        self.schema
    }

    fn serialize(&mut self, msg: &MessageInstance) -> Vec<u8> {
        self.serialize(msg)
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Result<MessageInstance, DecodeError> {
        self.deserialize(bytes)
    }

    fn project(&mut self, bytes: &[u8]) -> Result<Value, DecodeError> {
        self.project(bytes)
    }
}
