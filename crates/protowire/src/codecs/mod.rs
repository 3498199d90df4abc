//! Codec wrappers: the boundary surface an RPC transport talks to.

mod message;
mod types;

pub use message::MessageCodec;
pub use types::SchemaCodec;
