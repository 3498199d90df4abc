//! Binary buffer utilities for protowire.
//!
//! This crate provides the low-level reading and writing primitives the
//! protowire codec is built on.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! Multi-byte primitives are little-endian, matching the fixed32/fixed64
//! wire encodings the codec speaks.
//!
//! # Example
//!
//! ```
//! use protowire_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u32_le(0x0203_0405);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), 0x01);
//! assert_eq!(reader.u32_le(), 0x0203_0405);
//! assert_eq!(reader.utf8(5), "hello");
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
