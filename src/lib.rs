//! BSER: binary serialization for self-describing values
//!
//! This crate encodes and decodes BSER, the compact binary format watchman
//! speaks over its local socket, and frames values into length-prefixed PDUs.
//!
//! # PDU Format
//!
//! ```text
//! +-----------+-----------+----------------------+
//! | 0x00 0x01 | width u8  | body length (1/2/4/8) |
//! +-----------+-----------+----------------------+
//! | Body: exactly one encoded value               |
//! +-----------------------------------------------+
//! ```
//!
//! Every multi-byte field is little-endian. Integers and length fields carry
//! a width marker; the encoder picks the smallest width by default
//! ([`WidthPolicy::Minimal`]) and always emits a 64-bit PDU length field.
//! The decoder accepts all four widths everywhere.
//!
//! # Features
//!
//! - `std` (default): framing over `std::io::Read`/`Write`
//! - `json`: conversions to and from `serde_json::Value`
//! - `watchman`: a small client that discovers and talks to a watchman
//!   server (unix only)
//!
//! # Example
//!
//! ```rust
//! use bser::{Value, from_pdu_slice, to_pdu};
//!
//! let query: Value = vec![
//!     ("expression", Value::from(vec![Value::from("type"), Value::from("f")])),
//!     ("fields", Value::from(vec![Value::from("name")])),
//! ]
//! .into_iter()
//! .collect();
//!
//! let pdu = to_pdu(&query)?;
//! let (decoded, used) = from_pdu_slice(&pdu)?;
//! assert_eq!(decoded, query);
//! assert_eq!(used, pdu.len());
//! # Ok::<(), bser::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod value;
pub mod width;

#[cfg(feature = "json")]
pub mod json;

#[cfg(all(feature = "watchman", unix))]
pub mod client;

// Re-export main types
pub use config::Config;
pub use decoder::{from_slice, from_slice_prefix, BodyCursor, Decoder};
pub use encoder::{to_pdu, to_pdu_with, to_vec, to_vec_with, Encoder};
pub use error::{Error, Result};
pub use frame::{split_pdu, split_pdu_with, PduHeader, PDU_MAGIC};
pub use value::{Map, Value};
pub use width::{IntWidth, WidthPolicy};

#[cfg(feature = "std")]
pub use frame::{read_pdu, write_pdu};

/// Wire type tags
pub mod tag {
    /// Array: count, then elements
    pub const ARRAY: u8 = 0x00;
    /// Object: count, then key/value pairs
    pub const OBJECT: u8 = 0x01;
    /// String: length, then raw bytes
    pub const STRING: u8 = 0x02;
    /// 1 byte integer
    pub const INT8: u8 = 0x03;
    /// 2 byte integer
    pub const INT16: u8 = 0x04;
    /// 4 byte integer
    pub const INT32: u8 = 0x05;
    /// 8 byte integer
    pub const INT64: u8 = 0x06;
    /// IEEE-754 binary64
    pub const DOUBLE: u8 = 0x07;
    /// Boolean true
    pub const TRUE: u8 = 0x08;
    /// Boolean false
    pub const FALSE: u8 = 0x09;
    /// Null
    pub const NULL: u8 = 0x0a;
    /// Templated array: header of field names, row count, rows
    pub const TEMPLATE: u8 = 0x0b;
    /// Field absent from a template row
    pub const SKIP: u8 = 0x0c;
}

/// Decode the first PDU in `buf`
///
/// Returns the value and the number of bytes the PDU occupied.
pub fn from_pdu_slice(buf: &[u8]) -> Result<(Value, usize)> {
    let (body, used) = split_pdu(buf)?;
    Ok((from_slice(body)?, used))
}

/// Read one PDU from a blocking byte source and decode it
#[cfg(feature = "std")]
pub fn read_value<R: std::io::Read>(reader: &mut R, config: &Config) -> Result<Value> {
    let body = read_pdu(reader, config)?;
    from_slice(&body)
}

/// Encode `value` as a PDU and write it to a byte sink
#[cfg(feature = "std")]
pub fn write_value<W: std::io::Write>(writer: &mut W, value: &Value, config: &Config) -> Result<()> {
    let pdu = to_pdu_with(value, config)?;
    write_pdu(writer, &pdu)
}
