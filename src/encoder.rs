//! Value encoder
//!
//! The encoder appends to a growable buffer. PDUs are built the same way the
//! header is patched on the wire: a placeholder header is written first and
//! the length field is filled in once the body size is known.

use alloc::vec::Vec;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::frame::{PduHeader, PDU_MAGIC};
use crate::tag;
use crate::value::Value;
use crate::width::{self, WidthPolicy};

/// Encoder that writes into an owned buffer
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    policy: WidthPolicy,
    /// Start of the header written by `begin_pdu`, until `finish_pdu`
    pdu_start: Option<usize>,
}

impl Encoder {
    /// Create new encoder with minimal integer widths
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new encoder using the configured width policy
    #[inline]
    pub fn with_config(config: &Config) -> Self {
        Self {
            policy: config.width_policy,
            ..Self::default()
        }
    }

    /// Width policy in effect
    #[inline]
    pub fn policy(&self) -> WidthPolicy {
        self.policy
    }

    /// Write a raw marker byte
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write an integer at the width the policy selects
    #[inline]
    pub fn put_int(&mut self, value: i64) {
        width::encode_int(value, self.policy.select(value), &mut self.buf);
    }

    /// Write a length or count field
    #[inline]
    pub fn put_len(&mut self, len: usize) -> Result<()> {
        let len = i64::try_from(len).map_err(|_| Error::UnsupportedValue)?;
        self.put_int(len);
        Ok(())
    }

    /// Write a double marker and its payload (little-endian)
    #[inline]
    pub fn put_f64(&mut self, value: f64) {
        self.buf.push(tag::DOUBLE);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a string marker, length and payload
    #[inline]
    pub fn put_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.push(tag::STRING);
        self.put_len(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Encode a value tree
    ///
    /// On error the buffer holds a partial value; callers discard it (see
    /// [`to_vec`] and [`to_pdu`]).
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.put_u8(tag::NULL),
            Value::Bool(true) => self.put_u8(tag::TRUE),
            Value::Bool(false) => self.put_u8(tag::FALSE),
            Value::Integer(v) => self.put_int(*v),
            Value::Double(v) => self.put_f64(*v),
            Value::String(bytes) => self.put_string(bytes)?,
            Value::Array(items) => {
                self.put_u8(tag::ARRAY);
                self.put_len(items.len())?;
                for item in items {
                    self.encode(item)?;
                }
            }
            Value::Object(map) => {
                self.put_u8(tag::OBJECT);
                self.put_len(map.len())?;
                for (key, item) in map {
                    self.put_string(key)?;
                    self.encode(item)?;
                }
            }
        }
        Ok(())
    }

    /// Begin a PDU by writing a placeholder header
    #[inline]
    pub fn begin_pdu(&mut self) {
        self.pdu_start = Some(self.buf.len());
        PduHeader::new(0).encode(&mut self.buf);
    }

    /// Finish the PDU started by [`Encoder::begin_pdu`]
    ///
    /// Patches the length field with the body size and returns the total
    /// PDU size. Without an open PDU this is [`Error::MalformedHeader`].
    #[inline]
    pub fn finish_pdu(&mut self) -> Result<usize> {
        let header_start = self.pdu_start.take().ok_or(Error::MalformedHeader)?;
        let body_start = header_start + PduHeader::MAX_SIZE;
        let body_len = (self.buf.len() - body_start) as u64;

        // length field follows the magic and the width marker
        let len_offset = header_start + PDU_MAGIC.len() + 1;
        self.buf[len_offset..body_start].copy_from_slice(&body_len.to_le_bytes());

        Ok(self.buf.len() - header_start)
    }

    /// Get current position in buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Reset encoder for reuse, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
        self.pdu_start = None;
    }

    /// Get a slice of the encoded data
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the encoded bytes
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a value as a bare body
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_vec_with(value, &Config::default())
}

/// [`to_vec`] with an explicit configuration
pub fn to_vec_with(value: &Value, config: &Config) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_config(config);
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Encode a value as a complete PDU
pub fn to_pdu(value: &Value) -> Result<Vec<u8>> {
    to_pdu_with(value, &Config::default())
}

/// [`to_pdu`] with an explicit configuration
pub fn to_pdu_with(value: &Value, config: &Config) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_config(config);
    encoder.begin_pdu();
    encoder.encode(value)?;
    encoder.finish_pdu()?;
    Ok(encoder.into_inner())
}
