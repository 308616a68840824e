//! Recursive-descent value decoder
//!
//! The decoder walks a borrowed body buffer with a [`BodyCursor`]. Every
//! fixed-width read checks the remaining length first, so malformed or
//! truncated input always surfaces as an error and never as a partial value.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::tag;
use crate::value::{Map, Value};
use crate::width;

/// Cursor for reading body content with position tracking
#[derive(Debug)]
pub struct BodyCursor<'a> {
    /// Buffer containing the body data
    pub buf: &'a [u8],
    /// Current read position
    pub pos: usize,
}

impl<'a> BodyCursor<'a> {
    /// Create a cursor at the start of `buf`
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Unconsumed tail of the buffer
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Look at the next byte without advancing
    #[inline]
    pub fn peek_u8(&self) -> Result<u8> {
        self.buf.get(self.pos).copied().ok_or(Error::TruncatedInput)
    }

    /// Read a u8 value
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8> {
        let value = self.peek_u8()?;
        self.pos += 1;
        Ok(value)
    }

    /// Read raw bytes without length prefix
    #[inline]
    pub fn get_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedInput);
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a marker-prefixed integer of any width
    #[inline]
    pub fn get_int(&mut self) -> Result<i64> {
        let (value, size) = width::decode_int(self.rest())?;
        self.pos += size;
        Ok(value)
    }

    /// Read an f64 value (little-endian)
    #[inline]
    pub fn get_f64(&mut self) -> Result<f64> {
        let bytes = self.get_bytes(8)?;
        Ok(f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a length or count field
    ///
    /// Negative values are [`Error::InvalidLength`]. A count of items each
    /// at least `min_item_size` bytes long that cannot fit in the remaining
    /// input is [`Error::TruncatedInput`].
    #[inline]
    pub fn get_len(&mut self, min_item_size: usize) -> Result<usize> {
        let len = self.get_int()?;
        let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;
        let needed = len
            .checked_mul(min_item_size)
            .ok_or(Error::TruncatedInput)?;
        if needed > self.remaining() {
            return Err(Error::TruncatedInput);
        }
        Ok(len)
    }

    /// Read a string marker, its length and payload
    #[inline]
    pub fn get_string(&mut self) -> Result<&'a [u8]> {
        self.expect_tag(tag::STRING)?;
        let len = self.get_len(1)?;
        self.get_bytes(len)
    }

    fn expect_tag(&mut self, expected: u8) -> Result<()> {
        let found = self.get_u8()?;
        if found != expected {
            return Err(Error::UnsupportedTag(found));
        }
        Ok(())
    }
}

/// Value decoder over one body buffer
#[derive(Debug)]
pub struct Decoder<'a> {
    cursor: BodyCursor<'a>,
}

impl<'a> Decoder<'a> {
    /// Create new decoder for the given buffer
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: BodyCursor::new(buf),
        }
    }

    /// Bytes not yet consumed
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.cursor.rest()
    }

    /// Decode the next value
    pub fn decode_value(&mut self) -> Result<Value> {
        let marker = self.cursor.peek_u8()?;
        match marker {
            tag::ARRAY => self.decode_array(),
            tag::OBJECT => self.decode_object(),
            tag::STRING => Ok(Value::String(self.cursor.get_string()?.to_vec())),
            tag::INT8 | tag::INT16 | tag::INT32 | tag::INT64 => {
                Ok(Value::Integer(self.cursor.get_int()?))
            }
            tag::DOUBLE => {
                self.cursor.get_u8()?;
                Ok(Value::Double(self.cursor.get_f64()?))
            }
            tag::TRUE => {
                self.cursor.get_u8()?;
                Ok(Value::Bool(true))
            }
            tag::FALSE => {
                self.cursor.get_u8()?;
                Ok(Value::Bool(false))
            }
            tag::NULL => {
                self.cursor.get_u8()?;
                Ok(Value::Null)
            }
            tag::TEMPLATE => self.decode_template(),
            // includes SKIP, which only has meaning inside a template row
            other => Err(Error::UnsupportedTag(other)),
        }
    }

    fn decode_array(&mut self) -> Result<Value> {
        self.cursor.expect_tag(tag::ARRAY)?;
        let count = self.cursor.get_len(1)?;

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.decode_value()?);
        }
        Ok(Value::Array(items))
    }

    fn decode_object(&mut self) -> Result<Value> {
        self.cursor.expect_tag(tag::OBJECT)?;
        // key (marker, int marker, length byte) plus at least one value byte
        let count = self.cursor.get_len(4)?;

        let mut map = Map::new();
        for _ in 0..count {
            let key = self.cursor.get_string()?.to_vec();
            let value = self.decode_value()?;
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    fn decode_template(&mut self) -> Result<Value> {
        self.cursor.expect_tag(tag::TEMPLATE)?;

        self.cursor.expect_tag(tag::ARRAY)?;
        let field_count = self.cursor.get_len(3)?;
        let mut fields = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            fields.push(self.cursor.get_string()?);
        }

        // every field of every row is at least a skip byte; rows of an empty
        // header take no bytes at all
        let row_count = self.cursor.get_len(fields.len())?;
        let mut rows = Vec::with_capacity(row_count.min(self.cursor.remaining()));
        for _ in 0..row_count {
            let mut row = Map::new();
            for field in &fields {
                if self.cursor.peek_u8()? == tag::SKIP {
                    self.cursor.get_u8()?;
                    continue;
                }
                let value = self.decode_value()?;
                row.insert(field.to_vec(), value);
            }
            rows.push(Value::Object(row));
        }
        Ok(Value::Array(rows))
    }
}

/// Decode a body that holds exactly one value
pub fn from_slice(body: &[u8]) -> Result<Value> {
    let (value, rest) = from_slice_prefix(body)?;
    if !rest.is_empty() {
        return Err(Error::TrailingBytes(rest.len()));
    }
    Ok(value)
}

/// Decode one value from the front of `buf`, returning the unconsumed tail
pub fn from_slice_prefix(buf: &[u8]) -> Result<(Value, &[u8])> {
    let mut decoder = Decoder::new(buf);
    let value = decoder.decode_value()?;
    Ok((value, decoder.rest()))
}
