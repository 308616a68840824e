//! Integer width codec
//!
//! Every integer on the wire, including string lengths, element counts and the
//! PDU length field, is a one-byte width marker followed by a little-endian
//! two's complement payload of 1, 2, 4 or 8 bytes.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::tag;

/// Maximum bytes needed for an encoded integer (marker + 8 byte payload)
pub const MAX_INT_SIZE: usize = 9;

/// One of the four integer widths selectable by a marker byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntWidth {
    /// 1 byte payload, marker `0x03`
    W8,
    /// 2 byte payload, marker `0x04`
    W16,
    /// 4 byte payload, marker `0x05`
    W32,
    /// 8 byte payload, marker `0x06`
    W64,
}

impl IntWidth {
    /// Marker byte announcing this width
    #[inline]
    pub const fn marker(self) -> u8 {
        match self {
            IntWidth::W8 => tag::INT8,
            IntWidth::W16 => tag::INT16,
            IntWidth::W32 => tag::INT32,
            IntWidth::W64 => tag::INT64,
        }
    }

    /// Payload size in bytes
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            IntWidth::W8 => 1,
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }

    /// Width for a marker byte, or `None` if it is not an integer marker
    #[inline]
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            tag::INT8 => Some(IntWidth::W8),
            tag::INT16 => Some(IntWidth::W16),
            tag::INT32 => Some(IntWidth::W32),
            tag::INT64 => Some(IntWidth::W64),
            _ => None,
        }
    }

    /// Smallest width that holds `value`
    #[inline]
    pub const fn minimal(value: i64) -> Self {
        if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
            IntWidth::W8
        } else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
            IntWidth::W16
        } else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
            IntWidth::W32
        } else {
            IntWidth::W64
        }
    }

    /// Whether `value` survives truncation to this width
    #[inline]
    pub const fn fits(self, value: i64) -> bool {
        (self as u8) >= (Self::minimal(value) as u8)
    }
}

/// How the encoder picks a width for integers and length fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthPolicy {
    /// Smallest width that holds the value
    #[default]
    Minimal,
    /// Always 8 bytes regardless of magnitude
    Fixed64,
}

impl WidthPolicy {
    /// Width this policy selects for `value`
    #[inline]
    pub const fn select(self, value: i64) -> IntWidth {
        match self {
            WidthPolicy::Minimal => IntWidth::minimal(value),
            WidthPolicy::Fixed64 => IntWidth::W64,
        }
    }
}

/// Decode a payload of the given width, sign-extending to i64
///
/// `buf` must start at the payload (after the marker).
#[inline]
pub fn decode_payload(width: IntWidth, buf: &[u8]) -> Result<i64> {
    if buf.len() < width.size() {
        return Err(Error::TruncatedInput);
    }

    let value = match width {
        IntWidth::W8 => i8::from_le_bytes([buf[0]]) as i64,
        IntWidth::W16 => i16::from_le_bytes([buf[0], buf[1]]) as i64,
        IntWidth::W32 => i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as i64,
        IntWidth::W64 => i64::from_le_bytes([
            buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
        ]),
    };
    Ok(value)
}

/// Decode a marker-prefixed integer from the given buffer
///
/// Returns (value, bytes_consumed) or an error.
#[inline]
pub fn decode_int(buf: &[u8]) -> Result<(i64, usize)> {
    let marker = *buf.first().ok_or(Error::TruncatedInput)?;
    let width = IntWidth::from_marker(marker).ok_or(Error::BadSizeMarker(marker))?;
    let value = decode_payload(width, &buf[1..])?;
    Ok((value, 1 + width.size()))
}

/// Append `value` at the given width, marker first
///
/// Returns the number of bytes written. Truncates if `value` does not fit;
/// callers choose the width with [`IntWidth::minimal`] or [`IntWidth::fits`].
#[inline]
pub fn encode_int(value: i64, width: IntWidth, out: &mut Vec<u8>) -> usize {
    out.push(width.marker());
    match width {
        IntWidth::W8 => out.extend_from_slice(&(value as i8).to_le_bytes()),
        IntWidth::W16 => out.extend_from_slice(&(value as i16).to_le_bytes()),
        IntWidth::W32 => out.extend_from_slice(&(value as i32).to_le_bytes()),
        IntWidth::W64 => out.extend_from_slice(&value.to_le_bytes()),
    }
    1 + width.size()
}
