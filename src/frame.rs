//! PDU header structures and framing
//!
//! A PDU is the two byte binary marker `0x00 0x01`, an integer width marker,
//! the body length at that width, then exactly that many body bytes.

use alloc::vec::Vec;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::width::{self, IntWidth};

#[cfg(feature = "std")]
use std::io::{Read, Write};

/// Fixed marker opening every PDU
pub const PDU_MAGIC: [u8; 2] = [0x00, 0x01];

/// Bytes of body preallocated before the source proves it has them
#[cfg(feature = "std")]
const PREALLOC_LIMIT: u64 = 64 * 1024;

/// PDU header (little-endian length field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    /// Width of the length field
    pub width: IntWidth,
    /// Body length in bytes
    pub len: u64,
}

impl PduHeader {
    /// Header size with a 64-bit length field, as the encoder always emits
    pub const MAX_SIZE: usize = PDU_MAGIC.len() + 1 + 8;

    /// Header announcing `len` body bytes with a 64-bit length field
    #[inline]
    pub fn new(len: u64) -> Self {
        Self {
            width: IntWidth::W64,
            len,
        }
    }

    /// Encoded header size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        PDU_MAGIC.len() + 1 + self.width.size()
    }

    /// Header plus body size
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.size() as u64 + self.len
    }

    /// Check the declared length against the configured limit
    #[inline]
    pub fn validate(&self, config: &Config) -> Result<()> {
        if self.len > config.max_pdu_body {
            return Err(Error::InvalidLength(self.len as i64));
        }
        Ok(())
    }

    /// Append the encoded header
    #[inline]
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&PDU_MAGIC);
        width::encode_int(self.len as i64, self.width, out);
    }

    /// Decode a header from the front of `buf`
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let magic_len = buf.len().min(PDU_MAGIC.len());
        if buf[..magic_len] != PDU_MAGIC[..magic_len] {
            return Err(Error::MalformedHeader);
        }
        if buf.len() < PDU_MAGIC.len() + 1 {
            return Err(Error::TruncatedInput);
        }

        let marker = buf[PDU_MAGIC.len()];
        let width = IntWidth::from_marker(marker).ok_or(Error::BadSizeMarker(marker))?;
        let len = width::decode_payload(width, &buf[PDU_MAGIC.len() + 1..])?;
        Self::from_parts(width, len)
    }

    /// Read a header from a blocking byte source
    #[cfg(feature = "std")]
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;
        if magic != PDU_MAGIC {
            return Err(Error::MalformedHeader);
        }

        let mut marker = [0u8; 1];
        reader.read_exact(&mut marker)?;
        let width = IntWidth::from_marker(marker[0]).ok_or(Error::BadSizeMarker(marker[0]))?;

        let mut payload = [0u8; 8];
        reader.read_exact(&mut payload[..width.size()])?;
        let len = width::decode_payload(width, &payload)?;
        Self::from_parts(width, len)
    }

    fn from_parts(width: IntWidth, len: i64) -> Result<Self> {
        let len = u64::try_from(len).map_err(|_| Error::InvalidLength(len))?;
        Ok(Self { width, len })
    }
}

/// Prepend a PDU header to an already encoded body
pub fn wrap_body(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(PduHeader::MAX_SIZE + body.len());
    PduHeader::new(body.len() as u64).encode(&mut out);
    out.extend_from_slice(body);
    out
}

/// Locate the first PDU in `buf`
///
/// Returns (body, total bytes the PDU occupies) so callers can walk
/// concatenated PDUs.
#[inline]
pub fn split_pdu(buf: &[u8]) -> Result<(&[u8], usize)> {
    split_pdu_with(buf, &Config::default())
}

/// [`split_pdu`] with an explicit configuration
pub fn split_pdu_with<'a>(buf: &'a [u8], config: &Config) -> Result<(&'a [u8], usize)> {
    let header = PduHeader::decode(buf)?;
    header.validate(config)?;

    let body_start = header.size();
    let available = (buf.len() - body_start) as u64;
    if available < header.len {
        return Err(Error::TruncatedInput);
    }

    let body_end = body_start + header.len as usize;
    Ok((&buf[body_start..body_end], body_end))
}

/// Read one complete PDU body from a blocking byte source
///
/// Short reads are retried until the declared length is collected. A source
/// that ends early yields [`Error::TruncatedInput`]; any other source error
/// (including timeouts) is terminal.
#[cfg(feature = "std")]
pub fn read_pdu<R: Read>(reader: &mut R, config: &Config) -> Result<Vec<u8>> {
    let header = PduHeader::read_from(reader)?;
    header.validate(config)?;
    tracing::trace!(len = header.len, width = ?header.width, "read pdu header");

    let mut body = Vec::with_capacity(header.len.min(PREALLOC_LIMIT) as usize);
    reader.by_ref().take(header.len).read_to_end(&mut body)?;
    if (body.len() as u64) < header.len {
        tracing::debug!(
            expected = header.len,
            received = body.len(),
            "pdu body truncated"
        );
        return Err(Error::TruncatedInput);
    }

    Ok(body)
}

/// Write a complete PDU to a byte sink and flush it
#[cfg(feature = "std")]
pub fn write_pdu<W: Write>(writer: &mut W, pdu: &[u8]) -> Result<()> {
    writer.write_all(pdu)?;
    writer.flush()?;
    tracing::trace!(len = pdu.len(), "wrote pdu");
    Ok(())
}
