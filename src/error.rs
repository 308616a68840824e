//! Error types for the BSER codec

use thiserror::Error;

/// Errors that can occur while framing, encoding or decoding BSER data
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The byte source failed (anything other than a clean end of input)
    #[cfg(feature = "std")]
    #[error("i/o failure: {0}")]
    IoFailure(std::io::ErrorKind),
    /// Fewer bytes are available than a field declares
    #[error("unexpected end of input")]
    TruncatedInput,
    /// PDU does not start with the `0x00 0x01` binary marker
    #[error("malformed PDU header")]
    MalformedHeader,
    /// Width marker is not one of the four integer markers
    #[error("bad size marker 0x{0:02x}")]
    BadSizeMarker(u8),
    /// Unknown type tag, or a tag that is not allowed at this position
    #[error("unsupported tag 0x{0:02x}")]
    UnsupportedTag(u8),
    /// Value has no wire representation
    #[error("value has no BSER representation")]
    UnsupportedValue,
    /// Negative or otherwise invalid declared count/length
    #[error("invalid length {0}")]
    InvalidLength(i64),
    /// Bytes left over after the top-level value of a body
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::TruncatedInput,
            kind => Error::IoFailure(kind),
        }
    }
}

/// Result type alias for BSER operations
pub type Result<T> = core::result::Result<T, Error>;
