//! # Codec Error Handling
//!
//! This module defines the `CodecError` enum, which represents the different error
//! types that can occur anywhere in the uwacomm-codec crate: field encode/decode,
//! schema construction, framing, the registry, and the mock modem transport.

use thiserror::Error;

/// Represents the different error kinds that can occur in the codec.
///
/// Every failure in this crate is a variant of this enum; there are no
/// string-matched errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// A value does not satisfy a field's declared bounds, or a varid/length
    /// computation overflowed its representable range.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// Ran out of bits or bytes while decoding.
    #[error("truncated input: {0}")]
    Truncated(String),

    /// The input had a well-formed length but invalid content (bad UTF-8, an
    /// out-of-range enum index, a malformed varid, or a bad checksum).
    #[error("corrupt value: {0}")]
    CorruptValue(String),

    /// A bad checksum, specifically — the `BadChecksum` sub-tag of `CorruptValue`.
    #[error("checksum mismatch: expected {expected:#06x}, calculated {calculated:#06x}")]
    BadChecksum { expected: u32, calculated: u32 },

    /// A decoded varid is not present in the message registry.
    #[error("unknown message id: {0}")]
    UnknownMessageId(u16),

    /// An encoded body exceeds a descriptor's declared `max_bytes`, or a
    /// transport's hard MTU.
    #[error("oversize message: {0}")]
    OversizeMessage(String),

    /// A descriptor was rejected at construction time.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A catch-all for adapter-boundary failures (I/O, JSON parsing, etc).
    #[error("other error: {0}")]
    Other(String),
}

impl CodecError {
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        CodecError::OutOfRange(msg.into())
    }

    pub fn truncated(msg: impl Into<String>) -> Self {
        CodecError::Truncated(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        CodecError::CorruptValue(msg.into())
    }

    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        CodecError::InvalidSchema(msg.into())
    }
}
