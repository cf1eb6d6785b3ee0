use thiserror::Error;

use crate::types::{FingerprintError, LoadError};

/// Errors from decoding. Offsets count bytes from the start of the input.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected byte {byte:#04x} at offset {offset}, expected {expected}")]
    UnexpectedByte {
        byte: u8,
        offset: u64,
        expected: &'static str,
    },

    #[error("unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEnd { offset: u64, expected: &'static str },

    /// Empty digits, a leading zero, or `-0`.
    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: u64, reason: &'static str },

    #[error("invalid utf-8 in text at offset {offset}")]
    InvalidUtf8 { offset: u64 },

    #[error("length at offset {offset} does not fit in memory")]
    LengthOverflow { offset: u64 },

    #[error("duplicate dictionary key at offset {offset}")]
    DuplicateKey { offset: u64 },

    #[error("trailing byte {byte:#04x} at offset {offset} after value")]
    TrailingData { byte: u8, offset: u64 },

    #[error("nesting too deep at offset {offset}")]
    NestingTooDeep { offset: u64 },

    /// An offloaded fingerprint was found but no loader was supplied.
    #[error("offloaded value at offset {offset} but no loader was given")]
    MissingLoader { offset: u64 },

    #[error("invalid offloaded fingerprint at offset {offset}: {source}")]
    InvalidFingerprint {
        offset: u64,
        #[source]
        source: FingerprintError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A deferred slot had to be inlined but could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}
