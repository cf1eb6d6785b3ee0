use thiserror::Error;

use super::fingerprint::Fingerprint;

/// Errors from parsing a serialized [`Fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerprintError {
    /// Fewer than the 9 header bytes were supplied.
    #[error("serialized fingerprint too short: {0} bytes")]
    TooShort(usize),

    /// The leading byte is not a known value kind.
    #[error("unknown value kind byte: {0:#04x}")]
    UnknownKind(u8),
}

/// Errors from resolving a deferred slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The slot is deferred and its container has no loader.
    #[error("no loader available for {0}")]
    NoLoader(Fingerprint),

    /// The loader has no value for the fingerprint.
    #[error("loader has no value for {0}")]
    NotFound(Fingerprint),

    /// The loader returned a value with a different fingerprint.
    #[error("fingerprint mismatch: expected {expected}, loaded {actual}")]
    FingerprintMismatch {
        expected: Fingerprint,
        actual: Fingerprint,
    },
}
