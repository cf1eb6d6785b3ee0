//! Format constants and tuning parameters.
//!
//! Wire tags are fixed by the Bencodex format. The tuning values control the
//! encoder's strategy selection and the decoder's recursion limit and can be
//! overridden per [`Codec`](crate::Codec) through
//! [`CodecOptions`](crate::CodecOptions).

// ============================================================================
// Wire tags
// ============================================================================

pub const NULL_TAG: u8 = b'n';
pub const TRUE_TAG: u8 = b't';
pub const FALSE_TAG: u8 = b'f';
pub const INTEGER_TAG: u8 = b'i';
pub const TEXT_TAG: u8 = b'u';
pub const LIST_TAG: u8 = b'l';
pub const DICTIONARY_TAG: u8 = b'd';
pub const END_TAG: u8 = b'e';
pub const LENGTH_SEPARATOR: u8 = b':';
pub const NEGATIVE_SIGN: u8 = b'-';

/// Marks a list element or dictionary value that was replaced by its
/// fingerprint during an offloading encode.
pub const OFFLOAD_TAG: u8 = b'*';

// ============================================================================
// Fingerprints
// ============================================================================

/// Size of a SHA-1 digest.
pub const DIGEST_SIZE: usize = 20;

/// Binary and text payloads up to this many bytes are used as their own
/// fingerprint digest; longer payloads are hashed.
pub const INLINE_DIGEST_LIMIT: usize = DIGEST_SIZE;

/// Kind byte plus 8-byte big-endian encoding length.
pub const FINGERPRINT_HEADER_SIZE: usize = 9;

// ============================================================================
// Tuning
// ============================================================================

/// Values whose encoding is at most this many bytes are encoded into a single
/// pre-sized buffer. Larger containers are streamed element by element.
pub const DEFAULT_STREAM_THRESHOLD: usize = 4096;

/// Maximum list/dictionary nesting accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 512;
