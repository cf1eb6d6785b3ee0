//! Content fingerprints.
//!
//! A fingerprint identifies a value by `(kind, encoding length, digest)`
//! without requiring the value itself. Containers derive their digest from
//! their children's fingerprints, so a fingerprint can be computed for a tree
//! whose subtrees were never loaded.

use std::cmp::Ordering;
use std::fmt;

use bytes::{BufMut, Bytes};
use sha1::{Digest, Sha1};

use super::error::FingerprintError;
use super::kind::ValueKind;
use crate::byte_util::{compare_fingerprints, to_hex};
use crate::constants::{FINGERPRINT_HEADER_SIZE, INLINE_DIGEST_LIMIT};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    kind: ValueKind,
    encoding_length: u64,
    digest: Bytes,
}

impl Fingerprint {
    pub fn new(kind: ValueKind, encoding_length: u64, digest: impl Into<Bytes>) -> Self {
        Self {
            kind,
            encoding_length,
            digest: digest.into(),
        }
    }

    /// Fingerprint of a binary or text payload: the payload itself when it is
    /// short, otherwise its SHA-1.
    pub(crate) fn of_payload(kind: ValueKind, encoding_length: u64, payload: &[u8]) -> Self {
        let digest = if payload.len() <= INLINE_DIGEST_LIMIT {
            Bytes::copy_from_slice(payload)
        } else {
            Bytes::copy_from_slice(&Sha1::digest(payload))
        };
        Self::new(kind, encoding_length, digest)
    }

    /// Fingerprint of a container, hashing the serializations of its child
    /// fingerprints in order.
    pub(crate) fn of_children<'a>(
        kind: ValueKind,
        encoding_length: u64,
        children: impl IntoIterator<Item = &'a Fingerprint>,
    ) -> Self {
        let mut hasher = Sha1::new();
        let mut scratch = Vec::new();
        for child in children {
            scratch.clear();
            child.write_to(&mut scratch);
            hasher.update(&scratch);
        }
        Self::new(kind, encoding_length, Bytes::copy_from_slice(&hasher.finalize()))
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Exact byte length of the canonical encoding of the value.
    pub fn encoding_length(&self) -> u64 {
        self.encoding_length
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Serializes as `[kind][8-byte big-endian length][digest]`.
    ///
    /// ```
    /// use bencodex::{Fingerprint, ValueKind};
    ///
    /// let fp = Fingerprint::new(ValueKind::Binary, 7, &b"hello"[..]);
    /// let bytes = fp.serialize();
    /// assert_eq!(bytes[0], 3);
    /// assert_eq!(&bytes[1..9], &7u64.to_be_bytes());
    /// assert_eq!(&bytes[9..], b"hello");
    /// assert_eq!(Fingerprint::deserialize(&bytes).unwrap(), fp);
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut out);
        out
    }

    pub fn serialized_len(&self) -> usize {
        FINGERPRINT_HEADER_SIZE + self.digest.len()
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.put_u8(self.kind.as_byte());
        out.put_u64(self.encoding_length);
        out.put_slice(&self.digest);
    }

    /// Parses the form produced by [`serialize`](Self::serialize). Every byte
    /// after the header is taken as the digest.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, FingerprintError> {
        if bytes.len() < FINGERPRINT_HEADER_SIZE {
            return Err(FingerprintError::TooShort(bytes.len()));
        }
        let kind = ValueKind::try_from(bytes[0])?;
        let mut length = [0u8; 8];
        length.copy_from_slice(&bytes[1..FINGERPRINT_HEADER_SIZE]);
        Ok(Self::new(
            kind,
            u64::from_be_bytes(length),
            Bytes::copy_from_slice(&bytes[FINGERPRINT_HEADER_SIZE..]),
        ))
    }
}

impl PartialOrd for Fingerprint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fingerprint {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_fingerprints(self, other)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.kind,
            self.encoding_length,
            to_hex(&self.digest)
        )
    }
}
