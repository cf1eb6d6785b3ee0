use bytes::Bytes;

use super::fingerprint::Fingerprint;
use super::kind::ValueKind;
use crate::byte_util::compare_bytes;
use crate::codec::digits::decimal_len;

/// An immutable byte string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary(Bytes);

impl Binary {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Binary(bytes.into())
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Binary(Bytes::copy_from_slice(bytes))
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `<length>:<bytes>`.
    pub fn encoding_length(&self) -> u64 {
        let n = self.0.len() as u64;
        decimal_len(n) as u64 + 1 + n
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of_payload(ValueKind::Binary, self.encoding_length(), &self.0)
    }
}

impl PartialOrd for Binary {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Binary {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        compare_bytes(&self.0, &other.0)
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for Binary {
    fn from(bytes: Bytes) -> Self {
        Binary(bytes)
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Binary::from_slice(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for Binary {
    fn from(bytes: &[u8; N]) -> Self {
        Binary::from_slice(bytes)
    }
}
