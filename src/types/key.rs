use std::cmp::Ordering;
use std::fmt;

use bytes::Bytes;

use super::binary::Binary;
use super::fingerprint::Fingerprint;
use super::kind::ValueKind;
use super::text::Text;

/// A dictionary key.
///
/// Keys sort in canonical order: every binary key before every text key,
/// each group ordered lexicographically by its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Binary(Binary),
    Text(Text),
}

impl Key {
    pub fn kind(&self) -> ValueKind {
        match self {
            Key::Binary(_) => ValueKind::Binary,
            Key::Text(_) => ValueKind::Text,
        }
    }

    pub fn encoding_length(&self) -> u64 {
        match self {
            Key::Binary(b) => b.encoding_length(),
            Key::Text(t) => t.encoding_length(),
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        match self {
            Key::Binary(b) => b.fingerprint(),
            Key::Text(t) => t.fingerprint(),
        }
    }

    /// Raw payload bytes (UTF-8 for text keys).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Key::Binary(b) => b.as_slice(),
            Key::Text(t) => t.as_str().as_bytes(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Text(t) => Some(t.as_str()),
            Key::Binary(_) => None,
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Binary(a), Key::Binary(b)) => a.cmp(b),
            (Key::Text(a), Key::Text(b)) => a.cmp(b),
            (Key::Binary(_), Key::Text(_)) => Ordering::Less,
            (Key::Text(_), Key::Binary(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Binary(b) => super::inspect::write_binary(f, b.as_slice()),
            Key::Text(t) => write!(f, "{:?}", t.as_str()),
        }
    }
}

impl From<Binary> for Key {
    fn from(b: Binary) -> Self {
        Key::Binary(b)
    }
}

impl From<Text> for Key {
    fn from(t: Text) -> Self {
        Key::Text(t)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(Text::from(s))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(Text::from(s))
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key::Binary(Binary::from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(b: &[u8; N]) -> Self {
        Key::Binary(Binary::from_slice(b))
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key::Binary(Binary::from(b))
    }
}

impl From<Bytes> for Key {
    fn from(b: Bytes) -> Self {
        Key::Binary(Binary::from(b))
    }
}
