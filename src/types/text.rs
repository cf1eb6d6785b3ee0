use std::fmt;
use std::sync::Arc;

use super::fingerprint::Fingerprint;
use super::kind::ValueKind;
use crate::byte_util::compare_bytes;
use crate::codec::digits::decimal_len;

/// An immutable Unicode string. Lengths are measured in UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text(Arc<str>);

impl Text {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Text(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte length of the UTF-8 form.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `u<utf8-length>:<utf8-bytes>`.
    pub fn encoding_length(&self) -> u64 {
        let n = self.0.len() as u64;
        1 + decimal_len(n) as u64 + 1 + n
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of_payload(ValueKind::Text, self.encoding_length(), self.0.as_bytes())
    }
}

impl Default for Text {
    fn default() -> Self {
        Text(Arc::from(""))
    }
}

/// Ordinal order over the UTF-8 bytes.
impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        compare_bytes(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Text(Arc::from(text))
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Text(Arc::from(text))
    }
}
