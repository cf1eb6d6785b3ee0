use bytes::Bytes;
use num_bigint::BigInt;

use super::binary::Binary;
use super::dictionary::Dictionary;
use super::fingerprint::Fingerprint;
use super::integer::Integer;
use super::key::Key;
use super::kind::ValueKind;
use super::list::List;
use super::text::Text;

/// A Bencodex value.
///
/// Scalars compare by value. Lists and dictionaries compare by fingerprint,
/// which does not require loading deferred children.
///
/// # Examples
///
/// ```
/// use bencodex::{List, Value};
///
/// let int: Value = 42.into();
/// let text: Value = "hello".into();
/// let bytes: Value = b"raw".to_vec().into();
/// let list = Value::List(List::from(vec![int.clone(), text.clone()]));
///
/// assert_eq!(int.as_i64(), Some(42));
/// assert_eq!(text.as_str(), Some("hello"));
/// assert_eq!(bytes.as_bytes().map(|b| b.as_ref()), Some(b"raw".as_slice()));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(Integer),
    Binary(Binary),
    Text(Text),
    List(List),
    Dictionary(Dictionary),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Binary(_) => ValueKind::Binary,
            Value::Text(_) => ValueKind::Text,
            Value::List(_) => ValueKind::List,
            Value::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    /// Exact byte length of the canonical encoding.
    pub fn encoding_length(&self) -> u64 {
        match self {
            Value::Null | Value::Boolean(_) => 1,
            Value::Integer(i) => i.encoding_length(),
            Value::Binary(b) => b.encoding_length(),
            Value::Text(t) => t.encoding_length(),
            Value::List(l) => l.encoding_length(),
            Value::Dictionary(d) => d.encoding_length(),
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        match self {
            Value::Null => Fingerprint::new(ValueKind::Null, 1, Bytes::new()),
            Value::Boolean(b) => {
                let digest: &'static [u8] = if *b { b"\x01" } else { b"\x00" };
                Fingerprint::new(ValueKind::Boolean, 1, Bytes::from_static(digest))
            }
            Value::Integer(i) => i.fingerprint(),
            Value::Binary(b) => b.fingerprint(),
            Value::Text(t) => t.fingerprint(),
            Value::List(l) => l.fingerprint(),
            Value::Dictionary(d) => d.fingerprint(),
        }
    }

    /// Renders a human-readable form. Deferred children render as their
    /// fingerprint unless `load_all` is set, in which case they are loaded
    /// first (falling back to the fingerprint if loading fails).
    ///
    /// ```
    /// use bencodex::{Dictionary, Value};
    ///
    /// let value = Value::from(Dictionary::new().insert("a", 1).insert(&b"k"[..], true));
    /// assert_eq!(value.inspect(false), "{\n  b\"\\x6b\": true,\n  \"a\": 1,\n}");
    /// ```
    pub fn inspect(&self, load_all: bool) -> String {
        super::inspect::inspect(self, load_all)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the integer if it is one and fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()?.to_i64()
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        self.as_binary().map(Binary::as_bytes)
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_text().map(Text::as_str)
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_dictionary(self) -> Option<Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this is a dictionary. Deferred values that cannot be
    /// loaded are reported as absent; use [`Dictionary::get`] to see the
    /// load error.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.as_dictionary()?.get(key).ok().flatten()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inspect(false))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! value_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(Integer::from(i))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

impl From<Integer> for Value {
    fn from(i: Integer) -> Self {
        Value::Integer(i)
    }
}

impl From<Binary> for Value {
    fn from(b: Binary) -> Self {
        Value::Binary(b)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Binary(Binary::from(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(Binary::from(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Binary(Binary::from_slice(b))
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::Text(t)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Text::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Text::from(s))
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Binary(b) => Value::Binary(b),
            Key::Text(t) => Value::Text(t),
        }
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(List::from(values))
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dictionary(d)
    }
}
