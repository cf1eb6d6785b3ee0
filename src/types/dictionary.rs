use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::error::LoadError;
use super::fingerprint::Fingerprint;
use super::indirect::{IndirectValue, Loader};
use super::key::Key;
use super::kind::ValueKind;
use super::value::Value;

/// An immutable mapping from [`Key`]s to values.
///
/// Entries are kept in canonical key order, so iteration and encoding never
/// depend on insertion order. Values are [`IndirectValue`] slots; keys are
/// always loaded. Two dictionaries are equal when their fingerprints are
/// equal.
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<DictionaryInner>,
}

struct DictionaryInner {
    entries: BTreeMap<Key, IndirectValue>,
    loader: Option<Arc<dyn Loader>>,
    encoding_length: u64,
    fingerprint: OnceLock<Fingerprint>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::from_indirect(BTreeMap::new(), None)
    }

    /// The encoding length saturates at `u64::MAX`.
    pub fn from_indirect(
        entries: BTreeMap<Key, IndirectValue>,
        loader: Option<Arc<dyn Loader>>,
    ) -> Self {
        let encoding_length = entries.iter().fold(2u64, |acc, (k, v)| {
            acc.saturating_add(k.encoding_length())
                .saturating_add(v.encoding_length())
        });
        Self::with_length(entries, loader, encoding_length)
    }

    /// Like [`from_indirect`](Self::from_indirect), but returns `None` when
    /// the lengths recorded in deferred slots overflow a `u64`.
    pub fn try_from_indirect(
        entries: BTreeMap<Key, IndirectValue>,
        loader: Option<Arc<dyn Loader>>,
    ) -> Option<Self> {
        let encoding_length = entries.iter().try_fold(2u64, |acc, (k, v)| {
            acc.checked_add(k.encoding_length())?
                .checked_add(v.encoding_length())
        })?;
        Some(Self::with_length(entries, loader, encoding_length))
    }

    fn with_length(
        entries: BTreeMap<Key, IndirectValue>,
        loader: Option<Arc<dyn Loader>>,
        encoding_length: u64,
    ) -> Self {
        Dictionary {
            inner: Arc::new(DictionaryInner {
                entries,
                loader,
                encoding_length,
                fingerprint: OnceLock::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn loader(&self) -> Option<&dyn Loader> {
        self.inner.loader.as_deref()
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.inner.entries.contains_key(&key.into())
    }

    /// The value under `key`, loading it if necessary.
    ///
    /// ```
    /// use bencodex::{Dictionary, Value};
    ///
    /// let dict = Dictionary::new().insert("name", "bencodex").insert(&b"raw"[..], 7);
    /// assert_eq!(dict.get("name").unwrap().and_then(Value::as_str), Some("bencodex"));
    /// assert_eq!(dict.get(&b"raw"[..]).unwrap().and_then(Value::as_i64), Some(7));
    /// assert!(dict.get("missing").unwrap().is_none());
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<&Value>, LoadError> {
        match self.inner.entries.get(&key.into()) {
            Some(slot) => slot.get_value(self.loader()).map(Some),
            None => Ok(None),
        }
    }

    /// The slot under `key`, without loading it.
    pub fn indirect(&self, key: impl Into<Key>) -> Option<&IndirectValue> {
        self.inner.entries.get(&key.into())
    }

    pub fn indirect_entries(&self) -> &BTreeMap<Key, IndirectValue> {
        &self.inner.entries
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.inner.entries.keys()
    }

    /// Entries in canonical key order, loading each value as it is reached.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, Result<&Value, LoadError>)> + '_ {
        let loader = self.loader();
        self.inner
            .entries
            .iter()
            .map(move |(k, slot)| (k, slot.get_value(loader)))
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.inner.entries.values().all(IndirectValue::is_loaded)
    }

    /// Returns a new dictionary with `key` set to `value`, replacing any
    /// previous value.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Dictionary {
        let mut entries = self.inner.entries.clone();
        entries.insert(key.into(), IndirectValue::loaded(value.into()));
        Dictionary::from_indirect(entries, self.inner.loader.clone())
    }

    /// Returns a new dictionary without `key`.
    pub fn remove(&self, key: impl Into<Key>) -> Dictionary {
        let mut entries = self.inner.entries.clone();
        entries.remove(&key.into());
        Dictionary::from_indirect(entries, self.inner.loader.clone())
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::Dictionary
    }

    pub fn encoding_length(&self) -> u64 {
        self.inner.encoding_length
    }

    /// Hashes each key's fingerprint followed by its value's, in canonical
    /// key order. Cached after the first call.
    pub fn fingerprint(&self) -> Fingerprint {
        self.inner
            .fingerprint
            .get_or_init(|| {
                let children: Vec<Fingerprint> = self
                    .inner
                    .entries
                    .iter()
                    .flat_map(|(k, v)| [k.fingerprint(), v.fingerprint()])
                    .collect();
                Fingerprint::of_children(
                    ValueKind::Dictionary,
                    self.inner.encoding_length,
                    &children,
                )
            })
            .clone()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary::new()
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.fingerprint() == other.fingerprint()
    }
}

impl Eq for Dictionary {}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.entries.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<Key>,
    V: Into<Value>,
{
    /// Later pairs replace earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), IndirectValue::loaded(v.into())))
            .collect();
        Dictionary::from_indirect(entries, None)
    }
}

impl<K: Into<Key>, V: Into<Value>> From<Vec<(K, V)>> for Dictionary {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}
