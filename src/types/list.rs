use std::fmt;
use std::sync::{Arc, OnceLock};

use super::error::LoadError;
use super::fingerprint::Fingerprint;
use super::indirect::{IndirectValue, Loader};
use super::kind::ValueKind;
use super::value::Value;

/// An immutable ordered sequence of values.
///
/// Elements are held as [`IndirectValue`] slots, so a decoded list may
/// contain elements that are only loaded on access. Cloning is cheap and
/// shares the slots. Two lists are equal when their fingerprints are equal.
#[derive(Clone)]
pub struct List {
    inner: Arc<ListInner>,
}

struct ListInner {
    items: Vec<IndirectValue>,
    loader: Option<Arc<dyn Loader>>,
    encoding_length: u64,
    fingerprint: OnceLock<Fingerprint>,
}

impl List {
    pub fn new() -> Self {
        Self::from_indirect(Vec::new(), None)
    }

    /// Builds a list from slots, some of which may be deferred and resolved
    /// later through `loader`. The encoding length saturates at `u64::MAX`.
    pub fn from_indirect(items: Vec<IndirectValue>, loader: Option<Arc<dyn Loader>>) -> Self {
        let encoding_length = items
            .iter()
            .fold(2u64, |acc, slot| acc.saturating_add(slot.encoding_length()));
        Self::with_length(items, loader, encoding_length)
    }

    /// Like [`from_indirect`](Self::from_indirect), but returns `None` when
    /// the lengths recorded in deferred slots overflow a `u64`.
    pub fn try_from_indirect(
        items: Vec<IndirectValue>,
        loader: Option<Arc<dyn Loader>>,
    ) -> Option<Self> {
        let encoding_length = items
            .iter()
            .try_fold(2u64, |acc, slot| acc.checked_add(slot.encoding_length()))?;
        Some(Self::with_length(items, loader, encoding_length))
    }

    fn with_length(
        items: Vec<IndirectValue>,
        loader: Option<Arc<dyn Loader>>,
        encoding_length: u64,
    ) -> Self {
        List {
            inner: Arc::new(ListInner {
                items,
                loader,
                encoding_length,
                fingerprint: OnceLock::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    pub fn loader(&self) -> Option<&dyn Loader> {
        self.inner.loader.as_deref()
    }

    /// The element at `index`, loading it if necessary.
    pub fn get(&self, index: usize) -> Result<Option<&Value>, LoadError> {
        match self.inner.items.get(index) {
            Some(slot) => slot.get_value(self.loader()).map(Some),
            None => Ok(None),
        }
    }

    /// The slot at `index`, without loading it.
    pub fn indirect(&self, index: usize) -> Option<&IndirectValue> {
        self.inner.items.get(index)
    }

    pub fn indirect_values(&self) -> &[IndirectValue] {
        &self.inner.items
    }

    /// Iterates over elements, loading each one as it is reached.
    pub fn iter(&self) -> impl Iterator<Item = Result<&Value, LoadError>> + '_ {
        let loader = self.loader();
        self.inner.items.iter().map(move |slot| slot.get_value(loader))
    }

    /// Whether every element is available without a loader.
    pub fn is_fully_loaded(&self) -> bool {
        self.inner.items.iter().all(IndirectValue::is_loaded)
    }

    /// Returns a new list with `value` appended.
    pub fn push(&self, value: impl Into<Value>) -> List {
        let mut items = self.inner.items.clone();
        items.push(IndirectValue::loaded(value.into()));
        List::from_indirect(items, self.inner.loader.clone())
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::List
    }

    /// `l` + elements + `e`. Deferred elements count with the length
    /// recorded in their fingerprint.
    pub fn encoding_length(&self) -> u64 {
        self.inner.encoding_length
    }

    /// Computed from the elements' fingerprints on first use and cached.
    pub fn fingerprint(&self) -> Fingerprint {
        self.inner
            .fingerprint
            .get_or_init(|| {
                let children: Vec<Fingerprint> =
                    self.inner.items.iter().map(IndirectValue::fingerprint).collect();
                Fingerprint::of_children(ValueKind::List, self.inner.encoding_length, &children)
            })
            .clone()
    }
}

impl Default for List {
    fn default() -> Self {
        List::new()
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.fingerprint() == other.fingerprint()
    }
}

impl Eq for List {}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.items.iter()).finish()
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_indirect(iter.into_iter().map(IndirectValue::loaded).collect(), None)
    }
}
