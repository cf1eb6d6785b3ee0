//! Offloading policies.
//!
//! During an offloading encode, every list element and dictionary value is
//! offered to an [`OffloadOptions`] implementation. Slots it declines to
//! embed are handed to the policy so it can persist the value elsewhere,
//! then written as their fingerprint. A policy that fails aborts the encode.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::types::{Fingerprint, IndirectValue, LoadError, Loader, Value};

pub trait OffloadOptions {
    /// Whether `slot` is written inline. Returning `false` offloads it.
    fn embeds(&self, slot: &IndirectValue) -> bool;

    /// Called for each slot that was not embedded, before its fingerprint is
    /// written. `loader` is the owning container's loader, for slots that
    /// are themselves still deferred. An error aborts the encode.
    fn offload(&self, slot: &IndirectValue, loader: Option<&dyn Loader>) -> Result<(), LoadError>;
}

/// Offloads every slot whose encoding is at least `threshold` bytes and keeps
/// the offloaded values in memory.
///
/// The store is also a [`Loader`], so it can be handed back to the decoder to
/// resolve what it offloaded.
///
/// ```
/// use std::sync::Arc;
/// use bencodex::{Codec, List, MemoryOffloadStore, Value};
///
/// let big = Value::from(vec![7u8; 100]);
/// let value = Value::from(List::from(vec![Value::from(1), big.clone()]));
///
/// let store = Arc::new(MemoryOffloadStore::new(64));
/// let codec = Codec::new();
/// let encoded = codec.encode_with_offload(&value, store.as_ref()).unwrap();
/// assert!(encoded.len() < value.encoding_length() as usize);
/// assert_eq!(store.len(), 1);
///
/// let decoded = codec.decode_with_loader(&encoded, store.clone()).unwrap();
/// assert_eq!(decoded, value);
/// let list = decoded.as_list().unwrap();
/// assert_eq!(list.get(1).unwrap(), Some(&big));
/// ```
#[derive(Debug, Default)]
pub struct MemoryOffloadStore {
    threshold: u64,
    values: RwLock<HashMap<Fingerprint, Value>>,
}

impl MemoryOffloadStore {
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            values: RwLock::new(HashMap::new()),
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.values.read().contains_key(fingerprint)
    }

    /// Stores `value` under its fingerprint.
    pub fn insert(&self, value: Value) -> Fingerprint {
        let fingerprint = value.fingerprint();
        self.values.write().insert(fingerprint.clone(), value);
        fingerprint
    }
}

impl OffloadOptions for MemoryOffloadStore {
    fn embeds(&self, slot: &IndirectValue) -> bool {
        slot.encoding_length() < self.threshold
    }

    fn offload(&self, slot: &IndirectValue, loader: Option<&dyn Loader>) -> Result<(), LoadError> {
        let fingerprint = slot.fingerprint();
        if self.contains(&fingerprint) {
            return Ok(());
        }
        let value = slot.get_value(loader)?.clone();
        debug!(%fingerprint, "offloaded value");
        self.values.write().insert(fingerprint, value);
        Ok(())
    }
}

impl Loader for MemoryOffloadStore {
    fn load(&self, fingerprint: &Fingerprint) -> Option<Value> {
        self.values.read().get(fingerprint).cloned()
    }
}
