//! Lazily loaded container slots.
//!
//! Lists and dictionaries store their children as [`IndirectValue`]s. A slot
//! is either loaded, holding the value itself, or deferred, holding only the
//! value's fingerprint. A deferred slot is resolved through a [`Loader`] the
//! first time its value is needed and keeps the loaded value afterwards.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

use super::error::LoadError;
use super::fingerprint::Fingerprint;
use super::kind::ValueKind;
use super::value::Value;

/// Resolves fingerprints to the values they identify.
///
/// A loader must be pure for a given fingerprint. Returning `None` means the
/// value is unknown to this loader.
pub trait Loader: Send + Sync {
    fn load(&self, fingerprint: &Fingerprint) -> Option<Value>;
}

impl<F> Loader for F
where
    F: Fn(&Fingerprint) -> Option<Value> + Send + Sync,
{
    fn load(&self, fingerprint: &Fingerprint) -> Option<Value> {
        self(fingerprint)
    }
}

enum Slot {
    Loaded(Value),
    Deferred {
        fingerprint: Fingerprint,
        cache: OnceLock<Value>,
        // Held while the loader runs so each slot is loaded at most once.
        loading: Mutex<()>,
    },
}

/// A container slot that is either a value or a fingerprint of one.
///
/// Resolution of a deferred slot is serialized per slot: concurrent callers
/// wait for the first load instead of invoking the loader again. Equality is
/// by fingerprint, so resolving a slot never changes how it compares.
pub struct IndirectValue(Slot);

impl IndirectValue {
    pub fn loaded(value: Value) -> Self {
        IndirectValue(Slot::Loaded(value))
    }

    pub fn deferred(fingerprint: Fingerprint) -> Self {
        IndirectValue(Slot::Deferred {
            fingerprint,
            cache: OnceLock::new(),
            loading: Mutex::new(()),
        })
    }

    /// The value, if it is available without calling a loader.
    pub fn loaded_value(&self) -> Option<&Value> {
        match &self.0 {
            Slot::Loaded(value) => Some(value),
            Slot::Deferred { cache, .. } => cache.get(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_value().is_some()
    }

    /// The fingerprint a deferred slot was created with. `None` for slots
    /// that were constructed from a value.
    pub fn deferred_fingerprint(&self) -> Option<&Fingerprint> {
        match &self.0 {
            Slot::Loaded(_) => None,
            Slot::Deferred { fingerprint, .. } => Some(fingerprint),
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        match &self.0 {
            Slot::Loaded(value) => value.fingerprint(),
            Slot::Deferred { fingerprint, .. } => fingerprint.clone(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match &self.0 {
            Slot::Loaded(value) => value.kind(),
            Slot::Deferred { fingerprint, .. } => fingerprint.kind(),
        }
    }

    pub fn encoding_length(&self) -> u64 {
        match &self.0 {
            Slot::Loaded(value) => value.encoding_length(),
            Slot::Deferred { fingerprint, .. } => fingerprint.encoding_length(),
        }
    }

    /// Returns the value, loading it through `loader` if the slot is deferred.
    ///
    /// The loaded value's fingerprint must equal the slot's; otherwise the
    /// result is [`LoadError::FingerprintMismatch`] and the slot stays
    /// deferred.
    pub fn get_value(&self, loader: Option<&dyn Loader>) -> Result<&Value, LoadError> {
        let (fingerprint, cache, loading) = match &self.0 {
            Slot::Loaded(value) => return Ok(value),
            Slot::Deferred {
                fingerprint,
                cache,
                loading,
            } => (fingerprint, cache, loading),
        };
        if let Some(value) = cache.get() {
            return Ok(value);
        }

        let loader = loader.ok_or_else(|| LoadError::NoLoader(fingerprint.clone()))?;
        let _guard = loading.lock();
        if let Some(value) = cache.get() {
            return Ok(value);
        }

        let value = loader
            .load(fingerprint)
            .ok_or_else(|| LoadError::NotFound(fingerprint.clone()))?;
        let actual = value.fingerprint();
        if &actual != fingerprint {
            return Err(LoadError::FingerprintMismatch {
                expected: fingerprint.clone(),
                actual,
            });
        }
        Ok(cache.get_or_init(|| value))
    }
}

impl Clone for IndirectValue {
    fn clone(&self) -> Self {
        match &self.0 {
            Slot::Loaded(value) => IndirectValue::loaded(value.clone()),
            Slot::Deferred {
                fingerprint, cache, ..
            } => IndirectValue(Slot::Deferred {
                fingerprint: fingerprint.clone(),
                cache: cache.clone(),
                loading: Mutex::new(()),
            }),
        }
    }
}

impl PartialEq for IndirectValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.loaded_value(), other.loaded_value()) {
            (Some(a), Some(b)) => a == b,
            _ => self.fingerprint() == other.fingerprint(),
        }
    }
}

impl Eq for IndirectValue {}

impl fmt::Debug for IndirectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.loaded_value() {
            Some(value) => fmt::Debug::fmt(value, f),
            None => write!(f, "Deferred({})", self.fingerprint()),
        }
    }
}

impl From<Value> for IndirectValue {
    fn from(value: Value) -> Self {
        IndirectValue::loaded(value)
    }
}
