//! bencodex - A Bencodex codec
//!
//! Bencodex is a deterministic, self-describing binary serialization format
//! and a typed superset of Bencoding. This crate provides the value model,
//! content fingerprints, lazily loaded container slots, and an encoder and
//! decoder that can offload large subvalues by fingerprint.
//!
//! # Modules
//!
//! - [`types`] - Values, keys, fingerprints and indirect slots
//! - [`codec`] - Encoding, decoding and offloading
//! - [`byte_util`] - Hex conversion and byte-array comparators
//! - [`constants`] - Wire tags and tuning defaults

pub mod byte_util;
pub mod codec;
pub mod constants;
pub mod types;

pub use codec::{
    decode, encode, Codec, CodecOptions, DecodeError, EncodeError, MemoryOffloadStore,
    OffloadOptions,
};
pub use types::{
    Binary, Dictionary, Fingerprint, FingerprintError, IndirectValue, Integer, Key, List,
    LoadError, Loader, Text, Value, ValueKind,
};
