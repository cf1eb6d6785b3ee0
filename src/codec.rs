//! Bencodex encoding and decoding.
//!
//! [`Codec`] is the entry point; the free functions [`encode`] and [`decode`]
//! use a default-configured codec.
//!
//! # Examples
//!
//! ```
//! use bencodex::{decode, encode, Dictionary, List, Value};
//!
//! assert_eq!(encode(&Value::Null).unwrap(), b"n");
//! assert_eq!(encode(&Value::from(-456)).unwrap(), b"i-456e");
//! assert_eq!(encode(&Value::from(&b"hello"[..])).unwrap(), b"5:hello");
//!
//! let list = Value::from(List::from(vec![Value::from("a"), Value::from("b")]));
//! assert_eq!(encode(&list).unwrap(), b"lu1:au1:be");
//!
//! // Key order on the wire is canonical regardless of insertion order.
//! let ab = Dictionary::new().insert("a", 1).insert("b", 2);
//! let ba = Dictionary::new().insert("b", 2).insert("a", 1);
//! assert_eq!(encode(&Value::from(ab)).unwrap(), encode(&Value::from(ba)).unwrap());
//!
//! let value = decode(b"du1:ai1eu1:bi2ee").unwrap();
//! assert_eq!(value.get("b").and_then(Value::as_i64), Some(2));
//! ```
//!
//! # Error Handling
//!
//! Decoding is all-or-nothing. Every [`DecodeError`] carries the byte offset
//! of the problem:
//!
//! - [`DecodeError::UnexpectedByte`] - a byte that cannot start or continue the current item
//! - [`DecodeError::UnexpectedEnd`] - input ended in the middle of a value
//! - [`DecodeError::InvalidInteger`] - `ie`, `i00e`, `i-0e` and similar
//! - [`DecodeError::TrailingData`] - bytes after the top-level value

pub(crate) mod digits;

mod decode;
mod encode;
mod error;
mod offload;

use std::io::{BufReader, BufWriter, Read, Write};
use std::sync::Arc;

use tracing::trace_span;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_STREAM_THRESHOLD};
use crate::types::{Loader, Value};
use decode::Decoder;
use encode::{encode_buffered, StreamEncoder};

pub use error::{DecodeError, EncodeError};
pub use offload::{MemoryOffloadStore, OffloadOptions};

/// Tuning for a [`Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Encodings up to this many bytes are produced in one pre-sized buffer;
    /// larger containers are streamed one element at a time.
    pub stream_threshold: usize,
    /// Deepest list/dictionary nesting the decoder accepts.
    pub max_depth: usize,
}

impl CodecOptions {
    pub fn with_stream_threshold(mut self, stream_threshold: usize) -> Self {
        self.stream_threshold = stream_threshold;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            stream_threshold: DEFAULT_STREAM_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encodes and decodes Bencodex values.
///
/// Entry points open `trace`-level spans named `bencodex.encode` and
/// `bencodex.decode`; install a `tracing` subscriber to record them.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encodes `value` to a byte vector.
    ///
    /// # Errors
    ///
    /// Fails only if `value` contains a deferred slot that cannot be loaded.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let length = value.encoding_length();
        if length <= self.options.stream_threshold as u64 {
            let _span = trace_span!("bencodex.encode", length, strategy = "buffer").entered();
            return Ok(encode_buffered(value)?);
        }

        let _span = trace_span!("bencodex.encode", length, strategy = "stream").entered();
        // Deferred slots report the length in their fingerprint, which is
        // not trusted until they load.
        let mut out = Vec::with_capacity(length.min(self.options.stream_threshold as u64) as usize);
        StreamEncoder::new(self.options.stream_threshold, None).write_value(value, &mut out)?;
        Ok(out)
    }

    /// Encodes `value` into `sink`. The sink is not closed.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if writing fails, or
    /// [`EncodeError::Load`] if a deferred slot cannot be loaded. Bytes
    /// already written stay in the sink.
    pub fn encode_to<W: Write>(&self, value: &Value, mut sink: W) -> Result<(), EncodeError> {
        let length = value.encoding_length();
        if length <= self.options.stream_threshold as u64 {
            let _span = trace_span!("bencodex.encode", length, strategy = "buffer").entered();
            sink.write_all(&encode_buffered(value)?)?;
            sink.flush()?;
            return Ok(());
        }

        let _span = trace_span!("bencodex.encode", length, strategy = "stream").entered();
        self.stream(value, None, sink)
    }

    /// Encodes `value`, replacing slots that `offload` declines to embed with
    /// their fingerprints.
    pub fn encode_with_offload(
        &self,
        value: &Value,
        offload: &dyn OffloadOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        let length = value.encoding_length();
        let _span = trace_span!("bencodex.encode", length, strategy = "offload").entered();
        let mut out = Vec::with_capacity(length.min(self.options.stream_threshold as u64) as usize);
        StreamEncoder::new(self.options.stream_threshold, Some(offload))
            .write_value(value, &mut out)?;
        Ok(out)
    }

    /// Offloading variant of [`encode_to`](Self::encode_to).
    pub fn encode_to_with_offload<W: Write>(
        &self,
        value: &Value,
        offload: &dyn OffloadOptions,
        sink: W,
    ) -> Result<(), EncodeError> {
        let length = value.encoding_length();
        let _span = trace_span!("bencodex.encode", length, strategy = "offload").entered();
        self.stream(value, Some(offload), sink)
    }

    fn stream<W: Write>(
        &self,
        value: &Value,
        offload: Option<&dyn OffloadOptions>,
        sink: W,
    ) -> Result<(), EncodeError> {
        let mut out = BufWriter::with_capacity(self.options.stream_threshold.max(1), sink);
        StreamEncoder::new(self.options.stream_threshold, offload).write_value(value, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Decodes exactly one value from `data`.
    ///
    /// # Errors
    ///
    /// Any malformed input, including trailing bytes after the value, and any
    /// offloaded fingerprint (there is no loader to resolve it).
    pub fn decode(&self, data: &[u8]) -> Result<Value, DecodeError> {
        self.decode_buffered(data, None)
    }

    /// Decodes exactly one value from `source`, which must end right after it.
    pub fn decode_from<R: Read>(&self, source: R) -> Result<Value, DecodeError> {
        self.decode_buffered(BufReader::new(source), None)
    }

    /// Decodes a value that may contain offloaded fingerprints. Those slots
    /// stay deferred until accessed and are then resolved through `loader`.
    pub fn decode_with_loader(
        &self,
        data: &[u8],
        loader: Arc<dyn Loader>,
    ) -> Result<Value, DecodeError> {
        self.decode_buffered(data, Some(loader))
    }

    pub fn decode_from_with_loader<R: Read>(
        &self,
        source: R,
        loader: Arc<dyn Loader>,
    ) -> Result<Value, DecodeError> {
        self.decode_buffered(BufReader::new(source), Some(loader))
    }

    fn decode_buffered<R: std::io::BufRead>(
        &self,
        reader: R,
        loader: Option<Arc<dyn Loader>>,
    ) -> Result<Value, DecodeError> {
        let span = trace_span!("bencodex.decode", consumed = tracing::field::Empty);
        let _enter = span.enter();
        let (value, consumed) =
            Decoder::new(reader, self.options.max_depth, loader).decode_document()?;
        span.record("consumed", consumed);
        Ok(value)
    }
}

/// Encodes `value` with the default [`Codec`].
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Codec::new().encode(value)
}

/// Decodes `data` with the default [`Codec`].
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    Codec::new().decode(data)
}
