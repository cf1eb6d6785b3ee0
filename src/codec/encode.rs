use std::io::Write;

use super::digits::{write_bigint, write_decimal};
use super::error::EncodeError;
use super::offload::OffloadOptions;
use crate::constants::{
    DICTIONARY_TAG, END_TAG, FALSE_TAG, INTEGER_TAG, LENGTH_SEPARATOR, LIST_TAG, NULL_TAG,
    OFFLOAD_TAG, TEXT_TAG, TRUE_TAG,
};
use crate::types::{Fingerprint, IndirectValue, Key, LoadError, Loader, Value};

// Longest `u<u64 digits>:` header.
const MAX_HEADER_LEN: usize = 22;

/// Encodes `value` into a single buffer sized from its encoding length.
///
/// Deferred slots are loaded through their container's loader.
pub(crate) fn encode_buffered(value: &Value) -> Result<Vec<u8>, LoadError> {
    let len = value.encoding_length() as usize;
    let mut buf = vec![0u8; len];
    let end = fill_value(value, &mut buf, 0)?;
    debug_assert_eq!(end, len, "encoding length disagrees with encoder");
    Ok(buf)
}

fn fill_value(value: &Value, buf: &mut [u8], mut pos: usize) -> Result<usize, LoadError> {
    match value {
        Value::Null => {
            buf[pos] = NULL_TAG;
            Ok(pos + 1)
        }
        Value::Boolean(b) => {
            buf[pos] = if *b { TRUE_TAG } else { FALSE_TAG };
            Ok(pos + 1)
        }
        Value::Integer(i) => {
            buf[pos] = INTEGER_TAG;
            pos += 1;
            pos += write_bigint(i.value(), &mut buf[pos..]);
            buf[pos] = END_TAG;
            Ok(pos + 1)
        }
        Value::Binary(b) => Ok(fill_payload(None, b.as_slice(), buf, pos)),
        Value::Text(t) => Ok(fill_payload(Some(TEXT_TAG), t.as_str().as_bytes(), buf, pos)),
        Value::List(list) => {
            buf[pos] = LIST_TAG;
            pos += 1;
            for slot in list.indirect_values() {
                pos = fill_value(slot.get_value(list.loader())?, buf, pos)?;
            }
            buf[pos] = END_TAG;
            Ok(pos + 1)
        }
        Value::Dictionary(dict) => {
            buf[pos] = DICTIONARY_TAG;
            pos += 1;
            for (key, slot) in dict.indirect_entries() {
                pos = fill_key(key, buf, pos);
                pos = fill_value(slot.get_value(dict.loader())?, buf, pos)?;
            }
            buf[pos] = END_TAG;
            Ok(pos + 1)
        }
    }
}

fn fill_key(key: &Key, buf: &mut [u8], pos: usize) -> usize {
    match key {
        Key::Binary(b) => fill_payload(None, b.as_slice(), buf, pos),
        Key::Text(t) => fill_payload(Some(TEXT_TAG), t.as_str().as_bytes(), buf, pos),
    }
}

/// Writes `[tag]<len>:<payload>`.
fn fill_payload(tag: Option<u8>, payload: &[u8], buf: &mut [u8], mut pos: usize) -> usize {
    pos = fill_header(tag, payload.len() as u64, buf, pos);
    buf[pos..pos + payload.len()].copy_from_slice(payload);
    pos + payload.len()
}

fn fill_header(tag: Option<u8>, len: u64, buf: &mut [u8], mut pos: usize) -> usize {
    if let Some(tag) = tag {
        buf[pos] = tag;
        pos += 1;
    }
    pos += write_decimal(len, &mut buf[pos..]);
    buf[pos] = LENGTH_SEPARATOR;
    pos + 1
}

/// Writes values to a sink piece by piece.
///
/// Subvalues at or under `threshold` bytes go through [`encode_buffered`] and
/// a single write; larger ones are streamed recursively, and large binary or
/// text payloads are written straight from the value without copying. With
/// an offload policy, every slot is first offered to
/// [`OffloadOptions::embeds`].
pub(crate) struct StreamEncoder<'a> {
    threshold: u64,
    offload: Option<&'a dyn OffloadOptions>,
}

impl<'a> StreamEncoder<'a> {
    pub(crate) fn new(threshold: usize, offload: Option<&'a dyn OffloadOptions>) -> Self {
        Self {
            threshold: threshold as u64,
            offload,
        }
    }

    pub(crate) fn write_value<W: Write>(
        &self,
        value: &Value,
        out: &mut W,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Binary(b) => self.write_payload(None, b.as_slice(), out),
            Value::Text(t) => self.write_payload(Some(TEXT_TAG), t.as_str().as_bytes(), out),
            Value::List(list) => {
                out.write_all(&[LIST_TAG])?;
                for slot in list.indirect_values() {
                    self.write_slot(slot, list.loader(), out)?;
                }
                out.write_all(&[END_TAG])?;
                Ok(())
            }
            Value::Dictionary(dict) => {
                out.write_all(&[DICTIONARY_TAG])?;
                for (key, slot) in dict.indirect_entries() {
                    match key {
                        Key::Binary(b) => self.write_payload(None, b.as_slice(), out)?,
                        Key::Text(t) => {
                            self.write_payload(Some(TEXT_TAG), t.as_str().as_bytes(), out)?
                        }
                    }
                    self.write_slot(slot, dict.loader(), out)?;
                }
                out.write_all(&[END_TAG])?;
                Ok(())
            }
            Value::Null | Value::Boolean(_) | Value::Integer(_) => {
                out.write_all(&encode_buffered(value)?)?;
                Ok(())
            }
        }
    }

    fn write_slot<W: Write>(
        &self,
        slot: &IndirectValue,
        loader: Option<&dyn Loader>,
        out: &mut W,
    ) -> Result<(), EncodeError> {
        if let Some(offload) = self.offload {
            if !offload.embeds(slot) {
                offload.offload(slot, loader)?;
                write_offloaded(&slot.fingerprint(), out)?;
                return Ok(());
            }
        }

        let value = slot.get_value(loader)?;
        // Nested containers must be walked when offloading so their own
        // slots are offered to the policy.
        let walk = self.offload.is_some() && value.kind().is_container();
        if !walk && value.encoding_length() <= self.threshold {
            out.write_all(&encode_buffered(value)?)?;
            Ok(())
        } else {
            self.write_value(value, out)
        }
    }

    fn write_payload<W: Write>(
        &self,
        tag: Option<u8>,
        payload: &[u8],
        out: &mut W,
    ) -> Result<(), EncodeError> {
        let mut header = [0u8; MAX_HEADER_LEN];
        let len = fill_header(tag, payload.len() as u64, &mut header, 0);
        out.write_all(&header[..len])?;
        out.write_all(payload)?;
        Ok(())
    }
}

/// `*` followed by the serialized fingerprint as a binary.
fn write_offloaded<W: Write>(fingerprint: &Fingerprint, out: &mut W) -> std::io::Result<()> {
    let serialized = fingerprint.serialize();
    let mut header = [0u8; MAX_HEADER_LEN];
    header[0] = OFFLOAD_TAG;
    let len = fill_header(None, serialized.len() as u64, &mut header, 1);
    out.write_all(&header[..len])?;
    out.write_all(&serialized)
}
