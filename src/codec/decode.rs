use std::collections::BTreeMap;
use std::io::{BufRead, Read};
use std::sync::Arc;

use num_bigint::BigInt;

use super::error::DecodeError;
use crate::constants::{
    DICTIONARY_TAG, END_TAG, FALSE_TAG, INTEGER_TAG, LENGTH_SEPARATOR, LIST_TAG, NEGATIVE_SIGN,
    NULL_TAG, OFFLOAD_TAG, TEXT_TAG, TRUE_TAG,
};
use crate::types::{
    Binary, Dictionary, Fingerprint, IndirectValue, Integer, Key, List, Loader, Text, Value,
};

// Payload buffers grow past this as bytes actually arrive, so a huge length
// prefix on a short stream does not allocate up front.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Single-pass recursive-descent parser over a buffered reader.
///
/// The reader's buffer provides the one byte of lookahead the format needs.
pub(crate) struct Decoder<R> {
    reader: R,
    offset: u64,
    max_depth: usize,
    loader: Option<Arc<dyn Loader>>,
}

impl<R: BufRead> Decoder<R> {
    pub(crate) fn new(reader: R, max_depth: usize, loader: Option<Arc<dyn Loader>>) -> Self {
        Self {
            reader,
            offset: 0,
            max_depth,
            loader,
        }
    }

    /// Decodes exactly one value and rejects anything after it.
    pub(crate) fn decode_document(mut self) -> Result<(Value, u64), DecodeError> {
        let value = self.decode_value(0)?;
        if let Some(byte) = self.peek()? {
            return Err(DecodeError::TrailingData {
                byte,
                offset: self.offset,
            });
        }
        Ok((value, self.offset))
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let offset = self.offset;
        match self.peek()? {
            None => Err(DecodeError::UnexpectedEnd {
                offset,
                expected: "value",
            }),
            Some(NULL_TAG) => {
                self.bump();
                Ok(Value::Null)
            }
            Some(TRUE_TAG) => {
                self.bump();
                Ok(Value::Boolean(true))
            }
            Some(FALSE_TAG) => {
                self.bump();
                Ok(Value::Boolean(false))
            }
            Some(INTEGER_TAG) => self.decode_integer(),
            Some(TEXT_TAG) => {
                self.bump();
                Ok(Value::Text(self.decode_text_body()?))
            }
            Some(b'0'..=b'9') => Ok(Value::Binary(self.decode_binary()?)),
            Some(LIST_TAG) => self.decode_list(depth),
            Some(DICTIONARY_TAG) => self.decode_dictionary(depth),
            Some(byte) => Err(DecodeError::UnexpectedByte {
                byte,
                offset,
                expected: "value",
            }),
        }
    }

    fn decode_integer(&mut self) -> Result<Value, DecodeError> {
        let offset = self.offset;
        self.bump();

        let negative = self.peek()? == Some(NEGATIVE_SIGN);
        if negative {
            self.bump();
        }

        let digits = self.read_digits(END_TAG, "integer digit or 'e'")?;
        let invalid = |reason| DecodeError::InvalidInteger { offset, reason };
        if digits.is_empty() {
            return Err(invalid("no digits"));
        }
        if digits[0] == b'0' && digits.len() > 1 {
            return Err(invalid("leading zero"));
        }
        if negative && digits == b"0" {
            return Err(invalid("negative zero"));
        }

        let magnitude = BigInt::parse_bytes(&digits, 10).ok_or_else(|| invalid("not a number"))?;
        let value = if negative { -magnitude } else { magnitude };
        Ok(Value::Integer(Integer::from(value)))
    }

    /// Reads ASCII digits up to and including `terminator`.
    fn read_digits(
        &mut self,
        terminator: u8,
        expected: &'static str,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut digits = Vec::new();
        loop {
            let offset = self.offset;
            match self.peek()? {
                Some(byte) if byte.is_ascii_digit() => {
                    digits.push(byte);
                    self.bump();
                }
                Some(byte) if byte == terminator => {
                    self.bump();
                    return Ok(digits);
                }
                Some(byte) => {
                    return Err(DecodeError::UnexpectedByte {
                        byte,
                        offset,
                        expected,
                    })
                }
                None => return Err(DecodeError::UnexpectedEnd { offset, expected }),
            }
        }
    }

    /// Reads `<digits>:` and returns the length.
    fn read_length(&mut self) -> Result<usize, DecodeError> {
        let offset = self.offset;
        match self.peek()? {
            Some(byte) if byte.is_ascii_digit() => {}
            Some(byte) => {
                return Err(DecodeError::UnexpectedByte {
                    byte,
                    offset,
                    expected: "length digit",
                })
            }
            None => {
                return Err(DecodeError::UnexpectedEnd {
                    offset,
                    expected: "length digit",
                })
            }
        }

        let digits = self.read_digits(LENGTH_SEPARATOR, "length digit or ':'")?;
        digits
            .iter()
            .try_fold(0usize, |acc, &d| {
                acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
            })
            .ok_or(DecodeError::LengthOverflow { offset })
    }

    fn read_payload(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        self.offset += buf.len() as u64;
        if buf.len() < len {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.offset,
                expected: "payload byte",
            });
        }
        Ok(buf)
    }

    fn decode_binary(&mut self) -> Result<Binary, DecodeError> {
        let len = self.read_length()?;
        Ok(Binary::from(self.read_payload(len)?))
    }

    /// Decodes the part of a text after its `u` tag.
    fn decode_text_body(&mut self) -> Result<Text, DecodeError> {
        let len = self.read_length()?;
        let start = self.offset;
        let bytes = self.read_payload(len)?;
        let text = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
            offset: start + e.utf8_error().valid_up_to() as u64,
        })?;
        Ok(Text::from(text))
    }

    fn enter(&self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep {
                offset: self.offset,
            });
        }
        Ok(())
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.enter(depth)?;
        let start = self.offset;
        self.bump();

        let mut items = Vec::new();
        loop {
            match self.peek()? {
                Some(END_TAG) => {
                    self.bump();
                    break;
                }
                Some(_) => items.push(self.decode_slot(depth + 1)?),
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.offset,
                        expected: "list element or 'e'",
                    })
                }
            }
        }

        List::try_from_indirect(items, self.loader.clone())
            .map(Value::List)
            .ok_or(DecodeError::LengthOverflow { offset: start })
    }

    fn decode_dictionary(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.enter(depth)?;
        let start = self.offset;
        self.bump();

        let mut entries = BTreeMap::new();
        loop {
            let offset = self.offset;
            let key = match self.peek()? {
                Some(END_TAG) => {
                    self.bump();
                    break;
                }
                Some(TEXT_TAG) => {
                    self.bump();
                    Key::Text(self.decode_text_body()?)
                }
                Some(byte) if byte.is_ascii_digit() => Key::Binary(self.decode_binary()?),
                Some(byte) => {
                    return Err(DecodeError::UnexpectedByte {
                        byte,
                        offset,
                        expected: "dictionary key or 'e'",
                    })
                }
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset,
                        expected: "dictionary key or 'e'",
                    })
                }
            };

            let value = self.decode_slot(depth + 1)?;
            if entries.insert(key, value).is_some() {
                return Err(DecodeError::DuplicateKey { offset });
            }
        }

        Dictionary::try_from_indirect(entries, self.loader.clone())
            .map(Value::Dictionary)
            .ok_or(DecodeError::LengthOverflow { offset: start })
    }

    /// A list element or dictionary value: either an inline value or an
    /// offloaded fingerprint.
    fn decode_slot(&mut self, depth: usize) -> Result<IndirectValue, DecodeError> {
        let offset = self.offset;
        if self.peek()? != Some(OFFLOAD_TAG) {
            return Ok(IndirectValue::loaded(self.decode_value(depth)?));
        }
        if self.loader.is_none() {
            return Err(DecodeError::MissingLoader { offset });
        }
        self.bump();

        let len = self.read_length()?;
        let bytes = self.read_payload(len)?;
        let fingerprint = Fingerprint::deserialize(&bytes)
            .map_err(|source| DecodeError::InvalidFingerprint { offset, source })?;
        Ok(IndirectValue::deferred(fingerprint))
    }
}
