use std::fmt;

use bytes::Bytes;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::fingerprint::Fingerprint;
use super::kind::ValueKind;
use crate::codec::digits::bigint_literal_len;

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    pub fn new(value: impl Into<BigInt>) -> Self {
        Integer(value.into())
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }

    /// Returns the value if it fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// `i` + optional sign + digits + `e`.
    pub fn encoding_length(&self) -> u64 {
        2 + bigint_literal_len(&self.0) as u64
    }

    /// The digest is the two's-complement little-endian byte form.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(
            ValueKind::Integer,
            self.encoding_length(),
            Bytes::from(self.0.to_signed_bytes_le()),
        )
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer(value)
    }
}

macro_rules! integer_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                fn from(value: $t) -> Self {
                    Integer(BigInt::from(value))
                }
            }
        )*
    };
}

integer_from_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
