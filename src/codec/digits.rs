//! Decimal digit primitives for length prefixes and integer literals.
//!
//! Digits are counted with a power-of-ten table and written right to left
//! into a caller-provided slice, so no intermediate string is built for
//! values that fit in a `u64`.

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

const POWERS_OF_TEN: [u64; 19] = [
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// Number of decimal digits in `n` (`0` has one digit).
pub(crate) fn decimal_len(n: u64) -> usize {
    POWERS_OF_TEN
        .iter()
        .position(|&p| n < p)
        .map_or(POWERS_OF_TEN.len() + 1, |i| i + 1)
}

/// Writes the digits of `n` into the front of `out` and returns how many
/// bytes were written. `out` must hold at least `decimal_len(n)` bytes.
pub(crate) fn write_decimal(mut n: u64, out: &mut [u8]) -> usize {
    let len = decimal_len(n);
    for slot in out[..len].iter_mut().rev() {
        *slot = b'0' + (n % 10) as u8;
        n /= 10;
    }
    len
}

/// Digit count of `|value|`, falling back to string formatting once the
/// magnitude no longer fits a `u64`.
pub(crate) fn bigint_decimal_len(value: &BigInt) -> usize {
    match value.magnitude().to_u64() {
        Some(small) => decimal_len(small),
        None => value.magnitude().to_str_radix(10).len(),
    }
}

/// Writes `value` as a decimal literal, with a leading `-` when negative.
pub(crate) fn write_bigint(value: &BigInt, out: &mut [u8]) -> usize {
    let mut pos = 0;
    if value.sign() == Sign::Minus {
        out[0] = b'-';
        pos = 1;
    }
    match value.magnitude().to_u64() {
        Some(small) => pos + write_decimal(small, &mut out[pos..]),
        None => {
            let digits = value.magnitude().to_str_radix(10);
            out[pos..pos + digits.len()].copy_from_slice(digits.as_bytes());
            pos + digits.len()
        }
    }
}

/// Length of the decimal literal of `value`, including any sign.
pub(crate) fn bigint_literal_len(value: &BigInt) -> usize {
    let sign = usize::from(value.sign() == Sign::Minus);
    sign + bigint_decimal_len(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_len_at_powers_of_ten() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(99_999), 5);
        assert_eq!(decimal_len(100_000), 6);
        assert_eq!(decimal_len(9_999_999_999_999_999_999), 19);
        assert_eq!(decimal_len(10_000_000_000_000_000_000), 20);
        assert_eq!(decimal_len(u64::MAX), 20);
    }

    #[test]
    fn test_write_decimal_matches_formatting() {
        for n in [0u64, 7, 10, 4096, 123_456_789, u64::MAX] {
            let mut buf = [0u8; 20];
            let len = write_decimal(n, &mut buf);
            assert_eq!(&buf[..len], n.to_string().as_bytes());
        }
    }

    #[test]
    fn test_write_bigint_beyond_u64() {
        let value: BigInt = "-123456789012345678901234567890".parse().unwrap();
        let mut buf = vec![0u8; bigint_literal_len(&value)];
        let len = write_bigint(&value, &mut buf);
        assert_eq!(len, buf.len());
        assert_eq!(&buf, b"-123456789012345678901234567890");
    }

    #[test]
    fn test_write_bigint_zero_and_negative() {
        let mut buf = [0u8; 8];
        let len = write_bigint(&BigInt::from(0), &mut buf);
        assert_eq!(&buf[..len], b"0");

        let len = write_bigint(&BigInt::from(-456), &mut buf);
        assert_eq!(&buf[..len], b"-456");
        assert_eq!(bigint_literal_len(&BigInt::from(-456)), 4);
    }
}
