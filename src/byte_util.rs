//! Byte-array helpers shared by fingerprints, keys and inspection output.

use std::cmp::Ordering;

use crate::types::Fingerprint;

/// Renders bytes as lowercase hexadecimal.
///
/// ```
/// assert_eq!(bencodex::byte_util::to_hex(&[0x00, 0xab, 0xff]), "00abff");
/// ```
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parses a hexadecimal string (either case). Returns `None` for odd lengths
/// or non-hex characters.
///
/// ```
/// assert_eq!(bencodex::byte_util::from_hex("00ABff"), Some(vec![0x00, 0xab, 0xff]));
/// assert_eq!(bencodex::byte_util::from_hex("abc"), None);
/// ```
pub fn from_hex(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Lexicographic comparison: first differing byte wins, then the shorter
/// array sorts first.
pub fn compare_bytes(left: &[u8], right: &[u8]) -> Ordering {
    for (l, r) in left.iter().zip(right) {
        match l.cmp(r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    left.len().cmp(&right.len())
}

/// Compares two pairs by their first components and falls back to the second
/// comparator on a tie.
pub fn compare_composite<A, B>(
    left: (&A, &B),
    right: (&A, &B),
    first: impl FnOnce(&A, &A) -> Ordering,
    second: impl FnOnce(&B, &B) -> Ordering,
) -> Ordering
where
    A: ?Sized,
    B: ?Sized,
{
    first(left.0, right.0).then_with(|| second(left.1, right.1))
}

/// Orders fingerprints by kind, then encoding length, then digest bytes.
pub fn compare_fingerprints(left: &Fingerprint, right: &Fingerprint) -> Ordering {
    compare_composite(
        (&(left.kind(), left.encoding_length()), left.digest()),
        (&(right.kind(), right.encoding_length()), right.digest()),
        Ord::cmp,
        compare_bytes,
    )
}
