//! The Bencodex value model.
//!
//! Bencodex extends Bencoding with null, booleans, arbitrary-precision
//! integers and a separate text type:
//!
//! | Kind | Format | Example |
//! |------|--------|---------|
//! | Null | `n` | `n` |
//! | Boolean | `t` / `f` | `t` |
//! | Integer | `i<number>e` | `i-456e` |
//! | Binary | `<length>:<bytes>` | `5:hello` |
//! | Text | `u<utf8-length>:<utf8>` | `u6:你好` |
//! | List | `l<items>e` | `lu1:au1:be` |
//! | Dictionary | `d<key><value>...e` | `d1:ai1eu1:bi2ee` |
//!
//! Dictionary keys are binaries or texts. Canonical order puts every binary
//! key before every text key, each group sorted by bytes.
//!
//! Every value has a [`Fingerprint`]. Lists and dictionaries hold their
//! children as [`IndirectValue`] slots, which may carry only a fingerprint
//! until a [`Loader`] supplies the value.

mod binary;
mod dictionary;
mod error;
mod fingerprint;
mod indirect;
pub(crate) mod inspect;
mod integer;
mod key;
mod kind;
mod list;
mod text;
mod value;

pub use binary::Binary;
pub use dictionary::Dictionary;
pub use error::{FingerprintError, LoadError};
pub use fingerprint::Fingerprint;
pub use indirect::{IndirectValue, Loader};
pub use integer::Integer;
pub use key::Key;
pub use kind::ValueKind;
pub use list::List;
pub use text::Text;
pub use value::Value;

#[cfg(test)]
mod tests;
