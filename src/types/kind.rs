use std::fmt;

use super::error::FingerprintError;

/// The closed set of Bencodex value kinds.
///
/// The discriminant is the kind byte used in serialized fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ValueKind {
    Null = 0,
    Boolean = 1,
    Integer = 2,
    Binary = 3,
    Text = 4,
    List = 5,
    Dictionary = 6,
}

impl ValueKind {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Binary => "binary",
            ValueKind::Text => "text",
            ValueKind::List => "list",
            ValueKind::Dictionary => "dictionary",
        }
    }

    /// Whether this kind holds child slots.
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::List | ValueKind::Dictionary)
    }
}

impl TryFrom<u8> for ValueKind {
    type Error = FingerprintError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0 => ValueKind::Null,
            1 => ValueKind::Boolean,
            2 => ValueKind::Integer,
            3 => ValueKind::Binary,
            4 => ValueKind::Text,
            5 => ValueKind::List,
            6 => ValueKind::Dictionary,
            other => return Err(FingerprintError::UnknownKind(other)),
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
