//! Human-readable rendering of values.
//!
//! Containers span multiple lines with two-space indentation per level and a
//! trailing comma after each entry; empty containers render as `[]` / `{}`.

use std::fmt::{self, Write};

use super::indirect::{IndirectValue, Loader};
use super::value::Value;

pub(crate) fn inspect(value: &Value, load_all: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_value(&mut out, value, load_all, 0);
    out
}

pub(crate) fn write_binary(out: &mut impl Write, bytes: &[u8]) -> fmt::Result {
    out.write_str("b\"")?;
    for b in bytes {
        write!(out, "\\x{:02x}", b)?;
    }
    out.write_char('"')
}

fn write_value(out: &mut String, value: &Value, load_all: bool, depth: usize) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Boolean(b) => write!(out, "{}", b),
        Value::Integer(i) => write!(out, "{}", i),
        Value::Binary(b) => write_binary(out, b.as_slice()),
        Value::Text(t) => write!(out, "{:?}", t.as_str()),
        Value::List(list) => {
            if list.is_empty() {
                return out.write_str("[]");
            }
            out.write_str("[\n")?;
            for slot in list.indirect_values() {
                indent(out, depth + 1);
                write_slot(out, slot, list.loader(), load_all, depth + 1)?;
                out.write_str(",\n")?;
            }
            indent(out, depth);
            out.write_char(']')
        }
        Value::Dictionary(dict) => {
            if dict.is_empty() {
                return out.write_str("{}");
            }
            out.write_str("{\n")?;
            for (key, slot) in dict.indirect_entries() {
                indent(out, depth + 1);
                write!(out, "{}: ", key)?;
                write_slot(out, slot, dict.loader(), load_all, depth + 1)?;
                out.write_str(",\n")?;
            }
            indent(out, depth);
            out.write_char('}')
        }
    }
}

fn write_slot(
    out: &mut String,
    slot: &IndirectValue,
    loader: Option<&dyn Loader>,
    load_all: bool,
    depth: usize,
) -> fmt::Result {
    let value = match slot.loaded_value() {
        Some(value) => Some(value),
        None if load_all => slot.get_value(loader).ok(),
        None => None,
    };
    match value {
        Some(value) => write_value(out, value, load_all, depth),
        None => write!(out, "<{}>", slot.fingerprint()),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
