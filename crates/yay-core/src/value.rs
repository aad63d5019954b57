//! The YAY value tree: constructors, accessors, and structural equality.

use std::fmt;

/// Arbitrary-precision integer, stored as a sign plus decimal digit string.
///
/// YAY integers never pass through floating point, so every digit survives
/// parsing regardless of magnitude. The digit string is non-empty and
/// contains only `0`–`9`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    pub negative: bool,
    pub digits: String,
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

/// A parsed YAY document value.
///
/// Objects keep their pairs in insertion order and never contain duplicate
/// keys; [`Value::set`] replaces an existing key's value in place. Equality
/// is structural: object pair order is ignored, and two `NaN` floats compare
/// equal (a deliberate deviation from IEEE 754 so that parsed trees can be
/// compared against expected fixtures).
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Integer value from a machine integer.
    pub fn int(value: i64) -> Value {
        Value::Int(BigInt {
            negative: value < 0,
            digits: value.unsigned_abs().to_string(),
        })
    }

    /// Integer value from a decimal digit string and a sign. The digits are
    /// taken verbatim; leading zeros are preserved and significant for
    /// equality.
    pub fn int_from_digits(digits: &str, negative: bool) -> Value {
        Value::Int(BigInt {
            negative,
            digits: digits.to_owned(),
        })
    }

    /// Byte string from a hex literal, spaces ignored. Returns `None` for an
    /// odd digit count or a non-hex character.
    pub fn bytes_from_hex(hex: &str) -> Option<Value> {
        let compact: Vec<u8> = hex.bytes().filter(|&b| b != b' ').collect();
        if compact.len() % 2 != 0 || !compact.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let bytes = compact
            .chunks_exact(2)
            .filter_map(|pair| {
                let hi = hex_value(pair[0])?;
                let lo = hex_value(pair[1])?;
                Some((hi << 4) | lo)
            })
            .collect();
        Some(Value::Bytes(bytes))
    }

    /// Append an item to an array value. Anything else is left unchanged.
    pub fn push(&mut self, item: Value) {
        if let Value::Array(items) = self {
            items.push(item);
        }
    }

    /// Assign a key in an object value, replacing in place when the key is
    /// already present. Anything else is left unchanged.
    pub fn set(&mut self, key: &str, value: Value) {
        if let Value::Object(pairs) = self {
            if let Some(pair) = pairs.iter_mut().find(|(k, _)| k == key) {
                pair.1 = value;
            } else {
                pairs.push((key.to_owned(), value));
            }
        }
    }

    /// Look up a key in an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(pairs) => Some(pairs),
            _ => None,
        }
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                // Pair order is irrelevant; key sets must match. Neither side
                // carries duplicate keys, so equal lengths plus a subset check
                // suffice.
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, val)| b.iter().any(|(k, v)| k == key && v == val))
            }
            _ => false,
        }
    }
}

/// Debug rendering used in diagnostics and test failure output. Integers get
/// an `n` suffix to keep them visually distinct from floats; strings are not
/// re-escaped. Not a serialization format.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}n"),
            Value::Float(x) => {
                if x.is_nan() {
                    f.write_str("NaN")
                } else if x.is_infinite() {
                    f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
                } else {
                    write!(f, "{x}")
                }
            }
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Bytes(bytes) => {
                f.write_str("<")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str(">")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Build a [`Value::Array`] from a list of values.
///
/// ```
/// use yay_core::{yay_array, Value};
/// let v = yay_array![Value::int(1), Value::Null];
/// assert_eq!(v.as_array().map(<[Value]>::len), Some(2));
/// ```
#[macro_export]
macro_rules! yay_array {
    ($($item:expr),* $(,)?) => {
        $crate::Value::Array(vec![$($item),*])
    };
}

/// Build a [`Value::Object`] from `key => value` pairs. Assignments go
/// through [`Value::set`], so a repeated key keeps its first position with
/// the last value, exactly as in a parsed document.
///
/// ```
/// use yay_core::{yay_object, Value};
/// let v = yay_object! { "a" => Value::int(1), "b" => Value::Bool(true) };
/// assert_eq!(v.get("b"), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! yay_object {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut obj = $crate::Value::Object(Vec::new());
        $(obj.set($key, $value);)*
        obj
    }};
}
