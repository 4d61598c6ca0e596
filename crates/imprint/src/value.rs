//! Render-time parameter values.
//!
//! The [`Value`] enum is the closed set of kinds a caller can pass when
//! rendering: strings, integers, floats, booleans, and nested maps or lists
//! for whole-subtree substitution. Parameter lists are flat slices of values
//! that alternate between a variable path and its value.

use std::collections::{BTreeMap, HashMap};

/// A runtime value supplied as a render parameter.
///
/// # Example
///
/// ```
/// use imprint::Value;
///
/// let params: Vec<Value> = vec!["text".into(), "hi".into(), "num".into(), 7.into()];
/// assert!(params[0].is_string());
/// assert_eq!(params[3].as_i64(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, quoted and escaped in JSON.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point, written in fixed-point notation.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Keyed collection, written as a JSON object in key order.
    Map(BTreeMap<String, Value>),
    /// Ordered collection, written as a JSON array.
    List(Vec<Value>),
    /// Absent value.
    Null,
}

impl Value {
    /// Returns the name of this value's kind, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Map(_) => "map",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts a signed integer, if the value is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Extracts the float value, if present.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::UInt(n as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(map: HashMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Builds a flat parameter list from `path => value` pairs.
///
/// ```
/// use imprint::{params, Value};
///
/// let p = params!["value" => 100.5, "tags.host" => "loghost"];
/// assert_eq!(p.len(), 4);
/// assert_eq!(p[0], Value::from("value"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($path:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($path), $crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::from(1i32).kind(), "integer");
        assert_eq!(Value::from(1u8).kind(), "integer");
        assert_eq!(Value::from(1.5).kind(), "float");
        assert_eq!(Value::from(true).kind(), "boolean");
        assert_eq!(Value::from(vec![1, 2]).kind(), "list");
        assert_eq!(Value::Map(BTreeMap::new()).kind(), "map");
        assert_eq!(Value::Null.kind(), "null");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn test_unsigned_as_i64() {
        assert_eq!(Value::UInt(5).as_i64(), Some(5));
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_hash_map_conversion_is_sorted() {
        let mut map = HashMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        let Value::Map(converted) = Value::from(map) else {
            panic!("expected map");
        };
        let keys: Vec<&String> = converted.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_params_macro() {
        let p = params!["a" => 1, "b" => "x"];
        assert_eq!(
            p,
            vec![
                Value::from("a"),
                Value::Int(1),
                Value::from("b"),
                Value::from("x")
            ]
        );
        assert!(params![].is_empty());
    }
}
