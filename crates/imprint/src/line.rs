//! The line-protocol serializer.
//!
//! Each point renders as one newline-terminated line:
//!
//! ```text
//! put <metric> <timestamp> <value> <key>=<value> <key>=<value>...
//! ```
//!
//! Tags are always flat and always supplied at render time, so no template
//! is compiled; the serializer only shares the scalar encoder and the
//! parameter checks with the JSON side.
//!
//! ```rust
//! use imprint::{params, LineSerializer};
//!
//! let serializer = LineSerializer::new();
//! let line = serializer
//!     .serialize("cpu", 1000, 42.5, &params!["host" => "a"])
//!     .unwrap();
//! assert_eq!(line, "put cpu 1000 42.500000 host=a\n");
//! ```
//!
//! The point value is written in fixed-point notation with
//! [`SerializerConfig::float_precision`] decimals. Tag values are written
//! raw: strings are not quoted or escaped, so keys and values must not hold
//! spaces, `=`, or newlines if the receiver is to parse them back.

use std::any::Any;

use tracing::trace;

use crate::config::SerializerConfig;
use crate::encode::{write_fixed, write_tag_value};
use crate::error::{Error, Result};
use crate::generic::{downcast, downcast_all, GenericSerializer};
use crate::value::Value;

/// One metric point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineItem {
    pub metric: String,
    pub timestamp: i64,
    pub value: f64,
    /// Alternating tag keys and values.
    pub tags: Vec<Value>,
}

impl LineItem {
    /// Creates a point.
    pub fn new(metric: impl Into<String>, timestamp: i64, value: f64, tags: Vec<Value>) -> Self {
        Self {
            metric: metric.into(),
            timestamp,
            value,
            tags,
        }
    }
}

/// Serializes metric points to line protocol.
#[derive(Debug, Clone, Default)]
pub struct LineSerializer {
    config: SerializerConfig,
}

impl LineSerializer {
    /// Creates a serializer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serializer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_config(config: SerializerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Renders one point.
    ///
    /// # Errors
    ///
    /// - [`Error::OddTagCount`] if `tags` does not hold whole key/value pairs
    /// - [`Error::NullValue`] if a tag key or value is [`Value::Null`]
    /// - [`Error::TypeCast`] if a tag key is not a string
    /// - [`Error::UnsupportedKind`] if `value` is not finite or a tag value is
    ///   a collection
    pub fn serialize(
        &self,
        metric: &str,
        timestamp: i64,
        value: f64,
        tags: &[Value],
    ) -> Result<String> {
        let mut out = String::with_capacity(self.config.record_capacity());
        self.write_line(&mut out, metric, timestamp, value, tags)?;
        Ok(out)
    }

    /// Renders a batch of points, one line each, in input order.
    ///
    /// An empty batch renders as the empty string.
    pub fn serialize_array(&self, items: &[LineItem]) -> Result<String> {
        self.render_batch(items.iter())
    }

    fn render_batch<'a, I>(&self, items: I) -> Result<String>
    where
        I: ExactSizeIterator<Item = &'a LineItem>,
    {
        let count = items.len();
        if count == 0 {
            return Ok(String::new());
        }
        trace!(items = count, "serializing line batch");

        let mut out = String::with_capacity(self.config.batch_capacity(count, 0));
        for item in items {
            self.write_line(&mut out, &item.metric, item.timestamp, item.value, &item.tags)?;
        }
        Ok(out)
    }

    fn write_line(
        &self,
        out: &mut String,
        metric: &str,
        timestamp: i64,
        value: f64,
        tags: &[Value],
    ) -> Result<()> {
        if tags.len() % 2 != 0 {
            return Err(Error::OddTagCount { count: tags.len() });
        }

        out.push_str("put ");
        out.push_str(metric);
        out.push(' ');
        out.push_str(&timestamp.to_string());
        out.push(' ');
        write_fixed(out, value, self.config.float_precision)?;
        out.push(' ');

        for (pair, chunk) in tags.chunks_exact(2).enumerate() {
            let index = pair * 2;
            if pair > 0 {
                out.push(' ');
            }
            match &chunk[0] {
                Value::String(key) => out.push_str(key),
                Value::Null => return Err(Error::NullValue { index }),
                other => {
                    return Err(Error::TypeCast {
                        index,
                        expected: "string",
                        actual: other.kind(),
                    })
                }
            }
            out.push('=');
            if chunk[1].is_null() {
                return Err(Error::NullValue { index: index + 1 });
            }
            write_tag_value(out, &chunk[1])?;
        }

        out.push('\n');
        Ok(())
    }
}

impl GenericSerializer for LineSerializer {
    fn serialize_generic(&self, item: &dyn Any) -> Result<String> {
        let item = downcast::<LineItem>(item)?;
        self.serialize(&item.metric, item.timestamp, item.value, &item.tags)
    }

    fn serialize_generic_array(&self, items: &[&dyn Any]) -> Result<String> {
        let items = downcast_all::<LineItem>(items)?;
        self.render_batch(items.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_single_tag() {
        let s = LineSerializer::new();
        assert_eq!(
            s.serialize("cpu", 1000, 42.5, &params!["host" => "a"]).unwrap(),
            "put cpu 1000 42.500000 host=a\n"
        );
    }

    #[test]
    fn test_tags_in_order() {
        let s = LineSerializer::new();
        let tags = params!["z" => "last", "a" => 1, "m" => 0.5];
        assert_eq!(
            s.serialize("mem", -5, 0.0, &tags).unwrap(),
            "put mem -5 0.000000 z=last a=1 m=0.5\n"
        );
    }

    #[test]
    fn test_no_tags_keeps_separator() {
        let s = LineSerializer::new();
        assert_eq!(
            s.serialize("m", 1, 1.0, &[]).unwrap(),
            "put m 1 1.000000 \n"
        );
    }

    #[test]
    fn test_odd_tags() {
        let s = LineSerializer::new();
        let tags = vec![Value::from("host"), Value::from("a"), Value::from("ttl")];
        assert_eq!(
            s.serialize("cpu", 1000, 42.5, &tags),
            Err(Error::OddTagCount { count: 3 })
        );
    }

    #[test]
    fn test_bad_tag_key() {
        let s = LineSerializer::new();
        assert_eq!(
            s.serialize("cpu", 1, 1.0, &params!["a" => "b", 7 => "x"]),
            Err(Error::TypeCast {
                index: 2,
                expected: "string",
                actual: "integer"
            })
        );
        assert_eq!(
            s.serialize("cpu", 1, 1.0, &[Value::Null, Value::from("x")]),
            Err(Error::NullValue { index: 0 })
        );
    }

    #[test]
    fn test_bad_tag_value() {
        let s = LineSerializer::new();
        assert_eq!(
            s.serialize("cpu", 1, 1.0, &[Value::from("k"), Value::Null]),
            Err(Error::NullValue { index: 1 })
        );
        assert_eq!(
            s.serialize("cpu", 1, 1.0, &params!["k" => vec![1, 2]]),
            Err(Error::UnsupportedKind { kind: "list" })
        );
    }

    #[test]
    fn test_non_finite_value() {
        let s = LineSerializer::new();
        assert_eq!(
            s.serialize("cpu", 1, f64::NAN, &[]),
            Err(Error::UnsupportedKind { kind: "NaN float" })
        );
    }

    #[test]
    fn test_precision() {
        let s = LineSerializer::with_config(SerializerConfig::new().float_precision(0)).unwrap();
        assert_eq!(s.serialize("m", 1, 2.25, &[]).unwrap(), "put m 1 2 \n");
    }

    #[test]
    fn test_batch() {
        let s = LineSerializer::new();
        let out = s
            .serialize_array(&[
                LineItem::new("a", 1, 1.0, params!["h" => "x"]),
                LineItem::new("b", 2, 2.0, params!["h" => "y"]),
            ])
            .unwrap();
        assert_eq!(
            out,
            "put a 1 1.000000 h=x\nput b 2 2.000000 h=y\n"
        );
        assert_eq!(s.serialize_array(&[]).unwrap(), "");
    }

    #[test]
    fn test_batch_aborts() {
        let s = LineSerializer::new();
        let err = s
            .serialize_array(&[
                LineItem::new("a", 1, 1.0, vec![]),
                LineItem::new("b", 2, 2.0, vec![Value::from("h")]),
            ])
            .unwrap_err();
        assert_eq!(err, Error::OddTagCount { count: 1 });
    }

    #[test]
    fn test_generic_array() {
        let s = LineSerializer::new();
        let a = LineItem::new("a", 1, 1.0, vec![]);
        let out = s.serialize_generic_array(&[&a, &a]).unwrap();
        assert_eq!(out, "put a 1 1.000000 \nput a 1 1.000000 \n");

        let wrong = 5i32;
        assert_eq!(
            s.serialize_generic_array(&[&a, &wrong]),
            Err(Error::UnexpectedItem { index: Some(1) })
        );
    }
}
