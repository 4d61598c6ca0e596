//! The JSON serializer.
//!
//! [`JsonSerializer`] pairs a [`TemplateRegistry`] with a JSON encoder.
//! Record shapes are registered once under a name, with the paths that
//! change between records; each record is then rendered from a flat
//! parameter list.
//!
//! ```rust
//! use imprint::{params, JsonSerializer, ShapeDescriptor};
//!
//! let example = ShapeDescriptor::default()
//!     .property("text", &"x")
//!     .property("num", &7);
//!
//! let mut serializer = JsonSerializer::new();
//! serializer.register("s", &example, &["text"]).unwrap();
//!
//! let json = serializer.serialize("s", &params!["text" => "hi"]).unwrap();
//! assert_eq!(json, r#"{"text":"hi","num":7}"#);
//! ```
//!
//! ## Batches
//!
//! [`serialize_array`](JsonSerializer::serialize_array) renders items in
//! order into one JSON array. The first failing item fails the whole batch
//! and no partial output is returned.

use std::any::Any;

use tracing::trace;

use crate::config::SerializerConfig;
use crate::encode::JsonEncoder;
use crate::error::Result;
use crate::generic::{downcast, downcast_all, GenericSerializer};
use crate::registry::TemplateRegistry;
use crate::shape::Shape;
use crate::template::CompiledTemplate;
use crate::value::Value;

/// A named record to render: the template name and its flat parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub name: String,
    pub parameters: Vec<Value>,
}

impl Item {
    /// Creates an item.
    pub fn new(name: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Serializes registered record shapes to JSON.
///
/// Registration takes `&mut self` and rendering `&self`: once every shape is
/// registered, the serializer can be shared across threads (for example in
/// an `Arc`) and rendered from concurrently.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    config: SerializerConfig,
    encoder: JsonEncoder,
    registry: TemplateRegistry,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSerializer {
    /// Creates a serializer with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(SerializerConfig::default())
    }

    /// Creates a serializer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// is invalid.
    pub fn with_config(config: SerializerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SerializerConfig) -> Self {
        Self {
            config,
            encoder: JsonEncoder::new(config.float_precision),
            registry: TemplateRegistry::new(),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Returns the template registry.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Compiles `example` and registers it under `name`.
    ///
    /// `variables` lists the paths that will be supplied at render time
    /// (`"text"`, `"tags.host"`, `"array[1]"`); every other position is baked
    /// from `example`'s current values. Re-registering a name replaces it.
    ///
    /// Strings are escaped for `"` and `\` only; control characters such as
    /// `\n` are written unescaped, so output holding them is not valid JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`](crate::Error::UnsupportedShape) if
    /// `example` holds a value with no JSON encoding. Nothing is registered.
    pub fn register<T, S>(
        &mut self,
        name: impl Into<String>,
        example: &T,
        variables: &[S],
    ) -> Result<()>
    where
        T: Shape + ?Sized,
        S: AsRef<str>,
    {
        self.registry
            .register(name, &example.describe(), variables)
    }

    /// Looks up a registered template.
    pub fn template(&self, name: &str) -> Result<&CompiledTemplate> {
        self.registry.get(name)
    }

    /// Renders the template registered under `name`.
    ///
    /// `parameters` alternates variable paths and values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`](crate::Error::TemplateNotFound)
    /// for unknown names, otherwise see [`CompiledTemplate::render`].
    pub fn serialize(&self, name: &str, parameters: &[Value]) -> Result<String> {
        let template = self.registry.get(name)?;
        let mut out = String::with_capacity(self.config.record_capacity());
        template.render_into(&mut out, parameters, &self.encoder)?;
        Ok(out)
    }

    /// Renders a batch of items into one JSON array, preserving order.
    ///
    /// An empty batch renders as the empty string.
    pub fn serialize_array(&self, items: &[Item]) -> Result<String> {
        self.render_batch(items.iter())
    }

    fn render_batch<'a, I>(&self, items: I) -> Result<String>
    where
        I: ExactSizeIterator<Item = &'a Item>,
    {
        let count = items.len();
        if count == 0 {
            return Ok(String::new());
        }
        trace!(items = count, "serializing json array");

        let mut out = String::with_capacity(self.config.batch_capacity(count, count + 1));
        out.push('[');
        for (i, item) in items.enumerate() {
            if i > 0 {
                out.push(',');
            }
            let template = self.registry.get(&item.name)?;
            template.render_into(&mut out, &item.parameters, &self.encoder)?;
        }
        out.push(']');

        Ok(out)
    }
}

impl GenericSerializer for JsonSerializer {
    fn serialize_generic(&self, item: &dyn Any) -> Result<String> {
        let item = downcast::<Item>(item)?;
        self.serialize(&item.name, &item.parameters)
    }

    fn serialize_generic_array(&self, items: &[&dyn Any]) -> Result<String> {
        let items = downcast_all::<Item>(items)?;
        self.render_batch(items.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::params;
    use crate::shape::ShapeDescriptor;

    fn serializer() -> JsonSerializer {
        let example = ShapeDescriptor::default()
            .property("text", &"x")
            .property("num", &7);

        let mut s = JsonSerializer::new();
        s.register("s", &example, &["text"]).unwrap();
        s
    }

    #[test]
    fn test_serialize() {
        let out = serializer().serialize("s", &params!["text" => "hi"]).unwrap();
        assert_eq!(out, r#"{"text":"hi","num":7}"#);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            serializer().serialize("nope", &[]),
            Err(Error::TemplateNotFound {
                name: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_array() {
        let s = serializer();
        let out = s
            .serialize_array(&[
                Item::new("s", params!["text" => "a"]),
                Item::new("s", params!["text" => "b"]),
            ])
            .unwrap();
        assert_eq!(out, r#"[{"text":"a","num":7},{"text":"b","num":7}]"#);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(serializer().serialize_array(&[]).unwrap(), "");
    }

    #[test]
    fn test_array_aborts_on_error() {
        let s = serializer();
        let err = s
            .serialize_array(&[
                Item::new("s", params!["text" => "a"]),
                Item::new("s", params![]),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            Error::Arity {
                expected: 2,
                actual: 0
            }
        );
    }

    #[test]
    fn test_with_config_precision() {
        let example = ShapeDescriptor::default().property("value", &1.0);
        let mut s = JsonSerializer::with_config(SerializerConfig::new().float_precision(2)).unwrap();
        s.register("v", &example, &["value"]).unwrap();
        assert_eq!(
            s.serialize("v", &params!["value" => 100.5]).unwrap(),
            r#"{"value":100.50}"#
        );
    }

    #[test]
    fn test_with_invalid_config() {
        let config = SerializerConfig::new().float_precision(99);
        assert!(matches!(
            JsonSerializer::with_config(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_generic() {
        let s = serializer();
        let item = Item::new("s", params!["text" => "g"]);
        assert_eq!(
            s.serialize_generic(&item).unwrap(),
            r#"{"text":"g","num":7}"#
        );
        assert_eq!(
            s.serialize_generic(&42u8),
            Err(Error::UnexpectedItem { index: None })
        );
    }

    #[test]
    fn test_generic_array() {
        let s = serializer();
        let a = Item::new("s", params!["text" => "a"]);
        let b = Item::new("s", params!["text" => "b"]);
        let out = s.serialize_generic_array(&[&a, &b]).unwrap();
        assert_eq!(out, r#"[{"text":"a","num":7},{"text":"b","num":7}]"#);

        let wrong = "b";
        assert_eq!(
            s.serialize_generic_array(&[&a, &wrong]),
            Err(Error::UnexpectedItem { index: Some(1) })
        );
    }
}
