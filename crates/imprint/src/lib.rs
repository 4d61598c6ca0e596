//! Imprint - compile-once serializers for high-volume structured records.
//!
//! Imprint splits serialization into two phases. A record shape is
//! compiled once into a template: every field that stays constant is baked
//! into literal JSON text, and every field declared as variable becomes a
//! slot. Each record is then rendered by filling the slots from a flat
//! parameter list, without walking the shape again.
//!
//! Two output formats are provided:
//!
//! - JSON objects and arrays, through [`JsonSerializer`]
//! - The `put metric timestamp value tag=value...` line protocol, through
//!   [`LineSerializer`]
//!
//! # Quick Start
//!
//! ```rust
//! use imprint::{params, JsonSerializer, Shape};
//! use std::collections::BTreeMap;
//!
//! #[derive(Shape)]
//! struct Point {
//!     metric: String,
//!     timestamp: i64,
//!     value: f64,
//!     tags: BTreeMap<String, String>,
//! }
//!
//! let example = Point {
//!     metric: "cpu".into(),
//!     timestamp: 0,
//!     value: 0.0,
//!     tags: BTreeMap::from([("host".to_string(), "a".to_string())]),
//! };
//!
//! let mut serializer = JsonSerializer::new();
//! serializer
//!     .register("point", &example, &["timestamp", "value", "tags.host"])
//!     .unwrap();
//!
//! let json = serializer
//!     .serialize(
//!         "point",
//!         &params!["timestamp" => 1000, "value" => 42.5, "tags.host" => "web-1"],
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     json,
//!     r#"{"metric":"cpu","timestamp":1000,"value":42.500000,"tags":{"host":"web-1"}}"#
//! );
//! ```
//!
//! # Paths
//!
//! Variables are named by path: property labels joined with `.`
//! (`tags.host`), and list positions as `[i]` (`values[2]`). A path can name
//! a leaf or a whole subtree; a subtree slot is filled with a
//! [`Value::Map`] or [`Value::List`] at render time.
//!
//! # Parameters
//!
//! Render parameters alternate path and value, one pair per slot, in any
//! order. The [`params!`] macro builds such a list. Every slot must be
//! filled exactly once or the call fails with a typed [`Error`].
//!
//! # Concurrency
//!
//! Registration takes `&mut self`; rendering takes `&self`. Register every
//! shape during startup, then share the serializer (for example in an
//! `Arc`) and render from as many threads as needed.
//!
//! # Configuration
//!
//! [`SerializerConfig`] sets per-record buffer sizing and the decimals used
//! for render-time floats. It deserializes from YAML or any serde source.

mod compiler;
mod config;
pub mod encode;
mod error;
mod generic;
mod json;
mod line;
pub mod path;
mod registry;
mod shape;
mod template;
mod value;

// Re-export public API
pub use compiler::compile;
pub use config::{SerializerConfig, MAX_FLOAT_PRECISION, MAX_RESERVED_CAPACITY};
pub use error::{Error, Result};
pub use generic::GenericSerializer;
pub use json::{Item, JsonSerializer};
pub use line::{LineItem, LineSerializer};
pub use registry::TemplateRegistry;
pub use shape::{Field, Node, Scalar, Shape, ShapeDescriptor, ToNode};
pub use template::{CompiledTemplate, Slot, SlotKind};
pub use value::Value;

// Derive macro, same name as the trait (separate namespaces).
pub use imprint_macros::Shape;
