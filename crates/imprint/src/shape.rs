//! Shape descriptors and the traits that build them.
//!
//! A [`ShapeDescriptor`] is an explicit, value-carrying description of one
//! record instance: its fields in declaration order, each with an optional
//! property label and a [`Node`] holding the field's current value. The
//! compiler walks descriptors instead of inspecting types at runtime.
//!
//! Descriptors are produced by the [`Shape`] trait, normally through
//! `#[derive(Shape)]`. Field values become nodes through [`ToNode`], which is
//! implemented for strings, integers, floats, booleans, `Option`, vectors,
//! arrays, maps, [`Value`] and every derived shape.
//!
//! # Labels
//!
//! A field with a label is a serializable property. A field without one is
//! not: composite fields without a label are flattened into their parent,
//! every other unlabeled field is left out of the output.

use std::collections::{BTreeMap, HashMap};

use crate::value::Value;

/// A leaf value inside a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

/// One position in a shape: a leaf, a nested composite, or a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf value.
    Scalar(Scalar),
    /// A nested composite with its own fields.
    Struct(ShapeDescriptor),
    /// A keyed collection, entries in output order.
    Map(Vec<(String, Node)>),
    /// An ordered collection.
    List(Vec<Node>),
}

/// A field of a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name in the output, or `None` for non-property fields.
    pub label: Option<String>,
    /// The field's current value.
    pub node: Node,
}

impl Field {
    /// Creates a serializable property.
    pub fn property(label: impl Into<String>, node: Node) -> Self {
        Self {
            label: Some(label.into()),
            node,
        }
    }

    /// Creates a field that is not a property.
    ///
    /// Composite values are flattened into the parent; anything else is
    /// omitted.
    pub fn unlabeled(node: Node) -> Self {
        Self { label: None, node }
    }
}

/// The fields of one composite, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeDescriptor {
    pub fields: Vec<Field>,
}

impl ShapeDescriptor {
    /// Creates a descriptor from its fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Appends a property, builder style.
    pub fn property(mut self, label: impl Into<String>, value: &impl ToNode) -> Self {
        self.fields.push(Field::property(label, value.to_node()));
        self
    }

    /// Appends a field that is not a property, builder style.
    pub fn unlabeled(mut self, value: &impl ToNode) -> Self {
        self.fields.push(Field::unlabeled(value.to_node()));
        self
    }
}

/// Trait for record types that can be registered as templates.
///
/// This trait is typically derived using `#[derive(Shape)]`, but can also be
/// implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use imprint::Shape;
///
/// #[derive(Shape)]
/// struct Point {
///     metric: String,
///     #[shape(rename = "timestamp")]
///     ts: i64,
///     value: f64,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use imprint::{Shape, ShapeDescriptor};
///
/// struct Point {
///     metric: String,
///     value: f64,
/// }
///
/// impl Shape for Point {
///     fn describe(&self) -> ShapeDescriptor {
///         ShapeDescriptor::default()
///             .property("metric", &self.metric)
///             .property("value", &self.value)
///     }
/// }
/// ```
pub trait Shape {
    /// Describes this instance's fields and their current values.
    fn describe(&self) -> ShapeDescriptor;
}

/// Conversion of a field value into a shape [`Node`].
pub trait ToNode {
    fn to_node(&self) -> Node;
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

/// A hand-built descriptor describes itself.
impl Shape for ShapeDescriptor {
    fn describe(&self) -> ShapeDescriptor {
        self.clone()
    }
}

impl ToNode for ShapeDescriptor {
    fn to_node(&self) -> Node {
        Node::Struct(self.clone())
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::String(self.clone()))
    }
}

impl ToNode for &str {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::String((*self).to_string()))
    }
}

macro_rules! impl_to_node_signed {
    ($($t:ty),*) => {
        $(
            impl ToNode for $t {
                fn to_node(&self) -> Node {
                    Node::Scalar(Scalar::Int(*self as i64))
                }
            }
        )*
    };
}

macro_rules! impl_to_node_unsigned {
    ($($t:ty),*) => {
        $(
            impl ToNode for $t {
                fn to_node(&self) -> Node {
                    Node::Scalar(Scalar::UInt(*self as u64))
                }
            }
        )*
    };
}

impl_to_node_signed!(i8, i16, i32, i64, isize);
impl_to_node_unsigned!(u8, u16, u32, u64, usize);

impl ToNode for f32 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Float(*self as f64))
    }
}

impl ToNode for f64 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Float(*self))
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Bool(*self))
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(v) => v.to_node(),
            None => Node::Scalar(Scalar::Null),
        }
    }
}

impl<T: ToNode> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        Node::List(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode, const N: usize> ToNode for [T; N] {
    fn to_node(&self) -> Node {
        Node::List(self.iter().map(ToNode::to_node).collect())
    }
}

impl<K: ToString, V: ToNode> ToNode for BTreeMap<K, V> {
    fn to_node(&self) -> Node {
        Node::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_node()))
                .collect(),
        )
    }
}

/// Entries are emitted sorted by key so that templates compiled from equal
/// maps are identical.
impl<K: ToString, V: ToNode, S> ToNode for HashMap<K, V, S> {
    fn to_node(&self) -> Node {
        let mut entries: Vec<(String, Node)> = self
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_node()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Node::Map(entries)
    }
}

impl ToNode for Value {
    fn to_node(&self) -> Node {
        match self {
            Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
            Value::Int(n) => Node::Scalar(Scalar::Int(*n)),
            Value::UInt(n) => Node::Scalar(Scalar::UInt(*n)),
            Value::Float(n) => Node::Scalar(Scalar::Float(*n)),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Map(map) => map.to_node(),
            Value::List(items) => items.to_node(),
        }
    }
}
