//! Proc macros for Imprint.
//!
//! # Available Macros
//!
//! - [`Shape`] - Generate a shape descriptor from a struct's fields
//!
//! # Examples
//!
//! For working examples, see `imprint/tests/derive.rs`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod shape;

/// Derives the `Shape` and `ToNode` traits for a struct with named fields.
///
/// Every field becomes a property named after the field, in declaration
/// order. Field types must implement `imprint::ToNode`, which covers
/// scalars, `Option`, vectors, maps and other derived shapes.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rename = "name"` | Property name in the output |
/// | `flatten` | Write a nested shape's properties into this object |
/// | `skip` | Leave the field out of the output |
///
/// # Example
///
/// ```ignore
/// use imprint::Shape;
/// use std::collections::BTreeMap;
///
/// #[derive(Shape)]
/// struct Point {
///     metric: String,
///     #[shape(rename = "ts")]
///     timestamp: i64,
///     value: f64,
/// }
///
/// #[derive(Shape)]
/// struct TaggedPoint {
///     #[shape(flatten)]
///     point: Point,
///     tags: BTreeMap<String, String>,
///     #[shape(skip)]
///     retries: u32,
/// }
/// ```
///
/// # Generated Code
///
/// ```ignore
/// impl ::imprint::Shape for Point {
///     fn describe(&self) -> ::imprint::ShapeDescriptor { ... }
/// }
///
/// impl ::imprint::ToNode for Point {
///     fn to_node(&self) -> ::imprint::Node { ... }
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape))]
pub fn shape_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    shape::shape_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
