//! The template compiler.
//!
//! [`compile`] walks a [`ShapeDescriptor`] depth-first in declaration order
//! and writes the record's JSON text. Positions whose path is one of the
//! declared variables are cut out and recorded as slots; everything else is
//! baked into the skeleton as a literal.
//!
//! | Node | Literal | Variable |
//! |------|---------|----------|
//! | scalar | encoded value | slot |
//! | composite | `{...}` around its fields | slot for the whole object |
//! | keyed collection | `{"key":...}`, entries at `path.key` | slot for the whole object |
//! | ordered collection | `[...]`, elements at `path[i]` | slot for the whole array |

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::encode::{self, non_finite_kind};
use crate::error::{Error, Result};
use crate::path::{index_path, join};
use crate::shape::{Node, Scalar, ShapeDescriptor};
use crate::template::{CompiledTemplate, Slot, SlotKind};

/// Compiles a shape into a template, cutting a slot at every path listed in
/// `variables`.
///
/// Variable paths that match no position in the shape are ignored with a
/// warning.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] if a literal has no JSON encoding
/// (NaN or infinite floats). No template is produced.
///
/// # Example
///
/// ```
/// use imprint::{compile, ShapeDescriptor};
///
/// let shape = ShapeDescriptor::default()
///     .property("text", &"x")
///     .property("num", &7);
///
/// let template = compile(&shape, &["text"]).unwrap();
/// assert_eq!(template.slot_count(), 1);
/// assert_eq!(template.to_string(), r#"{"text":{{ text }},"num":7}"#);
/// ```
pub fn compile<S: AsRef<str>>(
    shape: &ShapeDescriptor,
    variables: &[S],
) -> Result<CompiledTemplate> {
    let variables: HashSet<&str> = variables.iter().map(|v| v.as_ref()).collect();

    let mut compiler = Compiler {
        variables: &variables,
        skeleton: String::new(),
        slots: Vec::new(),
    };

    compiler.skeleton.push('{');
    let mut first = true;
    compiler.write_fields(shape, "", &mut first)?;
    compiler.skeleton.push('}');

    let Compiler { skeleton, slots, .. } = compiler;

    for unmatched in variables
        .iter()
        .filter(|v| !slots.iter().any(|s| s.path == **v))
    {
        warn!(path = %unmatched, "variable path does not match any field");
    }

    debug!(
        slots = slots.len(),
        skeleton_len = skeleton.len(),
        "compiled template"
    );

    Ok(CompiledTemplate::new(skeleton, slots))
}

struct Compiler<'a> {
    variables: &'a HashSet<&'a str>,
    skeleton: String,
    slots: Vec<Slot>,
}

impl Compiler<'_> {
    /// Writes the properties of a composite, flattening unlabeled composites
    /// into the same object. `first` tracks comma placement across the
    /// flattened levels.
    fn write_fields(
        &mut self,
        shape: &ShapeDescriptor,
        path: &str,
        first: &mut bool,
    ) -> Result<()> {
        for field in &shape.fields {
            match (&field.label, &field.node) {
                (Some(label), node) => {
                    if !*first {
                        self.skeleton.push(',');
                    }
                    *first = false;

                    encode::write_key(&mut self.skeleton, label);
                    self.write_node(node, &join(path, label))?;
                }
                (None, Node::Struct(inner)) => self.write_fields(inner, path, first)?,
                (None, _) => {}
            }
        }
        Ok(())
    }

    fn write_node(&mut self, node: &Node, path: &str) -> Result<()> {
        if self.variables.contains(path) {
            self.slots.push(Slot {
                path: path.to_string(),
                kind: slot_kind(node),
                offset: self.skeleton.len(),
            });
            return Ok(());
        }

        match node {
            Node::Scalar(scalar) => self.write_scalar(scalar, path)?,
            Node::Struct(shape) => {
                self.skeleton.push('{');
                let mut first = true;
                self.write_fields(shape, path, &mut first)?;
                self.skeleton.push('}');
            }
            Node::Map(entries) => {
                self.skeleton.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.skeleton.push(',');
                    }
                    encode::write_key(&mut self.skeleton, key);
                    self.write_node(value, &join(path, key))?;
                }
                self.skeleton.push('}');
            }
            Node::List(items) => {
                self.skeleton.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.skeleton.push(',');
                    }
                    self.write_node(item, &index_path(path, i))?;
                }
                self.skeleton.push(']');
            }
        }
        Ok(())
    }

    fn write_scalar(&mut self, scalar: &Scalar, path: &str) -> Result<()> {
        let out = &mut self.skeleton;
        match scalar {
            Scalar::String(s) => encode::write_string(out, s),
            Scalar::Int(n) => out.push_str(&n.to_string()),
            Scalar::UInt(n) => out.push_str(&n.to_string()),
            Scalar::Float(n) => {
                if !n.is_finite() {
                    return Err(Error::UnsupportedShape {
                        path: path.to_string(),
                        kind: non_finite_kind(*n),
                    });
                }
                encode::write_float(out, *n)?;
            }
            Scalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Scalar::Null => out.push_str("null"),
        }
        Ok(())
    }
}

fn slot_kind(node: &Node) -> SlotKind {
    match node {
        Node::Scalar(Scalar::String(_)) => SlotKind::String,
        Node::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => SlotKind::Integer,
        Node::Scalar(Scalar::Float(_)) => SlotKind::Float,
        Node::Scalar(Scalar::Bool(_)) => SlotKind::Boolean,
        Node::Scalar(Scalar::Null) => SlotKind::Null,
        Node::Struct(_) | Node::Map(_) => SlotKind::Object,
        Node::List(_) => SlotKind::Array,
    }
}
