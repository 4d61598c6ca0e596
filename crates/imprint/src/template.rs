//! Compiled templates and the render engine.
//!
//! A [`CompiledTemplate`] is the output of the compiler: the literal JSON
//! text of a record with every variable position cut out, plus one
//! [`Slot`] per cut recording where it was, which path it belongs to and
//! what kind of value the shape held there.
//!
//! Rendering fills the slots from a flat parameter list in a single pass:
//!
//! ```text
//! skeleton:  {"text":|,"num":7}        slot 0 at offset 8, path "text"
//! params:    ["text", "hi"]
//! output:    {"text":"hi","num":7}
//! ```
//!
//! Templates are immutable once compiled and are `Send + Sync`; any number
//! of threads can render from the same template.

use std::collections::HashMap;
use std::fmt;

use crate::encode::JsonEncoder;
use crate::error::{Error, Result};
use crate::value::Value;

/// The kind of value a shape held at a slot's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Object,
    Array,
}

impl SlotKind {
    /// Returns the kind's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::String => "string",
            SlotKind::Integer => "integer",
            SlotKind::Float => "float",
            SlotKind::Boolean => "boolean",
            SlotKind::Null => "null",
            SlotKind::Object => "object",
            SlotKind::Array => "array",
        }
    }
}

/// A substitution point in a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// The variable path bound to this slot.
    pub path: String,
    /// The kind of value the shape held here at registration.
    pub kind: SlotKind,
    /// Byte offset into the skeleton where the value is inserted.
    pub offset: usize,
}

/// A record shape compiled into literal text and substitution slots.
///
/// Slots are ordered by first encounter in the compile walk (depth-first,
/// declaration order), and their offsets are non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    skeleton: String,
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl CompiledTemplate {
    /// Builds a template from its skeleton and slots.
    ///
    /// If a path appears on more than one slot, the later slot wins the
    /// path lookup.
    pub(crate) fn new(skeleton: String, slots: Vec<Slot>) -> Self {
        let index = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.path.clone(), i))
            .collect();

        Self {
            skeleton,
            slots,
            index,
        }
    }

    /// Returns the literal text with slots removed.
    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    /// Returns the slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot index bound to `path`, if any.
    pub fn slot_index(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    /// Renders the template from a flat `path, value, path, value, ...` list.
    ///
    /// # Errors
    ///
    /// - [`Error::Arity`] if `params.len() != 2 * slot_count()`
    /// - [`Error::NullValue`] if a path or value is [`Value::Null`]
    /// - [`Error::TypeCast`] if a path is not a string
    /// - [`Error::UnknownVariable`] if a path has no slot
    /// - [`Error::MissingVariable`] if a slot is left without a value
    /// - [`Error::UnsupportedKind`] if a value cannot be encoded
    pub fn render(&self, params: &[Value], encoder: &JsonEncoder) -> Result<String> {
        let mut out = String::with_capacity(self.skeleton.len());
        self.render_into(&mut out, params, encoder)?;
        Ok(out)
    }

    /// Renders the template, appending to `out`.
    ///
    /// On error `out` is left unchanged.
    pub fn render_into(
        &self,
        out: &mut String,
        params: &[Value],
        encoder: &JsonEncoder,
    ) -> Result<()> {
        let expected = self.slots.len() * 2;
        if params.len() != expected {
            return Err(Error::Arity {
                expected,
                actual: params.len(),
            });
        }

        let mut values: Vec<Option<String>> = vec![None; self.slots.len()];

        for (pair, chunk) in params.chunks_exact(2).enumerate() {
            let index = pair * 2;
            let (name, value) = (&chunk[0], &chunk[1]);

            let path = match name {
                Value::Null => return Err(Error::NullValue { index }),
                Value::String(path) => path,
                other => {
                    return Err(Error::TypeCast {
                        index,
                        expected: "string",
                        actual: other.kind(),
                    })
                }
            };

            if value.is_null() {
                return Err(Error::NullValue { index: index + 1 });
            }

            let slot = self
                .slot_index(path)
                .ok_or_else(|| Error::UnknownVariable { path: path.clone() })?;

            values[slot] = Some(encoder.encode(value)?);
        }

        // Nothing is written to `out` until every slot has a value.
        if let Some(missing) = values.iter().position(Option::is_none) {
            return Err(Error::MissingVariable {
                path: self.slots[missing].path.clone(),
            });
        }

        let total: usize = values.iter().flatten().map(String::len).sum();
        out.reserve(self.skeleton.len() + total);

        let mut cursor = 0;
        for (slot, value) in self.slots.iter().zip(values.iter().flatten()) {
            out.push_str(&self.skeleton[cursor..slot.offset]);
            out.push_str(value);
            cursor = slot.offset;
        }
        out.push_str(&self.skeleton[cursor..]);

        Ok(())
    }
}

/// Shows the skeleton with each slot marked as `{{ path }}`.
impl fmt::Display for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = 0;
        for slot in &self.slots {
            f.write_str(&self.skeleton[cursor..slot.offset])?;
            write!(f, "{{{{ {} }}}}", slot.path)?;
            cursor = slot.offset;
        }
        f.write_str(&self.skeleton[cursor..])
    }
}
