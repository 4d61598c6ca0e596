//! Name-keyed storage for compiled templates.
//!
//! The registry is an owned value, not a global: the serializer that owns it
//! takes `&mut self` to register and `&self` to render, so registration is
//! single-writer and rendering can proceed from any number of threads once
//! registration is done.
//!
//! # Example
//!
//! ```rust
//! use imprint::{ShapeDescriptor, TemplateRegistry};
//!
//! let mut registry = TemplateRegistry::new();
//! let shape = ShapeDescriptor::default().property("num", &1);
//!
//! registry.register("n", &shape, &["num"]).unwrap();
//! assert_eq!(registry.get("n").unwrap().slot_count(), 1);
//! assert!(registry.get("missing").is_err());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::compiler::compile;
use crate::error::{Error, Result};
use crate::shape::ShapeDescriptor;
use crate::template::CompiledTemplate;

/// Registry of compiled templates, keyed by name.
///
/// Registering a name that already exists replaces the previous template.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, CompiledTemplate>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Compiles `shape` and stores it under `name`.
    ///
    /// # Errors
    ///
    /// Returns the compile error if the shape cannot be compiled; the registry
    /// is left unchanged, including any template already stored under `name`.
    pub fn register<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        shape: &ShapeDescriptor,
        variables: &[S],
    ) -> Result<()> {
        let name = name.into();
        let template = compile(shape, variables)?;
        self.insert(name, template);
        Ok(())
    }

    /// Stores an already compiled template, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        template: CompiledTemplate,
    ) -> Option<CompiledTemplate> {
        let name = name.into();
        debug!(name = %name, slots = template.slot_count(), "registered template");
        self.templates.insert(name, template)
    }

    /// Looks up a template by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&CompiledTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| Error::TemplateNotFound {
                name: name.to_string(),
            })
    }

    /// Returns `true` if a template is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Returns an iterator over registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
