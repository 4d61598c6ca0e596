//! Implementation of the `#[derive(Shape)]` macro.
//!
//! This module turns struct fields and their `#[shape(...)]` annotations
//! into a `describe` method building a shape descriptor.

mod attrs;
mod derive;

pub use derive::shape_derive_impl;
