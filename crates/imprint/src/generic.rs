//! Type-erased serializer entry points.
//!
//! [`GenericSerializer`] lets a caller hold either serializer behind one
//! interface and hand it items as `&dyn Any`. Each serializer downcasts to
//! its own item type ([`Item`](crate::Item) for JSON,
//! [`LineItem`](crate::LineItem) for line protocol) and forwards to its
//! typed methods.
//!
//! ```rust
//! use std::any::Any;
//! use imprint::{GenericSerializer, LineItem, LineSerializer};
//!
//! let serializer: Box<dyn GenericSerializer> = Box::new(LineSerializer::new());
//! let item = LineItem::new("cpu", 1000, 42.5, vec!["host".into(), "a".into()]);
//!
//! let line = serializer.serialize_generic(&item).unwrap();
//! assert_eq!(line, "put cpu 1000 42.500000 host=a\n");
//!
//! // Anything else is rejected.
//! assert!(serializer.serialize_generic(&"not an item" as &dyn Any).is_err());
//! ```

use std::any::Any;

use crate::error::{Error, Result};

/// A serializer that accepts type-erased items.
pub trait GenericSerializer: Send + Sync {
    /// Serializes one item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedItem`] if `item` is not this serializer's
    /// item type, otherwise whatever the typed method returns.
    fn serialize_generic(&self, item: &dyn Any) -> Result<String>;

    /// Serializes a batch of items, in order.
    ///
    /// Every item is checked before any is rendered; the first one of the
    /// wrong type fails the batch with its index.
    fn serialize_generic_array(&self, items: &[&dyn Any]) -> Result<String>;
}

/// Downcasts a single item.
pub(crate) fn downcast<T: 'static>(item: &dyn Any) -> Result<&T> {
    item.downcast_ref::<T>()
        .ok_or(Error::UnexpectedItem { index: None })
}

/// Downcasts every item of a batch, failing on the first mismatch.
pub(crate) fn downcast_all<'a, T: 'static>(items: &[&'a dyn Any]) -> Result<Vec<&'a T>> {
    items
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            item.downcast_ref::<T>()
                .ok_or(Error::UnexpectedItem { index: Some(i) })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let n = 5u32;
        assert_eq!(downcast::<u32>(&n), Ok(&5));
        assert_eq!(
            downcast::<String>(&n),
            Err(Error::UnexpectedItem { index: None })
        );
    }

    #[test]
    fn test_downcast_all_reports_index() {
        let (a, b, c) = (1u32, 2u32, "three");
        let items: [&dyn Any; 3] = [&a, &b, &c];
        assert_eq!(
            downcast_all::<u32>(&items),
            Err(Error::UnexpectedItem { index: Some(2) })
        );
        assert_eq!(downcast_all::<u32>(&items[..2]), Ok(vec![&1, &2]));
    }
}
