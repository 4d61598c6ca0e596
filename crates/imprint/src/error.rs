//! Error types for the imprint crate.

use thiserror::Error;

/// Errors that can occur while compiling shapes or rendering records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A shape contains a value with no textual encoding.
    ///
    /// Raised at registration time; the template is not stored.
    #[error("cannot compile \"{path}\": kind not mapped: {kind}")]
    UnsupportedShape { path: String, kind: &'static str },

    /// No template was registered under the requested name.
    #[error("no template registered with name \"{name}\"")]
    TemplateNotFound { name: String },

    /// Flat parameter count does not match twice the template's slot count.
    #[error("wrong number of parameters: expected {expected}, got {actual}")]
    Arity { expected: usize, actual: usize },

    /// Line-protocol tags must come in key/value pairs.
    #[error("the number of tags must be even, got {count}")]
    OddTagCount { count: usize },

    /// A supplied path is not one of the template's variables.
    #[error("variable \"{path}\" does not exist")]
    UnknownVariable { path: String },

    /// A template variable was not given a value.
    #[error("variable \"{path}\" has no value")]
    MissingVariable { path: String },

    /// A parameter has the wrong kind for its position.
    #[error("parameter at index {index}: expected {expected}, got {actual}")]
    TypeCast {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A type-erased item is not the shape this serializer expects.
    #[error("unexpected instance type{}", item_location(.index))]
    UnexpectedItem { index: Option<usize> },

    /// A parameter name or value is null.
    #[error("parameter at index {index} is null")]
    NullValue { index: usize },

    /// A render-time value has no encoding in the target format.
    #[error("kind not mapped: {kind}")]
    UnsupportedKind { kind: &'static str },

    /// Invalid serializer configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

fn item_location(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" on index: {}", i),
        None => String::new(),
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for imprint operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TemplateNotFound {
            name: "cpu".to_string(),
        };
        assert_eq!(err.to_string(), "no template registered with name \"cpu\"");
    }

    #[test]
    fn test_unexpected_item_display() {
        assert_eq!(
            Error::UnexpectedItem { index: None }.to_string(),
            "unexpected instance type"
        );
        assert_eq!(
            Error::UnexpectedItem { index: Some(3) }.to_string(),
            "unexpected instance type on index: 3"
        );
    }

    #[test]
    fn test_null_value_mentions_null() {
        let err = Error::NullValue { index: 1 };
        assert!(err.to_string().contains("is null"));
    }
}
