//! Canonical field paths.
//!
//! Paths identify a position inside a possibly nested record: properties are
//! joined with `.` (`tags.host`) and collection elements are indexed with
//! brackets (`array[1]`). The compiler builds paths with these functions and
//! callers use the same strings to name variables.

/// Joins a property label onto a parent path.
///
/// ```
/// use imprint::path::join;
///
/// assert_eq!(join("", "tags"), "tags");
/// assert_eq!(join("tags", "host"), "tags.host");
/// ```
pub fn join(parent: &str, label: &str) -> String {
    if parent.is_empty() {
        return label.to_string();
    }

    let mut path = String::with_capacity(parent.len() + label.len() + 1);
    path.push_str(parent);
    path.push('.');
    path.push_str(label);
    path
}

/// Appends an element index to a parent path.
///
/// ```
/// use imprint::path::index_path;
///
/// assert_eq!(index_path("array", 2), "array[2]");
/// ```
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
