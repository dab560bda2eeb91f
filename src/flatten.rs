//! Flattening of nested translation trees into dotted-key entries.

use serde_json::Value;
use thiserror::Error;

/// Errors produced while flattening a translation tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    /// A leaf had a JSON type other than string or null.
    #[error("invalid leaf type at '{key}': expected a string, found {found}")]
    InvalidLeafType {
        /// Dotted key of the offending leaf (empty for a non-object root).
        key: String,
        /// JSON type name of the value that was found.
        found: &'static str,
    },
}

/// A (dotted key, value) pair produced by flattening a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// `.`-joined path from the tree root to the leaf.
    pub key: String,
    /// The translation text at that path.
    pub value: String,
}

impl FlatEntry {
    /// Create an entry from anything string-like. Mostly useful in tests.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Lazy depth-first iterator over the flat entries of a translation tree.
///
/// Entries are yielded in key-insertion order of the source tree. `null`
/// leaves yield nothing (the key is treated as absent); leaves of any type
/// other than string or null stop the iteration with an error. Cloning the
/// iterator before use restarts the traversal from the root.
#[derive(Debug, Clone)]
pub struct FlatEntries<'a> {
    /// Separator joining path segments.
    separator: &'a str,
    /// Pending (dotted path, subtree) pairs, depth-first, last in first out.
    stack: Vec<(Option<String>, &'a Value)>,
}

impl<'a> FlatEntries<'a> {
    /// Start a traversal of `tree`, joining path segments with `separator`.
    #[must_use]
    pub fn new(tree: &'a Value, separator: &'a str) -> Self {
        Self { separator, stack: vec![(None, tree)] }
    }
}

impl Iterator for FlatEntries<'_> {
    type Item = Result<FlatEntry, FlattenError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, value)) = self.stack.pop() {
            match (path, value) {
                (path, Value::Object(map)) => {
                    // Reversed so that the stack pops children in map order.
                    for (key, child) in map.iter().rev() {
                        let child_path = match &path {
                            Some(prefix) => format!("{prefix}{}{key}", self.separator),
                            None => key.clone(),
                        };
                        self.stack.push((Some(child_path), child));
                    }
                }
                (Some(_), Value::Null) => {}
                (Some(key), Value::String(text)) => {
                    return Some(Ok(FlatEntry { key, value: text.clone() }));
                }
                (Some(key), other) => {
                    return Some(Err(FlattenError::InvalidLeafType {
                        key,
                        found: json_type_name(other),
                    }));
                }
                (None, other) => {
                    return Some(Err(FlattenError::InvalidLeafType {
                        key: String::new(),
                        found: json_type_name(other),
                    }));
                }
            }
        }
        None
    }
}

/// Flatten a translation tree into a vector of dotted-key entries.
///
/// # Errors
/// `InvalidLeafType` on the first leaf that is neither a string nor null, or
/// when the root is not an object.
pub fn flatten(tree: &Value, separator: &str) -> Result<Vec<FlatEntry>, FlattenError> {
    FlatEntries::new(tree, separator).collect()
}

/// Human-readable JSON type name, for error messages.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
