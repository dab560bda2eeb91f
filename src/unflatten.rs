//! Reconstruction of nested translation trees from dotted-key entries.

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::flatten::FlatEntry;

/// Errors produced while rebuilding a translation tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnflattenError {
    /// A dotted key is both a leaf and an internal node.
    #[error("structural conflict: '{leaf_key}' holds a value but '{nested_key}' nests below it")]
    StructuralConflict {
        /// Dotted key that holds (or would hold) a plain string value.
        leaf_key: String,
        /// Dotted key that nests underneath `leaf_key`.
        nested_key: String,
    },
}

/// Rebuild a translation tree from a sequence of dotted-key entries.
///
/// Keys are split on `separator`; intermediate objects are created on demand.
/// At every level of the result, keys appear in first-occurrence order of the
/// input sequence. Inserting the same dotted key twice keeps the last value.
///
/// # Errors
/// `StructuralConflict` when an entry's path runs through an existing string
/// value, or when an entry lands on an existing subtree.
pub fn unflatten<I>(entries: I, separator: &str) -> Result<Value, UnflattenError>
where
    I: IntoIterator<Item = FlatEntry>,
{
    let mut root = Map::new();
    for entry in entries {
        insert_entry(&mut root, &entry.key, entry.value, separator)?;
    }
    Ok(Value::Object(root))
}

/// Walk/create nested objects for all but the last segment, then set the leaf.
fn insert_entry(
    root: &mut Map<String, Value>,
    key: &str,
    value: String,
    separator: &str,
) -> Result<(), UnflattenError> {
    let segments: Vec<&str> = key.split(separator).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match slot {
            Value::Object(map) => current = map,
            _ => {
                let leaf_key =
                    segments.get(..=depth).map(|prefix| prefix.join(separator)).unwrap_or_default();
                return Err(UnflattenError::StructuralConflict {
                    leaf_key,
                    nested_key: key.to_string(),
                });
            }
        }
    }

    if let Some(Value::Object(existing)) = current.get(*last) {
        // The key already names a subtree; report one of its children.
        let nested_key = existing
            .keys()
            .next()
            .map_or_else(|| key.to_string(), |child| format!("{key}{separator}{child}"));
        return Err(UnflattenError::StructuralConflict { leaf_key: key.to_string(), nested_key });
    }
    current.insert((*last).to_string(), Value::String(value));
    Ok(())
}
