//! Token tree flattening.
//!
//! Token sources are nested trees grouped by semantic category. Before scale
//! construction they are flattened to a single level, joining the path of
//! nested keys with `-`: `{"base": {"size": {"8": "0.5rem"}}}` becomes
//! `base-size-8 = "0.5rem"`.

use serde_json::Value;
use smol_str::SmolStr;
use thiserror::Error;

use crate::Scale;

/// An error produced while flattening a token tree.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The tree root was not a JSON object.
    #[error("token tree root must be an object")]
    NotAnObject,

    /// A leaf held something other than a string value.
    #[error("token `{path}` has a non-string value")]
    NonStringLeaf {
        /// The dash-joined path of the offending leaf.
        path: String,
    },
}

/// Flattens a nested token tree into a single-level scale.
///
/// Leaves must be strings; nesting depth is unrestricted. Entry order follows
/// the document order of the tree.
pub fn flatten_tree(tree: &Value) -> Result<Scale, FlattenError> {
    let Value::Object(root) = tree else {
        return Err(FlattenError::NotAnObject);
    };

    let mut scale = Scale::new();
    for (key, child) in root {
        flatten_into(key, child, &mut scale)?;
    }
    Ok(scale)
}

fn flatten_into(path: &str, value: &Value, scale: &mut Scale) -> Result<(), FlattenError> {
    match value {
        Value::String(leaf) => {
            scale.insert(SmolStr::new(path), SmolStr::new(leaf));
            Ok(())
        }
        Value::Object(children) => {
            for (key, child) in children {
                flatten_into(&format!("{path}-{key}"), child, scale)?;
            }
            Ok(())
        }
        _ => Err(FlattenError::NonStringLeaf {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_joins_with_dashes() {
        let tree = json!({"base": {"size": {"8": "0.5rem", "16": "1rem"}}});
        let scale = flatten_tree(&tree).unwrap();

        assert_eq!(scale.get("base-size-8"), Some("0.5rem"));
        assert_eq!(scale.get("base-size-16"), Some("1rem"));
        assert_eq!(scale.len(), 2);
    }

    #[test]
    fn test_flatten_preserves_document_order() {
        let tree = json!({"stack": {"gap": {"condensed": "0.5rem", "normal": "1rem"}}});
        let scale = flatten_tree(&tree).unwrap();
        let names: Vec<_> = scale.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["stack-gap-condensed", "stack-gap-normal"]);
    }

    #[test]
    fn test_non_string_leaf_is_an_error() {
        let tree = json!({"base": {"size": {"8": 8}}});
        let err = flatten_tree(&tree).unwrap_err();
        assert!(matches!(err, FlattenError::NonStringLeaf { path } if path == "base-size-8"));
    }

    #[test]
    fn test_root_must_be_object() {
        let tree = json!(["0.5rem"]);
        assert!(matches!(
            flatten_tree(&tree),
            Err(FlattenError::NotAnObject)
        ));
    }
}
