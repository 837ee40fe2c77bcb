//! Key-path flattening of arbitrary JSON trees.
//!
//! Objects and arrays are branches; everything else is a leaf. Each leaf
//! becomes one [`FlatField`] whose path joins the object keys and array
//! indices leading to it with [`PATH_SEPARATOR`].
//!
//! ```rust
//! use serde_json::json;
//! use tickboard_core::flatten::flatten;
//!
//! let fields = flatten(&json!({ "ratios": { "grossMargin": 0.46 }, "tags": ["a"] }));
//! let paths = fields.iter().map(|f| f.path.as_str()).collect::<Vec<_>>();
//! assert_eq!(paths, ["ratios.grossMargin", "tags.0"]);
//! ```

use serde::Serialize;
use serde_json::Value;

pub const PATH_SEPARATOR: char = '.';

/// Path assigned to a scalar passed directly to [`flatten`].
pub const ROOT_PATH: &str = "value";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatField {
    pub path: String,
    pub value: Value,
}

/// Flattens `value` into leaf fields in deterministic order.
///
/// Object keys are visited in `serde_json::Map` order (sorted) and arrays in
/// index order. Empty objects and arrays are kept as leaves so that no key
/// silently disappears from the table.
pub fn flatten(value: &Value) -> Vec<FlatField> {
    let mut fields = Vec::new();
    match value {
        Value::Object(map) if !map.is_empty() => walk(value, &mut String::new(), &mut fields),
        Value::Array(items) if !items.is_empty() => walk(value, &mut String::new(), &mut fields),
        other => fields.push(FlatField {
            path: String::from(ROOT_PATH),
            value: other.clone(),
        }),
    }
    fields
}

fn walk(value: &Value, path: &mut String, fields: &mut Vec<FlatField>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                descend(child, key, path, fields);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                descend(child, &index.to_string(), path, fields);
            }
        }
        leaf => fields.push(FlatField {
            path: path.clone(),
            value: leaf.clone(),
        }),
    }
}

fn descend(child: &Value, segment: &str, path: &mut String, fields: &mut Vec<FlatField>) {
    let restore = path.len();
    if !path.is_empty() {
        path.push(PATH_SEPARATOR);
    }
    path.push_str(segment);
    walk(child, path, fields);
    path.truncate(restore);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_statement_entries() {
        let fields = flatten(&json!({
            "income_statement": {
                "revenues": { "label": "Revenues", "value": 383285000000_u64 }
            },
            "ratios": { "peRatioTTM": 29.8 }
        }));

        assert_eq!(
            fields,
            vec![
                FlatField {
                    path: String::from("income_statement.revenues.label"),
                    value: json!("Revenues"),
                },
                FlatField {
                    path: String::from("income_statement.revenues.value"),
                    value: json!(383285000000_u64),
                },
                FlatField {
                    path: String::from("ratios.peRatioTTM"),
                    value: json!(29.8),
                },
            ]
        );
    }

    #[test]
    fn keeps_empty_containers_and_nulls_as_leaves() {
        let fields = flatten(&json!({ "a": {}, "b": [], "c": null }));
        let paths = fields.iter().map(|f| f.path.as_str()).collect::<Vec<_>>();
        assert_eq!(paths, ["a", "b", "c"]);
        assert_eq!(fields[0].value, json!({}));
    }

    #[test]
    fn scalar_root_uses_root_path() {
        let fields = flatten(&json!(42));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, ROOT_PATH);
    }

    #[test]
    fn indexes_array_elements() {
        let fields = flatten(&json!({ "segments": [{ "name": "iPhone" }, { "name": "Mac" }] }));
        let paths = fields.iter().map(|f| f.path.as_str()).collect::<Vec<_>>();
        assert_eq!(paths, ["segments.0.name", "segments.1.name"]);
    }
}
