//! Deep merge of configuration trees.
//!
//! Mappings merge key by key, everything else (scalars, arrays) is replaced
//! wholesale by the incoming value. `null` is the absent marker: an incoming
//! `null` never overwrites what the target already holds.

use serde_json::{Map, Value};

/// A nested configuration tree
pub type ConfigTree = Value;

/// Merge `source` into `target`, returning a new tree.
///
/// Neither input is modified. Keys only present in `target` are kept as-is.
pub fn merge(target: &ConfigTree, source: &ConfigTree) -> ConfigTree {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => Value::Object(merge_maps(target, source)),
        (_, Value::Null) => target.clone(),
        _ => source.clone(),
    }
}

/// Merge a sequence of trees left to right, starting from an empty mapping.
pub fn merge_all<'a, I>(trees: I) -> ConfigTree
where
    I: IntoIterator<Item = &'a ConfigTree>,
{
    trees
        .into_iter()
        .fold(empty_tree(), |acc, tree| merge(&acc, tree))
}

/// An empty mapping, the identity element of [`merge`] for mapping inputs
pub fn empty_tree() -> ConfigTree {
    Value::Object(Map::new())
}

fn merge_maps(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut result = target.clone();

    for (key, incoming) in source {
        if incoming.is_null() {
            continue;
        }

        if let (Some(Value::Object(existing)), Value::Object(nested)) =
            (result.get(key), incoming)
        {
            let merged = merge_maps(existing, nested);
            result.insert(key.clone(), Value::Object(merged));
            continue;
        }

        result.insert(key.clone(), incoming.clone());
    }

    result
}
