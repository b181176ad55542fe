//! Dotted-key access to JSON layer trees.

use serde_json::{Map, Value as Json};

use crate::path;

/// Store `value` at the dotted `key` below `root`, creating intermediate
/// nodes. A numeric segment indexes into a sequence, padding it with nulls;
/// where no node exists yet, a numeric segment creates a sequence and any
/// other segment a mapping.
///
/// The empty key merges a mapping `value` into `root`. Returns `false` when
/// the key cannot be addressed, leaving `root` untouched.
pub(super) fn insert(root: &mut Json, key: &str, value: Json) -> bool {
    if key.is_empty() {
        let (Json::Object(entries), Some(target)) = (value, root.as_object_mut()) else {
            return false;
        };
        target.extend(entries);
        return true;
    }
    if !addressable(root, key) {
        return false;
    }
    let mut node = root;
    for segment in key.split('.') {
        let Some(next) = child(node, segment) else {
            return false;
        };
        node = next;
    }
    *node = value;
    true
}

/// Whether every sequence met along `key` is indexed numerically.
fn addressable(root: &Json, key: &str) -> bool {
    let mut node = Some(root);
    for segment in key.split('.') {
        node = match node {
            Some(Json::Array(items)) => match segment.parse::<usize>() {
                Ok(index) => items.get(index),
                Err(_) => return false,
            },
            Some(Json::Object(entries)) => entries.get(segment),
            _ => None,
        };
    }
    true
}

fn child<'a>(node: &'a mut Json, segment: &str) -> Option<&'a mut Json> {
    match node {
        Json::Array(items) => {
            let index = segment.parse::<usize>().ok()?;
            if items.len() <= index {
                items.resize(index.saturating_add(1), Json::Null);
            }
            items.get_mut(index)
        }
        Json::Object(entries) => Some(entries.entry(segment.to_owned()).or_insert(Json::Null)),
        other => {
            *other = if segment.parse::<usize>().is_ok() {
                Json::Array(Vec::new())
            } else {
                Json::Object(Map::new())
            };
            child(other, segment)
        }
    }
}

/// Leaf keys of `root` with their values, in key order.
///
/// Mappings are descended; sequences, scalars, and empty mappings below the
/// root are leaves.
pub(super) fn leaves(root: &Json) -> Vec<(String, &Json)> {
    let mut found = Vec::new();
    if let Json::Object(entries) = root {
        for (key, value) in entries {
            collect(key.clone(), value, &mut found);
        }
    }
    found
}

fn collect<'a>(key: String, node: &'a Json, found: &mut Vec<(String, &'a Json)>) {
    match node {
        Json::Object(entries) if !entries.is_empty() => {
            for (segment, value) in entries {
                collect(path::join(&key, segment), value, found);
            }
        }
        _ => found.push((key, node)),
    }
}
