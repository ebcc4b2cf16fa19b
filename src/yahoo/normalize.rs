//! Shared normalization of Yahoo's position-indexed JSON.
//!
//! Yahoo encodes every resource as an array whose first element holds
//! metadata and whose later elements hold named sub-resources, and every
//! collection as `{"count": n, "0": .., "1": ..}`. [`normalize`] rewrites
//! both shapes recursively into plain objects and lists.

use serde_json::{Map, Value};
use std::collections::HashSet;


/// Normalized output: named fields mapped to values or lists.
pub type DomainObject = Map<String, Value>;

const COUNT_KEY: &str = "count";

/// Shape of one node in the raw tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Scalar(&'a Value),
    /// `{"count": n, "0": .., ..}`, items in index order.
    OrderedCollection(Vec<&'a Value>),
    /// `[meta, {child: ..}, ..]` whose parts share no keys.
    MetaWithChildren(Vec<&'a DomainObject>),
    List(&'a [Value]),
    Object(&'a DomainObject),
}

pub fn classify(value: &Value) -> Node<'_> {
    match value {
        Value::Object(map) => match collection_items(map) {
            Some(items) => Node::OrderedCollection(items),
            None => Node::Object(map),
        },
        Value::Array(items) => match meta_parts(items) {
            Some(parts) => Node::MetaWithChildren(parts),
            None => Node::List(items),
        },
        scalar => Node::Scalar(scalar),
    }
}

/// Recursively rewrite collections into lists and meta arrays into objects.
pub fn normalize(value: &Value) -> Value {
    match classify(value) {
        Node::Scalar(v) => v.clone(),
        Node::OrderedCollection(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Node::MetaWithChildren(parts) => {
            let mut merged = DomainObject::new();
            for part in parts {
                for (key, child) in part {
                    merged.insert(key.clone(), normalize(child));
                }
            }
            Value::Object(merged)
        }
        Node::List(items) => Value::Array(items.iter().map(normalize).collect()),
        Node::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), normalize(child)))
                .collect(),
        ),
    }
}

/// Normalize and require an object; anything else becomes an empty object.
pub fn normalize_object(value: &Value) -> DomainObject {
    match normalize(value) {
        Value::Object(map) => map,
        _ => DomainObject::new(),
    }
}

/// Items of a `count`-keyed collection, or `None` if `map` is not one.
///
/// Every key other than `count` must be a decimal index. Missing indices
/// are skipped rather than filled.
pub fn collection_items(map: &DomainObject) -> Option<Vec<&Value>> {
    let count = map.get(COUNT_KEY)?;
    let count = count
        .as_u64()
        .or_else(|| count.as_str().and_then(|s| s.parse().ok()))?;

    let mut indexed = Vec::with_capacity(map.len());
    for (key, value) in map {
        if key == COUNT_KEY {
            continue;
        }
        indexed.push((key.parse::<u64>().ok()?, value));
    }

    // Only indices present in the map and below `count`.
    indexed.retain(|(index, _)| *index < count);
    indexed.sort_by_key(|(index, _)| *index);
    Some(indexed.into_iter().map(|(_, value)| value).collect())
}

/// Flatten an array of objects (and nested arrays of objects) into its parts,
/// provided no key appears twice.
fn meta_parts(items: &[Value]) -> Option<Vec<&DomainObject>> {
    let mut parts = Vec::new();
    collect_parts(items, &mut parts)?;
    if parts.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    for part in &parts {
        for key in part.keys() {
            if !seen.insert(key.as_str()) {
                return None;
            }
        }
    }
    Some(parts)
}

fn collect_parts<'a>(items: &'a [Value], parts: &mut Vec<&'a DomainObject>) -> Option<()> {
    for item in items {
        match item {
            Value::Object(map) if collection_items(map).is_none() => parts.push(map),
            Value::Array(inner) => collect_parts(inner, parts)?,
            _ => return None,
        }
    }
    Some(())
}

/// Unwrap resource wrappers (`{"team": ..}`) from a normalized list or a
/// single merged object. Absent values yield an empty list.
pub fn items(value: Option<&Value>, wrapper: &str) -> Vec<Value> {
    let unwrap = |v: &Value| v.get(wrapper).cloned().unwrap_or_else(|| v.clone());
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(list)) => list.iter().map(unwrap).collect(),
        Some(Value::Object(map)) if map.is_empty() => Vec::new(),
        Some(single) => vec![unwrap(single)],
    }
}

/// Replace `obj[key]` with its unwrapped item list (empty when missing).
pub fn list_field(obj: &mut DomainObject, key: &str, wrapper: &str) {
    let list = items(obj.get(key), wrapper);
    obj.insert(key.to_string(), Value::Array(list));
}

/// Move the fields of a nested object up into its parent.
pub fn lift(obj: &mut DomainObject, key: &str) {
    if let Some(Value::Object(inner)) = obj.remove(key) {
        for (k, v) in inner {
            obj.insert(k, v);
        }
    }
}

/// Lift every decimal-keyed child object into the parent
/// (`{"week": 3, "0": {"teams": ..}}` → `{"week": 3, "teams": ..}`).
pub fn lift_positional(obj: &mut DomainObject) {
    let positional: Vec<String> = obj
        .iter()
        .filter(|(k, v)| k.parse::<usize>().is_ok() && v.is_object())
        .map(|(k, _)| k.clone())
        .collect();
    for key in positional {
        lift(obj, &key);
    }
}
