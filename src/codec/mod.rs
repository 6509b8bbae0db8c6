//! Flatten/Rebuild codec
//!
//! Converts nested structured values into flat, dotted property keys and
//! back. Objects contribute their member names as key segments, lists their
//! 1-based positions:
//!
//! ```
//! use git_versioner::codec::StructuredValue;
//!
//! let value = StructuredValue::from_json(&serde_json::json!({"alist": ["x", true, 7]}));
//! let flat = value.flatten();
//! assert_eq!(flat["alist.1"], "x");
//! assert_eq!(flat["alist.3"], "7");
//! assert_eq!(StructuredValue::rebuild(&flat), value);
//! ```
//!
//! Empty strings, nulls and empty containers produce no keys, so they do not
//! survive a round trip.

pub mod de;
pub mod properties;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Flat key/value view of a structured value, sorted by key
pub type FlatProperties = BTreeMap<String, String>;

/// Recursive value handled by the codec
///
/// Scalars keep their textual form; typed access parses them on demand
/// through the [`serde::Deserializer`] impl in [`de`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredValue {
    Scalar(String),
    List(Vec<StructuredValue>),
    Object(BTreeMap<String, StructuredValue>),
}

impl From<&str> for StructuredValue {
    fn from(value: &str) -> Self {
        StructuredValue::Scalar(value.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(value: String) -> Self {
        StructuredValue::Scalar(value)
    }
}

impl From<Vec<StructuredValue>> for StructuredValue {
    fn from(items: Vec<StructuredValue>) -> Self {
        StructuredValue::List(items)
    }
}

impl From<BTreeMap<String, StructuredValue>> for StructuredValue {
    fn from(members: BTreeMap<String, StructuredValue>) -> Self {
        StructuredValue::Object(members)
    }
}

impl StructuredValue {
    /// Convert a JSON value, dropping nulls
    ///
    /// Null list elements are removed rather than kept as holes. A top-level
    /// null becomes an empty object.
    pub fn from_json(value: &serde_json::Value) -> Self {
        json_to_structured(value).unwrap_or_else(|| StructuredValue::Object(BTreeMap::new()))
    }

    /// Structured form of any serializable value
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Self::from_json(&json))
    }

    /// JSON form with every scalar as a string
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            StructuredValue::Scalar(s) => serde_json::Value::String(s.clone()),
            StructuredValue::List(items) => {
                serde_json::Value::Array(items.iter().map(StructuredValue::to_json).collect())
            }
            StructuredValue::Object(members) => serde_json::Value::Object(
                members
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Flatten into dotted keys rooted at the top level
    pub fn flatten(&self) -> FlatProperties {
        self.flatten_under("")
    }

    /// Flatten into dotted keys below `prefix`
    ///
    /// A scalar at the root has no key of its own; with an empty prefix it
    /// is dropped.
    pub fn flatten_under(&self, prefix: &str) -> FlatProperties {
        let mut flat = FlatProperties::new();
        flatten_into(self, prefix, &mut flat);
        flat
    }

    /// Rebuild a nested value from flat keys
    ///
    /// Objects whose member names are exactly `1..=n` become lists. A key
    /// that is both a scalar and the parent of dotted keys keeps the nested
    /// value.
    pub fn rebuild(flat: &FlatProperties) -> Self {
        rebuild_entries(flat.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Rebuild and deserialize straight into `T`
    pub fn rebuild_as<T: DeserializeOwned>(flat: &FlatProperties) -> Result<T> {
        T::deserialize(Self::rebuild(flat))
    }
}

/// Flattened entries of `value` that differ from the flattened `defaults`
pub fn changed_entries(value: &StructuredValue, defaults: &StructuredValue) -> FlatProperties {
    retain_changed(value.flatten(), &defaults.flatten())
}

/// Keep the top-level members of `flat` that differ from `defaults`
///
/// A member is kept whole when any entry below it was added, changed or
/// removed, so lists and nested objects rebuild intact.
pub fn retain_changed(flat: FlatProperties, defaults: &FlatProperties) -> FlatProperties {
    let mut changed: BTreeSet<&str> = flat
        .iter()
        .filter(|(key, value)| defaults.get(*key) != Some(*value))
        .map(|(key, _)| root_segment(key))
        .collect();
    changed.extend(
        defaults
            .keys()
            .filter(|key| !flat.contains_key(*key))
            .map(|key| root_segment(key)),
    );
    let changed: BTreeSet<String> = changed.into_iter().map(str::to_string).collect();

    flat.into_iter()
        .filter(|(key, _)| changed.contains(root_segment(key)))
        .collect()
}

fn root_segment(key: &str) -> &str {
    key.split_once('.').map_or(key, |(head, _)| head)
}

fn json_to_structured(value: &serde_json::Value) -> Option<StructuredValue> {
    use serde_json::Value;

    match value {
        Value::Null => None,
        Value::Bool(b) => Some(StructuredValue::Scalar(b.to_string())),
        Value::Number(n) => Some(StructuredValue::Scalar(n.to_string())),
        Value::String(s) => Some(StructuredValue::Scalar(s.clone())),
        Value::Array(items) => Some(StructuredValue::List(
            items.iter().filter_map(json_to_structured).collect(),
        )),
        Value::Object(members) => Some(StructuredValue::Object(
            members
                .iter()
                .filter_map(|(name, value)| {
                    json_to_structured(value).map(|v| (name.clone(), v))
                })
                .collect(),
        )),
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn flatten_into(value: &StructuredValue, path: &str, flat: &mut FlatProperties) {
    match value {
        StructuredValue::Scalar(s) => {
            if !path.is_empty() && !s.is_empty() {
                flat.insert(path.to_string(), s.clone());
            }
        }
        StructuredValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(item, &join_key(path, &(i + 1).to_string()), flat);
            }
        }
        StructuredValue::Object(members) => {
            for (name, member) in members {
                flatten_into(member, &join_key(path, name), flat);
            }
        }
    }
}

fn rebuild_entries<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> StructuredValue {
    let mut members = BTreeMap::new();
    let mut nested: BTreeMap<&'a str, Vec<(&'a str, &'a str)>> = BTreeMap::new();

    for (key, value) in entries {
        match key.split_once('.') {
            Some((head, rest)) => nested.entry(head).or_default().push((rest, value)),
            None => {
                members.insert(key.to_string(), StructuredValue::Scalar(value.to_string()));
            }
        }
    }

    for (head, children) in nested {
        let child = rebuild_entries(children.into_iter());
        if let Some(StructuredValue::Scalar(dropped)) = members.insert(head.to_string(), child) {
            warn!(
                "Key '{}' has both a value ('{}') and nested keys; keeping the nested keys",
                head, dropped
            );
        }
    }

    into_list_if_indexed(members)
}

/// Position encoded by a canonical 1-based index key
fn list_index(key: &str) -> Option<usize> {
    if key.starts_with('0') || !key.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

fn into_list_if_indexed(members: BTreeMap<String, StructuredValue>) -> StructuredValue {
    let n = members.len();
    let indexed = n > 0
        && members
            .keys()
            .all(|key| list_index(key).is_some_and(|i| i >= 1 && i <= n));

    if !indexed {
        return StructuredValue::Object(members);
    }

    let mut items: Vec<(usize, StructuredValue)> = members
        .into_iter()
        .filter_map(|(key, value)| list_index(&key).map(|i| (i, value)))
        .collect();
    items.sort_by_key(|(i, _)| *i);
    StructuredValue::List(items.into_iter().map(|(_, value)| value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(entries: &[(&str, &str)]) -> FlatProperties {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_list_of_scalars() {
        let value = StructuredValue::from_json(&json!({"alist": ["x", true, 7]}));
        assert_eq!(
            value.flatten(),
            flat(&[("alist.1", "x"), ("alist.2", "true"), ("alist.3", "7")])
        );
    }

    #[test]
    fn test_rebuild_restores_list() {
        let rebuilt =
            StructuredValue::rebuild(&flat(&[("alist.1", "x"), ("alist.2", "true"), ("alist.3", "7")]));
        match rebuilt {
            StructuredValue::Object(members) => {
                assert_eq!(
                    members["alist"],
                    StructuredValue::List(vec!["x".into(), "true".into(), "7".into()])
                );
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_objects_and_lists() {
        let value = StructuredValue::from_json(&json!({
            "a": {"b": "1", "c": [{"d": "x"}, {"d": "y", "e": ["p", "q"]}]},
            "z": "last"
        }));
        let flat = value.flatten();
        assert_eq!(flat["a.c.2.e.2"], "q");
        assert_eq!(flat["a.c.1.d"], "x");
        assert_eq!(StructuredValue::rebuild(&flat), value);
    }

    #[test]
    fn test_more_than_nine_elements_keep_order() {
        let items: Vec<String> = (1..=12).map(|i| format!("v{}", i)).collect();
        let value = StructuredValue::from_json(&json!({ "l": items }));
        assert_eq!(StructuredValue::rebuild(&value.flatten()), value);
    }

    #[test]
    fn test_gapped_indices_stay_object() {
        let rebuilt = StructuredValue::rebuild(&flat(&[("l.1", "a"), ("l.3", "c")]));
        let StructuredValue::Object(root) = rebuilt else {
            panic!("expected object");
        };
        assert!(matches!(root["l"], StructuredValue::Object(_)));
    }

    #[test]
    fn test_leading_zero_index_stays_object() {
        let rebuilt = StructuredValue::rebuild(&flat(&[("l.01", "a")]));
        let StructuredValue::Object(root) = rebuilt else {
            panic!("expected object");
        };
        assert!(matches!(root["l"], StructuredValue::Object(_)));
    }

    #[test]
    fn test_root_list() {
        let rebuilt = StructuredValue::rebuild(&flat(&[("1", "a"), ("2", "b")]));
        assert_eq!(rebuilt, StructuredValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_empty_containers_are_dropped() {
        let value = StructuredValue::from_json(&json!({"empty": {}, "none": [], "blank": "", "n": null}));
        assert!(value.flatten().is_empty());
        assert_eq!(
            StructuredValue::rebuild(&value.flatten()),
            StructuredValue::Object(BTreeMap::new())
        );
    }

    #[test]
    fn test_nested_wins_over_scalar() {
        let rebuilt = StructuredValue::rebuild(&flat(&[("a", "plain"), ("a.b", "deep")]));
        assert_eq!(
            rebuilt.to_json(),
            json!({"a": {"b": "deep"}})
        );
    }

    #[test]
    fn test_flatten_under_prefix() {
        let value = StructuredValue::from_json(&json!({"tag": "1.2.3"}));
        assert_eq!(
            value.flatten_under("versioner.state"),
            flat(&[("versioner.state.tag", "1.2.3")])
        );
        assert_eq!(StructuredValue::from("x").flatten_under("k"), flat(&[("k", "x")]));
        assert!(StructuredValue::from("x").flatten().is_empty());
    }

    #[test]
    fn test_changed_entries() {
        let defaults = StructuredValue::from_json(&json!({"a": "1", "b": ["x", "y"]}));
        let value = StructuredValue::from_json(&json!({"a": "1", "b": ["x", "z"], "c": "new"}));
        assert_eq!(
            changed_entries(&value, &defaults),
            flat(&[("b.1", "x"), ("b.2", "z"), ("c", "new")])
        );
    }

    #[test]
    fn test_changed_entries_shrunk_list() {
        let defaults = StructuredValue::from_json(&json!({"l": ["a", "b"], "k": "v"}));
        let value = StructuredValue::from_json(&json!({"l": ["a"], "k": "v"}));
        let changed = changed_entries(&value, &defaults);
        assert_eq!(changed, flat(&[("l.1", "a")]));
        assert_eq!(
            StructuredValue::rebuild(&changed).to_json(),
            json!({"l": ["a"]})
        );
    }
}
