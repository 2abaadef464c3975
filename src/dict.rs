//! In-memory OpenFOAM dictionaries and their text representation.
//!
//! A [`Dict`] is an insertion-ordered mapping from keys to [`Value`]s.
//! It renders to the OpenFOAM dictionary syntax with [`Dict::to_foam_string`]
//! and can be read back with [`parse`].
//!
//! ```
//! use firefish::dict::{Dict, Value};
//!
//! let schemes = Dict::new()
//!     .with("ddtSchemes", Dict::new().with("default", Value::word("Euler")))
//!     .with("writePrecision", 6);
//!
//! let text = schemes.to_foam_string();
//! assert!(text.contains("writePrecision 6;"));
//! ```

mod dimension;
mod parse;
mod value;
mod write;

use indexmap::IndexMap;

pub use dimension::Dimension;
pub use parse::{ParseError, parse};
pub use value::Value;
pub use write::DictHeader;

/// An insertion-ordered OpenFOAM dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: IndexMap<String, Value>,
}

impl Dict {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dictionary with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, returning the previous value if any.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Merges every entry of `other` into this dictionary.
    ///
    /// Existing keys are overwritten in place and new keys are appended.
    /// Nested dictionaries are replaced wholesale, not merged.
    pub fn update(&mut self, other: Dict) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns the sub-dictionary stored at `key`, if that entry is a dictionary.
    #[must_use]
    pub fn get_dict(&self, key: &str) -> Option<&Dict> {
        match self.entries.get(key) {
            Some(Value::Dict(dict)) => Some(dict),
            _ => None,
        }
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Renders the dictionary body in OpenFOAM syntax, without a header.
    #[must_use]
    pub fn to_foam_string(&self) -> String {
        let mut out = String::new();
        write::write_entries(&mut out, self, 0);
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Dict {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Dict {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overwrites_in_place_and_appends() {
        let mut dict = Dict::new().with("a", 1).with("b", 2);
        dict.update(Dict::new().with("a", 10).with("c", 3));

        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(dict.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn update_replaces_nested_dicts() {
        let mut dict = Dict::new().with("solver", Dict::new().with("tolerance", 1e-6));
        dict.update(Dict::new().with("solver", Dict::new().with("relTol", 0.1)));

        let solver = dict.get_dict("solver").unwrap();
        assert!(!solver.contains_key("tolerance"));
        assert!(solver.contains_key("relTol"));
    }

    #[test]
    fn remove_keeps_order() {
        let mut dict: Dict = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
        assert_eq!(dict.remove("y"), Some(Value::Int(2)));

        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, ["x", "z"]);
    }
}
