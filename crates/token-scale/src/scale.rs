//! The `Scale` mapping type.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// An ordered mapping from token identifier to its canonical rem value.
///
/// Identifiers are dash-joined paths (e.g. `base-size-8`), values are literal
/// rem strings (e.g. `"0.5rem"`). Iteration follows insertion order, which in
/// turn follows the order of the source token tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scale {
    entries: IndexMap<SmolStr, SmolStr>,
}

impl Scale {
    /// Creates an empty scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token. An existing entry with the same identifier keeps its
    /// position but takes the new value.
    pub fn insert(&mut self, name: SmolStr, value: SmolStr) {
        self.entries.insert(name, value);
    }

    /// Looks up a token's value by identifier.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(SmolStr::as_str)
    }

    /// Returns true if the scale contains the identifier.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of tokens on the scale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the scale has no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(identifier, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Identifiers sharing the given value, in insertion order.
    pub fn names_for_value<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a str> {
        self.iter()
            .filter(move |(_, entry)| *entry == value)
            .map(|(name, _)| name)
    }

    /// The subset of tokens whose identifier contains `marker`.
    pub fn filtered(&self, marker: &str) -> Scale {
        let entries = self
            .entries
            .iter()
            .filter(|(name, _)| name.contains(marker))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Scale { entries }
    }

    /// The union of `self` and `other`. On identifier collision the entry from
    /// `other` wins, while the map keeps the first-seen position.
    pub fn merged(&self, other: &Scale) -> Scale {
        let mut merged = self.clone();
        for (name, value) in &other.entries {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl FromIterator<(SmolStr, SmolStr)> for Scale {
    fn from_iter<I: IntoIterator<Item = (SmolStr, SmolStr)>>(iter: I) -> Self {
        Scale {
            entries: iter.into_iter().collect(),
        }
    }
}
