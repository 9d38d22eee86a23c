//! Namespace and entry types.

use super::merge::MergeConflict;
use indexmap::IndexMap;
use std::fmt;

/// Full path of an entry inside a [`Namespace`], outermost key first.
///
/// # Examples
///
/// ```
/// use u_knapsack::namespace::KeyPath;
///
/// let path = KeyPath::from(&["Osprey 32L", "Tent 2man", "count"][..]);
/// assert_eq!(path.to_string(), "Osprey 32L.Tent 2man.count");
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The empty path, naming the namespace itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns this path extended by one key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[&str]> for KeyPath {
    fn from(path: &[&str]) -> Self {
        Self(path.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A value stored under one key of a [`Namespace`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    /// A terminal value (solver handle, solved value, ...).
    Leaf(T),
    /// A nested namespace.
    Scope(Namespace<T>),
}

impl<T> Entry<T> {
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Entry::Leaf(value) => Some(value),
            Entry::Scope(_) => None,
        }
    }

    pub fn as_scope(&self) -> Option<&Namespace<T>> {
        match self {
            Entry::Leaf(_) => None,
            Entry::Scope(scope) => Some(scope),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }
}

/// An insertion-ordered, nested mapping from string keys to values.
///
/// Leaves are written at most once: [`insert`](Self::insert) and
/// [`merge`](Self::merge) both refuse to overwrite a populated path.
///
/// # Examples
///
/// ```
/// use u_knapsack::namespace::Namespace;
///
/// let mut weights = Namespace::new();
/// weights.insert(&["bag", "weight"], 1).unwrap();
///
/// let mut counts = Namespace::new();
/// counts.insert(&["bag", "tent", "count"], 2).unwrap();
///
/// let merged = weights.merge(counts).unwrap();
/// assert_eq!(merged.get(&["bag", "weight"]), Some(&1));
/// assert_eq!(merged.get(&["bag", "tent", "count"]), Some(&2));
/// assert_eq!(merged.leaf_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace<T> {
    pub(super) entries: IndexMap<String, Entry<T>>,
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Namespace<T> {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry<T>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The entry stored directly under `key`.
    pub fn entry(&self, key: &str) -> Option<&Entry<T>> {
        self.entries.get(key)
    }

    /// The nested namespace stored directly under `key`.
    pub fn scope(&self, key: &str) -> Option<&Namespace<T>> {
        self.entries.get(key).and_then(Entry::as_scope)
    }

    /// Looks up the leaf at `path`.
    ///
    /// Returns `None` when the path is absent or ends at a scope.
    pub fn get(&self, path: &[&str]) -> Option<&T> {
        let (last, scopes) = path.split_last()?;
        let mut current = self;
        for key in scopes {
            current = current.scope(key)?;
        }
        current.entries.get(*last)?.as_leaf()
    }

    /// Looks up the leaf at `path`, panicking if it is not registered.
    ///
    /// Builders address entities that are known to exist; a missing path is
    /// a construction bug, not a recoverable condition.
    pub fn leaf(&self, path: &[&str]) -> &T {
        match self.get(path) {
            Some(value) => value,
            None => panic!("no registry entry at `{}`", KeyPath::from(path)),
        }
    }

    /// Inserts a leaf, creating intermediate scopes as needed.
    ///
    /// Fails if the path (or a prefix of it) is already a leaf, or if the
    /// path already holds a scope.
    pub fn insert(&mut self, path: &[&str], value: T) -> Result<(), MergeConflict> {
        self.insert_at(&KeyPath::root(), path, value)
    }

    fn insert_at(&mut self, prefix: &KeyPath, path: &[&str], value: T) -> Result<(), MergeConflict> {
        let Some((first, rest)) = path.split_first() else {
            return Err(MergeConflict::new(prefix.clone()));
        };
        let here = prefix.child(first);

        if rest.is_empty() {
            if self.entries.contains_key(*first) {
                return Err(MergeConflict::new(here));
            }
            self.entries.insert(first.to_string(), Entry::Leaf(value));
            return Ok(());
        }

        match self
            .entries
            .entry(first.to_string())
            .or_insert_with(|| Entry::Scope(Namespace::new()))
        {
            Entry::Scope(inner) => inner.insert_at(&here, rest, value),
            Entry::Leaf(_) => Err(MergeConflict::new(here)),
        }
    }

    /// All leaves with their full paths, depth-first in key order.
    pub fn leaves(&self) -> Vec<(KeyPath, &T)> {
        let mut out = Vec::new();
        self.collect_leaves(&KeyPath::root(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &KeyPath, out: &mut Vec<(KeyPath, &'a T)>) {
        for (key, entry) in &self.entries {
            let path = prefix.child(key);
            match entry {
                Entry::Leaf(value) => out.push((path, value)),
                Entry::Scope(inner) => inner.collect_leaves(&path, out),
            }
        }
    }

    /// Total number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                Entry::Leaf(_) => 1,
                Entry::Scope(inner) => inner.leaf_count(),
            })
            .sum()
    }

    /// Builds a namespace of the same shape with every leaf transformed.
    pub fn map<U, F>(&self, mut f: F) -> Namespace<U>
    where
        F: FnMut(&T) -> U,
    {
        self.map_with(&mut f)
    }

    fn map_with<U, F>(&self, f: &mut F) -> Namespace<U>
    where
        F: FnMut(&T) -> U,
    {
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| {
                let mapped = match entry {
                    Entry::Leaf(value) => Entry::Leaf(f(value)),
                    Entry::Scope(inner) => Entry::Scope(inner.map_with(f)),
                };
                (key.clone(), mapped)
            })
            .collect();
        Namespace { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut ns = Namespace::new();
        ns.insert(&["a", "b", "c"], 1).unwrap();
        ns.insert(&["a", "d"], 2).unwrap();

        assert_eq!(ns.get(&["a", "b", "c"]), Some(&1));
        assert_eq!(ns.get(&["a", "d"]), Some(&2));
        assert_eq!(ns.get(&["a", "b"]), None); // scope, not leaf
        assert_eq!(ns.get(&["x"]), None);
        assert_eq!(ns.get(&[]), None);
        assert_eq!(ns.leaf_count(), 2);
    }

    #[test]
    fn test_insert_twice_conflicts() {
        let mut ns = Namespace::new();
        ns.insert(&["bag", "weight"], 1).unwrap();
        let err = ns.insert(&["bag", "weight"], 2).unwrap_err();
        assert_eq!(err.path().to_string(), "bag.weight");
        assert_eq!(ns.get(&["bag", "weight"]), Some(&1));
    }

    #[test]
    fn test_insert_through_leaf_conflicts() {
        let mut ns = Namespace::new();
        ns.insert(&["bag", "weight"], 1).unwrap();
        let err = ns.insert(&["bag", "weight", "count"], 2).unwrap_err();
        assert_eq!(err.path().segments(), &["bag".to_string(), "weight".to_string()]);
    }

    #[test]
    fn test_insert_leaf_over_scope_conflicts() {
        let mut ns = Namespace::new();
        ns.insert(&["bag", "tent", "count"], 1).unwrap();
        let err = ns.insert(&["bag", "tent"], 2).unwrap_err();
        assert_eq!(err.path().to_string(), "bag.tent");
    }

    #[test]
    fn test_empty_path_conflicts() {
        let mut ns = Namespace::new();
        assert!(ns.insert(&[], 1).unwrap_err().path().is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let mut ns = Namespace::new();
        ns.insert(&["zeta", "count"], 1).unwrap();
        ns.insert(&["alpha", "count"], 2).unwrap();
        ns.insert(&["mid", "count"], 3).unwrap();
        assert_eq!(ns.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);

        let paths: Vec<String> = ns.leaves().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["zeta.count", "alpha.count", "mid.count"]);
    }

    #[test]
    #[should_panic(expected = "no registry entry at `ghost.count`")]
    fn test_leaf_missing_panics() {
        let ns: Namespace<u32> = Namespace::new();
        ns.leaf(&["ghost", "count"]);
    }

    #[test]
    fn test_map_keeps_shape() {
        let mut ns = Namespace::new();
        ns.insert(&["b", "x"], 2).unwrap();
        ns.insert(&["a"], 3).unwrap();
        let doubled = ns.map(|v| f64::from(*v) * 2.0);

        assert_eq!(doubled.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(doubled.get(&["b", "x"]), Some(&4.0));
        assert_eq!(doubled.get(&["a"]), Some(&6.0));
    }

    #[test]
    fn test_entry_accessors() {
        let mut ns = Namespace::new();
        ns.insert(&["s", "l"], 7).unwrap();
        let scope = ns.entry("s").unwrap();
        assert!(!scope.is_leaf());
        assert!(scope.as_leaf().is_none());
        let leaf = scope.as_scope().unwrap().entry("l").unwrap();
        assert_eq!(leaf.as_leaf(), Some(&7));
    }
}
