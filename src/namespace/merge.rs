//! Recursive namespace merge.

use super::types::{Entry, KeyPath, Namespace};
use indexmap::IndexMap;
use thiserror::Error;

/// Two contributors populated the same path, either both as leaves or one
/// as a leaf and the other as a scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("merge conflict at `{path}`")]
pub struct MergeConflict {
    path: KeyPath,
}

impl MergeConflict {
    pub(crate) fn new(path: KeyPath) -> Self {
        Self { path }
    }

    /// Full path of the offending key.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }
}

impl<T> Namespace<T> {
    /// Merges two namespaces whose leaf paths are disjoint.
    ///
    /// Keys found on one side only are taken as-is. Keys found on both sides
    /// must hold scopes on both sides, which are merged recursively. The
    /// result lists `self`'s keys in their order, then the keys only `other`
    /// has, in `other`'s order.
    ///
    /// # Errors
    ///
    /// [`MergeConflict`] naming the first path (in `self`'s order) that both
    /// sides populate incompatibly.
    pub fn merge(self, other: Namespace<T>) -> Result<Namespace<T>, MergeConflict> {
        merge_at(self, other, &KeyPath::root())
    }
}

fn merge_at<T>(
    left: Namespace<T>,
    right: Namespace<T>,
    prefix: &KeyPath,
) -> Result<Namespace<T>, MergeConflict> {
    let mut remaining = right.entries;
    let mut merged = IndexMap::with_capacity(left.entries.len() + remaining.len());

    for (key, value) in left.entries {
        // shift_remove keeps the relative order of what is left over
        match remaining.shift_remove(&key) {
            None => {
                merged.insert(key, value);
            }
            Some(other) => {
                let path = prefix.child(&key);
                match (value, other) {
                    (Entry::Scope(a), Entry::Scope(b)) => {
                        let inner = merge_at(a, b, &path)?;
                        merged.insert(key, Entry::Scope(inner));
                    }
                    _ => return Err(MergeConflict::new(path)),
                }
            }
        }
    }

    merged.extend(remaining);
    Ok(Namespace { entries: merged })
}
