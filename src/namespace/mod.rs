//! Nested, order-preserving registries shared by model builders.
//!
//! Every builder writes its variables or constraints into a private
//! [`Namespace`] and hands it back. Contributions are combined with
//! [`Namespace::merge`], which accepts any two namespaces whose terminal
//! (leaf) paths are disjoint and rejects everything else with a
//! [`MergeConflict`].
//!
//! # Key Components
//!
//! - [`Namespace`]: ordered mapping from string keys to [`Entry`] values
//! - [`Entry`]: either a leaf (a solver handle, a solved value, ...) or a
//!   nested scope
//! - [`KeyPath`]: the full path to an entry, used in conflict reports
//!
//! # Ordering
//!
//! Keys keep insertion order. A merged namespace lists the left side's keys
//! first, in the left side's order, followed by keys only the right side
//! has, in the right side's order.

mod merge;
mod types;

pub use merge::MergeConflict;
pub use types::{Entry, KeyPath, Namespace};
