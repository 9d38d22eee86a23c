//! Problem entities.
//!
//! A [`PackingInstance`] is one [`Carrier`] with a weight budget, an ordered
//! list of [`Bag`]s and a catalog of [`Item`]s. Entities are plain immutable
//! records; the model builders only read them.

mod instance;
mod types;

pub use instance::PackingInstance;
pub use types::{Bag, Carrier, Item, UNBOUNDED_COUNT};
