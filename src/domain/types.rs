//! Carrier, bag and item records.

use serde::{Deserialize, Serialize};

/// Availability of an item without an explicit `available_count`.
///
/// Models never use it as a variable bound directly; see
/// [`PackingInstance::count_limit`](super::PackingInstance::count_limit).
pub const UNBOUNDED_COUNT: u32 = i32::MAX as u32;

/// The person (or vehicle) carrying all bags.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Carrier {
    pub name: String,
    /// Total weight the carrier can take across all bags.
    pub weight_capacity: f64,
}

impl Carrier {
    pub fn new(name: impl Into<String>, weight_capacity: f64) -> Self {
        Self {
            name: name.into(),
            weight_capacity,
        }
    }
}

/// A container with independent volume and weight limits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Bag {
    pub name: String,
    pub volume_capacity: f64,
    pub weight_capacity: f64,
}

impl Bag {
    pub fn new(name: impl Into<String>, volume_capacity: f64, weight_capacity: f64) -> Self {
        Self {
            name: name.into(),
            volume_capacity,
            weight_capacity,
        }
    }
}

/// A catalog entry. Volume, weight and value are per unit.
///
/// # Examples
///
/// ```
/// use u_knapsack::domain::{Item, UNBOUNDED_COUNT};
///
/// let tent = Item::new("Tent 2man", 13.0, 3.5, 2000.0)
///     .with_available_count(1)
///     .with_requirement(1);
/// assert_eq!(tent.max_count(), 1);
///
/// let water = Item::new("Water", 1.0, 1.0, 5.0);
/// assert_eq!(water.max_count(), UNBOUNDED_COUNT);
/// assert_eq!(water.requirement, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub name: String,
    pub volume_requirement: f64,
    pub weight_requirement: f64,
    pub value: f64,
    /// How many units exist. `None` means effectively unbounded.
    #[serde(default)]
    pub available_count: Option<u32>,
    /// How many units must be packed at minimum.
    #[serde(default)]
    pub requirement: u32,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        volume_requirement: f64,
        weight_requirement: f64,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            volume_requirement,
            weight_requirement,
            value,
            available_count: None,
            requirement: 0,
        }
    }

    pub fn with_available_count(mut self, count: u32) -> Self {
        self.available_count = Some(count);
        self
    }

    pub fn with_requirement(mut self, count: u32) -> Self {
        self.requirement = count;
        self
    }

    /// Units available, before any capacity is considered.
    pub fn max_count(&self) -> u32 {
        self.available_count
            .map_or(UNBOUNDED_COUNT, |n| n.min(UNBOUNDED_COUNT))
    }
}
