//! Objective builders.

use super::{ObjectiveBuilder, VarRegistry, COUNT};
use crate::domain::{Item, PackingInstance};
use crate::engine::{Direction, LinearExpr};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `Σ item.count * per_unit(item)` over all items.
fn weighted_counts<F>(instance: &PackingInstance, vars: &VarRegistry, per_unit: F) -> LinearExpr
where
    F: Fn(&Item) -> f64,
{
    instance
        .items
        .iter()
        .map(|item| (*vars.leaf(&[item.name.as_str(), COUNT]), per_unit(item)))
        .collect()
}

/// Maximize total packed volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxVolume;

impl ObjectiveBuilder for MaxVolume {
    fn name(&self) -> &'static str {
        "max_volume"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn expression(&self, instance: &PackingInstance, vars: &VarRegistry) -> LinearExpr {
        weighted_counts(instance, vars, |item| item.volume_requirement)
    }
}

/// Maximize total packed weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxWeight;

impl ObjectiveBuilder for MaxWeight {
    fn name(&self) -> &'static str {
        "max_weight"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn expression(&self, instance: &PackingInstance, vars: &VarRegistry) -> LinearExpr {
        weighted_counts(instance, vars, |item| item.weight_requirement)
    }
}

/// Maximize total packed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValue;

impl ObjectiveBuilder for MaxValue {
    fn name(&self) -> &'static str {
        "max_value"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn expression(&self, instance: &PackingInstance, vars: &VarRegistry) -> LinearExpr {
        weighted_counts(instance, vars, |item| item.value)
    }
}

/// Which quantity a packing run maximizes.
///
/// # Examples
///
/// ```
/// use u_knapsack::builders::Goal;
///
/// let goal: Goal = "weight".parse().unwrap();
/// assert_eq!(goal, Goal::Weight);
/// assert_eq!(goal.builder().name(), "max_weight");
/// assert!("comfort".parse::<Goal>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Volume,
    Weight,
    #[default]
    Value,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Volume, Goal::Weight, Goal::Value];

    /// The objective builder implementing this goal.
    pub fn builder(&self) -> &'static dyn ObjectiveBuilder {
        match self {
            Goal::Volume => &MaxVolume,
            Goal::Weight => &MaxWeight,
            Goal::Value => &MaxValue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Volume => "volume",
            Goal::Weight => "weight",
            Goal::Value => "value",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no [`Goal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown goal `{0}`, expected one of: volume, weight, value")]
pub struct ParseGoalError(String);

impl FromStr for Goal {
    type Err = ParseGoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| ParseGoalError(s.to_string()))
    }
}
