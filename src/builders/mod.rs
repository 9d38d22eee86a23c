//! Variable, constraint and objective builders.
//!
//! Each builder is responsible for one family of declarations and knows
//! nothing about the others. Builders return their contribution as a fresh
//! [`Namespace`]; the [`ModelComposer`](crate::model::ModelComposer) merges
//! contributions into the shared registries in a fixed order.
//!
//! # Registry layout
//!
//! | Path                        | Written by          | Meaning                     |
//! |-----------------------------|---------------------|-----------------------------|
//! | `item.count`                | [`ItemCountVars`]   | units of `item` packed      |
//! | `bag.item.count`            | [`ItemInBagVars`]   | units of `item` in `bag`    |
//! | `bag.weight`, `bag.volume`  | [`BagResourceVars`] | used weight / volume of bag |
//!
//! Constraints use the same entity names with the labels `weight`,
//! `volume`, `total` and `required`.
//!
//! # Key Components
//!
//! - [`VariableBuilder`], [`ConstraintBuilder`], [`ObjectiveBuilder`]: the
//!   three builder roles
//! - [`Goal`]: selects one of the objective builders

mod constraints;
mod objective;
mod variables;

pub use constraints::{BagCapacityLimits, CarrierWeightLimit, ItemRequirements};
pub use objective::{Goal, MaxValue, MaxVolume, MaxWeight, ParseGoalError};
pub use variables::{BagResourceVars, ItemCountVars, ItemInBagVars};

use crate::domain::PackingInstance;
use crate::engine::{ConstraintHandle, Direction, LinearExpr, SolverEngine, VarHandle};
use crate::error::Result;
use crate::namespace::Namespace;

/// Logical variable names to engine handles.
pub type VarRegistry = Namespace<VarHandle>;

/// Entity and label to engine constraint handles.
pub type ConstraintRegistry = Namespace<ConstraintHandle>;

pub const COUNT: &str = "count";
pub const WEIGHT: &str = "weight";
pub const VOLUME: &str = "volume";
pub const TOTAL: &str = "total";
pub const REQUIRED: &str = "required";

/// Declares one family of decision variables.
pub trait VariableBuilder {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Declares the variables and returns them as a new namespace.
    fn declare(
        &self,
        instance: &PackingInstance,
        engine: &mut dyn SolverEngine,
    ) -> Result<VarRegistry>;
}

/// Declares one family of constraints over already registered variables.
pub trait ConstraintBuilder {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Declares the constraints and returns them as a new namespace.
    ///
    /// # Panics
    ///
    /// If `vars` lacks a variable this builder reads.
    fn constrain(
        &self,
        instance: &PackingInstance,
        vars: &VarRegistry,
        engine: &mut dyn SolverEngine,
    ) -> Result<ConstraintRegistry>;
}

/// Produces the model objective.
pub trait ObjectiveBuilder {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn direction(&self) -> Direction;

    /// The objective expression over registered variables.
    fn expression(&self, instance: &PackingInstance, vars: &VarRegistry) -> LinearExpr;

    /// Sets the objective on `engine` and returns the expression used.
    fn apply(
        &self,
        instance: &PackingInstance,
        vars: &VarRegistry,
        engine: &mut dyn SolverEngine,
    ) -> LinearExpr {
        let expr = self.expression(instance, vars);
        engine.set_objective(expr.clone(), self.direction());
        expr
    }
}
