//! Model composition, solving and reporting.
//!
//! [`ModelComposer`] runs an explicit, ordered list of variable builders
//! followed by an ordered list of constraint builders, merging every
//! contribution into a shared registry, and finally applies one objective.
//! The result is an immutable [`PackingModel`] that owns the engine until
//! [`PackingModel::optimize`] turns it into a [`Solution`].
//!
//! # Build order
//!
//! 1. Variables: [`ItemCountVars`](crate::builders::ItemCountVars),
//!    [`ItemInBagVars`](crate::builders::ItemInBagVars),
//!    [`BagResourceVars`](crate::builders::BagResourceVars)
//! 2. Constraints: [`CarrierWeightLimit`](crate::builders::CarrierWeightLimit),
//!    [`BagCapacityLimits`](crate::builders::BagCapacityLimits),
//!    [`ItemRequirements`](crate::builders::ItemRequirements)
//! 3. Objective: the builder selected by [`Goal`](crate::builders::Goal)
//!
//! Constraint builders read the complete variable registry, so all
//! variables are declared before any constraint.

mod composer;
mod solution;

pub use composer::{ModelComposer, PackingModel};
pub use solution::{BagContents, PackingPlan, Solution};
