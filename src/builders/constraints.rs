//! Constraint builders.

use super::{
    ConstraintBuilder, ConstraintRegistry, VarRegistry, COUNT, REQUIRED, TOTAL, VOLUME, WEIGHT,
};
use crate::domain::PackingInstance;
use crate::engine::{LinearExpr, Relation, SolverEngine};
use crate::error::Result;
use tracing::debug;

/// The carrier's weight budget over the aggregate item counts.
///
/// `Σ item.count * item.weight <= carrier.weight_capacity`, registered as
/// `carrier.weight`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarrierWeightLimit;

impl ConstraintBuilder for CarrierWeightLimit {
    fn name(&self) -> &'static str {
        "carrier_weight"
    }

    fn constrain(
        &self,
        instance: &PackingInstance,
        vars: &VarRegistry,
        engine: &mut dyn SolverEngine,
    ) -> Result<ConstraintRegistry> {
        let carrier = &instance.carrier;
        let weight: LinearExpr = instance
            .items
            .iter()
            .map(|item| (*vars.leaf(&[item.name.as_str(), COUNT]), item.weight_requirement))
            .collect();

        let mut constraints = ConstraintRegistry::new();
        let handle = engine.declare_constraint(
            weight,
            Relation::Le,
            carrier.weight_capacity,
            &format!("Carrier({})_weight", carrier.name),
        );
        constraints.insert(&[carrier.name.as_str(), WEIGHT], handle)?;
        debug!(builder = self.name(), constraints = constraints.leaf_count());
        Ok(constraints)
    }
}

/// Per-bag capacities and count conservation.
///
/// For every bag, the weight and volume of its contents stay within the
/// bag's limits (`bag.weight`, `bag.volume`). For every item, the per-bag
/// counts add up exactly to the aggregate count (`item.total`):
///
/// ```text
/// Σ_bag bag.item.count - item.count == 0
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BagCapacityLimits;

impl ConstraintBuilder for BagCapacityLimits {
    fn name(&self) -> &'static str {
        "bag_capacity"
    }

    fn constrain(
        &self,
        instance: &PackingInstance,
        vars: &VarRegistry,
        engine: &mut dyn SolverEngine,
    ) -> Result<ConstraintRegistry> {
        let mut constraints = ConstraintRegistry::new();

        for bag in &instance.bags {
            let mut weight = LinearExpr::new();
            let mut volume = LinearExpr::new();
            for item in &instance.items {
                let count = *vars.leaf(&[bag.name.as_str(), item.name.as_str(), COUNT]);
                weight.add(count, item.weight_requirement);
                volume.add(count, item.volume_requirement);
            }

            let handle = engine.declare_constraint(
                weight,
                Relation::Le,
                bag.weight_capacity,
                &format!("Bag({})_weight", bag.name),
            );
            constraints.insert(&[bag.name.as_str(), WEIGHT], handle)?;

            let handle = engine.declare_constraint(
                volume,
                Relation::Le,
                bag.volume_capacity,
                &format!("Bag({})_volume", bag.name),
            );
            constraints.insert(&[bag.name.as_str(), VOLUME], handle)?;
        }

        for item in &instance.items {
            let mut balance = LinearExpr::sum(
                instance
                    .bags
                    .iter()
                    .map(|bag| *vars.leaf(&[bag.name.as_str(), item.name.as_str(), COUNT])),
            );
            balance.add(*vars.leaf(&[item.name.as_str(), COUNT]), -1.0);

            let handle = engine.declare_constraint(
                balance,
                Relation::Eq,
                0.0,
                &format!("Item({})_total", item.name),
            );
            constraints.insert(&[item.name.as_str(), TOTAL], handle)?;
        }

        debug!(builder = self.name(), constraints = constraints.leaf_count());
        Ok(constraints)
    }
}

/// Minimum units per item: `item.count >= item.requirement`, registered as
/// `item.required`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemRequirements;

impl ConstraintBuilder for ItemRequirements {
    fn name(&self) -> &'static str {
        "item_requirements"
    }

    fn constrain(
        &self,
        instance: &PackingInstance,
        vars: &VarRegistry,
        engine: &mut dyn SolverEngine,
    ) -> Result<ConstraintRegistry> {
        let mut constraints = ConstraintRegistry::new();
        for item in &instance.items {
            let handle = engine.declare_constraint(
                LinearExpr::sum([*vars.leaf(&[item.name.as_str(), COUNT])]),
                Relation::Ge,
                f64::from(item.requirement),
                &format!("Item({})_required", item.name),
            );
            constraints.insert(&[item.name.as_str(), REQUIRED], handle)?;
        }
        debug!(builder = self.name(), constraints = constraints.leaf_count());
        Ok(constraints)
    }
}
