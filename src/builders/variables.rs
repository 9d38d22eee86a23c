//! Variable-namespace builders.

use super::{VarRegistry, VariableBuilder, COUNT, VOLUME, WEIGHT};
use crate::domain::PackingInstance;
use crate::engine::{SolverEngine, VariableSpec};
use crate::error::Result;
use tracing::debug;

/// Used volume and weight of every bag: `bag.volume`, `bag.weight`.
///
/// Continuous, bounded by the bag's capacities. No constraint ties them to
/// the packed counts; they exist for reporting and for extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BagResourceVars;

impl VariableBuilder for BagResourceVars {
    fn name(&self) -> &'static str {
        "bag_resources"
    }

    fn declare(
        &self,
        instance: &PackingInstance,
        engine: &mut dyn SolverEngine,
    ) -> Result<VarRegistry> {
        let mut vars = VarRegistry::new();
        for bag in &instance.bags {
            let volume = engine.declare_variable(VariableSpec::continuous(
                format!("Bag({})_volume", bag.name),
                0.0,
                bag.volume_capacity,
            ));
            let weight = engine.declare_variable(VariableSpec::continuous(
                format!("Bag({})_weight", bag.name),
                0.0,
                bag.weight_capacity,
            ));
            vars.insert(&[bag.name.as_str(), VOLUME], volume)?;
            vars.insert(&[bag.name.as_str(), WEIGHT], weight)?;
        }
        debug!(builder = self.name(), variables = vars.leaf_count());
        Ok(vars)
    }
}

/// Total units of every item across all bags: `item.count`.
///
/// Bounded by [`PackingInstance::count_limit`], so items without an
/// availability still get a finite bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemCountVars;

impl VariableBuilder for ItemCountVars {
    fn name(&self) -> &'static str {
        "item_counts"
    }

    fn declare(
        &self,
        instance: &PackingInstance,
        engine: &mut dyn SolverEngine,
    ) -> Result<VarRegistry> {
        let mut vars = VarRegistry::new();
        for item in &instance.items {
            let count = engine.declare_variable(VariableSpec::integer(
                format!("Item({})_count", item.name),
                0.0,
                f64::from(instance.count_limit(item)),
            ));
            vars.insert(&[item.name.as_str(), COUNT], count)?;
        }
        debug!(builder = self.name(), variables = vars.leaf_count());
        Ok(vars)
    }
}

/// Units of every item placed in every bag: `bag.item.count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemInBagVars;

impl VariableBuilder for ItemInBagVars {
    fn name(&self) -> &'static str {
        "item_in_bag_counts"
    }

    fn declare(
        &self,
        instance: &PackingInstance,
        engine: &mut dyn SolverEngine,
    ) -> Result<VarRegistry> {
        let mut vars = VarRegistry::new();
        for bag in &instance.bags {
            for item in &instance.items {
                let count = engine.declare_variable(VariableSpec::integer(
                    format!("Item({})_count_in_Bag({})", item.name, bag.name),
                    0.0,
                    f64::from(instance.count_limit_in(bag, item)),
                ));
                vars.insert(&[bag.name.as_str(), item.name.as_str(), COUNT], count)?;
            }
        }
        debug!(builder = self.name(), variables = vars.leaf_count());
        Ok(vars)
    }
}
