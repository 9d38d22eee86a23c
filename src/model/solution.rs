//! Solved values and the packing report.

use crate::builders::{Goal, COUNT};
use crate::domain::PackingInstance;
use crate::namespace::Namespace;
use std::fmt;

/// Variable values of an optimal model, keyed like the variable registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    instance: PackingInstance,
    values: Namespace<f64>,
    objective: f64,
    goal: Option<Goal>,
}

impl Solution {
    pub(crate) fn new(
        instance: PackingInstance,
        values: Namespace<f64>,
        objective: f64,
        goal: Option<Goal>,
    ) -> Self {
        Self {
            instance,
            values,
            objective,
            goal,
        }
    }

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    pub fn objective_value(&self) -> f64 {
        self.objective
    }

    pub fn instance(&self) -> &PackingInstance {
        &self.instance
    }

    /// All values, with the same paths as the variable registry.
    pub fn values(&self) -> &Namespace<f64> {
        &self.values
    }

    /// Raw value at `path`, if a variable was registered there.
    pub fn value(&self, path: &[&str]) -> Option<f64> {
        self.values.get(path).copied()
    }

    /// Units of `item` packed across all bags.
    ///
    /// # Panics
    ///
    /// If `item` is not part of the instance.
    pub fn item_count(&self, item: &str) -> u64 {
        as_count(*self.values.leaf(&[item, COUNT]))
    }

    /// Units of `item` placed in `bag`.
    ///
    /// # Panics
    ///
    /// If `bag` or `item` is not part of the instance.
    pub fn count_in_bag(&self, bag: &str, item: &str) -> u64 {
        as_count(*self.values.leaf(&[bag, item, COUNT]))
    }

    /// Summarizes the packing, listing counts strictly above `threshold`.
    pub fn plan(&self, threshold: f64) -> PackingPlan {
        let instance = &self.instance;

        let bags = instance
            .bags
            .iter()
            .map(|bag| {
                let mut contents = BagContents {
                    bag: bag.name.clone(),
                    items: Vec::new(),
                    used_volume: 0.0,
                    used_weight: 0.0,
                };
                for item in &instance.items {
                    let count = self.count_in_bag(&bag.name, &item.name);
                    contents.used_volume += count as f64 * item.volume_requirement;
                    contents.used_weight += count as f64 * item.weight_requirement;
                    if count as f64 > threshold {
                        contents.items.push((item.name.clone(), count));
                    }
                }
                contents
            })
            .collect();

        let mut plan = PackingPlan {
            objective_value: self.objective,
            bags,
            totals: Vec::new(),
            total_volume: 0.0,
            total_weight: 0.0,
            total_value: 0.0,
        };
        for item in &instance.items {
            let count = self.item_count(&item.name);
            plan.total_volume += count as f64 * item.volume_requirement;
            plan.total_weight += count as f64 * item.weight_requirement;
            plan.total_value += count as f64 * item.value;
            if count as f64 > threshold {
                plan.totals.push((item.name.clone(), count));
            }
        }
        plan
    }
}

fn as_count(value: f64) -> u64 {
    if value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Items placed in one bag.
#[derive(Debug, Clone, PartialEq)]
pub struct BagContents {
    pub bag: String,
    /// `(item, count)` in catalog order.
    pub items: Vec<(String, u64)>,
    pub used_volume: f64,
    pub used_weight: f64,
}

/// Human-readable summary of a [`Solution`].
///
/// Used volume and weight are recomputed from the counts, including counts
/// hidden by the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PackingPlan {
    pub objective_value: f64,
    pub bags: Vec<BagContents>,
    /// `(item, count)` across all bags, in catalog order.
    pub totals: Vec<(String, u64)>,
    pub total_volume: f64,
    pub total_weight: f64,
    pub total_value: f64,
}

impl fmt::Display for PackingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Items brought ===")?;
        writeln!(f)?;
        for bag in &self.bags {
            writeln!(f, "---Items in {}---", bag.bag)?;
            for (item, count) in &bag.items {
                writeln!(f, "{item}: {count}")?;
            }
            writeln!(
                f,
                "(volume {:.2}, weight {:.2})",
                bag.used_volume, bag.used_weight
            )?;
            writeln!(f)?;
        }

        writeln!(f, "=== Total items ===")?;
        for (item, count) in &self.totals {
            writeln!(f, "{item}: {count}")?;
        }
        write!(
            f,
            "Total volume {:.2}, weight {:.2}, value {:.2}",
            self.total_volume, self.total_weight, self.total_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bag, Carrier, Item};
    use crate::engine::{MicroLpEngine, SolverEngine};
    use crate::error::PackError;
    use crate::model::ModelComposer;

    const TOL: f64 = 1e-6;

    fn solve(instance: &PackingInstance, goal: Goal) -> Result<Solution, PackError> {
        ModelComposer::base()
            .build(instance, MicroLpEngine::new(), goal)?
            .optimize()
    }

    fn swap_instance() -> PackingInstance {
        PackingInstance::new(Carrier::new("carrier", 100.0))
            .with_bag(Bag::new("bag", 10.0, 10.0))
            .with_item(Item::new("A", 5.0, 1.0, 1.0).with_available_count(2))
            .with_item(Item::new("B", 1.0, 5.0, 1.0).with_available_count(2))
            .with_item(Item::new("C", 1.0, 1.0, 10.0).with_available_count(1))
    }

    fn counts(solution: &Solution) -> [u64; 3] {
        ["A", "B", "C"].map(|item| solution.item_count(item))
    }

    #[test]
    fn test_objective_swap() {
        let instance = swap_instance();

        let volume = solve(&instance, Goal::Volume).unwrap();
        assert_eq!(counts(&volume), [2, 0, 0]);
        assert!((volume.objective_value() - 10.0).abs() < TOL);

        let weight = solve(&instance, Goal::Weight).unwrap();
        assert_eq!(counts(&weight), [0, 2, 0]);
        assert!((weight.objective_value() - 10.0).abs() < TOL);

        let value = solve(&instance, Goal::Value).unwrap();
        assert_eq!(counts(&value), [1, 1, 1]);
        assert!((value.objective_value() - 12.0).abs() < TOL);
    }

    /// Conservation, requirements and every capacity, checked on the counts.
    fn assert_packing_holds(instance: &PackingInstance, solution: &Solution, goal: Goal) {
        let mut carried_weight = 0.0;
        for item in &instance.items {
            let total = solution.item_count(&item.name);
            let placed: u64 = instance
                .bags
                .iter()
                .map(|bag| solution.count_in_bag(&bag.name, &item.name))
                .sum();
            assert_eq!(placed, total, "{goal}: {} not conserved", item.name);
            assert!(total >= u64::from(item.requirement), "{goal}: {}", item.name);
            assert!(total <= u64::from(item.max_count()), "{goal}: {}", item.name);
            carried_weight += total as f64 * item.weight_requirement;
        }
        assert!(carried_weight <= instance.carrier.weight_capacity + TOL, "{goal}");

        let plan = solution.plan(0.0);
        for (bag, contents) in instance.bags.iter().zip(&plan.bags) {
            assert!(contents.used_volume <= bag.volume_capacity + TOL, "{goal}: {}", bag.name);
            assert!(contents.used_weight <= bag.weight_capacity + TOL, "{goal}: {}", bag.name);
        }
    }

    /// A pantry where no item has a stated availability.
    fn open_catalog() -> PackingInstance {
        PackingInstance::new(Carrier::new("cook", 30.0))
            .with_bag(Bag::new("daypack", 10.0, 8.0))
            .with_bag(Bag::new("duffel", 20.0, 15.0))
            .with_item(Item::new("rice", 0.5, 0.8, 3.0))
            .with_item(Item::new("beans", 0.4, 0.6, 2.0).with_requirement(2))
            .with_item(Item::new("oil", 1.0, 0.9, 5.0))
    }

    #[test]
    fn test_hiking_invariants_hold_for_every_goal() {
        let instance = PackingInstance::hiking_trip();
        for goal in Goal::ALL {
            let solution = solve(&instance, goal)
                .unwrap_or_else(|err| panic!("{goal}: hiking trip must be packable: {err}"));
            assert_packing_holds(&instance, &solution, goal);
        }
    }

    #[test]
    fn test_hiking_weight_fills_both_bags() {
        // Water and FoodPortion have no availability limit
        let instance = PackingInstance::hiking_trip();
        let solution = solve(&instance, Goal::Weight).unwrap();
        assert!((solution.objective_value() - 40.0).abs() < TOL);
        assert!(solution.plan(0.0).total_weight <= 40.0 + TOL);
    }

    #[test]
    fn test_unlimited_items_pack_for_every_goal() {
        let instance = open_catalog();
        assert!(instance.items.iter().all(|item| item.available_count.is_none()));

        for goal in Goal::ALL {
            let solution = solve(&instance, goal)
                .unwrap_or_else(|err| panic!("{goal}: open catalog must be packable: {err}"));
            assert_packing_holds(&instance, &solution, goal);
            assert!(solution.objective_value() > 0.0, "{goal}");
        }
    }

    #[test]
    fn test_solved_engine_meets_every_constraint() {
        for (instance, goal) in [
            (open_catalog(), Goal::Volume),
            (open_catalog(), Goal::Weight),
            (open_catalog(), Goal::Value),
            (PackingInstance::hiking_trip(), Goal::Weight),
        ] {
            let model = ModelComposer::base()
                .build(&instance, MicroLpEngine::new(), goal)
                .unwrap();
            let declared = model.constraints().leaf_count();
            let mut engine = model.into_engine();

            assert!(engine.optimize().is_optimal(), "{goal}");
            assert_eq!(engine.constraint_count(), declared);
            let violated = engine.violated_constraints(1e-6);
            let names: Vec<&str> = violated
                .iter()
                .filter_map(|&c| engine.constraint(c))
                .map(|c| c.name.as_str())
                .collect();
            assert!(names.is_empty(), "{goal}: violated {names:?}");
        }
    }

    #[test]
    fn test_hiking_value_packs_required_gear() {
        let solution = solve(&PackingInstance::hiking_trip(), Goal::Value).unwrap();
        assert_eq!(solution.item_count("Tent 2man"), 1);
        assert_eq!(solution.item_count("Portable Kitchen"), 1);
        assert!(solution.item_count("Sleeping Bag") >= 1);
        assert!(solution.objective_value() > 0.0);
    }

    #[test]
    fn test_plan_lists_positive_counts() {
        let solution = solve(&swap_instance(), Goal::Volume).unwrap();
        let plan = solution.plan(0.0);

        assert_eq!(plan.bags.len(), 1);
        assert_eq!(plan.bags[0].items, vec![("A".to_string(), 2)]);
        assert!((plan.bags[0].used_volume - 10.0).abs() < TOL);
        assert!((plan.bags[0].used_weight - 2.0).abs() < TOL);
        assert_eq!(plan.totals, vec![("A".to_string(), 2)]);
        assert!((plan.total_value - 2.0).abs() < TOL);
    }

    #[test]
    fn test_plan_threshold_hides_small_counts() {
        let solution = solve(&swap_instance(), Goal::Value).unwrap();
        assert_eq!(solution.plan(0.0).totals.len(), 3);

        let plan = solution.plan(1.0);
        assert!(plan.totals.is_empty());
        assert!(plan.bags[0].items.is_empty());
        // hidden counts still occupy space
        assert!((plan.bags[0].used_volume - 7.0).abs() < TOL);
        assert!((plan.total_value - 12.0).abs() < TOL);
    }

    #[test]
    fn test_plan_display_layout() {
        let solution = solve(&swap_instance(), Goal::Weight).unwrap();
        let text = solution.plan(0.0).to_string();

        assert!(text.starts_with("=== Items brought ===\n\n---Items in bag---\nB: 2\n"));
        assert!(text.contains("=== Total items ===\nB: 2\n"));
        assert!(!text.contains("A: "));
    }

    #[test]
    fn test_value_lookup() {
        let solution = solve(&swap_instance(), Goal::Weight).unwrap();
        assert_eq!(solution.value(&["B", COUNT]), Some(2.0));
        assert_eq!(solution.value(&["bag", "B", COUNT]), Some(2.0));
        assert_eq!(solution.value(&["D", COUNT]), None);
        assert_eq!(solution.values().leaf_count(), 3 + 3 + 2);
    }

    #[test]
    #[should_panic(expected = "no registry entry")]
    fn test_unknown_item_panics() {
        let solution = solve(&swap_instance(), Goal::Value).unwrap();
        solution.item_count("D");
    }

    #[test]
    fn test_as_count_clamps_and_rounds() {
        assert_eq!(as_count(2.9999999), 3);
        assert_eq!(as_count(-1e-9), 0);
        assert_eq!(as_count(0.0), 0);
    }
}
