//! A complete problem instance.

use super::types::{Bag, Carrier, Item};
use crate::config::ConfigError;
use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One carrier, its bags and the item catalog.
///
/// # Examples
///
/// ```
/// use u_knapsack::domain::{Bag, Carrier, Item, PackingInstance};
///
/// let instance = PackingInstance::new(Carrier::new("Ann", 30.0))
///     .with_bag(Bag::new("Daypack", 20.0, 8.0))
///     .with_item(Item::new("Apple", 0.3, 0.2, 2.0).with_available_count(6));
///
/// assert!(instance.validate().is_ok());
/// assert_eq!(instance.bags.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PackingInstance {
    pub carrier: Carrier,
    #[serde(default)]
    pub bags: Vec<Bag>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl PackingInstance {
    pub fn new(carrier: Carrier) -> Self {
        Self {
            carrier,
            bags: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_bag(mut self, bag: Bag) -> Self {
        self.bags.push(bag);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Loads and validates an instance from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates an instance from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let instance: Self = toml::from_str(s).map_err(ConfigError::from)?;
        instance.validate()?;
        Ok(instance)
    }

    /// Checks that names are unique and quantities are usable.
    ///
    /// Bag and item names share the registry's top level with the carrier,
    /// so a name may be used by at most one entity. An item whose
    /// requirement exceeds its availability is accepted here; the solver
    /// reports it as infeasible.
    pub fn validate(&self) -> Result<()> {
        check_name("carrier", &self.carrier.name)?;
        check_capacity(&self.carrier.name, "weight_capacity", self.carrier.weight_capacity)?;

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(self.carrier.name.as_str());

        for bag in &self.bags {
            check_name("bag", &bag.name)?;
            if !seen.insert(bag.name.as_str()) {
                return Err(invalid(format!("name `{}` is used more than once", bag.name)));
            }
            check_capacity(&bag.name, "volume_capacity", bag.volume_capacity)?;
            check_capacity(&bag.name, "weight_capacity", bag.weight_capacity)?;
        }

        for item in &self.items {
            check_name("item", &item.name)?;
            if !seen.insert(item.name.as_str()) {
                return Err(invalid(format!("name `{}` is used more than once", item.name)));
            }
            check_capacity(&item.name, "volume_requirement", item.volume_requirement)?;
            check_capacity(&item.name, "weight_requirement", item.weight_requirement)?;
            if !item.value.is_finite() {
                return Err(invalid(format!("{}: value must be finite", item.name)));
            }
        }

        Ok(())
    }

    /// Looks up a bag by name.
    pub fn bag(&self, name: &str) -> Option<&Bag> {
        self.bags.iter().find(|b| b.name == name)
    }

    /// Looks up an item by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Most units of `item` the capacities could ever hold.
    ///
    /// The smaller of the carrier's weight budget and the combined bag
    /// volume and weight, in units of `item`, and never above its
    /// availability. Items without `available_count` are bounded by this
    /// alone.
    pub fn count_limit(&self, item: &Item) -> u32 {
        let bag_volume: f64 = self.bags.iter().map(|b| b.volume_capacity).sum();
        let bag_weight: f64 = self.bags.iter().map(|b| b.weight_capacity).sum();
        let fit = (self.carrier.weight_capacity / item.weight_requirement)
            .min(bag_volume / item.volume_requirement)
            .min(bag_weight / item.weight_requirement);
        units_that_fit(fit, item.max_count())
    }

    /// Most units of `item` that `bag` alone could hold.
    pub fn count_limit_in(&self, bag: &Bag, item: &Item) -> u32 {
        let fit = (bag.volume_capacity / item.volume_requirement)
            .min(bag.weight_capacity / item.weight_requirement);
        units_that_fit(fit, self.count_limit(item))
    }

    /// A weekend hike: two backpacks and a camping catalog.
    pub fn hiking_trip() -> Self {
        Self::new(Carrier::new("John", 200.0))
            .with_bag(Bag::new("Osprey 32L", 32.0, 15.0))
            .with_bag(Bag::new("Osprey 60L", 60.0, 25.0))
            .with_item(Item::new("Gascan 650ml", 0.7, 0.6, 240.0).with_available_count(4))
            .with_item(
                Item::new("Tent 2man", 13.0, 3.5, 2000.0)
                    .with_available_count(1)
                    .with_requirement(1),
            )
            .with_item(Item::new("Tent 3man", 16.0, 4.5, 2500.0).with_available_count(1))
            .with_item(Item::new("Tent 4man", 18.0, 5.5, 3000.0).with_available_count(1))
            .with_item(Item::new("Axe", 2.0, 4.0, 1000.0).with_available_count(1))
            .with_item(Item::new("Knife", 0.3, 0.25, 400.0).with_available_count(1))
            .with_item(Item::new("FoodPortion", 0.3, 0.4, 80.0))
            .with_item(Item::new("Water", 1.0, 1.0, 5.0))
            .with_item(
                Item::new("Portable Kitchen", 2.0, 1.0, 800.0)
                    .with_available_count(1)
                    .with_requirement(1),
            )
            .with_item(
                Item::new("Sleeping Bag", 4.0, 0.9, 1400.0)
                    .with_available_count(4)
                    .with_requirement(1),
            )
    }
}

/// Whole units in `fit`, capped at `cap`. NaN counts as nothing fitting.
fn units_that_fit(fit: f64, cap: u32) -> u32 {
    // slack for quotients like 1.2 / 0.4 landing just under an integer
    let units = (fit + 1e-9).floor();
    if units >= f64::from(cap) {
        cap
    } else if units > 0.0 {
        units as u32
    } else {
        0
    }
}

fn invalid(msg: String) -> PackError {
    PackError::InvalidInstance(msg)
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(format!("{kind} name must not be empty")));
    }
    Ok(())
}

fn check_capacity(owner: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(format!("{owner}: {field} must be positive, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiking_trip_is_valid() {
        let instance = PackingInstance::hiking_trip();
        assert!(instance.validate().is_ok());
        assert_eq!(instance.bags.len(), 2);
        assert_eq!(instance.items.len(), 10);
        assert_eq!(instance.item("Sleeping Bag").unwrap().requirement, 1);
        assert_eq!(instance.bag("Osprey 60L").unwrap().volume_capacity, 60.0);
        assert!(instance.bag("Osprey 90L").is_none());
    }

    #[test]
    fn test_count_limit_from_capacities() {
        let instance = PackingInstance::hiking_trip();

        // bag weight (15 + 25) binds before bag volume (92) and carrier (200)
        let water = instance.item("Water").unwrap();
        assert_eq!(instance.count_limit(water), 40);
        let food = instance.item("FoodPortion").unwrap();
        assert_eq!(instance.count_limit(food), 100);

        // availability caps the capacity bound
        let gas = instance.item("Gascan 650ml").unwrap();
        assert_eq!(instance.count_limit(gas), 4);
    }

    #[test]
    fn test_count_limit_carrier_binds() {
        let instance = PackingInstance::new(Carrier::new("c", 1.2))
            .with_bag(Bag::new("b", 100.0, 100.0))
            .with_item(Item::new("nut", 0.1, 0.4, 1.0));
        assert_eq!(instance.count_limit(&instance.items[0]), 3);
    }

    #[test]
    fn test_count_limit_in_bag() {
        let instance = PackingInstance::hiking_trip();
        let small = instance.bag("Osprey 32L").unwrap();
        let water = instance.item("Water").unwrap();
        assert_eq!(instance.count_limit_in(small, water), 15);

        let tent = instance.item("Tent 4man").unwrap();
        assert_eq!(instance.count_limit_in(small, tent), 1);
    }

    #[test]
    fn test_count_limit_without_bags_is_zero() {
        let instance =
            PackingInstance::new(Carrier::new("c", 10.0)).with_item(Item::new("i", 1.0, 1.0, 1.0));
        assert_eq!(instance.count_limit(&instance.items[0]), 0);
    }

    #[test]
    fn test_units_that_fit() {
        assert_eq!(units_that_fit(2.9999999999999996, 10), 3);
        assert_eq!(units_that_fit(2.5, 10), 2);
        assert_eq!(units_that_fit(1e12, 10), 10);
        assert_eq!(units_that_fit(f64::NAN, 10), 0);
        assert_eq!(units_that_fit(f64::INFINITY, 7), 7);
    }

    #[test]
    fn test_duplicate_bag_rejected() {
        let instance = PackingInstance::new(Carrier::new("c", 10.0))
            .with_bag(Bag::new("b", 1.0, 1.0))
            .with_bag(Bag::new("b", 2.0, 2.0));
        assert!(matches!(instance.validate(), Err(PackError::InvalidInstance(_))));
    }

    #[test]
    fn test_bag_item_name_clash_rejected() {
        let instance = PackingInstance::new(Carrier::new("c", 10.0))
            .with_bag(Bag::new("thing", 1.0, 1.0))
            .with_item(Item::new("thing", 1.0, 1.0, 1.0));
        let err = instance.validate().unwrap_err();
        assert!(err.to_string().contains("`thing`"));
    }

    #[test]
    fn test_carrier_name_clash_rejected() {
        let instance = PackingInstance::new(Carrier::new("John", 10.0))
            .with_item(Item::new("John", 1.0, 1.0, 1.0));
        assert!(instance.validate().is_err());
    }

    #[test]
    fn test_non_positive_capacity_rejected() {
        let instance =
            PackingInstance::new(Carrier::new("c", 10.0)).with_bag(Bag::new("b", 0.0, 1.0));
        assert!(instance.validate().is_err());

        let instance = PackingInstance::new(Carrier::new("c", f64::NAN));
        assert!(instance.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let instance =
            PackingInstance::new(Carrier::new("c", 10.0)).with_item(Item::new(" ", 1.0, 1.0, 1.0));
        assert!(instance.validate().is_err());
    }

    #[test]
    fn test_requirement_above_availability_accepted() {
        let instance = PackingInstance::new(Carrier::new("c", 10.0)).with_item(
            Item::new("i", 1.0, 1.0, 1.0)
                .with_available_count(1)
                .with_requirement(2),
        );
        assert!(instance.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let instance = PackingInstance::from_toml_str(
            r#"
            [carrier]
            name = "Ann"
            weight_capacity = 30.0

            [[bags]]
            name = "Daypack"
            volume_capacity = 20.0
            weight_capacity = 8.0

            [[items]]
            name = "Apple"
            volume_requirement = 0.3
            weight_requirement = 0.2
            value = 2.0
            available_count = 6
            requirement = 1

            [[items]]
            name = "Water"
            volume_requirement = 1.0
            weight_requirement = 1.0
            value = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(instance.carrier.name, "Ann");
        assert_eq!(instance.items[0].available_count, Some(6));
        assert_eq!(instance.items[0].requirement, 1);
        assert_eq!(instance.items[1].available_count, None);
        assert_eq!(instance.items[1].requirement, 0);
    }

    #[test]
    fn test_from_toml_str_validates() {
        let err = PackingInstance::from_toml_str(
            r#"
            [carrier]
            name = "Ann"
            weight_capacity = -1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PackError::InvalidInstance(_)));
    }

    #[test]
    fn test_from_toml_str_parse_error() {
        let err = PackingInstance::from_toml_str("carrier = 3").unwrap_err();
        assert!(matches!(err, PackError::Config(ConfigError::Toml(_))));
    }

    #[test]
    fn test_bundled_hiking_file_matches_sample() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/hiking.toml");
        let instance = PackingInstance::from_toml_file(path).unwrap();
        assert_eq!(instance, PackingInstance::hiking_trip());
    }
}
