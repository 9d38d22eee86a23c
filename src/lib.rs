//! Composable MILP models for multi-bag knapsack packing.
//!
//! One carrier with a weight budget distributes items over several bags,
//! each with its own volume and weight limits. Items have a volume, a
//! weight, a value, an optional availability and a minimum requirement.
//! The crate builds the mixed-integer model from independent pieces and
//! hands it to a solver engine:
//!
//! - **Namespace**: order-preserving nested registries with a conflict
//!   detecting merge
//! - **Engine**: the [`SolverEngine`](engine::SolverEngine) boundary and a
//!   `microlp` adapter
//! - **Domain**: carrier, bag and item records plus instance validation
//! - **Builders**: variable, constraint and objective families
//! - **Model**: the composer, the built model and its solution report
//!
//! # Example
//!
//! ```
//! use u_knapsack::builders::Goal;
//! use u_knapsack::domain::PackingInstance;
//! use u_knapsack::engine::MicroLpEngine;
//! use u_knapsack::model::ModelComposer;
//!
//! let instance = PackingInstance::hiking_trip();
//! let solution = ModelComposer::base()
//!     .build(&instance, MicroLpEngine::new(), Goal::Weight)
//!     .unwrap()
//!     .optimize()
//!     .unwrap();
//!
//! let plan = solution.plan(0.0);
//! assert!(plan.total_weight <= instance.carrier.weight_capacity);
//! ```

pub mod builders;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod model;
pub mod namespace;

pub use builders::Goal;
pub use config::{ConfigError, PackConfig};
pub use domain::{Bag, Carrier, Item, PackingInstance};
pub use error::{PackError, Result};
pub use model::{ModelComposer, PackingModel, PackingPlan, Solution};
