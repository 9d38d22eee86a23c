//! Builder composition.

use super::solution::Solution;
use crate::builders::{
    BagCapacityLimits, BagResourceVars, CarrierWeightLimit, ConstraintBuilder, ConstraintRegistry,
    Goal, ItemCountVars, ItemInBagVars, ItemRequirements, ObjectiveBuilder, VarRegistry,
    VariableBuilder,
};
use crate::domain::PackingInstance;
use crate::engine::{LinearExpr, SolveStatus, SolverEngine};
use crate::error::{PackError, Result};
use tracing::{debug, info, warn};

/// Ordered builder lists that turn an instance into a [`PackingModel`].
///
/// # Examples
///
/// ```
/// use u_knapsack::builders::Goal;
/// use u_knapsack::domain::PackingInstance;
/// use u_knapsack::engine::MicroLpEngine;
/// use u_knapsack::model::ModelComposer;
///
/// let instance = PackingInstance::hiking_trip();
/// let model = ModelComposer::base()
///     .build(&instance, MicroLpEngine::new(), Goal::Value)
///     .unwrap();
///
/// // 10 aggregate counts, 2 x 10 per-bag counts, 2 x 2 bag resources
/// assert_eq!(model.variables().leaf_count(), 34);
///
/// let solution = model.optimize().unwrap();
/// assert!(solution.item_count("Tent 2man") >= 1);
/// ```
pub struct ModelComposer {
    variables: Vec<Box<dyn VariableBuilder>>,
    constraints: Vec<Box<dyn ConstraintBuilder>>,
}

impl Default for ModelComposer {
    fn default() -> Self {
        Self::base()
    }
}

impl ModelComposer {
    /// A composer with no builders.
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// The complete packing model: every variable and constraint family.
    pub fn base() -> Self {
        Self::new()
            .with_variables(ItemCountVars)
            .with_variables(ItemInBagVars)
            .with_variables(BagResourceVars)
            .with_constraints(CarrierWeightLimit)
            .with_constraints(BagCapacityLimits)
            .with_constraints(ItemRequirements)
    }

    /// Appends a variable builder.
    pub fn with_variables(mut self, builder: impl VariableBuilder + 'static) -> Self {
        self.variables.push(Box::new(builder));
        self
    }

    /// Appends a constraint builder.
    pub fn with_constraints(mut self, builder: impl ConstraintBuilder + 'static) -> Self {
        self.constraints.push(Box::new(builder));
        self
    }

    /// Names of the variable builders, in run order.
    pub fn variable_builders(&self) -> Vec<&'static str> {
        self.variables.iter().map(|b| b.name()).collect()
    }

    /// Names of the constraint builders, in run order.
    pub fn constraint_builders(&self) -> Vec<&'static str> {
        self.constraints.iter().map(|b| b.name()).collect()
    }

    /// Builds the model for `goal`.
    pub fn build<E: SolverEngine>(
        &self,
        instance: &PackingInstance,
        engine: E,
        goal: Goal,
    ) -> Result<PackingModel<E>> {
        let mut model = self.build_with(instance, engine, goal.builder())?;
        model.goal = Some(goal);
        Ok(model)
    }

    /// Builds the model with an arbitrary objective builder.
    ///
    /// The engine is moved in. On failure it is dropped together with any
    /// partial declarations; on success it lives inside the returned model.
    ///
    /// # Errors
    ///
    /// - [`PackError::InvalidInstance`] if `instance` fails validation
    /// - [`PackError::MergeConflict`] if two builders write the same path
    pub fn build_with<E: SolverEngine>(
        &self,
        instance: &PackingInstance,
        mut engine: E,
        objective: &dyn ObjectiveBuilder,
    ) -> Result<PackingModel<E>> {
        instance.validate()?;
        info!(
            event = "build_start",
            bags = instance.bags.len(),
            items = instance.items.len(),
            objective = objective.name(),
        );

        let mut variables = VarRegistry::new();
        for builder in &self.variables {
            let contribution = builder.declare(instance, &mut engine)?;
            variables = variables.merge(contribution)?;
            debug!(event = "builder_done", builder = builder.name(), registered = variables.leaf_count());
        }

        let mut constraints = ConstraintRegistry::new();
        for builder in &self.constraints {
            let contribution = builder.constrain(instance, &variables, &mut engine)?;
            constraints = constraints.merge(contribution)?;
            debug!(event = "builder_done", builder = builder.name(), registered = constraints.leaf_count());
        }

        let objective_expr = objective.apply(instance, &variables, &mut engine);

        info!(
            event = "build_end",
            variables = variables.leaf_count(),
            constraints = constraints.leaf_count(),
        );

        Ok(PackingModel {
            engine,
            instance: instance.clone(),
            variables,
            constraints,
            objective: objective_expr,
            objective_name: objective.name(),
            goal: None,
        })
    }
}

/// A fully specified model, ready to be optimized once.
#[derive(Debug)]
pub struct PackingModel<E> {
    engine: E,
    instance: PackingInstance,
    variables: VarRegistry,
    constraints: ConstraintRegistry,
    objective: LinearExpr,
    objective_name: &'static str,
    goal: Option<Goal>,
}

impl<E: SolverEngine> PackingModel<E> {
    /// Variable registry, keyed by bag, item and (bag, item).
    pub fn variables(&self) -> &VarRegistry {
        &self.variables
    }

    /// Constraint registry, keyed by entity and label.
    pub fn constraints(&self) -> &ConstraintRegistry {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// The goal this model was built for; `None` for a custom objective.
    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    /// Name of the objective builder that was applied.
    pub fn objective_name(&self) -> &'static str {
        self.objective_name
    }

    pub fn instance(&self) -> &PackingInstance {
        &self.instance
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Gives the engine back without solving.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Runs the engine and reads every registered variable back.
    ///
    /// # Errors
    ///
    /// - [`PackError::Infeasible`]: no packing satisfies the constraints
    /// - [`PackError::Unbounded`]: the objective has no upper limit
    /// - [`PackError::Engine`]: the engine failed or withheld a value
    pub fn optimize(mut self) -> Result<Solution> {
        info!(
            event = "solve_start",
            objective = self.objective_name,
            variables = self.variables.leaf_count(),
            constraints = self.constraints.leaf_count(),
        );

        match self.engine.optimize() {
            SolveStatus::Optimal => {}
            SolveStatus::Infeasible => {
                info!(event = "solve_end", status = "infeasible");
                return Err(PackError::Infeasible);
            }
            SolveStatus::Unbounded => {
                warn!(event = "solve_end", status = "unbounded");
                return Err(PackError::Unbounded);
            }
            SolveStatus::Error(msg) => {
                warn!(event = "solve_end", status = "error", error = %msg);
                return Err(PackError::Engine(msg));
            }
        }

        let engine = &self.engine;
        let mut missing = None;
        let values = self.variables.map(|&var| {
            engine.value_of(var).unwrap_or_else(|| {
                missing.get_or_insert(var);
                f64::NAN
            })
        });
        if let Some(var) = missing {
            return Err(PackError::Engine(format!(
                "engine reported optimal but has no value for variable #{}",
                var.index()
            )));
        }

        let objective = self
            .objective
            .evaluate(|var| engine.value_of(var).unwrap_or(0.0));
        info!(event = "solve_end", status = "optimal", objective);

        Ok(Solution::new(self.instance, values, objective, self.goal))
    }
}
