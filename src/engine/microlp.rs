//! Adapter over the pure-Rust `microlp` MILP solver.

use super::types::{
    ConstraintHandle, Direction, LinearExpr, Relation, SolveStatus, SolverEngine, VarHandle,
    VarKind, VariableSpec,
};
use ::microlp::{ComparisonOp, OptimizationDirection, Problem};
use tracing::{debug, warn};

/// A constraint as recorded by [`MicroLpEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
    pub name: String,
}

/// [`SolverEngine`] backed by `microlp`.
///
/// `microlp` fixes objective coefficients when a variable is created, so
/// this adapter records every declaration and translates the whole problem
/// at [`optimize`](SolverEngine::optimize) time. Integer values are rounded
/// to the nearest integer when read back.
///
/// # Examples
///
/// ```
/// use u_knapsack::engine::{
///     Direction, LinearExpr, MicroLpEngine, Relation, SolveStatus, SolverEngine, VariableSpec,
/// };
///
/// let mut engine = MicroLpEngine::new();
/// let x = engine.declare_variable(VariableSpec::integer("x", 0.0, 10.0));
/// engine.declare_constraint(LinearExpr::sum([x]), Relation::Le, 3.5, "cap");
/// engine.set_objective(LinearExpr::sum([x]), Direction::Maximize);
///
/// assert_eq!(engine.optimize(), SolveStatus::Optimal);
/// assert_eq!(engine.value_of(x), Some(3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MicroLpEngine {
    variables: Vec<VariableSpec>,
    constraints: Vec<RecordedConstraint>,
    objective: Option<(LinearExpr, Direction)>,
    values: Option<Vec<f64>>,
}

impl MicroLpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// The declaration behind a variable handle.
    pub fn variable(&self, var: VarHandle) -> Option<&VariableSpec> {
        self.variables.get(var.0)
    }

    /// The declaration behind a constraint handle.
    pub fn constraint(&self, constraint: ConstraintHandle) -> Option<&RecordedConstraint> {
        self.constraints.get(constraint.0)
    }

    /// The current objective, if one was set.
    pub fn objective(&self) -> Option<(&LinearExpr, Direction)> {
        self.objective.as_ref().map(|(expr, dir)| (expr, *dir))
    }

    /// Constraints the current values break by more than `tolerance`.
    ///
    /// Empty before a successful [`optimize`](SolverEngine::optimize).
    pub fn violated_constraints(&self, tolerance: f64) -> Vec<ConstraintHandle> {
        let Some(values) = &self.values else {
            return Vec::new();
        };
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                let lhs = c
                    .expr
                    .evaluate(|var| values.get(var.0).copied().unwrap_or(f64::NAN));
                !c.relation.holds(lhs, c.rhs, tolerance)
            })
            .map(|(i, _)| ConstraintHandle(i))
            .collect()
    }

    /// Rejects handles this engine never issued.
    fn check_handles(&self, expr: &LinearExpr, context: &str) -> Result<(), String> {
        match expr
            .terms()
            .iter()
            .find(|(var, _)| var.0 >= self.variables.len())
        {
            Some((var, _)) => Err(format!(
                "{context} references variable #{} but only {} were declared",
                var.0,
                self.variables.len()
            )),
            None => Ok(()),
        }
    }

    fn build_problem(&self) -> Result<(Problem, Vec<::microlp::Variable>), String> {
        let (direction, coefficients) = match &self.objective {
            Some((expr, direction)) => {
                self.check_handles(expr, "objective")?;
                let mut coefficients = vec![0.0; self.variables.len()];
                for (var, c) in expr.folded() {
                    coefficients[var.0] += c;
                }
                (*direction, coefficients)
            }
            None => (Direction::Minimize, vec![0.0; self.variables.len()]),
        };

        let mut problem = Problem::new(match direction {
            Direction::Maximize => OptimizationDirection::Maximize,
            Direction::Minimize => OptimizationDirection::Minimize,
        });

        let vars: Vec<::microlp::Variable> = self
            .variables
            .iter()
            .zip(coefficients)
            .map(|(spec, obj)| match spec.kind {
                // float-to-int casts saturate, so an infinite bound lands on i32::MAX
                VarKind::Integer => problem.add_integer_var(
                    obj,
                    (spec.lower.ceil() as i32, spec.upper.floor() as i32),
                ),
                VarKind::Continuous => problem.add_var(obj, (spec.lower, spec.upper)),
            })
            .collect();

        for constraint in &self.constraints {
            self.check_handles(&constraint.expr, &format!("constraint `{}`", constraint.name))?;
            let terms: Vec<(::microlp::Variable, f64)> = constraint
                .expr
                .folded()
                .into_iter()
                .map(|(var, c)| (vars[var.0], c))
                .collect();
            let op = match constraint.relation {
                Relation::Le => ComparisonOp::Le,
                Relation::Eq => ComparisonOp::Eq,
                Relation::Ge => ComparisonOp::Ge,
            };
            problem.add_constraint(terms, op, constraint.rhs);
        }

        Ok((problem, vars))
    }
}

impl SolverEngine for MicroLpEngine {
    fn declare_variable(&mut self, spec: VariableSpec) -> VarHandle {
        let handle = VarHandle(self.variables.len());
        self.variables.push(spec);
        handle
    }

    fn declare_constraint(
        &mut self,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
        name: &str,
    ) -> ConstraintHandle {
        let handle = ConstraintHandle(self.constraints.len());
        self.constraints.push(RecordedConstraint {
            expr,
            relation,
            rhs,
            name: name.to_string(),
        });
        handle
    }

    fn set_objective(&mut self, expr: LinearExpr, direction: Direction) {
        self.objective = Some((expr, direction));
    }

    fn optimize(&mut self) -> SolveStatus {
        self.values = None;
        let (problem, vars) = match self.build_problem() {
            Ok(built) => built,
            Err(msg) => {
                warn!(event = "microlp_error", error = %msg);
                return SolveStatus::Error(msg);
            }
        };
        debug!(
            event = "microlp_solve",
            variables = self.variables.len(),
            constraints = self.constraints.len(),
        );

        match problem.solve() {
            Ok(solution) => {
                let values = self
                    .variables
                    .iter()
                    .zip(&vars)
                    .map(|(spec, var)| match spec.kind {
                        VarKind::Integer => solution[*var].round(),
                        VarKind::Continuous => solution[*var],
                    })
                    .collect();
                self.values = Some(values);
                SolveStatus::Optimal
            }
            Err(::microlp::Error::Infeasible) => SolveStatus::Infeasible,
            Err(::microlp::Error::Unbounded) => SolveStatus::Unbounded,
            Err(err) => {
                warn!(event = "microlp_error", error = %err);
                SolveStatus::Error(err.to_string())
            }
        }
    }

    fn value_of(&self, var: VarHandle) -> Option<f64> {
        self.values.as_ref()?.get(var.0).copied()
    }
}
