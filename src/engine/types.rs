//! Engine trait and the value types that cross it.

/// Opaque reference to a variable declared in an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarHandle(pub(crate) usize);

impl VarHandle {
    /// Declaration sequence number within the issuing engine.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Opaque reference to a constraint declared in an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintHandle(pub(crate) usize);

impl ConstraintHandle {
    /// Declaration sequence number within the issuing engine.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Continuous,
    Integer,
}

/// Everything an engine needs to declare one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub kind: VarKind,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound. `f64::INFINITY` for none.
    pub upper: f64,
    /// Human-readable name, used in logs and engine diagnostics.
    pub name: String,
}

impl VariableSpec {
    /// A continuous variable bounded to `[lower, upper]`.
    pub fn continuous(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            kind: VarKind::Continuous,
            lower,
            upper,
            name: name.into(),
        }
    }

    /// An integer variable bounded to `[lower, upper]`.
    pub fn integer(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            kind: VarKind::Integer,
            lower,
            upper,
            name: name.into(),
        }
    }
}

/// Relation between a constraint's left-hand side and its constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `lhs <= rhs`
    Le,
    /// `lhs == rhs`
    Eq,
    /// `lhs >= rhs`
    Ge,
}

impl Relation {
    /// Whether `lhs` stands in this relation to `rhs`, within `tolerance`.
    pub fn holds(&self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Relation::Le => lhs <= rhs + tolerance,
            Relation::Eq => (lhs - rhs).abs() <= tolerance,
            Relation::Ge => lhs >= rhs - tolerance,
        }
    }
}

/// Optimization direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

/// A sum of `coefficient * variable` terms.
///
/// # Examples
///
/// ```
/// use u_knapsack::engine::{LinearExpr, MicroLpEngine, SolverEngine, VariableSpec};
///
/// let mut engine = MicroLpEngine::new();
/// let x = engine.declare_variable(VariableSpec::integer("x", 0.0, 5.0));
/// let y = engine.declare_variable(VariableSpec::integer("y", 0.0, 5.0));
///
/// let mut expr = LinearExpr::new();
/// expr.add(x, 2.0);
/// expr.add(y, 0.5);
/// assert_eq!(expr.len(), 2);
/// assert_eq!(expr.evaluate(|_| 4.0), 10.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarHandle, f64)>,
}

impl LinearExpr {
    /// Creates an empty expression (the constant zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the given variables, each with coefficient 1.
    pub fn sum<I: IntoIterator<Item = VarHandle>>(vars: I) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    /// Appends `coefficient * var`.
    pub fn add(&mut self, var: VarHandle, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Terms in the order they were added.
    pub fn terms(&self) -> &[(VarHandle, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `var` summed over all its terms.
    pub fn coefficient(&self, var: VarHandle) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }

    /// Terms with repeated variables folded together, first occurrence order.
    pub fn folded(&self) -> Vec<(VarHandle, f64)> {
        let mut out: Vec<(VarHandle, f64)> = Vec::with_capacity(self.terms.len());
        for &(var, coefficient) in &self.terms {
            match out.iter_mut().find(|(v, _)| *v == var) {
                Some((_, c)) => *c += coefficient,
                None => out.push((var, coefficient)),
            }
        }
        out
    }

    /// Value of the expression under the given assignment.
    pub fn evaluate<F: FnMut(VarHandle) -> f64>(&self, mut value_of: F) -> f64 {
        self.terms.iter().map(|&(v, c)| c * value_of(v)).sum()
    }
}

impl FromIterator<(VarHandle, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarHandle, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<(VarHandle, f64)> for LinearExpr {
    fn extend<I: IntoIterator<Item = (VarHandle, f64)>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

/// Outcome of [`SolverEngine::optimize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal solution found; values are available.
    Optimal,
    /// No assignment satisfies all constraints.
    Infeasible,
    /// The objective can grow without limit.
    Unbounded,
    /// The engine failed for another reason.
    Error(String),
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

/// Interface to an external MILP engine.
///
/// Implementors own the solving algorithm. The model layer only declares
/// variables and constraints, sets one objective, calls
/// [`optimize`](Self::optimize) once and reads values back.
pub trait SolverEngine {
    /// Declares a variable and returns its handle.
    fn declare_variable(&mut self, spec: VariableSpec) -> VarHandle;

    /// Declares `expr <relation> rhs` and returns its handle.
    fn declare_constraint(
        &mut self,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
        name: &str,
    ) -> ConstraintHandle;

    /// Sets (or replaces) the objective.
    fn set_objective(&mut self, expr: LinearExpr, direction: Direction);

    /// Solves the declared problem.
    fn optimize(&mut self) -> SolveStatus;

    /// Value of `var` in the last optimal solution.
    ///
    /// `None` before a successful [`optimize`](Self::optimize) or for a
    /// handle this engine did not issue.
    fn value_of(&self, var: VarHandle) -> Option<f64>;
}
