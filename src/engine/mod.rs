//! Solver engine boundary.
//!
//! The model builders never talk to a MILP library directly. They declare
//! variables, constraints and an objective through the [`SolverEngine`]
//! trait and keep the returned opaque handles in their registries.
//!
//! # Key Components
//!
//! - **Handles**: [`VarHandle`], [`ConstraintHandle`]: opaque references
//!   issued by an engine
//! - **Expressions**: [`LinearExpr`]: sum of `coefficient * variable` terms
//! - **Engine**: [`SolverEngine`] trait, plus [`MicroLpEngine`], an adapter
//!   over the pure-Rust `microlp` solver
//!
//! # Design
//!
//! The trait is additive only: there is no way to remove or rewrite a
//! declaration, so one builder cannot disturb another builder's work.
//! Solving algorithms, tolerances and limits belong to the engine.

mod microlp;
mod types;

pub use self::microlp::{MicroLpEngine, RecordedConstraint};
pub use types::{
    ConstraintHandle, Direction, LinearExpr, Relation, SolveStatus, SolverEngine, VarHandle,
    VarKind, VariableSpec,
};
