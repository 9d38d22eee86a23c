//! Error types for u-knapsack

use crate::config::ConfigError;
use crate::namespace::MergeConflict;
use thiserror::Error;

/// Main error type for model construction and solving.
#[derive(Debug, Error)]
pub enum PackError {
    /// Two builders populated the same registry path.
    #[error(transparent)]
    MergeConflict(#[from] MergeConflict),

    /// The entity records cannot describe a well-formed model.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// No packing satisfies every capacity and requirement constraint.
    #[error("no valid packing exists")]
    Infeasible,

    /// The objective is unbounded, which means capacity constraints were
    /// left out of the model.
    #[error("objective is unbounded; the model lacks capacity constraints")]
    Unbounded,

    /// The solver engine failed or returned an incomplete solution.
    #[error("solver engine error: {0}")]
    Engine(String),

    /// Configuration or instance file problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for u-knapsack operations
pub type Result<T> = std::result::Result<T, PackError>;
