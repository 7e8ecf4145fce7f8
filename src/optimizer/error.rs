use thiserror::Error;

use super::StrategyKind;

/// A solver input that breaks the non-negativity contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("Negative budget: {0}")]
    NegativeBudget(i64),

    #[error("Candidate {id} has negative cost: {cost}")]
    NegativeCost { id: u64, cost: i64 },

    #[error("Candidate {id} has negative yield: {yield_kwh}")]
    NegativeYield { id: u64, yield_kwh: i64 },
}

/// Errors returned by the selection strategies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("{strategy} solver refused a problem of size {requested} (limit {limit})")]
    ResourceExhaustion {
        strategy: StrategyKind,
        requested: u128,
        limit: u128,
    },
}

impl OptimizerError {
    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            OptimizerError::InvalidInput(_) => "InvalidInput",
            OptimizerError::ResourceExhaustion { .. } => "ResourceExhaustion",
        }
    }
}
