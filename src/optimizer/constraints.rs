use serde::{Deserialize, Serialize};

use super::InvalidInputError;
use crate::domain::Candidate;

/// Upper bound accepted for brute force regardless of configuration
pub const BRUTE_FORCE_HARD_CAP: u32 = 63;

/// Size limits applied before a solver allocates or enumerates anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverLimits {
    /// Largest candidate count brute force will enumerate (2^n subsets)
    pub max_brute_force_candidates: u32,
    /// Largest (n + 1) * (budget + 1) table the exact solver will build
    pub max_dp_cells: u64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_brute_force_candidates: 25,
            max_dp_cells: 50_000_000,
        }
    }
}

impl SolverLimits {
    /// Effective brute force limit, never above the width of a subset index
    pub fn brute_force_limit(&self) -> u32 {
        self.max_brute_force_candidates.min(BRUTE_FORCE_HARD_CAP)
    }
}

/// Reject negative budgets, costs and yields
pub fn validate_inputs(candidates: &[Candidate], budget: i64) -> Result<(), InvalidInputError> {
    if budget < 0 {
        return Err(InvalidInputError::NegativeBudget(budget));
    }

    for c in candidates {
        if c.cost < 0 {
            return Err(InvalidInputError::NegativeCost {
                id: c.id,
                cost: c.cost,
            });
        }
        if c.yield_kwh < 0 {
            return Err(InvalidInputError::NegativeYield {
                id: c.id,
                yield_kwh: c.yield_kwh,
            });
        }
    }

    Ok(())
}
