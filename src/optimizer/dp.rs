use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{validate_inputs, OptimizerError, SelectionStrategy, SolverLimits, StrategyKind};
use crate::domain::{Candidate, SelectionResult};

/// Which branch the traceback follows when including and excluding a site
/// lead to the same optimal yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreak {
    /// Include a site only when it strictly changes the table value.
    /// This is the reference behaviour.
    #[default]
    PreferExcluded,
    /// Include a site whenever doing so still reaches the optimum
    PreferIncluded,
}

/// Exact 0/1 knapsack solver over an (items x budget) table
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactOptimizer {
    pub limits: SolverLimits,
    pub tie_break: TieBreak,
}

impl ExactOptimizer {
    pub fn new(limits: SolverLimits) -> Self {
        Self {
            limits,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Reject tables that would not fit the configured cell limit
    fn check_table_size(&self, n: usize, budget: i64) -> Result<usize, OptimizerError> {
        let cells = (n as u128 + 1) * (budget as u128 + 1);
        let exhausted = || OptimizerError::ResourceExhaustion {
            strategy: StrategyKind::Exact,
            requested: cells,
            limit: self.limits.max_dp_cells as u128,
        };

        if cells > self.limits.max_dp_cells as u128 {
            return Err(exhausted());
        }
        usize::try_from(budget).map_err(|_| exhausted())
    }
}

/// `best[i][b]`: maximum yield using the first `i` candidates with budget `b`
fn build_table(candidates: &[Candidate], budget: usize) -> Vec<Vec<i64>> {
    let n = candidates.len();
    let mut best = vec![vec![0i64; budget + 1]; n + 1];

    for i in 1..=n {
        let c = &candidates[i - 1];
        let cost = c.cost as usize;
        for b in 0..=budget {
            best[i][b] = if cost > b {
                best[i - 1][b]
            } else {
                best[i - 1][b].max(best[i - 1][b - cost].saturating_add(c.yield_kwh))
            };
        }
    }

    best
}

/// Walk the table back from `best[n][budget]`, returning the chosen sites in
/// input order together with their total cost
fn trace_selection(
    candidates: &[Candidate],
    best: &[Vec<i64>],
    budget: usize,
    tie_break: TieBreak,
) -> (Vec<u64>, i64) {
    let mut b = budget;
    let mut selected = Vec::new();
    let mut total_cost = 0i64;

    for i in (1..=candidates.len()).rev() {
        let c = &candidates[i - 1];
        let cost = c.cost as usize;

        let included = match tie_break {
            TieBreak::PreferExcluded => best[i][b] != best[i - 1][b],
            TieBreak::PreferIncluded => {
                cost <= b && best[i - 1][b - cost].saturating_add(c.yield_kwh) == best[i][b]
            }
        };

        if included {
            selected.push(c.id);
            b -= cost;
            total_cost += c.cost;
        }
    }

    selected.reverse();
    (selected, total_cost)
}

impl SelectionStrategy for ExactOptimizer {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exact
    }

    fn solve(
        &self,
        candidates: &[Candidate],
        budget: i64,
    ) -> Result<SelectionResult, OptimizerError> {
        validate_inputs(candidates, budget)?;
        let budget = self.check_table_size(candidates.len(), budget)?;

        debug!(
            candidates = candidates.len(),
            budget,
            cells = (candidates.len() + 1) * (budget + 1),
            "building dp table"
        );

        let best = build_table(candidates, budget);
        let (selected, total_cost) = trace_selection(candidates, &best, budget, self.tie_break);
        let total_yield = best[candidates.len()][budget];

        debug!(
            selected = selected.len(),
            total_yield, total_cost, "dp selection traced"
        );

        Ok(SelectionResult::new(selected, total_yield, total_cost))
    }
}

/// Optimal selection with default limits and the reference tie-break
pub fn exact(candidates: &[Candidate], budget: i64) -> Result<SelectionResult, OptimizerError> {
    ExactOptimizer::default().solve(candidates, budget)
}
