use std::cmp::Ordering;

use tracing::debug;

use super::{validate_inputs, OptimizerError, SelectionStrategy, StrategyKind};
use crate::domain::{Candidate, SelectionResult};

/// Yield per unit of cost, compared exactly without floating point
#[derive(Debug, Clone, Copy)]
enum Ratio {
    /// `yield_kwh / cost` with `cost > 0`
    Finite { yield_kwh: i64, cost: i64 },
    /// Free site with positive yield
    Infinite,
}

impl Ratio {
    fn of(candidate: &Candidate) -> Self {
        match (candidate.cost, candidate.yield_kwh) {
            (0, y) if y > 0 => Ratio::Infinite,
            // A free site without yield ranks like any other zero ratio
            (0, _) => Ratio::Finite {
                yield_kwh: 0,
                cost: 1,
            },
            (cost, yield_kwh) => Ratio::Finite { yield_kwh, cost },
        }
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Ratio::Infinite, Ratio::Infinite) => Ordering::Equal,
            (Ratio::Infinite, _) => Ordering::Greater,
            (_, Ratio::Infinite) => Ordering::Less,
            (
                Ratio::Finite {
                    yield_kwh: y1,
                    cost: c1,
                },
                Ratio::Finite {
                    yield_kwh: y2,
                    cost: c2,
                },
            ) => (*y1 as i128 * *c2 as i128).cmp(&(*y2 as i128 * *c1 as i128)),
        }
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

/// Packs sites in descending yield/cost order, skipping any that no longer
/// fit or that yield nothing. Never backtracks, so the result is not
/// guaranteed optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOptimizer;

impl GreedyOptimizer {
    /// Candidates by descending ratio; equal ratios keep their input order
    fn rank(candidates: &[Candidate]) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = candidates.iter().collect();
        ranked.sort_by(|a, b| Ratio::of(b).cmp(&Ratio::of(a)));
        ranked
    }
}

impl SelectionStrategy for GreedyOptimizer {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn solve(
        &self,
        candidates: &[Candidate],
        budget: i64,
    ) -> Result<SelectionResult, OptimizerError> {
        validate_inputs(candidates, budget)?;

        let mut selected = Vec::new();
        let mut total_cost = 0i64;
        let mut total_yield = 0i64;

        for c in Self::rank(candidates) {
            // A site without yield never improves the selection
            if c.yield_kwh == 0 {
                continue;
            }
            // Overflowing sums are treated as not fitting
            let (Some(cost), Some(yield_kwh)) = (
                total_cost.checked_add(c.cost),
                total_yield.checked_add(c.yield_kwh),
            ) else {
                continue;
            };
            if cost <= budget {
                selected.push(c.id);
                total_cost = cost;
                total_yield = yield_kwh;
            }
        }

        debug!(
            candidates = candidates.len(),
            selected = selected.len(),
            total_yield,
            total_cost,
            "greedy packing finished"
        );

        Ok(SelectionResult::new(selected, total_yield, total_cost))
    }
}

/// Approximate selection by yield/cost ratio
pub fn greedy(candidates: &[Candidate], budget: i64) -> Result<SelectionResult, OptimizerError> {
    GreedyOptimizer.solve(candidates, budget)
}
