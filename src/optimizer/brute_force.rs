//! Exhaustive subset enumeration
//!
//! Every subset of the candidates is addressed by a [`SubsetIndex`] in
//! `0..2^n`, where bit `i` set means `candidates[i]` is included. The solver
//! walks the indices in increasing order without pruning, so its cost is
//! `O(n * 2^n)` and it must only be used on small, pre-sampled inputs.

use tracing::debug;

use super::{validate_inputs, OptimizerError, SelectionStrategy, SolverLimits, StrategyKind};
use crate::domain::{Candidate, SelectionResult};

/// One subset of a candidate sequence, encoded as an inclusion bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubsetIndex(u64);

impl SubsetIndex {
    pub const EMPTY: SubsetIndex = SubsetIndex(0);

    pub fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    pub fn includes(&self, position: usize) -> bool {
        position < 64 && self.0 & (1u64 << position) != 0
    }

    /// Included positions in ascending order
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..64).filter(move |&i| bits & (1u64 << i) != 0)
    }

    /// Every subset of `n` items, from the empty set to the full set.
    /// `n` must be at most 63.
    pub fn all(n: u32) -> impl Iterator<Item = SubsetIndex> {
        (0..1u64 << n).map(SubsetIndex)
    }
}

/// Cost and yield of the candidates a subset includes, or `None` when either
/// sum overflows
fn evaluate(candidates: &[Candidate], subset: SubsetIndex) -> Option<(i64, i64)> {
    subset
        .positions()
        .take_while(|&i| i < candidates.len())
        .try_fold((0i64, 0i64), |(cost, y), i| {
            Some((
                cost.checked_add(candidates[i].cost)?,
                y.checked_add(candidates[i].yield_kwh)?,
            ))
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceOptimizer {
    pub limits: SolverLimits,
}

impl BruteForceOptimizer {
    pub fn new(limits: SolverLimits) -> Self {
        Self { limits }
    }
}

impl SelectionStrategy for BruteForceOptimizer {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BruteForce
    }

    fn solve(
        &self,
        candidates: &[Candidate],
        budget: i64,
    ) -> Result<SelectionResult, OptimizerError> {
        validate_inputs(candidates, budget)?;

        let limit = self.limits.brute_force_limit();
        let n = u32::try_from(candidates.len())
            .ok()
            .filter(|&n| n <= limit)
            .ok_or(OptimizerError::ResourceExhaustion {
                strategy: StrategyKind::BruteForce,
                requested: candidates.len() as u128,
                limit: limit as u128,
            })?;

        debug!(candidates = n, subsets = 1u64 << n, "enumerating subsets");

        // The empty subset is always feasible and yields zero
        let mut best = SubsetIndex::EMPTY;
        let mut best_yield = 0i64;
        let mut best_cost = 0i64;

        for subset in SubsetIndex::all(n) {
            // A subset whose sums overflow cannot fit any budget
            let Some((cost, y)) = evaluate(candidates, subset) else {
                continue;
            };
            // Strict: the first subset found keeps a tie
            if cost <= budget && y > best_yield {
                best = subset;
                best_yield = y;
                best_cost = cost;
            }
        }

        let selected: Vec<u64> = best.positions().map(|i| candidates[i].id).collect();

        debug!(
            subset = best.bits(),
            total_yield = best_yield,
            total_cost = best_cost,
            "brute force optimum found"
        );

        Ok(SelectionResult::new(selected, best_yield, best_cost))
    }
}

/// Optimal selection by enumeration, with the default candidate limit
pub fn brute_force(
    candidates: &[Candidate],
    budget: i64,
) -> Result<SelectionResult, OptimizerError> {
    BruteForceOptimizer::default().solve(candidates, budget)
}
