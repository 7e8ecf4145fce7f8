use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{BruteForceOptimizer, ExactOptimizer, GreedyOptimizer, OptimizerError, SolverLimits};
use crate::domain::{Candidate, CandidateRegistry, SelectionResult};

/// The available selection strategies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    /// Dynamic programming, provably optimal
    Exact,
    /// Ratio-ordered packing, fast but approximate
    Greedy,
    /// Exhaustive subset enumeration, optimal but exponential
    BruteForce,
}

impl StrategyKind {
    /// Label used when reporting the result of this strategy
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Exact => "Dynamic Programming",
            StrategyKind::Greedy => "Greedy",
            StrategyKind::BruteForce => "Brute Force",
        }
    }

    /// Whether results from this strategy are guaranteed optimal
    pub fn is_exact(&self) -> bool {
        !matches!(self, StrategyKind::Greedy)
    }
}

/// A way of choosing sites under a budget
///
/// Implementations are pure: they never mutate `candidates` and hold no state
/// between calls, so one instance may be shared across threads.
pub trait SelectionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn solve(
        &self,
        candidates: &[Candidate],
        budget: i64,
    ) -> Result<SelectionResult, OptimizerError>;
}

pub struct SiteOptimizer {
    pub strategy: Box<dyn SelectionStrategy>,
}

impl SiteOptimizer {
    pub fn new(strategy: Box<dyn SelectionStrategy>) -> Self {
        Self { strategy }
    }

    /// Build the optimizer for a strategy kind with the given limits
    pub fn for_kind(kind: StrategyKind, limits: SolverLimits) -> Self {
        let strategy: Box<dyn SelectionStrategy> = match kind {
            StrategyKind::Exact => Box::new(ExactOptimizer::new(limits)),
            StrategyKind::Greedy => Box::new(GreedyOptimizer),
            StrategyKind::BruteForce => Box::new(BruteForceOptimizer::new(limits)),
        };
        Self::new(strategy)
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn optimize(
        &self,
        registry: &CandidateRegistry,
        budget: i64,
    ) -> Result<SelectionResult, OptimizerError> {
        self.strategy.solve(registry.as_slice(), budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_strategy_kind_names() {
        assert_eq!(StrategyKind::BruteForce.to_string(), "brute_force");
        assert_eq!(
            StrategyKind::from_str("greedy").unwrap(),
            StrategyKind::Greedy
        );
        assert!(StrategyKind::from_str("simplex").is_err());
        assert_eq!(StrategyKind::iter().count(), 3);
    }

    #[test]
    fn test_for_kind_builds_matching_strategy() {
        for kind in StrategyKind::iter() {
            let optimizer = SiteOptimizer::for_kind(kind, SolverLimits::default());
            assert_eq!(optimizer.kind(), kind);
        }
    }

    #[test]
    fn test_optimize_uses_registry_order() {
        let registry = CandidateRegistry::new(vec![
            Candidate::new(9, 1, 5),
            Candidate::new(3, 1, 5),
        ]);
        let optimizer = SiteOptimizer::for_kind(StrategyKind::Exact, SolverLimits::default());
        let result = optimizer.optimize(&registry, 2).unwrap();
        assert_eq!(result.selected_ids(), &[9, 3]);
    }
}
