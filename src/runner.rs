//! Runs the configured strategies over one candidate registry
//!
//! Each strategy is timed and reported on its own. A strategy that fails is
//! reported as skipped and does not stop the others.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::{info, info_span};

use crate::config::Config;
use crate::domain::{CandidateRegistry, SelectionResult};
use crate::optimizer::{sampling, OptimizerError, SiteOptimizer, SolverLimits, StrategyKind};
use crate::report::Reporter;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub budget: i64,
    pub strategies: Vec<StrategyKind>,
    pub limits: SolverLimits,
    /// Brute force runs on a random sample of this size when the registry
    /// is larger
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl From<&Config> for RunSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            budget: cfg.solver.budget,
            strategies: cfg.solver.strategies.clone(),
            limits: cfg.solver.limits(),
            sample_size: cfg.sampling.sample_size,
            seed: cfg.sampling.seed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub kind: StrategyKind,
    pub label: String,
    pub outcome: Result<SelectionResult, OptimizerError>,
    pub elapsed: Duration,
    /// Registry size when the strategy ran on a sample
    pub sampled_from: Option<usize>,
}

pub fn run_strategy(
    kind: StrategyKind,
    registry: &CandidateRegistry,
    settings: &RunSettings,
) -> StrategyRun {
    let _span = info_span!("strategy", %kind).entered();
    let optimizer = SiteOptimizer::for_kind(kind, settings.limits);

    let sampled = if kind == StrategyKind::BruteForce && registry.len() > settings.sample_size {
        info!(
            from = registry.len(),
            to = settings.sample_size,
            "sampling candidates for brute force"
        );
        Some(CandidateRegistry::new(sampling::sample_with_seed(
            registry.as_slice(),
            settings.sample_size,
            settings.seed,
        )))
    } else {
        None
    };

    let label = match &sampled {
        Some(sample) => format!("{} (sample of {})", kind.label(), sample.len()),
        None => kind.label().to_string(),
    };

    let start = Instant::now();
    let outcome = optimizer.optimize(sampled.as_ref().unwrap_or(registry), settings.budget);
    let elapsed = start.elapsed();

    StrategyRun {
        kind,
        label,
        outcome,
        elapsed,
        sampled_from: sampled.map(|_| registry.len()),
    }
}

/// Run every configured strategy in order and report each outcome
pub fn run_all<W: Write>(
    registry: &CandidateRegistry,
    settings: &RunSettings,
    reporter: &mut Reporter<W>,
) -> io::Result<Vec<StrategyRun>> {
    let mut runs = Vec::with_capacity(settings.strategies.len());

    for &kind in &settings.strategies {
        let run = run_strategy(kind, registry, settings);
        match &run.outcome {
            Ok(result) => reporter.report(&run.label, result, Some(run.elapsed))?,
            Err(e) => reporter.report_failure(&run.label, e)?,
        }
        runs.push(run);
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportFormat;
    use crate::domain::Candidate;

    fn settings(strategies: Vec<StrategyKind>) -> RunSettings {
        RunSettings {
            budget: 5000,
            strategies,
            limits: SolverLimits::default(),
            sample_size: 20,
            seed: Some(3),
        }
    }

    fn registry() -> CandidateRegistry {
        CandidateRegistry::new(vec![
            Candidate::new(1, 3000, 50),
            Candidate::new(2, 2000, 40),
            Candidate::new(3, 1000, 10),
        ])
    }

    #[test]
    fn test_run_all_reports_each_strategy() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Text);
        let runs = run_all(
            &registry(),
            &settings(vec![StrategyKind::Exact, StrategyKind::Greedy, StrategyKind::BruteForce]),
            &mut reporter,
        )
        .unwrap();

        assert_eq!(runs.len(), 3);
        assert!(runs.iter().all(|r| r.sampled_from.is_none()));
        for run in &runs {
            assert_eq!(run.outcome.as_ref().unwrap().total_yield(), 90);
        }

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("=== Dynamic Programming ==="));
        assert!(text.contains("=== Greedy ==="));
        assert!(text.contains("=== Brute Force ==="));
    }

    #[test]
    fn test_brute_force_samples_large_registry() {
        let big = CandidateRegistry::new(
            (0..100).map(|i| Candidate::new(i, 10 + i as i64, 5)).collect(),
        );
        let mut s = settings(vec![StrategyKind::BruteForce]);
        s.sample_size = 8;

        let run = run_strategy(StrategyKind::BruteForce, &big, &s);
        assert_eq!(run.sampled_from, Some(100));
        assert_eq!(run.label, "Brute Force (sample of 8)");
        let result = run.outcome.unwrap();
        assert!(result.total_cost() <= s.budget);
        assert!(result.selected_ids().iter().all(|&id| big.get(id).is_some()));
    }

    #[test]
    fn test_failed_strategy_does_not_stop_others() {
        let mut s = settings(vec![StrategyKind::BruteForce, StrategyKind::Exact]);
        s.limits.max_brute_force_candidates = 2;

        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Text);
        let runs = run_all(&registry(), &s, &mut reporter).unwrap();

        assert!(matches!(
            runs[0].outcome,
            Err(OptimizerError::ResourceExhaustion { .. })
        ));
        assert!(runs[1].outcome.is_ok());
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Skipped:"));
    }
}
