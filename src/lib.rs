//! Solar Site Optimizer
//!
//! Chooses which candidate sites receive solar panels so that total energy
//! yield is maximised without exceeding an installation budget. Three
//! strategies are provided: an exact dynamic program, a ratio-ordered greedy
//! heuristic and exhaustive enumeration for small inputs.

pub mod config;
pub mod domain;
pub mod loader;
pub mod optimizer;
pub mod report;
pub mod runner;
pub mod telemetry;

pub use domain::{Candidate, CandidateRegistry, SelectionResult};
pub use optimizer::{brute_force, exact, greedy, OptimizerError, StrategyKind};
