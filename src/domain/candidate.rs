use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Candidate
// ============================================================================

/// A site eligible for a solar panel installation
///
/// Values are kept signed so that a malformed record coming from an external
/// source reaches the optimizer and is rejected there instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique site identifier (not necessarily contiguous or sorted)
    pub id: u64,
    /// Installation cost (RM)
    pub cost: i64,
    /// Energy generated per period (kWh/month)
    #[serde(rename = "yield")]
    pub yield_kwh: i64,
}

impl Candidate {
    pub fn new(id: u64, cost: i64, yield_kwh: i64) -> Self {
        Self {
            id,
            cost,
            yield_kwh,
        }
    }

    /// Yield per unit of cost, for display only
    ///
    /// Returns `f64::INFINITY` for a free site with positive yield and `0.0`
    /// for a free site without yield.
    pub fn ratio(&self) -> f64 {
        if self.cost == 0 {
            if self.yield_kwh > 0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else {
            self.yield_kwh as f64 / self.cost as f64
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site {} (cost RM {}, {} kWh/month)",
            self.id, self.cost, self.yield_kwh
        )
    }
}

// ============================================================================
// Candidate Registry
// ============================================================================

/// In-memory collection of candidates in the order they were supplied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Read-only view handed to the solvers
    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Find a candidate by its id
    pub fn get(&self, id: u64) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Sum of the costs of every registered candidate
    pub fn total_cost(&self) -> i64 {
        self.candidates.iter().map(|c| c.cost).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl From<Vec<Candidate>> for CandidateRegistry {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self::new(candidates)
    }
}

impl AsRef<[Candidate]> for CandidateRegistry {
    fn as_ref(&self) -> &[Candidate] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a CandidateRegistry {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
