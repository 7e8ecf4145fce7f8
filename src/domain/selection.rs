use serde::{Deserialize, Serialize};

/// Outcome of a single solver call
///
/// The order of `selected_ids` depends on the strategy that produced it:
/// the exact and brute-force solvers return input order, the greedy solver
/// returns the order in which it packed the sites.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionResult {
    selected_ids: Vec<u64>,
    total_yield: i64,
    total_cost: i64,
}

impl SelectionResult {
    pub fn new(selected_ids: Vec<u64>, total_yield: i64, total_cost: i64) -> Self {
        Self {
            selected_ids,
            total_yield,
            total_cost,
        }
    }

    /// No site selected
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn selected_ids(&self) -> &[u64] {
        &self.selected_ids
    }

    pub fn total_yield(&self) -> i64 {
        self.total_yield
    }

    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Whether a site with this id was selected
    pub fn contains(&self, id: u64) -> bool {
        self.selected_ids.contains(&id)
    }
}
