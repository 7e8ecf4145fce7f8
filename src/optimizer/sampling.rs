use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::Candidate;

/// Shuffle a copy of `candidates` and keep at most `k` of them
///
/// Used to shrink an input before handing it to the brute force solver.
pub fn sample<R: Rng + ?Sized>(candidates: &[Candidate], k: usize, rng: &mut R) -> Vec<Candidate> {
    let mut picked = candidates.to_vec();
    picked.shuffle(rng);
    picked.truncate(k);
    debug!(from = candidates.len(), kept = picked.len(), "sampled candidates");
    picked
}

/// [`sample`] with a seeded generator, or an entropy-seeded one when `seed`
/// is `None`
pub fn sample_with_seed(candidates: &[Candidate], k: usize, seed: Option<u64>) -> Vec<Candidate> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sample(candidates, k, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sites(n: u64) -> Vec<Candidate> {
        (0..n).map(|i| Candidate::new(i, i as i64 + 1, 1)).collect()
    }

    #[test]
    fn test_sample_truncates_without_duplicates() {
        let candidates = sites(50);
        let picked = sample_with_seed(&candidates, 10, Some(7));
        assert_eq!(picked.len(), 10);

        let ids: HashSet<u64> = picked.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 10);
        assert!(picked.iter().all(|c| candidates.contains(c)));
    }

    #[test]
    fn test_sample_smaller_than_k_keeps_everything() {
        let candidates = sites(3);
        let picked = sample_with_seed(&candidates, 10, Some(1));
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_same_seed_same_sample() {
        let candidates = sites(30);
        assert_eq!(
            sample_with_seed(&candidates, 5, Some(42)),
            sample_with_seed(&candidates, 5, Some(42))
        );
    }
}
