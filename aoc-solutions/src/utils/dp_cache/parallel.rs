//! Thread-safe DP cache resolving dependencies with rayon.

use std::marker::PhantomData;

use rayon::prelude::*;

use super::backend::ParallelBackend;
use super::problem::DpProblem;

/// Parallel counterpart of [`DpCache`](super::DpCache).
///
/// Dependencies of an uncached index are resolved with `into_par_iter`.
/// Two threads may race to compute the same index; the backend keeps
/// whichever value lands first, so `compute` must be deterministic.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DashMapBackend, DpProblem, ParallelDpCache};
///
/// struct Collatz;
///
/// impl DpProblem<u64, u64> for Collatz {
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if *n <= 1 { vec![] }
///         else if n % 2 == 0 { vec![n / 2] }
///         else { vec![3 * n + 1] }
///     }
///     fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
///         deps.first().map_or(0, |steps| steps + 1)
///     }
/// }
///
/// let cache = ParallelDpCache::with_problem(DashMapBackend::new(), Collatz);
/// assert_eq!(cache.get(&27), 111);
/// ```
pub struct ParallelDpCache<I, K, B, P> {
    backend: B,
    problem: P,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, B, P> ParallelDpCache<I, K, B, P>
where
    I: Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: DpProblem<I, K> + Sync,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend,
            problem,
            _phantom: PhantomData,
        }
    }

    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.get(index) {
            return value;
        }

        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_par_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
