//! Problem definitions for the DP caches.

use std::marker::PhantomData;

/// Dependency structure and combination step of a DP problem.
///
/// `compute` receives the values of `deps(index)` in the same order.
pub trait DpProblem<I, K> {
    /// Indices this index depends on. Base cases return an empty vector.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Combines resolved dependency values into the value of `index`.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
///
/// let factorial = ClosureProblem::new(
///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { *n as u64 * deps[0] },
/// );
/// let cache = DpCache::with_problem(VecBackend::new(), factorial);
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct ClosureProblem<I, K, D, C> {
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
