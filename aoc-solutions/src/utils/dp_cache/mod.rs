//! Memoised evaluation of problems whose sub-results form a DAG
//!
//! A [`DpProblem`] says which indices an index depends on and how to combine
//! their values. The caches resolve dependencies on demand and compute every
//! index at most once.
//!
//! - [`DpCache`]: single-threaded, interior mutability through `RefCell`
//! - [`ParallelDpCache`]: thread-safe, resolves dependencies with rayon
//!
//! Sequential backends are [`VecBackend`] for dense `usize` indices and
//! [`HashMapBackend`] for anything hashable. [`DashMapBackend`] backs the
//! parallel cache.
//!
//! Cycles are not detected. A cyclic dependency graph overflows the stack.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&10), 55);
//! ```

mod backend;
mod cache;
mod parallel;
mod problem;

pub use backend::{Backend, DashMapBackend, HashMapBackend, ParallelBackend, VecBackend};
pub use cache::DpCache;
pub use parallel::ParallelDpCache;
pub use problem::{ClosureProblem, DpProblem};
