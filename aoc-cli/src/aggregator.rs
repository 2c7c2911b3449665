//! Reorders streamed solver results into (year, day, part) order
//!
//! Results arrive in completion order. The aggregator holds a min-heap of keys
//! still expected and a min-heap of received results, releasing results only
//! while the smallest received one is the smallest still expected.

use crate::executor::{SolverResult, WorkItem};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part), ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Orders by reversed key so `BinaryHeap` pops the smallest first
struct Pending(SolverResult);

impl Pending {
    fn key(&self) -> ResultKey {
        ResultKey::from(&self.0)
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// One key per part of every work item
    pub fn for_work(work: &[WorkItem]) -> Self {
        Self::new(work.iter().flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        }))
    }

    /// Buffer `result` and return every result now releasable, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Pending(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next)), Some(top)) = (self.expected.peek(), self.pending.peek()) {
            if top.key() != *next {
                break;
            }
            self.expected.pop();
            if let Some(Pending(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Remaining buffered results in order, for when the stream ends early
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|p| p.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Keys that never arrived, smallest first
    pub fn missing(&self) -> Vec<ResultKey> {
        let mut keys: Vec<_> = self.expected.iter().map(|Reverse(k)| *k).collect();
        keys.sort();
        keys
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn key(day: u8, part: u8) -> ResultKey {
        ResultKey {
            year: 2024,
            day,
            part,
        }
    }

    fn result(day: u8, part: u8) -> SolverResult {
        SolverResult {
            year: 2024,
            day,
            part,
            answer: Ok(format!("{day}_{part}")),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    fn order(results: &[SolverResult]) -> Vec<(u8, u8)> {
        results.iter().map(|r| (r.day, r.part)).collect()
    }

    #[test]
    fn in_order_results_pass_straight_through() {
        let mut agg = ResultAggregator::new([key(1, 1), key(1, 2)]);

        assert_eq!(order(&agg.add(result(1, 1))), vec![(1, 1)]);
        assert_eq!(order(&agg.add(result(1, 2))), vec![(1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn out_of_order_results_wait_for_predecessors() {
        let mut agg = ResultAggregator::new([key(1, 1), key(1, 2), key(2, 1)]);

        assert!(agg.add(result(1, 2)).is_empty());
        assert!(agg.add(result(2, 1)).is_empty());

        let ready = agg.add(result(1, 1));
        assert_eq!(order(&ready), vec![(1, 1), (1, 2), (2, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn drain_and_missing_report_gaps() {
        let mut agg = ResultAggregator::new([key(1, 1), key(1, 2), key(3, 1)]);

        agg.add(result(3, 1));
        agg.add(result(1, 2));

        assert_eq!(agg.missing(), vec![key(1, 1), key(1, 2), key(3, 1)]);
        assert_eq!(order(&agg.drain()), vec![(1, 2), (3, 1)]);
        assert!(!agg.is_complete());
    }

    #[test]
    fn keys_built_from_work_items() {
        let work = [
            WorkItem {
                year: 2024,
                day: 25,
                parts: 1..=1,
            },
            WorkItem {
                year: 2024,
                day: 4,
                parts: 1..=2,
            },
        ];
        let agg = ResultAggregator::for_work(&work);
        assert_eq!(agg.missing(), vec![key(4, 1), key(4, 2), key(25, 1)]);
    }
}
