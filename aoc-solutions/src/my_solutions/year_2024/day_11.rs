use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DashMapBackend, DpProblem, ParallelDpCache};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["2024", "dp", "parallel"])]
pub struct Solver;

/// Number of stones one stone becomes after `blinks` blinks.
pub struct Blink;

impl Blink {
    fn next(stone: u64) -> Vec<u64> {
        if stone == 0 {
            return vec![1];
        }
        let digits = stone.ilog10() + 1;
        if digits % 2 == 0 {
            let half = 10u64.pow(digits / 2);
            vec![stone / half, stone % half]
        } else {
            vec![stone * 2024]
        }
    }
}

impl DpProblem<(u64, u8), u64> for Blink {
    fn deps(&self, &(stone, blinks): &(u64, u8)) -> Vec<(u64, u8)> {
        if blinks == 0 {
            return Vec::new();
        }
        Self::next(stone)
            .into_iter()
            .map(|s| (s, blinks - 1))
            .collect()
    }

    fn compute(&self, &(_, blinks): &(u64, u8), deps: Vec<u64>) -> u64 {
        if blinks == 0 { 1 } else { deps.iter().sum() }
    }
}

pub struct SharedData {
    stones: Vec<u64>,
    counts: ParallelDpCache<(u64, u8), u64, DashMapBackend<(u64, u8), u64>, Blink>,
}

impl SharedData {
    fn count_after(&self, blinks: u8) -> u64 {
        self.stones
            .iter()
            .map(|&stone| self.counts.get(&(stone, blinks)))
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stones = input
            .split_whitespace()
            .map(|s| {
                s.parse()
                    .map_err(|e| ParseError::InvalidFormat(format!("stone `{s}`: {e}")))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        if stones.is_empty() {
            return Err(ParseError::MissingData("no stones".to_string()));
        }

        Ok(SharedData {
            stones,
            counts: ParallelDpCache::with_problem(DashMapBackend::new(), Blink),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_after(25).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_after(75).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse("125 17\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "55312");
    }

    #[test]
    fn six_blinks() {
        let shared = Solver::parse("125 17").unwrap();
        assert_eq!(shared.count_after(6), 22);
    }

    #[test]
    fn stone_rules() {
        assert_eq!(Blink::next(0), vec![1]);
        assert_eq!(Blink::next(1000), vec![10, 0]);
        assert_eq!(Blink::next(99), vec![9, 9]);
        assert_eq!(Blink::next(1), vec![2024]);
    }

    #[test]
    fn part2_reuses_cache_and_grows() {
        let mut shared = Solver::parse("0").unwrap();
        let p1: u64 = <Solver as PartSolver<1>>::solve(&mut shared).unwrap().parse().unwrap();
        let p2: u64 = <Solver as PartSolver<2>>::solve(&mut shared).unwrap().parse().unwrap();
        assert!(p2 > p1);
        assert!(!shared.counts.backend().is_empty());
    }
}
