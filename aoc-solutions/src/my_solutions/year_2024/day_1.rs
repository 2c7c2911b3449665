use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "sorting"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    left: Vec<i64>,
    right: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pairs = parse_lines(input, |line| {
            line.split_whitespace()
                .map(str::parse::<i64>)
                .collect_tuple()
                .ok_or_else(|| anyhow!("expected two columns"))
                .and_then(|(l, r)| Ok((l?, r?)))
        })?;

        let (left, right) = pairs.into_iter().unzip();
        Ok(SharedData { left, right })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let left = shared.left.iter().sorted_unstable();
        let right = shared.right.iter().sorted_unstable();
        let distance: u64 = left.zip(right).map(|(l, r)| l.abs_diff(*r)).sum();
        Ok(distance.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = shared.right.iter().counts();
        let similarity: i64 = shared
            .left
            .iter()
            .map(|l| l * counts.get(l).copied().unwrap_or(0) as i64)
            .sum();
        Ok(similarity.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "11");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "31");
    }

    #[test]
    fn rejects_single_column() {
        let err = Solver::parse("1 2\n3\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"));
    }
}
