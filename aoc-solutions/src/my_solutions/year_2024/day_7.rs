use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "search", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl Equation {
    /// Undoes operators from the right: the last operand must have been
    /// applied to whatever the prefix evaluated to.
    fn solvable(&self, concat: bool) -> bool {
        fn go(target: u64, operands: &[u64], concat: bool) -> bool {
            match operands {
                [] => false,
                [only] => target == *only,
                [rest @ .., last] => {
                    let last = *last;
                    if target >= last && go(target - last, rest, concat) {
                        return true;
                    }
                    if last != 0 && target % last == 0 && go(target / last, rest, concat) {
                        return true;
                    }
                    if concat {
                        let shift = 10u64.pow(digits(last));
                        if target > last && target % shift == last {
                            return go(target / shift, rest, concat);
                        }
                    }
                    false
                }
            }
        }

        go(self.target, &self.operands, concat)
    }
}

fn digits(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

fn calibration(equations: &[Equation], concat: bool) -> u64 {
    equations
        .par_iter()
        .filter(|eq| eq.solvable(concat))
        .map(|eq| eq.target)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (target, operands) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `target: operands`"))?;
            let operands = operands
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<u64>, _>>()?;
            if operands.is_empty() {
                return Err(anyhow!("no operands"));
            }
            Ok(Equation {
                target: target.trim().parse()?,
                operands,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "3749");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "11387");
    }

    #[test]
    fn evaluation_is_left_to_right() {
        // (2 + 3) * 4 = 20, whereas precedence would give 14
        let eq = Equation {
            target: 20,
            operands: vec![2, 3, 4],
        };
        assert!(eq.solvable(false));
        let eq = Equation {
            target: 14,
            operands: vec![2, 3, 4],
        };
        assert!(!eq.solvable(false));
    }

    #[test]
    fn concatenation_of_zero() {
        let eq = Equation {
            target: 10,
            operands: vec![1, 0],
        };
        assert!(eq.solvable(true));
        assert!(!eq.solvable(false));
    }
}
