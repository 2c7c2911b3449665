use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            Ok(line
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<i32>, _>>()?)
        })
    }
}

/// Strictly monotonic with every step between 1 and 3.
fn is_safe(levels: &[i32]) -> bool {
    let Some(first_step) = levels.windows(2).next().map(|w| w[1] - w[0]) else {
        return true;
    };
    let direction = first_step.signum();
    levels.windows(2).all(|w| {
        let step = w[1] - w[0];
        step.signum() == direction && (1..=3).contains(&step.abs())
    })
}

fn is_safe_dampened(levels: &[i32]) -> bool {
    is_safe(levels)
        || (0..levels.len()).any(|skip| {
            let mut rest = levels.to_vec();
            rest.remove(skip);
            is_safe(&rest)
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|r| is_safe(r)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|r| is_safe_dampened(r))
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "2");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "4");
    }

    #[test]
    fn short_reports_are_safe() {
        assert!(is_safe(&[]));
        assert!(is_safe(&[5]));
        assert!(!is_safe(&[5, 5]));
    }

    #[test]
    fn dampener_can_drop_the_first_level() {
        assert!(!is_safe(&[9, 1, 2, 3]));
        assert!(is_safe_dampened(&[9, 1, 2, 3]));
    }
}
