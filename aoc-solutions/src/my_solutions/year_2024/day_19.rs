use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{DpCache, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 19, tags = ["2024", "dp", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData<'a> {
    towels: Vec<&'a str>,
    designs: Vec<&'a str>,
    arrangements: Option<Vec<u64>>,
}

/// Ways to build `design` from `towels`, memoised on the offset reached so far.
fn arrangements(design: &str, towels: &[&str]) -> u64 {
    let cache = DpCache::new(
        VecBackend::with_capacity(design.len() + 1),
        |&offset: &usize| {
            towels
                .iter()
                .filter(|t| design[offset..].starts_with(**t))
                .map(|t| offset + t.len())
                .collect()
        },
        |&offset: &usize, deps: Vec<u64>| {
            if offset == design.len() { 1 } else { deps.iter().sum() }
        },
    );
    cache.get(&0)
}

impl<'a> SharedData<'a> {
    fn arrangements(&mut self) -> &[u64] {
        let (towels, designs) = (&self.towels, &self.designs);
        self.arrangements.get_or_insert_with(|| {
            designs
                .par_iter()
                .map(|design| arrangements(design, towels))
                .collect()
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let towels: Vec<&str> = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("no towel patterns".into()))?
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        let designs: Vec<&str> = lines.collect();

        if let Some(bad) = towels
            .iter()
            .chain(&designs)
            .find(|s| !s.chars().all(|c| "wubrg".contains(c)))
        {
            return Err(ParseError::InvalidFormat(format!("`{bad}` has an unknown stripe colour")));
        }

        Ok(SharedData {
            towels,
            designs,
            arrangements: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let possible = shared.arrangements().iter().filter(|&&n| n > 0).count();
        Ok(possible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.arrangements().iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
r, wr, b, g, bwu, rb, gb, br

brwrr
bggr
gbbr
rrbgbr
ubwu
bwurrg
brgr
bbrgwb
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "6");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "16");
    }

    #[test]
    fn per_design_counts() {
        let towels = ["r", "wr", "b", "g", "bwu", "rb", "gb", "br"];
        assert_eq!(arrangements("gbbr", &towels), 4);
        assert_eq!(arrangements("rrbgbr", &towels), 6);
        assert_eq!(arrangements("ubwu", &towels), 0);
    }

    #[test]
    fn unknown_colour_is_rejected() {
        assert!(Solver::parse("r, x\n\nrr\n").is_err());
    }
}
