use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["2024", "simulation", "parallel"])]
pub struct Solver;

const PRUNE: u64 = 16_777_216;
const ROUNDS: usize = 2000;
/// Price changes lie in -9..=9, so four of them fit in a base-19 index.
const SEQUENCES: usize = 19 * 19 * 19 * 19;

fn next_secret(mut secret: u64) -> u64 {
    secret = ((secret * 64) ^ secret) % PRUNE;
    secret = ((secret / 32) ^ secret) % PRUNE;
    ((secret * 2048) ^ secret) % PRUNE
}

fn secrets(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |&s| Some(next_secret(s)))
}

/// Adds to `totals` the price this buyer pays at the first occurrence of
/// every change sequence.
fn accumulate_bananas(seed: u64, totals: &mut [u32]) {
    let mut seen = vec![false; SEQUENCES];
    let mut key = 0;
    let prices: Vec<i32> = secrets(seed).take(ROUNDS + 1).map(|s| (s % 10) as i32).collect();

    for (i, pair) in prices.windows(2).enumerate() {
        let change = (pair[1] - pair[0] + 9) as usize;
        key = (key * 19 + change) % SEQUENCES;
        if i >= 3 && !seen[key] {
            seen[key] = true;
            totals[key] += pair[1] as u32;
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.parse::<u64>()?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .par_iter()
            .filter_map(|&seed| secrets(seed).nth(ROUNDS))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let totals = shared
            .par_iter()
            .fold(
                || vec![0u32; SEQUENCES],
                |mut totals, &seed| {
                    accumulate_bananas(seed, &mut totals);
                    totals
                },
            )
            .reduce(
                || vec![0u32; SEQUENCES],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        let best = totals.into_iter().max().unwrap_or_default();
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_sequence() {
        let ten: Vec<u64> = secrets(123).skip(1).take(10).collect();
        assert_eq!(
            ten,
            vec![
                15887950, 16495136, 527345, 704524, 1553684, 12683156, 11100544, 12249484,
                7753432, 5908254
            ]
        );
    }

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse("1\n10\n100\n2024\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "37327623");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse("1\n2\n3\n2024\n").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "23");
    }
}
