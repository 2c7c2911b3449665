use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::sections;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2024, day = 25, tags = ["2024", "grid"])]
pub struct Solver;

#[derive(Debug, Default)]
pub struct Schematics {
    locks: Vec<Vec<usize>>,
    keys: Vec<Vec<usize>>,
    /// Rows between the top and bottom edge, the room pins have to share.
    space: usize,
}

impl Schematics {
    fn fits(&self, lock: &[usize], key: &[usize]) -> bool {
        lock.len() == key.len() && lock.iter().zip(key).all(|(l, k)| l + k <= self.space)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Schematics;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut schematics = Schematics::default();

        for (n, block) in sections(input).into_iter().enumerate() {
            let grid = Grid::parse_with(&block.join("\n"), |_, c| match c {
                '#' => Ok(true),
                '.' => Ok(false),
                other => Err(format!("unexpected character `{other}`")),
            })
            .map_err(|e| ParseError::InvalidFormat(format!("schematic {}: {e}", n + 1)))?;

            let row_filled = |y: usize| (0..grid.width()).all(|x| grid[Point::new(x as i32, y as i32)]);
            let heights = (0..grid.width())
                .map(|x| {
                    (0..grid.height())
                        .filter(|&y| grid[Point::new(x as i32, y as i32)])
                        .count()
                        .saturating_sub(1)
                })
                .collect_vec();

            let space = grid.height().saturating_sub(2);
            if schematics.space != 0 && schematics.space != space {
                return Err(ParseError::InvalidFormat(format!(
                    "schematic {} has a different height",
                    n + 1
                )));
            }
            schematics.space = space;

            if row_filled(0) {
                schematics.locks.push(heights);
            } else if row_filled(grid.height() - 1) {
                schematics.keys.push(heights);
            } else {
                return Err(ParseError::InvalidFormat(format!(
                    "schematic {} is neither a lock nor a key",
                    n + 1
                )));
            }
        }
        Ok(schematics)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let pairs = shared
            .locks
            .iter()
            .cartesian_product(&shared.keys)
            .filter(|(lock, key)| shared.fits(lock, key))
            .count();
        Ok(pairs.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
#####
.####
.####
.####
.#.#.
.#...
.....

#####
##.##
.#.##
...##
...#.
...#.
.....

.....
#....
#....
#...#
#.#.#
#.###
#####

.....
.....
#.#..
###..
###.#
###.#
#####

.....
.....
.....
#....
#.#..
#.#.#
#####
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "3");
    }

    #[test]
    fn heights_match_pins() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.locks[0], vec![0, 5, 3, 4, 3]);
        assert_eq!(shared.keys[0], vec![5, 0, 2, 1, 3]);
    }

    #[test]
    fn only_one_part() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2),
            Err(SolveError::PartOutOfRange(2))
        ));
    }
}
