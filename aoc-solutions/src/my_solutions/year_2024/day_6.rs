use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Direction, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "grid", "simulation", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    obstacles: Grid<bool>,
    start: Point,
    route: Option<Vec<Point>>,
}

impl SharedData {
    /// Distinct cells on the guard's route, computed once and shared by both parts.
    fn route(&mut self) -> Result<&[Point], SolveError> {
        if self.route.is_none() {
            let visited = patrol(&self.obstacles, self.start, None)
                .ok_or_else(|| SolveError::failed("guard never leaves the map"))?;
            let cells = visited
                .iter()
                .enumerate()
                .filter(|&(_, &mask)| mask != 0)
                .map(|(i, _)| self.obstacles.point_at(i))
                .collect();
            self.route = Some(cells);
        }
        Ok(self.route.as_deref().unwrap_or_default())
    }
}

/// Walks the guard until it leaves the map.
///
/// Returns per-cell bitmasks of the directions it faced there, or `None` if it
/// revisits a cell facing the same way (a loop).
fn patrol(obstacles: &Grid<bool>, start: Point, extra: Option<Point>) -> Option<Vec<u8>> {
    let blocked = |p: Point| extra == Some(p) || obstacles.get(p).copied().unwrap_or(false);

    let mut seen = vec![0u8; obstacles.len()];
    let mut pos = start;
    let mut facing = Direction::Up;

    while let Some(offset) = obstacles.offset(pos) {
        let bit = 1 << facing.index();
        if seen[offset] & bit != 0 {
            return None;
        }
        seen[offset] |= bit;

        let ahead = pos + facing.delta();
        if blocked(ahead) {
            facing = facing.turn_right();
        } else {
            pos = ahead;
        }
    }
    Some(seen)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut start = None;
        let obstacles = Grid::parse_with(input, |p, c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            '^' => {
                start = Some(p);
                Ok(false)
            }
            other => Err(format!("unexpected character `{other}`")),
        })?;
        let start = start.ok_or_else(|| ParseError::MissingData("no guard `^`".to_string()))?;

        Ok(SharedData {
            obstacles,
            start,
            route: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.route()?.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let candidates = shared.route()?.to_vec();
        let (obstacles, start) = (&shared.obstacles, shared.start);

        let loops = candidates
            .par_iter()
            .filter(|&&p| p != start && patrol(obstacles, start, Some(p)).is_none())
            .count();
        Ok(loops.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "41");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "6");
    }

    #[test]
    fn part2_alone_matches_after_part1() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        <Solver as PartSolver<1>>::solve(&mut shared).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "6");
    }

    #[test]
    fn trapped_guard_is_an_error() {
        let mut shared = Solver::parse(".#.\n#^#\n.#.\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }

    #[test]
    fn missing_guard_is_rejected() {
        assert!(Solver::parse("..\n.#\n").is_err());
    }
}
