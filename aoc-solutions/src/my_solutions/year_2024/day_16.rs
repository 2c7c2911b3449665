use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["2024", "grid", "dijkstra"])]
pub struct Solver;

const STEP_COST: u64 = 1;
const TURN_COST: u64 = 1000;

#[derive(Debug)]
pub struct SharedData {
    walls: Grid<bool>,
    start: Point,
    end: Point,
}

type State = (Point, Direction);

impl SharedData {
    fn state_index(&self, (p, d): State) -> Option<usize> {
        self.walls.offset(p).map(|o| o * 4 + d.index())
    }

    fn open(&self, p: Point) -> bool {
        self.walls.get(p) == Some(&false)
    }

    /// Shortest scores from `sources` to every state. With `reverse`, edges
    /// are walked backwards so the scores are distances *to* the sources.
    fn dijkstra(&self, sources: &[State], reverse: bool) -> Vec<u64> {
        let mut dist = vec![u64::MAX; self.walls.len() * 4];
        let mut heap = BinaryHeap::new();

        for &s in sources {
            if let Some(i) = self.state_index(s) {
                dist[i] = 0;
                heap.push(Reverse((0, s.0, s.1)));
            }
        }

        while let Some(Reverse((cost, p, d))) = heap.pop() {
            let Some(i) = self.state_index((p, d)) else { continue };
            if cost > dist[i] {
                continue;
            }

            let ahead = if reverse { p - d.delta() } else { p + d.delta() };
            let moves = [
                ((ahead, d), STEP_COST),
                ((p, d.turn_left()), TURN_COST),
                ((p, d.turn_right()), TURN_COST),
            ];
            for ((np, nd), step) in moves {
                if !self.open(np) {
                    continue;
                }
                let Some(ni) = self.state_index((np, nd)) else { continue };
                let next_cost = cost + step;
                if next_cost < dist[ni] {
                    dist[ni] = next_cost;
                    heap.push(Reverse((next_cost, np, nd)));
                }
            }
        }
        dist
    }

    fn best_score(&self, from_start: &[u64]) -> Option<u64> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.state_index((self.end, d)).map(|i| from_start[i]))
            .min()
            .filter(|&score| score != u64::MAX)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (mut start, mut end) = (None, None);
        let walls = Grid::parse_with(input, |p, c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            'S' => {
                start = Some(p);
                Ok(false)
            }
            'E' => {
                end = Some(p);
                Ok(false)
            }
            other => Err(format!("unexpected character `{other}`")),
        })?;

        Ok(SharedData {
            walls,
            start: start.ok_or_else(|| ParseError::MissingData("no start `S`".into()))?,
            end: end.ok_or_else(|| ParseError::MissingData("no end `E`".into()))?,
        })
    }
}

fn unreachable() -> SolveError {
    SolveError::failed("the end tile cannot be reached")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let from_start = shared.dijkstra(&[(shared.start, Direction::Right)], false);
        let best = shared.best_score(&from_start).ok_or_else(unreachable)?;
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let from_start = shared.dijkstra(&[(shared.start, Direction::Right)], false);
        let best = shared.best_score(&from_start).ok_or_else(unreachable)?;

        let ends: Vec<State> = Direction::ALL.iter().map(|&d| (shared.end, d)).collect();
        let to_end = shared.dijkstra(&ends, true);

        let tiles = shared
            .walls
            .points()
            .filter(|&p| {
                Direction::ALL.iter().any(|&d| {
                    shared.state_index((p, d)).is_some_and(|i| {
                        from_start[i] != u64::MAX
                            && to_end[i] != u64::MAX
                            && from_start[i] + to_end[i] == best
                    })
                })
            })
            .count();
        Ok(tiles.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

    const SECOND: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

    #[test]
    fn part1_examples() {
        let mut shared = Solver::parse(FIRST).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "7036");
        let mut shared = Solver::parse(SECOND).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "11048");
    }

    #[test]
    fn part2_examples() {
        let mut shared = Solver::parse(FIRST).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "45");
        let mut shared = Solver::parse(SECOND).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "64");
    }

    #[test]
    fn walled_off_end_fails() {
        let mut shared = Solver::parse("#####\n#S#E#\n#####\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }
}
