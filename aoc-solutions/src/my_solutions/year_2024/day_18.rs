use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::{numbers_exact, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["2024", "grid", "bfs", "binary-search"])]
pub struct Solver;

const SIZE: usize = 71;
const FALLEN: usize = 1024;

/// Memory space where each cell remembers when (if ever) a byte lands on it.
struct MemorySpace {
    landed_at: Grid<usize>,
}

impl MemorySpace {
    fn new(bytes: &[Point], size: usize) -> Result<Self, SolveError> {
        let mut landed_at = Grid::new(size, size, usize::MAX);
        for (t, &p) in bytes.iter().enumerate() {
            let cell = landed_at
                .get_mut(p)
                .ok_or_else(|| SolveError::failed(format!("byte {p} falls outside the grid")))?;
            *cell = (*cell).min(t);
        }
        Ok(Self { landed_at })
    }

    /// Fewest steps from the top-left to the bottom-right corner once
    /// `fallen` bytes have landed.
    fn shortest_path(&self, fallen: usize) -> Option<usize> {
        let grid = &self.landed_at;
        let open = |p: Point| grid.get(p).is_some_and(|&t| t >= fallen);
        let start = Point::ORIGIN;
        let goal = Point::new(grid.width() as i32 - 1, grid.height() as i32 - 1);
        if !open(start) {
            return None;
        }

        let mut steps = Grid::new(grid.width(), grid.height(), None);
        steps[start] = Some(0);
        let mut queue = VecDeque::from([start]);

        while let Some(p) = queue.pop_front() {
            let here = steps[p].unwrap_or_default();
            if p == goal {
                return Some(here);
            }
            for next in p.neighbors() {
                if open(next) && steps[next].is_none() {
                    steps[next] = Some(here + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Smallest number of fallen bytes that cuts the corners apart.
    fn first_blocking(&self, total: usize) -> Option<usize> {
        if self.shortest_path(total).is_some() {
            return None;
        }
        let (mut lo, mut hi) = (0, total);
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.shortest_path(mid).is_some() {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Some(lo)
    }
}

fn min_steps(bytes: &[Point], size: usize, fallen: usize) -> Result<usize, SolveError> {
    MemorySpace::new(bytes, size)?
        .shortest_path(fallen.min(bytes.len()))
        .ok_or_else(|| SolveError::failed("exit is unreachable"))
}

fn blocking_byte(bytes: &[Point], size: usize) -> Result<Point, SolveError> {
    let count = MemorySpace::new(bytes, size)?
        .first_blocking(bytes.len())
        .ok_or_else(|| SolveError::failed("no byte ever blocks the exit"))?;
    count
        .checked_sub(1)
        .map(|i| bytes[i])
        .ok_or_else(|| SolveError::failed("the start is blocked before any byte falls"))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let [x, y] = numbers_exact(line)?;
            Ok(Point::new(x, y))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(min_steps(shared, SIZE, FALLEN)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(blocking_byte(shared, SIZE)?.to_string())
    }
}
