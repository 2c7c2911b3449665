use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["2024", "grid", "bfs", "parallel"])]
pub struct Solver;

const MIN_SAVING: usize = 100;

#[derive(Debug)]
pub struct SharedData {
    walls: Grid<bool>,
    start: Point,
    end: Point,
    track: Option<Vec<(Point, usize)>>,
}

impl SharedData {
    /// Track cells with their distance from the start, in race order.
    fn track(&mut self) -> Result<&[(Point, usize)], SolveError> {
        if self.track.is_none() {
            let walls = &self.walls;
            let mut distance = Grid::new(walls.width(), walls.height(), None);
            distance[self.start] = Some(0);
            let mut order = vec![(self.start, 0)];
            let mut queue = VecDeque::from([self.start]);

            while let Some(p) = queue.pop_front() {
                let d = distance[p].unwrap_or_default();
                for next in walls.neighbors(p) {
                    if !walls[next] && distance[next].is_none() {
                        distance[next] = Some(d + 1);
                        order.push((next, d + 1));
                        queue.push_back(next);
                    }
                }
            }

            if distance[self.end].is_none() {
                return Err(SolveError::failed("the track never reaches the end"));
            }
            self.track = Some(order);
        }
        Ok(self.track.as_deref().unwrap_or_default())
    }
}

/// Cheats of at most `radius` steps that save at least `min_saving`.
fn count_cheats(track: &[(Point, usize)], radius: u32, min_saving: usize) -> usize {
    track
        .par_iter()
        .enumerate()
        .map(|(i, &(from, from_dist))| {
            track[i + 1..]
                .iter()
                .filter(|&&(to, to_dist)| {
                    let jump = from.manhattan(to);
                    jump <= radius && to_dist >= from_dist + jump as usize + min_saving
                })
                .count()
        })
        .sum()
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
            track: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared.track()?, 2, MIN_SAVING).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared.track()?, 20, MIN_SAVING).to_string())
    }
}
