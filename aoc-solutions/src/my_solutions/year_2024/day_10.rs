use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["2024", "grid", "dfs"])]
pub struct Solver;

/// Heights, with `None` for impassable cells.
pub type HeightMap = Grid<Option<u8>>;

fn trailheads(map: &HeightMap) -> impl Iterator<Item = Point> + '_ {
    map.iter()
        .filter(|&(_, &h)| h == Some(0))
        .map(|(p, _)| p)
}

/// Calls `on_summit` for every path end at height 9 reachable from `from`.
fn climb(map: &HeightMap, from: Point, on_summit: &mut impl FnMut(Point)) {
    let Some(Some(height)) = map.get(from).copied() else {
        return;
    };
    if height == 9 {
        on_summit(from);
        return;
    }
    for next in map.neighbors(from) {
        if map[next] == Some(height + 1) {
            climb(map, next, on_summit);
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |_, c| match c {
            '.' => Ok(None),
            c => c
                .to_digit(10)
                .map(|d| Some(d as u8))
                .ok_or_else(|| format!("unexpected character `{c}`")),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map: &HeightMap = shared;
        let score: usize = trailheads(map)
            .map(|start| {
                let mut summits = HashSet::new();
                climb(map, start, &mut |p| {
                    summits.insert(p);
                });
                summits.len()
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map: &HeightMap = shared;
        let rating: usize = trailheads(map)
            .map(|start| {
                let mut trails = 0;
                climb(map, start, &mut |_| trails += 1);
                trails
            })
            .sum();
        Ok(rating.to_string())
    }
}
