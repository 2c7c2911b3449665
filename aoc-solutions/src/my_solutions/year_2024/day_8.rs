use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 8, tags = ["2024", "grid", "geometry"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    map: Grid<char>,
    antennas: HashMap<char, Vec<Point>>,
}

impl SharedData {
    fn pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.antennas
            .values()
            .flat_map(|points| points.iter().copied().tuple_combinations())
    }
}

fn gcd(a: i32, b: i32) -> i32 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_chars(input)?;
        let antennas = map
            .iter()
            .filter(|&(_, &c)| c.is_ascii_alphanumeric())
            .map(|(p, &c)| (c, p))
            .into_group_map();
        Ok(SharedData { map, antennas })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let antinodes: HashSet<Point> = shared
            .pairs()
            .flat_map(|(a, b)| [a + (a - b), b + (b - a)])
            .filter(|&p| shared.map.contains(p))
            .collect();
        Ok(antinodes.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map = &shared.map;
        let mut antinodes = HashSet::new();

        for (a, b) in shared.pairs() {
            let step = b - a;
            let divisor = gcd(step.x, step.y);
            let step = Point::new(step.x / divisor, step.y / divisor);

            for dir in [step, -step] {
                let mut p = a;
                while map.contains(p) {
                    antinodes.insert(p);
                    p += dir;
                }
            }
        }
        Ok(antinodes.len().to_string())
    }
}
