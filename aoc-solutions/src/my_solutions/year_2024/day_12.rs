use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 12, tags = ["2024", "grid", "flood-fill"])]
pub struct Solver;

#[derive(Debug, Default, Clone, Copy)]
struct Region {
    area: usize,
    perimeter: usize,
    corners: usize,
}

#[derive(Debug)]
pub struct SharedData {
    plots: Grid<char>,
    regions: Option<Vec<Region>>,
}

impl SharedData {
    fn regions(&mut self) -> &[Region] {
        let plots = &self.plots;
        self.regions.get_or_insert_with(|| measure_regions(plots))
    }
}

/// Flood fills every region, then measures it against the region-id map.
fn measure_regions(plots: &Grid<char>) -> Vec<Region> {
    let mut ids: Grid<Option<usize>> = plots.map(|_| None);
    let mut regions = Vec::new();

    for start in plots.points() {
        if ids[start].is_some() {
            continue;
        }
        let id = regions.len();
        let plant = plots[start];
        let mut region = Region::default();
        let mut stack = vec![start];
        ids[start] = Some(id);

        while let Some(p) = stack.pop() {
            region.area += 1;
            for next in p.neighbors() {
                if plots.get(next) == Some(&plant) {
                    if ids[next].is_none() {
                        ids[next] = Some(id);
                        stack.push(next);
                    }
                } else {
                    region.perimeter += 1;
                }
            }
        }
        regions.push(region);
    }

    // A region has as many sides as corners.
    for p in plots.points() {
        let id = ids[p];
        let same = |q: Point| ids.get(q).copied().flatten() == id;
        for d in Direction::ALL {
            let (a, b) = (p + d.delta(), p + d.turn_right().delta());
            let diagonal = a + d.turn_right().delta();
            let convex = !same(a) && !same(b);
            let concave = same(a) && same(b) && !same(diagonal);
            if convex || concave {
                if let Some(id) = id {
                    regions[id].corners += 1;
                }
            }
        }
    }

    regions
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            plots: Grid::parse_chars(input)?,
            regions: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.regions().iter().map(|r| r.area * r.perimeter).sum();
        Ok(price.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.regions().iter().map(|r| r.area * r.corners).sum();
        Ok(price.to_string())
    }
}
