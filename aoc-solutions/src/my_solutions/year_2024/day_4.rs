use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{EIGHT_NEIGHBORS, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<char>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_chars(input)
    }
}

fn spells(grid: &Grid<char>, start: Point, step: Point, word: &str) -> bool {
    word.chars()
        .enumerate()
        .all(|(i, c)| grid.get(start + step * i as i32) == Some(&c))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<char> = shared;
        let count = grid
            .iter()
            .filter(|&(_, &c)| c == 'X')
            .map(|(p, _)| {
                EIGHT_NEIGHBORS
                    .iter()
                    .filter(|&&step| spells(grid, p, step, "XMAS"))
                    .count()
            })
            .sum::<usize>();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<char> = shared;
        let is_mas_diagonal = |centre: Point, step: Point| {
            let ends = (grid.get(centre - step), grid.get(centre + step));
            matches!(ends, (Some('M'), Some('S')) | (Some('S'), Some('M')))
        };

        let count = grid
            .iter()
            .filter(|&(p, &c)| {
                c == 'A' && is_mas_diagonal(p, Point::new(1, 1)) && is_mas_diagonal(p, Point::new(1, -1))
            })
            .count();
        Ok(count.to_string())
    }
}
