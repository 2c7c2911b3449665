use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    warehouse: Grid<char>,
    moves: Vec<Direction>,
}

struct Warehouse {
    map: Grid<char>,
    robot: Point,
}

impl Warehouse {
    fn new(map: Grid<char>) -> Result<Self, SolveError> {
        let robot = map
            .find(|&c| c == '@')
            .ok_or_else(|| SolveError::failed("no robot `@` in the warehouse"))?;
        Ok(Self { map, robot })
    }

    /// Every cell that moves when the robot steps in `dir`, or `None` if a
    /// wall blocks the push. The map edge counts as a wall.
    fn pushed_cells(&self, dir: Direction) -> Option<Vec<Point>> {
        let step = dir.delta();
        let mut cells = vec![self.robot];
        let mut seen = HashSet::from([self.robot]);
        let mut i = 0;

        while let Some(&cell) = cells.get(i) {
            i += 1;
            let next = cell + step;
            let mut push = |p: Point| {
                if seen.insert(p) {
                    cells.push(p);
                }
            };
            match self.map.get(next).copied() {
                None | Some('#') => return None,
                Some('O') => push(next),
                Some('[') => {
                    push(next);
                    if !dir.is_horizontal() {
                        push(next + Direction::Right.delta());
                    }
                }
                Some(']') => {
                    push(next);
                    if !dir.is_horizontal() {
                        push(next + Direction::Left.delta());
                    }
                }
                _ => {}
            }
        }
        Some(cells)
    }

    fn step(&mut self, dir: Direction) {
        let Some(cells) = self.pushed_cells(dir) else {
            return;
        };
        let moved: Vec<(Point, char)> = cells.iter().map(|&p| (p, self.map[p])).collect();
        for &(p, _) in &moved {
            self.map[p] = '.';
        }
        for (p, c) in moved {
            self.map[p + dir.delta()] = c;
        }
        self.robot += dir.delta();
    }

    fn gps_sum(&self) -> usize {
        self.map
            .iter()
            .filter(|&(_, &c)| c == 'O' || c == '[')
            .map(|(p, _)| 100 * p.y as usize + p.x as usize)
            .sum()
    }
}

fn widen(map: &Grid<char>) -> Result<Grid<char>, ParseError> {
    let text: String = (0..map.height())
        .map(|y| {
            let mut row: String = (0..map.width())
                .map(|x| match map[Point::new(x as i32, y as i32)] {
                    '#' => "##",
                    'O' => "[]",
                    '@' => "@.",
                    _ => "..",
                })
                .collect();
            row.push('\n');
            row
        })
        .collect();
    Grid::parse_chars(&text)
}

fn run(map: Grid<char>, moves: &[Direction]) -> Result<usize, SolveError> {
    let mut warehouse = Warehouse::new(map)?;
    for &dir in moves {
        warehouse.step(dir);
    }
    Ok(warehouse.gps_sum())
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (map, moves) = input
            .trim_start()
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("expected a blank line before the moves".into()))?;

        let warehouse = Grid::parse_with(map, |_, c| match c {
            '#' | '.' | 'O' | '@' => Ok(c),
            other => Err(format!("unexpected character `{other}`")),
        })?;
        let moves = moves
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Direction::from_arrow(c)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("unknown move `{c}`")))
            })
            .collect::<Result<_, _>>()?;

        Ok(SharedData { warehouse, moves })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared.warehouse.clone(), &shared.moves)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let wide = widen(&shared.warehouse).map_err(|e| SolveError::SolveFailed(e.into()))?;
        Ok(run(wide, &shared.moves)?.to_string())
    }
}
