use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::{debug, log_enabled};

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::{numbers_exact, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 14, tags = ["2024", "simulation"])]
pub struct Solver;

const WIDTH: i32 = 101;
const HEIGHT: i32 = 103;
const SECONDS: i32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Robot {
    position: Point,
    velocity: Point,
}

impl Robot {
    fn at(&self, seconds: i32, width: i32, height: i32) -> Point {
        let p = self.position + self.velocity * seconds;
        Point::new(p.x.rem_euclid(width), p.y.rem_euclid(height))
    }
}

fn safety_factor(robots: &[Robot], seconds: i32, width: i32, height: i32) -> usize {
    let (mid_x, mid_y) = (width / 2, height / 2);
    let mut quadrants = [0usize; 4];
    for p in robots.iter().map(|r| r.at(seconds, width, height)) {
        if p.x == mid_x || p.y == mid_y {
            continue;
        }
        let index = usize::from(p.x > mid_x) + 2 * usize::from(p.y > mid_y);
        quadrants[index] += 1;
    }
    quadrants.iter().product()
}

/// First second at which no two robots share a cell.
fn first_distinct_second(robots: &[Robot], width: i32, height: i32) -> Option<i32> {
    (0..width * height).find(|&t| {
        let mut seen = HashSet::with_capacity(robots.len());
        robots.iter().all(|r| seen.insert(r.at(t, width, height)))
    })
}

fn render(robots: &[Robot], seconds: i32, width: i32, height: i32) -> Grid<char> {
    let mut picture = Grid::new(width as usize, height as usize, '.');
    for r in robots {
        picture[r.at(seconds, width, height)] = '#';
    }
    picture
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Robot>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let [px, py, vx, vy] = numbers_exact(line)?;
            Ok(Robot {
                position: Point::new(px, py),
                velocity: Point::new(vx, vy),
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safety_factor(shared, SECONDS, WIDTH, HEIGHT).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seconds = first_distinct_second(shared, WIDTH, HEIGHT)
            .ok_or_else(|| SolveError::failed("robots never spread out"))?;
        if log_enabled!(log::Level::Debug) {
            debug!("after {seconds}s:\n{}", render(shared, seconds, WIDTH, HEIGHT));
        }
        Ok(seconds.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
p=0,4 v=3,-3
p=6,3 v=-1,-3
p=10,3 v=-1,2
p=2,0 v=2,-1
p=0,0 v=1,3
p=3,0 v=-2,-2
p=7,6 v=-1,-3
p=3,0 v=-1,-2
p=9,3 v=2,3
p=7,3 v=-1,2
p=2,4 v=2,-3
p=9,5 v=-3,-3
";

    #[test]
    fn part1_example_on_small_field() {
        let robots = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(safety_factor(&robots, 100, 11, 7), 12);
    }

    #[test]
    fn robot_wraps_around() {
        let robots = Solver::parse("p=2,4 v=2,-3").unwrap();
        assert_eq!(robots[0].at(5, 11, 7), Point::new(1, 3));
    }

    #[test]
    fn first_second_without_overlap() {
        let robots = Solver::parse("p=0,0 v=1,0\np=0,0 v=0,1\n").unwrap();
        assert_eq!(first_distinct_second(&robots, 5, 5), Some(1));
        let picture = render(&robots, 1, 5, 5);
        assert_eq!(picture[Point::new(1, 0)], '#');
        assert_eq!(picture[Point::new(0, 1)], '#');
    }

    #[test]
    fn identical_robots_never_separate() {
        let mut robots = Solver::parse("p=1,1 v=1,1\np=1,1 v=1,1\n").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut robots).is_err());
    }
}
