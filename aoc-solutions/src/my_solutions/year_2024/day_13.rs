use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::parse::{invalid, numbers_exact, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["2024", "math"])]
pub struct Solver;

const COST_A: i64 = 3;
const COST_B: i64 = 1;
const PRESS_LIMIT: i64 = 100;
const PRIZE_OFFSET: i64 = 10_000_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct Machine {
    a: (i64, i64),
    b: (i64, i64),
    prize: (i64, i64),
}

impl Machine {
    /// Cheapest `(a, b)` press counts reaching the prize, if any.
    fn presses(&self, limit: Option<i64>) -> Option<(i64, i64)> {
        let (ax, ay) = self.a;
        let (bx, by) = self.b;
        let (px, py) = self.prize;
        let within = |n: i64| n >= 0 && limit.is_none_or(|l| n <= l);

        let det = ax * by - ay * bx;
        if det != 0 {
            let a_num = px * by - py * bx;
            let b_num = ax * py - ay * px;
            if a_num % det != 0 || b_num % det != 0 {
                return None;
            }
            let (a, b) = (a_num / det, b_num / det);
            return (within(a) && within(b)).then_some((a, b));
        }

        // Collinear buttons: only a bounded search makes sense.
        let limit = limit?;
        (0..=limit)
            .filter_map(|a| {
                let (rx, ry) = (px - a * ax, py - a * ay);
                let b = if bx != 0 { rx / bx } else if by != 0 { ry / by } else { 0 };
                (within(b) && b * bx == rx && b * by == ry).then_some((a, b))
            })
            .min_by_key(|&(a, b)| a * COST_A + b * COST_B)
    }

    fn cost(&self, limit: Option<i64>) -> Option<i64> {
        self.presses(limit).map(|(a, b)| a * COST_A + b * COST_B)
    }

    fn shifted(&self, offset: i64) -> Machine {
        Machine {
            prize: (self.prize.0 + offset, self.prize.1 + offset),
            ..*self
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        sections(input)
            .into_iter()
            .enumerate()
            .map(|(i, lines)| {
                let [a, b, prize] = lines[..] else {
                    return Err(anyhow!("machine {} should have three lines", i + 1));
                };
                let pair = |line: &str| numbers_exact::<i64, 2>(line).map(|[x, y]| (x, y));
                Ok(Machine {
                    a: pair(a)?,
                    b: pair(b)?,
                    prize: pair(prize)?,
                })
            })
            .collect::<anyhow::Result<_>>()
            .map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared.iter().filter_map(|m| m.cost(Some(PRESS_LIMIT))).sum();
        Ok(tokens.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared
            .iter()
            .map(|m| m.shifted(PRIZE_OFFSET))
            .filter_map(|m| {
                let cost = m.cost(None);
                if cost.is_none() {
                    debug!("prize at {:?} is out of reach", m.prize);
                }
                cost
            })
            .sum();
        Ok(tokens.to_string())
    }
}
