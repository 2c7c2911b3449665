use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "parsing", "regex"])]
pub struct Solver;

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").expect("valid instruction pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(u64, u64),
    Do,
    Dont,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        INSTRUCTION
            .captures_iter(input)
            .map(|caps| match &caps[0] {
                "do()" => Ok(Instruction::Do),
                "don't()" => Ok(Instruction::Dont),
                _ => {
                    let operand = |i: usize| {
                        caps[i]
                            .parse::<u64>()
                            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
                    };
                    Ok(Instruction::Mul(operand(1)?, operand(2)?))
                }
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|ins| match ins {
                Instruction::Mul(a, b) => a * b,
                _ => 0,
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, total) = shared
            .iter()
            .fold((true, 0u64), |(enabled, total), ins| match ins {
                Instruction::Do => (true, total),
                Instruction::Dont => (false, total),
                Instruction::Mul(a, b) if enabled => (enabled, total + a * b),
                Instruction::Mul(..) => (enabled, total),
            });
        Ok(total.to_string())
    }
}
