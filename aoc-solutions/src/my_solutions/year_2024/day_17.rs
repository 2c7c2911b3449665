use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use log::{debug, trace};

use crate::utils::parse::{invalid, signed_numbers};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["2024", "vm", "reverse-engineering"])]
pub struct Solver;

/// Upper bound on executed instructions before a run is declared endless.
const STEP_LIMIT: usize = 1_000_000;

const MNEMONICS: [&str; 8] = ["adv", "bxl", "bst", "jnz", "bxc", "out", "bdv", "cdv"];

fn mnemonic(opcode: u8) -> &'static str {
    MNEMONICS.get(opcode as usize).copied().unwrap_or("???")
}

#[derive(Debug, Clone)]
pub struct Computer {
    registers: [u64; 3],
    program: Vec<u8>,
}

fn combo(registers: &[u64; 3], operand: u8) -> Result<u64, SolveError> {
    match operand {
        0..=3 => Ok(operand as u64),
        4..=6 => Ok(registers[operand as usize - 4]),
        _ => Err(SolveError::failed(format!("invalid combo operand {operand}"))),
    }
}

impl Computer {
    /// Runs the program with register A replaced by `a`.
    fn run(&self, a: u64) -> Result<Vec<u8>, SolveError> {
        let mut regs = [a, self.registers[1], self.registers[2]];
        let mut output = Vec::new();
        let mut ip = 0;

        for _ in 0..STEP_LIMIT {
            let (Some(&opcode), Some(&operand)) = (self.program.get(ip), self.program.get(ip + 1))
            else {
                trace!("halt   A={} B={} C={} out={output:?}", regs[0], regs[1], regs[2]);
                return Ok(output);
            };
            trace!(
                "{ip:>3}: {} {operand}  A={} B={} C={}",
                mnemonic(opcode),
                regs[0],
                regs[1],
                regs[2]
            );
            let divide = |regs: &[u64; 3]| -> Result<u64, SolveError> {
                let shift = combo(regs, operand)?;
                Ok(u32::try_from(shift)
                    .ok()
                    .and_then(|s| regs[0].checked_shr(s))
                    .unwrap_or(0))
            };

            ip += 2;
            match opcode {
                0 => regs[0] = divide(&regs)?,
                1 => regs[1] ^= operand as u64,
                2 => regs[1] = combo(&regs, operand)? & 7,
                3 => {
                    if regs[0] != 0 {
                        ip = operand as usize;
                    }
                }
                4 => regs[1] ^= regs[2],
                5 => output.push((combo(&regs, operand)? & 7) as u8),
                6 => regs[1] = divide(&regs)?,
                7 => regs[2] = divide(&regs)?,
                _ => return Err(SolveError::failed(format!("invalid opcode {opcode}"))),
            }
        }
        Err(SolveError::failed(format!(
            "program did not halt within {STEP_LIMIT} steps"
        )))
    }

    /// Program listing as `op operand` pairs.
    fn disassemble(&self) -> String {
        self.program
            .chunks(2)
            .map(|pair| match *pair {
                [op, arg] => format!("{} {arg}", mnemonic(op)),
                [op] => format!("{} ?", mnemonic(op)),
                _ => String::new(),
            })
            .join("; ")
    }

    /// Smallest `A` making the program print itself.
    ///
    /// Assumes the usual loop shape that shifts `A` right by three bits per
    /// output, so the last output depends only on the highest three bits.
    fn find_quine(&self) -> Result<Option<u64>, SolveError> {
        fn search(cpu: &Computer, prefix: u64, index: usize) -> Result<Option<u64>, SolveError> {
            for bits in 0..8 {
                let a = (prefix << 3) | bits;
                if cpu.run(a)? == cpu.program[index..] {
                    if index == 0 {
                        return Ok(Some(a));
                    }
                    if let Some(found) = search(cpu, a, index - 1)? {
                        return Ok(Some(found));
                    }
                }
            }
            Ok(None)
        }

        match self.program.len() {
            0 => Ok(None),
            len => search(self, 0, len - 1),
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Computer;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Computer> {
            let mut registers = [0u64; 3];
            let mut program = None;
            for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
                if let Some(rest) = line.strip_prefix("Register ") {
                    let (name, value) = rest.split_once(':').context("expected `Register X: n`")?;
                    let slot = match name {
                        "A" => 0,
                        "B" => 1,
                        "C" => 2,
                        other => return Err(anyhow!("unknown register `{other}`")),
                    };
                    registers[slot] = value.trim().parse()?;
                } else if let Some(rest) = line.strip_prefix("Program:") {
                    let code: Vec<u8> = signed_numbers(rest)?;
                    if let Some(bad) = code.iter().find(|&&c| c > 7) {
                        return Err(anyhow!("`{bad}` is not a 3-bit value"));
                    }
                    program = Some(code);
                } else {
                    return Err(anyhow!("unexpected line `{line}`"));
                }
            }
            Ok(Computer {
                registers,
                program: program.context("missing `Program:` line")?,
            })
        };
        parse().map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        debug!("running {}", shared.disassemble());
        let output = shared.run(shared.registers[0])?;
        Ok(output.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let a = shared
            .find_quine()?
            .ok_or_else(|| SolveError::failed("no register value reproduces the program"))?;
        debug!("program {:?} reproduces itself with A = {a:o} (octal)", shared.program);
        Ok(a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part1_example() {
        let input = "\
Register A: 729
Register B: 0
Register C: 0

Program: 0,1,5,4,3,0
";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(
            <Solver as PartSolver<1>>::solve(&mut shared).unwrap(),
            "4,6,3,5,6,3,5,2,1,0"
        );
    }

    #[test]
    fn part2_example() {
        let input = "\
Register A: 2024
Register B: 0
Register C: 0

Program: 0,3,5,4,3,0
";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "117440");
    }

    #[test]
    fn listing_names_instructions() {
        let cpu = Computer {
            registers: [0; 3],
            program: vec![0, 1, 5, 4, 3, 0, 7],
        };
        assert_eq!(cpu.disassemble(), "adv 1; out 4; jnz 0; cdv ?");
        assert_eq!(mnemonic(9), "???");
    }

    #[test]
    fn small_programs() {
        let cpu = |b: u64, c: u64, program: &[u8]| Computer {
            registers: [0, b, c],
            program: program.to_vec(),
        };
        // bxl 7 turns B = 29 into 26, then out B
        assert_eq!(cpu(29, 0, &[1, 7, 5, 5]).run(0).unwrap(), vec![26 & 7]);
        // bxc: 2024 ^ 43690 = 44354
        assert_eq!(cpu(2024, 43690, &[4, 0, 5, 5]).run(0).unwrap(), vec![2]);
        assert_eq!(cpu(0, 0, &[5, 0, 5, 1, 5, 4]).run(10).unwrap(), vec![0, 1, 2]);
        assert_eq!(
            cpu(0, 0, &[0, 1, 5, 4, 3, 0]).run(2024).unwrap(),
            vec![4, 2, 5, 6, 7, 7, 7, 7, 3, 1, 0]
        );
    }

    #[test]
    fn invalid_combo_operand_fails() {
        let cpu = Computer {
            registers: [0; 3],
            program: vec![5, 7],
        };
        assert!(cpu.run(0).is_err());
    }

    #[test]
    fn endless_program_fails() {
        let cpu = Computer {
            registers: [0; 3],
            program: vec![3, 0],
        };
        assert!(cpu.run(1).is_err());
    }
}
