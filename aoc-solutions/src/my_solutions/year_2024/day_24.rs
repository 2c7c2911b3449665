use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use log::debug;

use crate::utils::parse::{invalid, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["2024", "circuit", "simulation"])]
pub struct Solver;

/// An adder with more crossed outputs than this is not repaired.
const MAX_SWAPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Xor,
}

impl Op {
    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
            Op::Xor => a ^ b,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Gate<'a> {
    a: &'a str,
    op: Op,
    b: &'a str,
    out: &'a str,
}

impl<'a> Gate<'a> {
    fn has_input(&self, wire: &str) -> bool {
        self.a == wire || self.b == wire
    }

    fn other_input(&self, wire: &str) -> &'a str {
        if self.a == wire { self.b } else { self.a }
    }

    fn reads_inputs(&self) -> bool {
        self.a.starts_with(['x', 'y'])
    }
}

#[derive(Debug)]
pub struct Circuit<'a> {
    initial: Vec<(&'a str, bool)>,
    gates: Vec<Gate<'a>>,
}

impl<'a> Circuit<'a> {
    fn simulate(&self) -> Result<HashMap<&'a str, bool>, SolveError> {
        let mut values: HashMap<&str, bool> = self.initial.iter().copied().collect();
        let mut pending: Vec<&Gate> = self.gates.iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            pending.retain(|g| {
                let ready = match (values.get(g.a), values.get(g.b)) {
                    (Some(&a), Some(&b)) => Some(g.op.apply(a, b)),
                    _ => None,
                };
                match ready {
                    Some(value) => {
                        values.insert(g.out, value);
                        false
                    }
                    None => true,
                }
            });
            if pending.len() == before {
                return Err(SolveError::failed(format!(
                    "{before} gates never receive both inputs"
                )));
            }
        }
        Ok(values)
    }

    /// Walks the ripple-carry adder from bit 0, swapping gate outputs
    /// whenever a sum or carry gate is not wired where it should be.
    fn repair(&self) -> Result<Vec<&'a str>, SolveError> {
        let gates = &self.gates;
        let mut outputs: Vec<&'a str> = gates.iter().map(|g| g.out).collect();
        let mut swapped: Vec<&'a str> = Vec::new();
        let bits = gates
            .iter()
            .flat_map(|g| [g.a, g.b])
            .filter(|w| w.starts_with('x'))
            .unique()
            .count();

        let find = |a: &str, b: &str, op: Op| {
            gates
                .iter()
                .position(|g| g.op == op && g.has_input(a) && g.has_input(b))
        };
        // The gate of kind `op` fed by exactly one of the expected wires.
        let find_partial = |expected: [&str; 2], op: Op| {
            gates.iter().find(|g| {
                g.op == op && !g.reads_inputs() && expected.iter().any(|w| g.has_input(w))
            })
        };
        let missing = |what: String| SolveError::failed(format!("adder has no {what}"));

        'walk: loop {
            let mut carry: Option<&'a str> = None;
            let mut swap: Option<(&'a str, &'a str)> = None;

            for i in 0..bits {
                let (x, y, z) = (format!("x{i:02}"), format!("y{i:02}"), format!("z{i:02}"));
                let xor = find(x.as_str(), y.as_str(), Op::Xor)
                    .map(|g| outputs[g])
                    .ok_or_else(|| missing(format!("{x} XOR {y}")))?;
                let and = find(x.as_str(), y.as_str(), Op::And)
                    .map(|g| outputs[g])
                    .ok_or_else(|| missing(format!("{x} AND {y}")))?;

                let Some(carry_in) = carry else {
                    if xor != z {
                        swap = Some((xor, outputs_named(&outputs, &z)?));
                        break;
                    }
                    carry = Some(and);
                    continue;
                };

                let sum = match find(xor, carry_in, Op::Xor) {
                    Some(g) => outputs[g],
                    None => {
                        let g = find_partial([xor, carry_in], Op::Xor)
                            .ok_or_else(|| missing(format!("sum gate for bit {i}")))?;
                        swap = Some(if g.has_input(carry_in) {
                            (xor, g.other_input(carry_in))
                        } else {
                            (carry_in, g.other_input(xor))
                        });
                        break;
                    }
                };
                if sum != z {
                    swap = Some((sum, outputs_named(&outputs, &z)?));
                    break;
                }

                let through = find(xor, carry_in, Op::And)
                    .map(|g| outputs[g])
                    .ok_or_else(|| missing(format!("carry AND gate for bit {i}")))?;
                match find(and, through, Op::Or) {
                    Some(g) => carry = Some(outputs[g]),
                    None => {
                        let g = find_partial([and, through], Op::Or)
                            .ok_or_else(|| missing(format!("carry OR gate for bit {i}")))?;
                        swap = Some(if g.has_input(and) {
                            (through, g.other_input(and))
                        } else {
                            (and, g.other_input(through))
                        });
                        break;
                    }
                }
            }

            let Some((first, second)) = swap else {
                break 'walk;
            };
            if swapped.len() >= MAX_SWAPS * 2 {
                return Err(SolveError::failed(format!(
                    "adder needs more than {MAX_SWAPS} swaps"
                )));
            }
            let (i, j) = (position_of(&outputs, first)?, position_of(&outputs, second)?);
            debug!("swapping outputs {first} and {second}");
            outputs.swap(i, j);
            swapped.extend([first, second]);
        }

        swapped.sort_unstable();
        Ok(swapped)
    }
}

fn position_of(outputs: &[&str], wire: &str) -> Result<usize, SolveError> {
    outputs
        .iter()
        .position(|&o| o == wire)
        .ok_or_else(|| SolveError::failed(format!("no gate drives wire {wire}")))
}

fn outputs_named<'a>(outputs: &[&'a str], wire: &str) -> Result<&'a str, SolveError> {
    position_of(outputs, wire).map(|i| outputs[i])
}

fn parse_gate(line: &str) -> anyhow::Result<Gate<'_>> {
    let (a, op, b, arrow, out) = line
        .split_whitespace()
        .collect_tuple()
        .context("expected `a OP b -> out`")?;
    if arrow != "->" {
        return Err(anyhow!("expected `->`, found `{arrow}`"));
    }
    let op = match op {
        "AND" => Op::And,
        "OR" => Op::Or,
        "XOR" => Op::Xor,
        other => return Err(anyhow!("unknown gate `{other}`")),
    };
    Ok(Gate { a, op, b, out })
}

impl AocParser for Solver {
    type SharedData<'a> = Circuit<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Circuit<'a>> {
            let blocks = sections(input);
            let [wires, gates] = blocks.as_slice() else {
                return Err(anyhow!("expected initial wires and gates separated by a blank line"));
            };
            let initial = wires
                .iter()
                .map(|&line| {
                    let (name, value) = line.split_once(':').context("expected `wire: value`")?;
                    match value.trim() {
                        "0" => Ok((name.trim(), false)),
                        "1" => Ok((name.trim(), true)),
                        other => Err(anyhow!("`{other}` is not a bit")),
                    }
                })
                .collect::<anyhow::Result<_>>()?;
            let gates = gates
                .iter()
                .map(|&line| parse_gate(line))
                .collect::<anyhow::Result<_>>()?;
            Ok(Circuit { initial, gates })
        };
        parse().map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let values = shared.simulate()?;
        let z = values
            .iter()
            .filter_map(|(wire, &on)| {
                let bit: u32 = wire.strip_prefix('z')?.parse().ok()?;
                Some(u64::from(on) << bit)
            })
            .sum::<u64>();
        Ok(z.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.repair()?.join(","))
    }
}
