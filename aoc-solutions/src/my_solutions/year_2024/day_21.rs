use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::grid::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["2024", "dp", "recursion"])]
pub struct Solver;

const NUMERIC: [&str; 4] = ["789", "456", "123", " 0A"];
const DIRECTIONAL: [&str; 2] = [" ^A", "<v>"];

struct Keypad {
    rows: &'static [&'static str],
}

impl Keypad {
    const NUMERIC: Keypad = Keypad { rows: &NUMERIC };
    const DIRECTIONAL: Keypad = Keypad { rows: &DIRECTIONAL };

    fn position(&self, key: char) -> Option<Point> {
        self.rows.iter().enumerate().find_map(|(y, row)| {
            row.chars()
                .position(|c| c == key)
                .map(|x| Point::new(x as i32, y as i32))
        })
    }

    /// Shortest press sequences (ending with `A`) that move an arm from
    /// `from` to `to` and press it. Only straight-line orders are considered,
    /// skipping any that sweep over the gap.
    fn moves(&self, from: char, to: char) -> Vec<String> {
        let (Some(a), Some(b), Some(gap)) = (self.position(from), self.position(to), self.position(' '))
        else {
            return Vec::new();
        };
        let horizontal = if b.x < a.x { "<" } else { ">" }.repeat(a.x.abs_diff(b.x) as usize);
        let vertical = if b.y < a.y { "^" } else { "v" }.repeat(a.y.abs_diff(b.y) as usize);

        let mut moves = Vec::with_capacity(2);
        if Point::new(b.x, a.y) != gap {
            moves.push(format!("{horizontal}{vertical}A"));
        }
        if Point::new(a.x, b.y) != gap {
            let other = format!("{vertical}{horizontal}A");
            if !moves.contains(&other) {
                moves.push(other);
            }
        }
        moves
    }

    /// Candidate expansions for each key of `sequence`, the arm starting on `A`.
    fn expansions(&self, sequence: &str) -> Vec<Vec<String>> {
        std::iter::once('A')
            .chain(sequence.chars())
            .zip(sequence.chars())
            .map(|(from, to)| self.moves(from, to))
            .collect()
    }
}

/// Presses needed from the human for `sequence` typed on a directional
/// keypad with `depth` robot-held directional keypads in between.
struct PressCount;

impl DpProblem<(String, u8), u64> for PressCount {
    fn deps(&self, (sequence, depth): &(String, u8)) -> Vec<(String, u8)> {
        if *depth == 0 {
            return Vec::new();
        }
        Keypad::DIRECTIONAL
            .expansions(sequence)
            .into_iter()
            .flatten()
            .map(|s| (s, depth - 1))
            .collect()
    }

    fn compute(&self, (sequence, depth): &(String, u8), deps: Vec<u64>) -> u64 {
        if *depth == 0 {
            return sequence.len() as u64;
        }
        let mut values = deps.into_iter();
        Keypad::DIRECTIONAL
            .expansions(sequence)
            .iter()
            .map(|choices| {
                values
                    .by_ref()
                    .take(choices.len())
                    .min()
                    .unwrap_or_default()
            })
            .sum()
    }
}

type PressCache = DpCache<(String, u8), u64, HashMapBackend<(String, u8), u64>, PressCount>;

pub struct SharedData<'a> {
    codes: Vec<&'a str>,
    presses: PressCache,
}

impl SharedData<'_> {
    fn shortest_presses(&self, code: &str, robots: u8) -> Result<u64, SolveError> {
        Keypad::NUMERIC
            .expansions(code)
            .into_iter()
            .map(|choices| {
                choices
                    .into_iter()
                    .map(|s| self.presses.get(&(s, robots)))
                    .min()
                    .ok_or_else(|| SolveError::failed(format!("cannot type code `{code}`")))
            })
            .sum()
    }

    fn complexity(&self, robots: u8) -> Result<u64, SolveError> {
        self.codes
            .iter()
            .map(|code| -> Result<u64, SolveError> {
                let numeric: u64 = code
                    .trim_end_matches('A')
                    .parse()
                    .map_err(|_| SolveError::failed(format!("code `{code}` has no numeric part")))?;
                Ok(self.shortest_presses(code, robots)? * numeric)
            })
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let codes: Vec<&str> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if let Some(bad) = codes
            .iter()
            .find(|c| !c.chars().all(|k| Keypad::NUMERIC.position(k).is_some() && k != ' '))
        {
            return Err(ParseError::InvalidFormat(format!("`{bad}` is not a keypad code")));
        }

        Ok(SharedData {
            codes,
            presses: DpCache::with_problem(HashMapBackend::new(), PressCount),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.complexity(2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.complexity(25)?.to_string())
    }
}
