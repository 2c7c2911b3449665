use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "graph", "topological-sort"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `(before, after)` pairs.
    rules: HashSet<(u32, u32)>,
    updates: Vec<Vec<u32>>,
}

impl SharedData {
    fn is_ordered(&self, update: &[u32]) -> bool {
        update.iter().enumerate().all(|(i, &earlier)| {
            update[i + 1..]
                .iter()
                .all(|&later| !self.rules.contains(&(later, earlier)))
        })
    }

    /// Kahn's algorithm over the rules that mention two pages of `update`.
    fn reorder(&self, update: &[u32]) -> Result<Vec<u32>, SolveError> {
        let mut in_degree: HashMap<u32, usize> = update.iter().map(|&p| (p, 0)).collect();
        for &(before, after) in &self.rules {
            if in_degree.contains_key(&before) {
                if let Some(d) = in_degree.get_mut(&after) {
                    *d += 1;
                }
            }
        }

        let mut ready: VecDeque<u32> = update
            .iter()
            .copied()
            .filter(|p| in_degree[p] == 0)
            .collect();
        let mut ordered = Vec::with_capacity(update.len());

        while let Some(page) = ready.pop_front() {
            ordered.push(page);
            for &next in update {
                if self.rules.contains(&(page, next)) {
                    let d = in_degree.entry(next).or_default();
                    *d -= 1;
                    if *d == 0 {
                        ready.push_back(next);
                    }
                }
            }
        }

        if ordered.len() == update.len() {
            Ok(ordered)
        } else {
            Err(SolveError::failed(format!(
                "ordering rules for update {update:?} contain a cycle"
            )))
        }
    }
}

fn middle(update: &[u32]) -> u32 {
    update[update.len() / 2]
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rules: HashSet<(u32, u32)> = HashSet::new();
        let mut updates = Vec::new();
        let mut in_rules = true;

        for (i, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                if !rules.is_empty() {
                    in_rules = false;
                }
                continue;
            }

            let parsed = if in_rules {
                line.split_once('|')
                    .ok_or_else(|| anyhow!("expected `a|b` rule"))
                    .and_then(|(a, b)| Ok((a.parse::<u32>()?, b.parse::<u32>()?)))
                    .map(|rule| {
                        rules.insert(rule);
                    })
            } else {
                line.split(',')
                    .map(|p| p.parse::<u32>().with_context(|| format!("invalid page `{p}`")))
                    .collect::<anyhow::Result<Vec<_>>>()
                    .map(|update| updates.push(update))
            };
            parsed.map_err(|e| invalid_line(i + 1, e))?;
        }

        if updates.is_empty() {
            return Err(ParseError::MissingData("no updates after the rules".to_string()));
        }
        Ok(SharedData { rules, updates })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .updates
            .iter()
            .filter(|u| shared.is_ordered(u))
            .map(|u| middle(u))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sum = 0;
        for update in shared.updates.iter().filter(|u| !shared.is_ordered(u)) {
            sum += middle(&shared.reorder(update)?);
        }
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "143");
    }

    #[test]
    fn part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "123");
    }

    #[test]
    fn reorder_follows_rules() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.reorder(&[97, 13, 75, 29, 47]).unwrap(), vec![97, 75, 47, 29, 13]);
    }

    #[test]
    fn cyclic_rules_fail() {
        let mut shared = Solver::parse("1|2\n2|1\n\n2,1\n").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }

    #[test]
    fn bad_page_reports_line() {
        let err = Solver::parse("1|2\n\n1,x\n").unwrap_err();
        assert!(err.to_string().contains("(line 3)"));
    }
}
