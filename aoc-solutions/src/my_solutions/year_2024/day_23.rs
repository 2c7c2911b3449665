use std::collections::{BTreeSet, HashMap};

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 23, tags = ["2024", "graph", "clique"])]
pub struct Solver;

type NodeSet = BTreeSet<usize>;

#[derive(Debug)]
pub struct Network<'a> {
    names: Vec<&'a str>,
    links: Vec<NodeSet>,
}

impl<'a> Network<'a> {
    fn from_edges(edges: &[(&'a str, &'a str)]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut names = Vec::new();
        let mut links: Vec<NodeSet> = Vec::new();

        for &(a, b) in edges {
            let [a, b] = [a, b].map(|name| {
                *index.entry(name).or_insert_with(|| {
                    names.push(name);
                    links.push(NodeSet::new());
                    names.len() - 1
                })
            });
            if a != b {
                links[a].insert(b);
                links[b].insert(a);
            }
        }
        Self { names, links }
    }

    fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.links.iter().enumerate().flat_map(move |(a, near)| {
            near.range(a + 1..).flat_map(move |&b| {
                self.links[a]
                    .intersection(&self.links[b])
                    .filter(move |&&c| c > b)
                    .map(move |&c| [a, b, c])
            })
        })
    }

    /// Bron–Kerbosch with pivoting; keeps the largest clique seen.
    fn max_clique(&self) -> NodeSet {
        fn expand(net: &Network, r: &mut Vec<usize>, mut p: NodeSet, mut x: NodeSet, best: &mut NodeSet) {
            if p.is_empty() && x.is_empty() {
                if r.len() > best.len() {
                    *best = r.iter().copied().collect();
                }
                return;
            }
            let pivot = p
                .union(&x)
                .copied()
                .max_by_key(|&u| p.intersection(&net.links[u]).count());
            let candidates: Vec<usize> = match pivot {
                Some(u) => p.difference(&net.links[u]).copied().collect(),
                None => p.iter().copied().collect(),
            };

            for v in candidates {
                let neighbours = &net.links[v];
                r.push(v);
                expand(
                    net,
                    r,
                    p.intersection(neighbours).copied().collect(),
                    x.intersection(neighbours).copied().collect(),
                    best,
                );
                r.pop();
                p.remove(&v);
                x.insert(v);
            }
        }

        let mut best = NodeSet::new();
        expand(self, &mut Vec::new(), (0..self.names.len()).collect(), NodeSet::new(), &mut best);
        best
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let edges = parse_lines(input, |line| {
            line.split_once('-')
                .filter(|(a, b)| !a.is_empty() && !b.is_empty())
                .ok_or_else(|| anyhow!("expected `a-b`"))
        })?;
        Ok(Network::from_edges(&edges))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .triangles()
            .filter(|t| t.iter().any(|&n| shared.names[n].starts_with('t')))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let password = shared
            .max_clique()
            .into_iter()
            .map(|n| shared.names[n])
            .sorted_unstable()
            .join(",");
        Ok(password)
    }
}
