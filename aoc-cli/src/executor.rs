//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolveError, SolverError, SolverRegistry};
use chrono::{TimeDelta, Utc};
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Parse time attributed to this result; only the first part of a
    /// shared parse carries it
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: SolverError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedState,
    thread_pool: rayon::ThreadPool,
}

/// Everything worker threads read while solving
struct SharedState {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        let mut inputs = InputStore::new(config.input_dir.clone());
        if let (Some(path), Some(year), Some(day)) =
            (&config.input_file, config.year_filter, config.day_filter)
        {
            inputs = inputs.with_override(year, day, path.clone());
        }

        Ok(Self {
            shared: SharedState {
                registry,
                inputs,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.shared;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Year/days among `work` whose input file is absent
    pub fn missing_inputs(&self, work: &[WorkItem]) -> Vec<(u16, u8)> {
        work.iter()
            .filter(|w| !self.shared.inputs.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each item inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(singles, &tx)
            }
        }
    }

    /// Run groups in parallel on the pool; items within a group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, shared) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Clip the requested part to the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send one error result per part of `work`
fn send_failures(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: &SolverError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(
            tx,
            SolverResult::failed(work.year, work.day, part, replicate(error)),
        )?;
    }
    Ok(())
}

/// `SolverError` is not `Clone`; rebuild an equivalent one per part
fn replicate(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(y, d) => SolverError::NotFound(*y, *d),
        SolverError::InvalidYearDay(y, d) => SolverError::InvalidYearDay(*y, *d),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::SolveError(SolveError::failed(e.to_string())),
    }
}

/// Load the input for one work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedState,
) -> Result<(), ArcExecutorError> {
    let input = match shared.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            log::debug!("{e}");
            let error = SolverError::ParseError(ParseError::MissingData(e.to_string()));
            return send_failures(work, tx, &error);
        }
    };

    if matches!(shared.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &shared.registry)
    } else {
        run_parts_sequential(work, &input, tx, &shared.registry)
    }
}

/// Parse once, then solve each part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            log::debug!("{year}/{day:02} failed to parse: {e}");
            return send_failures(work, tx, &e);
        }
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(year, day, part, &mut *solver);
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

/// Parse separately for every part and solve them concurrently,
/// emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let mut result = solve_part(year, day, part, &mut *solver);
                result.parse_duration = Some(solver.parse_duration());
                result
            }
            Err(e) => SolverResult::failed(year, day, part, e),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|r| send(tx, r))
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let start = Utc::now();
    let outcome = solver.solve(part);
    let elapsed = Utc::now() - start;

    match outcome {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => SolverResult {
            solve_duration: elapsed,
            ..SolverResult::failed(year, day, part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, PartSolver, Solver, SolverRegistryBuilder};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.trim().is_empty() {
                return Err(ParseError::MissingData("empty".to_string()));
            }
            Ok(input.trim())
        }
    }

    impl PartSolver<1> for Echo {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.to_string())
        }
    }

    impl PartSolver<2> for Echo {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => <Self as PartSolver<1>>::solve(shared),
                2 => <Self as PartSolver<2>>::solve(shared),
                _ => Err(SolveError::PartOutOfRange(part)),
            }
        }
    }

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Echo>(2024, 1, &[])
            .unwrap()
            .register_solver::<Echo>(2024, 2, &[])
            .unwrap()
            .register_solver::<Echo>(2024, 3, &[])
            .unwrap()
            .build();
        let dir_arg = dir.path().to_string_lossy().into_owned();
        let mut argv = vec!["aoc", "--input-dir", dir_arg.as_str(), "--threads", "2"];
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::try_parse_from(argv).unwrap()).unwrap();
        Executor::new(registry, &config).unwrap()
    }

    fn write_input(dir: &TempDir, day: u8, content: &str) {
        let year_dir = dir.path().join("2024");
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(format!("day{day:02}.txt")), content).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn work_items_follow_filters() {
        let dir = TempDir::new().unwrap();
        let all = executor(&dir, &[]).collect_work_items();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].parts, 1..=2);

        let filtered = executor(&dir, &["-d", "2", "-p", "2"]).collect_work_items();
        assert_eq!(
            filtered,
            vec![WorkItem {
                year: 2024,
                day: 2,
                parts: 2..=2
            }]
        );

        assert!(executor(&dir, &["-y", "2023"]).collect_work_items().is_empty());
    }

    #[test]
    fn part_filter_is_clipped() {
        assert_eq!(filter_parts(None, 1), 1..=1);
        assert_eq!(filter_parts(Some(1), 2), 1..=1);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn missing_input_yields_error_results() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "hello\n");
        write_input(&dir, 3, "\n");

        for mode in ["sequential", "year", "day", "part"] {
            let exec = executor(&dir, &["--parallelize-by", mode]);
            assert_eq!(exec.missing_inputs(&exec.collect_work_items()), vec![(2024, 2)]);

            let results = run(&exec);
            assert_eq!(results.len(), 6, "mode {mode}");
            assert_eq!(results[0].answer.as_deref().unwrap(), "hello");
            assert_eq!(results[1].answer.as_deref().unwrap(), "5");
            assert!(matches!(
                results[2].answer,
                Err(SolverError::ParseError(ParseError::MissingData(_)))
            ));
            assert!(results[3].answer.is_err());
            // empty input fails to parse for both parts
            assert!(results[4].answer.is_err());
            assert!(results[5].answer.is_err());
        }
    }

    #[test]
    fn shared_parse_time_reported_once() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "abc");
        let results = run(&executor(&dir, &["-d", "1", "--parallelize-by", "day"]));
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn explicit_input_overrides_tree() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mine.txt");
        fs::write(&file, "override").unwrap();
        let file_arg = file.to_string_lossy().into_owned();

        let exec = executor(&dir, &["-y", "2024", "-d", "3", "-i", file_arg.as_str()]);
        let results = run(&exec);
        assert_eq!(results[0].answer.as_deref().unwrap(), "override");
    }
}
