//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::ResultAggregator;
use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::OutputFormatter;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    log::debug!("{config:?}");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() {
        log::warn!(
            "missing {} input file(s) under {}: {}",
            missing.len(),
            config.input_dir.display(),
            missing
                .iter()
                .map(|(year, day)| format!("{year}/day{day:02}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::for_work(&work_items);
    let mut results = Vec::new();

    let (tx, rx) = std::sync::mpsc::channel();
    let executed = std::thread::scope(|s| {
        let handle = s.spawn(|| executor.execute(tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }

        handle.join()
    });

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        log::warn!("no result received for {:?}", aggregator.missing());
    }

    executed
        .map_err(|_| CliError::ExecutorPanicked)?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);
    Ok(())
}

/// Build registry with tag filtering; a solver must carry every requested tag
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
