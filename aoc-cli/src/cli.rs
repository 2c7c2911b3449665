//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers against local inputs", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs as <DIR>/<year>/dayDD.txt
    ///
    /// Falls back to $AOC_INPUT_DIR, then `inputs`.
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Explicit input file for a single --year/--day
    #[arg(short, long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert!(args.input_dir.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn tags_are_comma_separated() {
        let args = Args::try_parse_from(["aoc", "-t", "grid,bfs"]).unwrap();
        assert_eq!(args.tags, vec!["grid", "bfs"]);
    }

    #[test]
    fn input_requires_year_and_day() {
        assert!(Args::try_parse_from(["aoc", "-i", "day01.txt"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-i", "day01.txt", "-y", "2024"]).is_err());
        let args =
            Args::try_parse_from(["aoc", "-i", "day01.txt", "-y", "2024", "-d", "1"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("day01.txt")));
    }

    #[test]
    fn day_and_part_ranges_are_checked() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
    }
}
