//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::{DateTime, TimeDelta, Utc};

/// Prints results as they are released, then a timing summary
pub struct OutputFormatter {
    quiet: bool,
    started: DateTime<Utc>,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            started: Utc::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_line(result)),
            (Err(e), true) => eprintln!("Error: {e}"),
            (Err(_), false) => eprintln!("{}", format_line(result)),
        }
    }

    /// Totals only count successful results; speedup compares them with wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results, Utc::now() - self.started);

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!("Total parse time: {}", format_duration(summary.parse));
        println!("Total solve time: {}", format_duration(summary.solve));
        println!("Elapsed wall-clock time: {}", format_duration(summary.elapsed));
        if let Some(speedup) = summary.speedup() {
            println!("Speedup factor: {speedup:.2}x");
        }
    }
}

struct Summary {
    solved: usize,
    failed: usize,
    parse: TimeDelta,
    solve: TimeDelta,
    elapsed: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult], elapsed: TimeDelta) -> Self {
        let ok = || results.iter().filter(|r| r.answer.is_ok());
        let solved = ok().count();
        Self {
            solved,
            failed: results.len() - solved,
            parse: ok().filter_map(|r| r.parse_duration).sum(),
            solve: ok().map(|r| r.solve_duration).sum(),
            elapsed,
        }
    }

    fn speedup(&self) -> Option<f64> {
        let elapsed = self.elapsed.num_microseconds()?;
        let compute = (self.parse + self.solve).num_microseconds()?;
        (elapsed > 0).then(|| compute as f64 / elapsed as f64)
    }
}

/// `2024/05 Part 1: <answer> (parse: <t>, solve: <t>)` or the error
fn format_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{prefix}: {answer} ({parse_timing}solve: {})",
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolveError, SolverError};

    fn result(part: u8, answer: Result<&str, &str>) -> SolverResult {
        SolverResult {
            year: 2024,
            day: 5,
            part,
            answer: answer
                .map(str::to_string)
                .map_err(|e| SolverError::SolveError(SolveError::failed(e))),
            parse_duration: (part == 1).then(|| TimeDelta::microseconds(250)),
            solve_duration: TimeDelta::milliseconds(3),
        }
    }

    #[test]
    fn durations_pick_a_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
    }

    #[test]
    fn full_lines() {
        assert_eq!(
            format_line(&result(1, Ok("143"))),
            "2024/05 Part 1: 143 (parse: 250µs, solve: 3.00ms)"
        );
        assert_eq!(
            format_line(&result(2, Ok("123"))),
            "2024/05 Part 2: 123 (solve: 3.00ms)"
        );
        assert_eq!(
            format_line(&result(2, Err("cycle"))),
            "2024/05 Part 2: Error - Solve error: Solve failed: cycle"
        );
    }

    #[test]
    fn summary_counts_successes() {
        let results = [result(1, Ok("1")), result(2, Err("x"))];
        let summary = Summary::of(&results, TimeDelta::milliseconds(1));
        assert_eq!((summary.solved, summary.failed), (1, 1));
        assert_eq!(summary.parse, TimeDelta::microseconds(250));
        assert_eq!(summary.solve, TimeDelta::milliseconds(3));
        let speedup = summary.speedup().unwrap();
        assert!((speedup - 3.25).abs() < 1e-9);
    }
}
