//! Input parsing helpers

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, anyhow};
use aoc_solver::ParseError;
use regex::Regex;

static SIGNED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("valid number pattern"));

/// Every optionally signed integer in `text`, in order of appearance.
pub fn signed_numbers<T>(text: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    SIGNED_NUMBER
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .parse()
                .with_context(|| format!("invalid number `{}`", m.as_str()))
        })
        .collect()
}

/// Exactly `N` integers from `text`.
pub fn numbers_exact<T, const N: usize>(text: &str) -> anyhow::Result<[T; N]>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let numbers = signed_numbers::<T>(text)?;
    let found = numbers.len();
    numbers
        .try_into()
        .map_err(|_| anyhow!("expected {N} numbers, found {found}"))
}

/// Parses each non-blank line with `f`, tagging failures with the line number.
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| f(line.trim()).map_err(|e| invalid_line(i + 1, e)))
        .collect()
}

/// Splits input into sections separated by blank lines.
pub fn sections(input: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

pub fn invalid_line(line: usize, e: impl Display) -> ParseError {
    ParseError::InvalidFormat(format!("(line {line}) {e}"))
}

pub fn invalid(e: impl Display) -> ParseError {
    ParseError::InvalidFormat(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_signed_numbers() {
        let numbers: Vec<i32> = signed_numbers("p=0,-4 v=3,-3").unwrap();
        assert_eq!(numbers, vec![0, -4, 3, -3]);
    }

    #[test]
    fn exact_count_is_enforced() {
        let [a, b]: [u32; 2] = numbers_exact("Button A: X+94, Y+34").unwrap();
        assert_eq!((a, b), (94, 34));
        let err = numbers_exact::<u32, 3>("1 2").unwrap_err();
        assert_eq!(err.to_string(), "expected 3 numbers, found 2");
    }

    #[test]
    fn unsigned_parse_rejects_negative() {
        assert!(signed_numbers::<u32>("1 -2").is_err());
    }

    #[test]
    fn line_errors_carry_line_numbers() {
        let err = parse_lines("1\n\nx\n", |l| Ok(l.parse::<u8>()?)).unwrap_err();
        assert!(err.to_string().contains("(line 3)"));
    }

    #[test]
    fn sections_split_on_blank_lines() {
        let parts = sections("a\nb\n\n\nc\r\n  \nd\n");
        assert_eq!(parts, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }
}
