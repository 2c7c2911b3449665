//! Property-based tests for the AocSolver derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct TestSolver;

impl AocParser for TestSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat("bad int".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for TestSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for TestSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i32>().to_string())
    }
}

fn to_input(numbers: &[i32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Solver::solve_part(shared, N)` matches `<Self as PartSolver<N>>::solve(shared)`.
mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn solve_part_dispatches_to_correct_part_solver(
            numbers in prop::collection::vec(1i32..10, 1..5),
            part in 1u8..=2
        ) {
            let input = to_input(&numbers);
            let mut shared1 = <TestSolver as AocParser>::parse(&input).unwrap();
            let mut shared2 = <TestSolver as AocParser>::parse(&input).unwrap();

            let solver_result = <TestSolver as Solver>::solve_part(&mut shared1, part);

            let direct_result = match part {
                1 => <TestSolver as PartSolver<1>>::solve(&mut shared2),
                2 => <TestSolver as PartSolver<2>>::solve(&mut shared2),
                _ => unreachable!(),
            };

            prop_assert_eq!(solver_result.unwrap(), direct_result.unwrap());
        }
    }
}

/// Parts outside `1..=max_parts` are rejected with `PartOutOfRange`.
mod invalid_part_rejection {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn invalid_part_returns_out_of_range(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = <TestSolver as AocParser>::parse("1\n2\n3").unwrap();

            match <TestSolver as Solver>::solve_part(&mut shared, invalid_part) {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, invalid_part),
                other => prop_assert!(false, "Expected PartOutOfRange for part {}, got {:?}", invalid_part, other),
            }
        }
    }
}

/// Mutations made by one part are visible to the next part.
mod mutation {
    use super::*;

    #[derive(Debug, Clone)]
    struct MutableData {
        numbers: Vec<i32>,
        cached_sum: Option<i32>,
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct MutatingSolver;

    impl AocParser for MutatingSolver {
        type SharedData<'a> = MutableData;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            let numbers: Vec<i32> = input
                .lines()
                .filter(|l| !l.is_empty())
                .map(|l| {
                    l.parse()
                        .map_err(|_| ParseError::InvalidFormat("bad int".into()))
                })
                .collect::<Result<_, _>>()?;
            Ok(MutableData {
                numbers,
                cached_sum: None,
            })
        }
    }

    impl PartSolver<1> for MutatingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum: i32 = shared.numbers.iter().sum();
            shared.cached_sum = Some(sum);
            Ok(sum.to_string())
        }
    }

    impl PartSolver<2> for MutatingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = shared.cached_sum.unwrap_or(0);
            Ok((sum * 2).to_string())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn mutation_is_visible_to_later_parts(numbers in prop::collection::vec(1i32..100, 1..5)) {
            let input = to_input(&numbers);
            let expected_sum: i32 = numbers.iter().sum();

            let mut shared = <MutatingSolver as AocParser>::parse(&input).unwrap();

            let result1 = <MutatingSolver as Solver>::solve_part(&mut shared, 1).unwrap();
            prop_assert_eq!(result1, expected_sum.to_string());
            prop_assert_eq!(shared.cached_sum, Some(expected_sum));

            let result2 = <MutatingSolver as Solver>::solve_part(&mut shared, 2).unwrap();
            prop_assert_eq!(result2, (expected_sum * 2).to_string());
        }
    }
}
