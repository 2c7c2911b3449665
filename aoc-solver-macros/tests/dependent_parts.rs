use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug, Clone)]
struct SharedData {
    numbers: Vec<i32>,
    sum: Option<i32>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct TestDependentSolver;

impl AocParser for TestDependentSolver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData { numbers, sum: None })
    }
}

impl PartSolver<1> for TestDependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = *shared.sum.get_or_insert_with(|| shared.numbers.iter().sum());
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for TestDependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.numbers.is_empty() {
            return Err(SolveError::failed("no numbers to average"));
        }
        let sum = shared.sum.unwrap_or_else(|| shared.numbers.iter().sum());
        Ok(format!("{:.2}", sum as f64 / shared.numbers.len() as f64))
    }
}

#[test]
fn test_part1_stores_data() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();
    assert_eq!(TestDependentSolver::solve_part(&mut shared, 1).unwrap(), "60");
    assert_eq!(shared.sum, Some(60));
}

#[test]
fn test_part2_uses_part1_data() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();
    TestDependentSolver::solve_part(&mut shared, 1).unwrap();
    assert_eq!(TestDependentSolver::solve_part(&mut shared, 2).unwrap(), "20.00");
}

#[test]
fn test_part2_solves_independently() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();
    assert_eq!(TestDependentSolver::solve_part(&mut shared, 2).unwrap(), "20.00");
    assert_eq!(shared.sum, None);
}

#[test]
fn test_solve_failure_is_reported() {
    let mut shared = TestDependentSolver::parse("").unwrap();
    assert!(matches!(
        TestDependentSolver::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}
