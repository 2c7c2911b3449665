use aoc_solver::{
    AocParser, ParseError, RegistrationError, SolveError, Solver, SolverError,
    SolverRegistryBuilder,
};

struct Doubler;

impl AocParser for Doubler {
    type SharedData<'a> = i64;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("not a number: {input:?}")))
    }
}

impl Solver for Doubler {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        *shared *= 2;
        Ok(format!("{}:{}", part, shared))
    }
}

#[test]
fn test_create_and_solve_shares_state_between_parts() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Doubler>(2024, 7, &["math"])
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2024, 7, "21").unwrap();
    assert_eq!(solver.year(), 2024);
    assert_eq!(solver.day(), 7);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let first = solver.solve(1).unwrap();
    assert_eq!(first.answer, "1:42");
    assert!(first.duration() >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(2).unwrap().answer, "2:84");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_duplicate_registration_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_solver::<Doubler>(2024, 7, &[])
        .unwrap()
        .register_solver::<Doubler>(2024, 7, &[]);

    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2024, 7))));
}

#[test]
fn test_out_of_range_registration_rejected() {
    let result = SolverRegistryBuilder::new().register_solver::<Doubler>(2040, 1, &[]);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2040, 1))));

    let result = SolverRegistryBuilder::new().register_solver::<Doubler>(2024, 26, &[]);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2024, 26))));
}

#[test]
fn test_lookup_errors() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Doubler>(2024, 7, &[])
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2024, 8, "1"),
        Err(SolverError::NotFound(2024, 8))
    ));
    assert!(matches!(
        registry.create_solver(1999, 1, "1"),
        Err(SolverError::InvalidYearDay(1999, 1))
    ));
    assert!(matches!(
        registry.create_solver(2024, 7, "abc"),
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}

#[test]
fn test_storage_iterates_in_year_day_order() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Doubler>(2024, 3, &[])
        .unwrap()
        .register_solver::<Doubler>(2016, 20, &[])
        .unwrap()
        .register_solver::<Doubler>(2024, 1, &["first"])
        .unwrap()
        .build();

    let keys: Vec<(u16, u8)> = registry
        .storage()
        .iter_info()
        .map(|info| (info.year, info.day))
        .collect();
    assert_eq!(keys, vec![(2016, 20), (2024, 1), (2024, 3)]);
    assert_eq!(registry.storage().len(), 3);
    assert!(!registry.storage().is_empty());
    assert_eq!(registry.storage().get_info(2024, 1).unwrap().tags, &["first"]);
    assert!(!registry.storage().contains(2024, 2));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<aoc_solver::SolverRegistry>();
}
