use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 3, tags = ["macro-test", "lines"])]
pub struct LineCounter;

impl AocParser for LineCounter {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for LineCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

#[test]
fn test_plugin_is_collected_with_tags() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    let info = registry.storage().get_info(2015, 3).unwrap();
    assert_eq!(info.parts, 1);
    assert_eq!(info.tags, &["macro-test", "lines"]);
    assert_eq!(registry.storage().len(), 1);
}

#[test]
fn test_registered_plugin_solves() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2015 && plugin.day == 3)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2015, 3, "a\nb\nc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}
