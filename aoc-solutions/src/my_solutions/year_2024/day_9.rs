use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 9, tags = ["2024", "simulation"])]
pub struct Solver;

/// Disk map digits: file length, free length, file length, ...
pub type DiskMap = Vec<u8>;

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    len: usize,
}

fn layout(map: &[u8]) -> (Vec<Span>, Vec<Span>) {
    let mut files = Vec::new();
    let mut free = Vec::new();
    let mut position = 0;
    for (i, &len) in map.iter().enumerate() {
        let span = Span {
            start: position,
            len: len as usize,
        };
        if i % 2 == 0 {
            files.push(span);
        } else if len > 0 {
            free.push(span);
        }
        position += len as usize;
    }
    (files, free)
}

fn checksum(files: &[Span]) -> u64 {
    files
        .iter()
        .enumerate()
        .map(|(id, f)| (f.start..f.start + f.len).sum::<usize>() as u64 * id as u64)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = DiskMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .chars()
            .enumerate()
            .map(|(i, c)| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(column {}) `{c}` is not a digit", i + 1))
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut blocks: Vec<Option<usize>> = shared
            .iter()
            .enumerate()
            .flat_map(|(i, &len)| {
                let id = (i % 2 == 0).then_some(i / 2);
                std::iter::repeat_n(id, len as usize)
            })
            .collect();

        let (mut left, mut right) = (0, blocks.len());
        loop {
            while left < right && blocks[left].is_some() {
                left += 1;
            }
            while right > left && blocks[right - 1].is_none() {
                right -= 1;
            }
            if left + 1 >= right {
                break;
            }
            blocks.swap(left, right - 1);
        }

        let sum: u64 = blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| id.map(|id| (pos * id) as u64))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (mut files, mut free) = layout(shared);

        for file in files.iter_mut().rev() {
            let target = free
                .iter_mut()
                .take_while(|gap| gap.start < file.start)
                .find(|gap| gap.len >= file.len);
            if let Some(gap) = target {
                file.start = gap.start;
                gap.start += file.len;
                gap.len -= file.len;
            }
        }

        Ok(checksum(&files).to_string())
    }
}
