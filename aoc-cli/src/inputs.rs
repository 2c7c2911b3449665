//! Puzzle inputs read from a local directory tree

use crate::error::InputError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Read-only view over puzzle input files
///
/// Directory structure: `{root}/{year}/day{day:02}.txt`. An explicit override
/// file, when set, replaces the tree lookup for one year/day.
pub struct InputStore {
    root: PathBuf,
    single: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root, single: None }
    }

    /// Serve `path` for `year`/`day` instead of the tree file
    pub fn with_override(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.single = Some((year, day, path));
        self
    }

    /// Where the input for year/day is expected
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match &self.single {
            Some((y, d, path)) if *y == year && *d == day => path.clone(),
            _ => self
                .root
                .join(year.to_string())
                .join(format!("day{day:02}.txt")),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the input for year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        match fs::read_to_string(&path) {
            Ok(input) => Ok(input),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(InputError::NotFound { year, day, path })
            }
            Err(source) => Err(InputError::Read { path, source }),
        }
    }
}
