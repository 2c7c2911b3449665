//! Rectangular character grids and integer 2D points
//!
//! `x` grows to the right and `y` grows downwards, matching the row/column
//! layout of puzzle input text.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

use aoc_solver::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in `Direction::ALL` order.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        Direction::ALL.into_iter().map(move |d| self + d.delta())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// All eight unit offsets, orthogonal and diagonal.
pub const EIGHT_NEIGHBORS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise, starting from `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub const fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Position in `ALL`, handy for per-direction state arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses `^`, `>`, `v` and `<`.
    pub fn from_arrow(c: char) -> Option<Self> {
        match c {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Builds a grid from text, converting each character with `f`.
    ///
    /// Fails on empty input, ragged rows, or when `f` rejects a character.
    pub fn parse_with<F, E>(input: &str, mut f: F) -> Result<Self, ParseError>
    where
        F: FnMut(Point, char) -> Result<T, E>,
        E: fmt::Display,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (y, line) in input.trim_start_matches(['\n', '\r']).trim_end().lines().enumerate() {
            let line = line.trim_end();
            let row_width = line.chars().count();
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected {w} columns, found {row_width}",
                        y + 1
                    )));
                }
                Some(_) => {}
            }
            for (x, c) in line.chars().enumerate() {
                let cell = f(Point::new(x as i32, y as i32), c).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}, column {}) {e}", y + 1, x + 1))
                })?;
                cells.push(cell);
            }
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                width,
                height,
                cells,
            }),
            _ => Err(ParseError::MissingData("empty grid".to_string())),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Row-major offset of `p`, if inside the grid.
    pub fn offset(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    pub fn point_at(&self, offset: usize) -> Point {
        Point::new((offset % self.width) as i32, (offset / self.width) as i32)
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.offset(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.offset(p).map(|i| &mut self.cells[i])
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Point::new((i % width) as i32, (i / width) as i32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point> {
        self.cells.iter().position(|c| pred(c)).map(|i| self.point_at(i))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Orthogonal neighbours of `p` that lie inside the grid.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors().filter(|&n| self.contains(n))
    }
}

impl Grid<char> {
    pub fn parse_chars(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, |_, c| Ok::<_, std::convert::Infallible>(c))
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        match self.offset(p) {
            Some(i) => &self.cells[i],
            None => panic!("point {p} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        match self.offset(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("point {p} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for c in row {
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chars_reads_dimensions() {
        let grid = Grid::parse_chars("ab\ncd\nef\n").unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid[Point::new(1, 2)], 'f');
        assert_eq!(grid.get(Point::new(2, 0)), None);
        assert_eq!(grid.get(Point::new(-1, 0)), None);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse_chars("abc\nab").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(
            Grid::parse_chars("\n\n"),
            Err(ParseError::MissingData(_))
        ));
    }

    #[test]
    fn parse_with_reports_position() {
        let err = Grid::parse_with("12\n3x", |_, c| c.to_digit(10).ok_or("not a digit"))
            .unwrap_err();
        assert!(err.to_string().contains("(line 2, column 2) not a digit"));
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let grid = Grid::new(3, 3, 0u8);
        assert_eq!(grid.neighbors(Point::ORIGIN).count(), 2);
        assert_eq!(grid.neighbors(Point::new(1, 1)).count(), 4);
    }

    #[test]
    fn directions_turn_consistently() {
        for d in Direction::ALL {
            assert_eq!(d.turn_right().turn_left(), d);
            assert_eq!(d.delta() + d.opposite().delta(), Point::ORIGIN);
            assert_eq!(Direction::ALL[d.index()], d);
        }
    }

    #[test]
    fn find_and_display_roundtrip() {
        let text = "#.\n.S\n";
        let grid = Grid::parse_chars(text).unwrap();
        assert_eq!(grid.find(|&c| c == 'S'), Some(Point::new(1, 1)));
        assert_eq!(grid.to_string(), text);
    }
}
