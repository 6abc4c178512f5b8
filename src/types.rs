// Core board types shared by the parser, the search and the selector

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column position on the grid
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Neighbour one step away in `dir`, or None if it falls off a
    /// `height` x `width` grid
    pub fn step(&self, dir: Direction, height: usize, width: usize) -> Option<Cell> {
        let (dr, dc) = dir.offset();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row >= height as isize || col >= width as isize {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }

    /// Direction that moves `self` onto an adjacent `other`
    pub fn direction_to(&self, other: &Cell) -> Option<Direction> {
        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        Direction::all()
            .iter()
            .find(|dir| dir.offset() == (dr, dc))
            .copied()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four moves a snake head can make. The discriminant is the code
/// printed on stdout.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// Returns all directions in code order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }

    /// Order in which neighbours are expanded during search and probed by
    /// the open-cell fallback
    pub fn neighbour_order() -> [Direction; 4] {
        [Direction::Right, Direction::Left, Direction::Up, Direction::Down]
    }

    /// Integer code written to stdout
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Converts direction to its lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }

    /// (row, col) delta; rows grow downwards
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Parses a direction name or its numeric code, case-insensitively
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "up" | "0" => Ok(Direction::Up),
            "right" | "1" => Ok(Direction::Right),
            "down" | "2" => Ok(Direction::Down),
            "left" | "3" => Ok(Direction::Left),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
