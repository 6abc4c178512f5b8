// Board snapshot parsing and cell classification
//
// Input is a flat stream of whitespace-separated integers:
//   height width own_body_code own_head_code
//   followed by height*width cell codes in row-major order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Cell;

pub const EMPTY: i32 = 0;
pub const APPLE: i32 = 1;

/// What a single cell code means from our snake's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Apple,
    OwnHead,
    OwnBody,
    OpponentHead,
    OpponentBody,
    /// Negative codes. Passable, never counted as a snake.
    Unknown,
}

impl CellKind {
    pub fn is_opponent(&self) -> bool {
        matches!(self, CellKind::OpponentHead | CellKind::OpponentBody)
    }
}

/// Errors produced while reading a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingHeader(&'static str),
    InvalidToken { position: usize, token: String },
    InvalidDimensions { height: i32, width: i32 },
    MissingCells { expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::MissingHeader(field) => write!(f, "input ended before {}", field),
            ParseError::InvalidToken { position, token } => {
                write!(f, "token {} ('{}') is not a 32-bit integer", position, token)
            }
            ParseError::InvalidDimensions { height, width } => {
                write!(f, "grid dimensions {}x{} are not positive", height, width)
            }
            ParseError::MissingCells { expected, found } => {
                write!(f, "expected {} cells, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A single board snapshot as handed to the selector
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub height: usize,
    pub width: usize,
    pub body_code: i32,
    pub head_code: i32,
    /// Row-major, `height * width` entries
    pub cells: Vec<i32>,
}

impl Snapshot {
    /// Builds a snapshot from rows. Panics if rows are ragged; meant for
    /// callers that construct boards in code.
    pub fn from_rows(body_code: i32, head_code: i32, rows: &[Vec<i32>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == width), "ragged rows");
        Snapshot {
            height,
            width,
            body_code,
            head_code,
            cells: rows.concat(),
        }
    }

    /// Parses the stdin text format
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = input.split_whitespace().enumerate().map(|(position, token)| {
            token.parse::<i32>().map_err(|_| ParseError::InvalidToken {
                position,
                token: token.to_string(),
            })
        });

        let mut header = |field: &'static str| -> Result<i32, ParseError> {
            tokens.next().ok_or(ParseError::MissingHeader(field))?
        };

        let height = header("height")?;
        let width = header("width")?;
        let body_code = header("own body code")?;
        let head_code = header("own head code")?;

        if height <= 0 || width <= 0 {
            return Err(ParseError::InvalidDimensions { height, width });
        }

        let expected = (height as usize)
            .checked_mul(width as usize)
            .ok_or(ParseError::InvalidDimensions { height, width })?;
        // Never reserve more than the input could possibly hold
        let mut cells = Vec::with_capacity(expected.min(input.len()));
        for token in tokens.by_ref().take(expected) {
            cells.push(token?);
        }

        if cells.len() < expected {
            return Err(ParseError::MissingCells {
                expected,
                found: cells.len(),
            });
        }

        Ok(Snapshot {
            height: height as usize,
            width: width as usize,
            body_code,
            head_code,
            cells,
        })
    }

    /// False for snapshots whose cell count disagrees with their dimensions,
    /// which can only come from hand-edited logs
    pub fn is_consistent(&self) -> bool {
        self.width > 0 && self.height.checked_mul(self.width) == Some(self.cells.len())
    }

    /// Raw code at `cell`. The cell must be inside the grid.
    pub fn code(&self, cell: Cell) -> i32 {
        self.cells[cell.row * self.width + cell.col]
    }

    /// Last row-major cell carrying our head code
    pub fn head(&self) -> Option<Cell> {
        self.cells
            .iter()
            .rposition(|&code| code == self.head_code)
            .map(|idx| Cell::new(idx / self.width, idx % self.width))
    }

    pub fn classify(&self, code: i32) -> CellKind {
        match code {
            EMPTY => CellKind::Empty,
            APPLE => CellKind::Apple,
            c if c == self.head_code => CellKind::OwnHead,
            c if c == self.body_code => CellKind::OwnBody,
            c if c < 0 => CellKind::Unknown,
            c if c % 2 == 1 => CellKind::OpponentHead,
            _ => CellKind::OpponentBody,
        }
    }

    pub fn kind(&self, cell: Cell) -> CellKind {
        self.classify(self.code(cell))
    }

    /// Empty cells and apples can be entered
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.code(cell) <= APPLE
    }

    pub fn is_apple(&self, cell: Cell) -> bool {
        self.code(cell) == APPLE
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.code(cell) == EMPTY
    }

    pub fn apple_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == APPLE).count()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.height, self.width)?;
        writeln!(f, "{} {}", self.body_code, self.head_code)?;
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
