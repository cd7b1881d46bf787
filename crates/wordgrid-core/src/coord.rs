//! Square-grid coordinates for the 15x15 board.
//!
//! This module provides the addressing types used everywhere else:
//! - `Coord`: a (row, col) cell
//! - `Direction`: the four orthogonal neighbors
//! - `Axis`: horizontal or vertical lines of play
//!
//! Rows grow downward and columns grow rightward, with (0, 0) at the top-left.

use serde::{Deserialize, Serialize};

/// Width and height of the board
pub const BOARD_SIZE: usize = 15;

/// The mandatory first-move anchor
pub const CENTER: Coord = Coord::new(7, 7);

/// Orthogonal step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, clockwise from Up
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// A line of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row (column varies)
    Horizontal,
    /// Along a column (row varies)
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    pub fn perpendicular(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Direction of increasing position along this axis
    pub fn forward(&self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Right,
            Axis::Vertical => Direction::Down,
        }
    }

    pub fn backward(&self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Left,
            Axis::Vertical => Direction::Up,
        }
    }

    /// The coordinate component that varies along this axis
    pub fn position(&self, coord: Coord) -> usize {
        match self {
            Axis::Horizontal => coord.col,
            Axis::Vertical => coord.row,
        }
    }

    /// The coordinate component that stays fixed along this axis
    pub fn line(&self, coord: Coord) -> usize {
        match self {
            Axis::Horizontal => coord.row,
            Axis::Vertical => coord.col,
        }
    }

    /// Build a coordinate from a line index and a position along it
    pub fn at(&self, line: usize, position: usize) -> Coord {
        match self {
            Axis::Horizontal => Coord::new(line, position),
            Axis::Vertical => Coord::new(position, line),
        }
    }
}

/// A cell on the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The neighboring cell in a direction, if it is on the board
    pub fn step(&self, direction: Direction) -> Option<Coord> {
        let next = match direction {
            Direction::Up => Coord::new(self.row.checked_sub(1)?, self.col),
            Direction::Down => Coord::new(self.row + 1, self.col),
            Direction::Left => Coord::new(self.row, self.col.checked_sub(1)?),
            Direction::Right => Coord::new(self.row, self.col + 1),
        };
        next.is_on_board().then_some(next)
    }

    /// All on-board orthogonal neighbors
    pub fn neighbors(&self) -> Vec<Coord> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.step(d))
            .collect()
    }

    /// Mirror image across the board's main diagonal
    pub fn transposed(&self) -> Coord {
        Coord::new(self.col, self.row)
    }

    /// Every cell on the board in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
