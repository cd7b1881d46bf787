//! Premium-square layout.
//!
//! Each cell carries a `Premium` tag. The built-in table is the standard 15x15
//! arrangement; a replacement can be parsed from a text grid where each row is
//! one line and each cell one symbol:
//!
//! | symbol | premium       |
//! |--------|---------------|
//! | `.`    | none          |
//! | `d`    | double letter |
//! | `t`    | triple letter |
//! | `D`    | double word   |
//! | `T`    | triple word   |
//! | `*`    | start         |

use crate::coord::{Coord, BOARD_SIZE, CENTER};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const STANDARD_ROWS: [&str; BOARD_SIZE] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...*...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// Bonus kind of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Premium {
    #[default]
    Normal,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// The center anchor; scores as a double word
    Start,
}

impl Premium {
    /// Multiplier applied to a newly placed tile's value
    pub fn letter_multiplier(&self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to a word containing a newly placed tile here
    pub fn word_multiplier(&self) -> u32 {
        match self {
            Premium::DoubleWord | Premium::Start => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Premium::Normal => '.',
            Premium::DoubleLetter => 'd',
            Premium::TripleLetter => 't',
            Premium::DoubleWord => 'D',
            Premium::TripleWord => 'T',
            Premium::Start => '*',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Premium::Normal),
            'd' => Some(Premium::DoubleLetter),
            't' => Some(Premium::TripleLetter),
            'D' => Some(Premium::DoubleWord),
            'T' => Some(Premium::TripleWord),
            '*' => Some(Premium::Start),
            _ => None,
        }
    }
}

/// Problems found in a layout override
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout must have 15 rows, found {0}")]
    WrongRowCount(usize),

    #[error("layout row {row} must have 15 cells, found {len}")]
    WrongRowLength { row: usize, len: usize },

    #[error("unknown premium symbol '{symbol}' at {coord}")]
    UnknownSymbol { symbol: char, coord: Coord },

    #[error("layout must have exactly one start square, at the center")]
    StartNotAtCenter,

    #[error("layout is not symmetric at {0}")]
    Asymmetric(Coord),
}

/// Fixed table mapping every cell to its premium kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumLayout {
    cells: [[Premium; BOARD_SIZE]; BOARD_SIZE],
}

impl PremiumLayout {
    /// The standard 15x15 layout
    pub fn standard() -> Self {
        let mut cells = [[Premium::Normal; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in STANDARD_ROWS.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = Premium::from_symbol(symbol).unwrap_or_default();
            }
        }
        Self { cells }
    }

    /// Parse a text grid. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(LayoutError::WrongRowCount(rows.len()));
        }

        let mut cells = [[Premium::Normal; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != BOARD_SIZE {
                return Err(LayoutError::WrongRowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                cells[row][col] =
                    Premium::from_symbol(symbol).ok_or(LayoutError::UnknownSymbol {
                        symbol,
                        coord: Coord::new(row, col),
                    })?;
            }
        }

        let layout = Self { cells };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the start square and the board's reflection symmetries
    pub fn validate(&self) -> Result<(), LayoutError> {
        let starts: Vec<Coord> = Coord::all()
            .filter(|&c| self.get(c) == Premium::Start)
            .collect();
        if starts != [CENTER] {
            return Err(LayoutError::StartNotAtCenter);
        }

        let last = BOARD_SIZE - 1;
        for coord in Coord::all() {
            let premium = self.get(coord);
            let mirrors = [
                coord.transposed(),
                Coord::new(coord.row, last - coord.col),
                Coord::new(last - coord.row, coord.col),
            ];
            if mirrors.iter().any(|&m| self.get(m) != premium) {
                return Err(LayoutError::Asymmetric(coord));
            }
        }
        Ok(())
    }

    /// Premium at a cell; off-board cells are `Normal`
    pub fn get(&self, coord: Coord) -> Premium {
        self.cells
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
            .unwrap_or_default()
    }

    /// Render back to the text grid form
    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(Premium::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for PremiumLayout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_is_valid() {
        assert_eq!(PremiumLayout::standard().validate(), Ok(()));
    }

    #[test]
    fn test_standard_premium_counts() {
        let layout = PremiumLayout::standard();
        let count = |p: Premium| Coord::all().filter(|&c| layout.get(c) == p).count();
        assert_eq!(count(Premium::TripleWord), 8);
        assert_eq!(count(Premium::DoubleWord), 16);
        assert_eq!(count(Premium::TripleLetter), 12);
        assert_eq!(count(Premium::DoubleLetter), 24);
        assert_eq!(count(Premium::Start), 1);
    }

    #[test]
    fn test_canonical_positions() {
        let layout = PremiumLayout::standard();
        assert_eq!(layout.get(Coord::new(0, 0)), Premium::TripleWord);
        assert_eq!(layout.get(Coord::new(1, 1)), Premium::DoubleWord);
        assert_eq!(layout.get(Coord::new(1, 5)), Premium::TripleLetter);
        assert_eq!(layout.get(Coord::new(0, 3)), Premium::DoubleLetter);
        assert_eq!(layout.get(CENTER), Premium::Start);
        assert_eq!(layout.get(Coord::new(7, 8)), Premium::Normal);
    }

    #[test]
    fn test_parse_round_trips_text() {
        let text = PremiumLayout::standard().to_text();
        assert_eq!(PremiumLayout::parse(&text), Ok(PremiumLayout::standard()));
    }

    #[test]
    fn test_parse_rejects_asymmetric_layout() {
        let mut rows: Vec<String> = STANDARD_ROWS.iter().map(|r| r.to_string()).collect();
        rows[0] = "T..d...T...d...".to_string();
        let err = PremiumLayout::parse(&rows.join("\n")).unwrap_err();
        assert!(matches!(err, LayoutError::Asymmetric(_)));
    }

    #[test]
    fn test_parse_rejects_missing_start() {
        let text = STANDARD_ROWS.join("\n").replace('*', ".");
        assert_eq!(
            PremiumLayout::parse(&text),
            Err(LayoutError::StartNotAtCenter)
        );
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert_eq!(
            PremiumLayout::parse("T..\n..."),
            Err(LayoutError::WrongRowCount(2))
        );
        let mut rows: Vec<String> = STANDARD_ROWS.iter().map(|r| r.to_string()).collect();
        rows[3].push('.');
        assert_eq!(
            PremiumLayout::parse(&rows.join("\n")),
            Err(LayoutError::WrongRowLength { row: 3, len: 16 })
        );
        rows[3] = STANDARD_ROWS[3].replace('d', "x");
        assert!(matches!(
            PremiumLayout::parse(&rows.join("\n")),
            Err(LayoutError::UnknownSymbol { symbol: 'x', .. })
        ));
    }
}
