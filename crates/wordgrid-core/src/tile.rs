//! Letter tiles and the static letter-value table.
//!
//! This module contains:
//! - `Tile`, a rack/bag tile (a letter or a blank)
//! - `PlacedTile`, a tile as it sits on the board (blanks carry their assumed letter)
//! - The standard 100-tile distribution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbol used for a blank tile in text and JSON forms
pub const BLANK_SYMBOL: char = '?';

/// Number of distinct tile kinds (26 letters + blank)
pub const TILE_KINDS: usize = 27;

/// Standard tile counts, A through Z, followed by the blank
const STANDARD_COUNTS: [u32; TILE_KINDS] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1, 2,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not a tile symbol")]
pub struct InvalidTileSymbol(pub char);

/// A tile in a rack or in the bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Tile {
    /// An uppercase letter A-Z
    Letter(char),
    /// Wildcard, assumes any letter when placed
    Blank,
}

impl Tile {
    /// Build a letter tile, normalizing case. Returns `None` for anything outside A-Z.
    pub fn letter(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Tile::Letter(upper))
    }

    /// Point value of this tile
    pub fn value(&self) -> u32 {
        match self {
            Tile::Letter(c) => letter_value(*c),
            Tile::Blank => 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank)
    }

    /// Display symbol: the letter, or `?` for a blank
    pub fn symbol(&self) -> char {
        match self {
            Tile::Letter(c) => *c,
            Tile::Blank => BLANK_SYMBOL,
        }
    }

    /// Dense index used by the bag's count table. `None` for a letter outside A-Z.
    pub(crate) fn index(&self) -> Option<usize> {
        match self {
            Tile::Letter(c) if c.is_ascii_uppercase() => Some((*c as u8 - b'A') as usize),
            Tile::Letter(_) => None,
            Tile::Blank => Some(TILE_KINDS - 1),
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        if index >= TILE_KINDS - 1 {
            Tile::Blank
        } else {
            Tile::Letter((b'A' + index as u8) as char)
        }
    }

    /// The standard distribution as (tile, count) pairs
    pub fn standard_distribution() -> Vec<(Tile, u32)> {
        STANDARD_COUNTS
            .iter()
            .enumerate()
            .map(|(i, &count)| (Tile::from_index(i), count))
            .collect()
    }
}

impl From<Tile> for char {
    fn from(tile: Tile) -> char {
        tile.symbol()
    }
}

impl TryFrom<char> for Tile {
    type Error = InvalidTileSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c == BLANK_SYMBOL {
            return Ok(Tile::Blank);
        }
        Tile::letter(c).ok_or(InvalidTileSymbol(c))
    }
}

/// Base point value of a letter. Non-letters score 0.
pub fn letter_value(c: char) -> u32 {
    match c.to_ascii_uppercase() {
        'A' | 'E' | 'I' | 'O' | 'U' | 'L' | 'N' | 'S' | 'T' | 'R' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => 0,
    }
}

/// A tile sitting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    /// The letter shown on the board (a blank's assumed letter)
    pub letter: char,
    /// Whether a blank tile was spent for this letter
    pub blank: bool,
}

impl PlacedTile {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            blank: false,
        }
    }

    pub fn blank(letter: char) -> Self {
        Self {
            letter,
            blank: true,
        }
    }

    /// Scoring value; blanks are always worth 0
    pub fn value(&self) -> u32 {
        if self.blank {
            0
        } else {
            letter_value(self.letter)
        }
    }

    /// The rack tile this placement consumed
    pub fn source_tile(&self) -> Tile {
        if self.blank {
            Tile::Blank
        } else {
            Tile::Letter(self.letter)
        }
    }
}
