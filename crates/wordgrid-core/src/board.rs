//! Game board representation.
//!
//! This module contains:
//! - The 15x15 cell grid and its premium layout
//! - Read-only queries used by validation, scoring and presentation
//! - `TilePlacement`, a resolved tile bound to a cell
//!
//! The board exposes no public mutator. Tiles land on it only through the turn
//! engine's commit path.

use crate::coord::{Axis, Coord, BOARD_SIZE};
use crate::premium::{Premium, PremiumLayout};
use crate::tile::PlacedTile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile bound to the cell it is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    pub coord: Coord,
    pub tile: PlacedTile,
}

impl TilePlacement {
    pub fn new(coord: Coord, tile: PlacedTile) -> Self {
        Self { coord, tile }
    }
}

/// The complete game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<PlacedTile>; BOARD_SIZE]; BOARD_SIZE],
    layout: PremiumLayout,
}

impl Board {
    /// Create an empty board with the given premium layout
    pub fn new(layout: PremiumLayout) -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            layout,
        }
    }

    /// Create an empty board with the standard layout
    pub fn standard() -> Self {
        Self::new(PremiumLayout::standard())
    }

    /// Whether the cell is on the board and holds no tile
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.cell(Coord::new(row, col)), Some(None))
    }

    /// Letter at a cell, if any
    pub fn letter_at(&self, row: usize, col: usize) -> Option<char> {
        self.tile_at(Coord::new(row, col)).map(|t| t.letter)
    }

    /// Premium kind of a cell (fixed at construction)
    pub fn premium_kind(&self, row: usize, col: usize) -> Premium {
        self.layout.get(Coord::new(row, col))
    }

    pub fn tile_at(&self, coord: Coord) -> Option<PlacedTile> {
        self.cell(coord).flatten()
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tile_at(coord).is_some()
    }

    pub fn premium_at(&self, coord: Coord) -> Premium {
        self.layout.get(coord)
    }

    pub fn layout(&self) -> &PremiumLayout {
        &self.layout
    }

    /// True when no tile has been placed yet
    pub fn is_blank_board(&self) -> bool {
        self.occupied_count() == 0
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Whether any orthogonal neighbor of `coord` holds a tile
    pub fn has_occupied_neighbor(&self, coord: Coord) -> bool {
        coord.neighbors().iter().any(|&n| self.is_occupied(n))
    }

    /// Row-major letter grid for presentation layers
    pub fn grid(&self) -> Vec<Vec<Option<char>>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.map(|t| t.letter)).collect())
            .collect()
    }

    /// A copy of this board with extra tiles laid down.
    ///
    /// Off-board placements are skipped; callers validate coordinates first.
    pub fn with_placements(&self, placements: &[TilePlacement]) -> Board {
        let mut next = self.clone();
        for p in placements {
            next.place(p.coord, p.tile);
        }
        next
    }

    /// Contiguous occupied run through `coord` along `axis`, in order.
    ///
    /// Returns just `[coord]` when no neighbor on the axis is occupied.
    pub fn run_through(&self, coord: Coord, axis: Axis) -> Vec<Coord> {
        let mut start = coord;
        while let Some(prev) = start.step(axis.backward()) {
            if !self.is_occupied(prev) {
                break;
            }
            start = prev;
        }

        let mut run = vec![start];
        let mut cursor = start;
        while let Some(next) = cursor.step(axis.forward()) {
            if !self.is_occupied(next) {
                break;
            }
            run.push(next);
            cursor = next;
        }
        run
    }

    /// Letters along a run of cells; empty cells are skipped
    pub fn word_at(&self, cells: &[Coord]) -> String {
        cells
            .iter()
            .filter_map(|&c| self.tile_at(c))
            .map(|t| t.letter)
            .collect()
    }

    pub(crate) fn place(&mut self, coord: Coord, tile: PlacedTile) {
        if let Some(cell) = self
            .cells
            .get_mut(coord.row)
            .and_then(|row| row.get_mut(coord.col))
        {
            *cell = Some(tile);
        }
    }

    fn cell(&self, coord: Coord) -> Option<Option<PlacedTile>> {
        self.cells
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text rendering: letters in place, blanks in lowercase, premium symbols elsewhere
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| {
                    let coord = Coord::new(row, col);
                    match self.tile_at(coord) {
                        Some(t) if t.blank => t.letter.to_ascii_lowercase(),
                        Some(t) => t.letter,
                        None => self.layout.get(coord).symbol(),
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
