//! Move legality and word extraction.
//!
//! `MoveValidator` runs the structural checks (shape, anchor, adjacency), then
//! the rack check, then extracts every formed word from the post-placement
//! board and asks the lexicon about each one. The first failing check decides
//! the rejection reason.

use crate::board::{Board, TilePlacement};
use crate::coord::{Axis, Coord, CENTER};
use crate::game::{GameError, Rejection};
use crate::lexicon::Lexicon;
use crate::player::take_tile;
use crate::tile::{PlacedTile, Tile, BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One tile a player proposes to put down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    /// Spend a blank for this letter
    #[serde(default)]
    pub blank: bool,
}

impl Placement {
    pub fn new(row: usize, col: usize, letter: char) -> Self {
        Self {
            row,
            col,
            letter,
            blank: false,
        }
    }

    pub fn blank(row: usize, col: usize, letter: char) -> Self {
        Self {
            row,
            col,
            letter,
            blank: true,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// A run of two or more letters formed by a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormedWord {
    pub text: String,
    pub cells: Vec<Coord>,
    pub axis: Axis,
}

/// An accepted move, ready to score and commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedMove {
    /// Tiles to lay down, with blanks resolved
    pub tiles: Vec<TilePlacement>,
    /// Main word first, then cross words in placement order
    pub words: Vec<FormedWord>,
    /// Axis of the main word
    pub axis: Axis,
}

impl ValidatedMove {
    /// Rack tiles this move consumes
    pub fn rack_tiles(&self) -> Vec<Tile> {
        self.tiles.iter().map(|p| p.tile.source_tile()).collect()
    }
}

/// Checks a proposed placement against the current board and rack
pub struct MoveValidator<'a> {
    board: &'a Board,
    rack: &'a [Tile],
    first_move_done: bool,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board, rack: &'a [Tile], first_move_done: bool) -> Self {
        Self {
            board,
            rack,
            first_move_done,
        }
    }

    /// Validate a placement.
    ///
    /// Recoverable failures come back as `GameError::Rejected`; an unloaded
    /// lexicon comes back as `GameError::Lexicon`.
    pub fn validate(
        &self,
        placements: &[Placement],
        lexicon: &Lexicon,
    ) -> Result<ValidatedMove, GameError> {
        let validated = self.check_structure(placements)?;

        for word in &validated.words {
            if !lexicon.is_valid(&word.text)? {
                return Err(Rejection::InvalidWord(word.text.clone()).into());
            }
        }
        Ok(validated)
    }

    /// Every check except the dictionary lookup
    pub fn check_structure(&self, placements: &[Placement]) -> Result<ValidatedMove, Rejection> {
        self.check_cells(placements)?;
        let axis = self.check_line(placements)?;
        self.check_anchor(placements)?;
        let tiles = self.resolve_rack_tiles(placements)?;

        let after = self.board.with_placements(&tiles);
        let new_cells: Vec<Coord> = tiles.iter().map(|p| p.coord).collect();
        let words = extract_words(&after, &new_cells, axis);
        if words.is_empty() {
            return Err(Rejection::WordTooShort);
        }

        Ok(ValidatedMove { tiles, words, axis })
    }

    /// Rule 1: non-empty, on the board, distinct, lettered, and onto empty cells
    fn check_cells(&self, placements: &[Placement]) -> Result<(), Rejection> {
        if placements.is_empty() {
            return Err(Rejection::EmptyPlacement);
        }

        let mut seen = HashSet::new();
        for p in placements {
            let coord = p.coord();
            if !coord.is_on_board() {
                return Err(Rejection::OutOfBounds(coord));
            }
            if !seen.insert(coord) {
                return Err(Rejection::DuplicateCell(coord));
            }
            if Tile::letter(p.letter).is_none() {
                return Err(Rejection::InvalidLetter(p.letter));
            }
            if !self.board.is_empty(p.row, p.col) {
                return Err(Rejection::CellOccupied(coord));
            }
        }
        Ok(())
    }

    /// Rule 2: one row or one column, with no gaps once existing letters fill in
    fn check_line(&self, placements: &[Placement]) -> Result<Axis, Rejection> {
        let first = placements[0].coord();
        let same_row = placements.iter().all(|p| p.row == first.row);
        let same_col = placements.iter().all(|p| p.col == first.col);

        let axis = match (same_row, same_col) {
            // Single tile: the main word runs whichever way the board extends it
            (true, true) => {
                if joins_run(self.board, first, Axis::Horizontal) {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                }
            }
            (true, false) => Axis::Horizontal,
            (false, true) => Axis::Vertical,
            (false, false) => return Err(Rejection::NotInLine),
        };

        let positions: HashSet<usize> = placements
            .iter()
            .map(|p| axis.position(p.coord()))
            .collect();
        let line = axis.line(first);
        let (lo, hi) = positions
            .iter()
            .fold((usize::MAX, 0), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        let gap = (lo..=hi).any(|pos| {
            !positions.contains(&pos) && !self.board.is_occupied(axis.at(line, pos))
        });
        if gap {
            return Err(Rejection::NotContiguous);
        }
        Ok(axis)
    }

    /// Rules 3 and 4: cover the center on the first move, touch a letter after
    fn check_anchor(&self, placements: &[Placement]) -> Result<(), Rejection> {
        if !self.first_move_done {
            if placements.iter().any(|p| p.coord() == CENTER) {
                return Ok(());
            }
            return Err(Rejection::MustCoverCenter);
        }

        let touches = placements
            .iter()
            .any(|p| self.board.has_occupied_neighbor(p.coord()));
        if touches {
            Ok(())
        } else {
            Err(Rejection::NotAdjacent)
        }
    }

    /// Rule 5: match letters to rack tiles.
    ///
    /// Explicit blank requests take a blank first, then plain letters take
    /// matching tiles, then any letter still uncovered takes a spare blank.
    fn resolve_rack_tiles(&self, placements: &[Placement]) -> Result<Vec<TilePlacement>, Rejection> {
        let mut pool: Vec<Tile> = self.rack.to_vec();
        let mut resolved: Vec<Option<PlacedTile>> = vec![None; placements.len()];
        let mut missing = Vec::new();

        for (i, p) in placements.iter().enumerate() {
            if p.blank {
                if !take_tile(&mut pool, Tile::Blank) {
                    missing.push(BLANK_SYMBOL);
                    continue;
                }
                resolved[i] = Some(PlacedTile::blank(p.letter.to_ascii_uppercase()));
            }
        }

        for (i, p) in placements.iter().enumerate() {
            if p.blank {
                continue;
            }
            let letter = p.letter.to_ascii_uppercase();
            if take_tile(&mut pool, Tile::Letter(letter)) {
                resolved[i] = Some(PlacedTile::new(letter));
            }
        }

        // Later placements get the spare blanks first
        for (i, p) in placements.iter().enumerate().rev() {
            if resolved[i].is_some() || p.blank {
                continue;
            }
            let letter = p.letter.to_ascii_uppercase();
            if take_tile(&mut pool, Tile::Blank) {
                resolved[i] = Some(PlacedTile::blank(letter));
            } else {
                missing.push(letter);
            }
        }

        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(Rejection::TilesNotInRack { missing });
        }

        Ok(placements
            .iter()
            .zip(resolved)
            .filter_map(|(p, tile)| tile.map(|t| TilePlacement::new(p.coord(), t)))
            .collect())
    }
}

/// Every word of two or more letters that contains a newly placed cell.
///
/// `board` is the post-placement board. The main word along `axis` comes
/// first, then one cross word per new cell that forms one.
pub fn extract_words(board: &Board, new_cells: &[Coord], axis: Axis) -> Vec<FormedWord> {
    let mut words = Vec::new();
    let Some(&first) = new_cells.first() else {
        return words;
    };

    let mut push_run = |cells: Vec<Coord>, axis: Axis| {
        if cells.len() >= 2 {
            words.push(FormedWord {
                text: board.word_at(&cells),
                cells,
                axis,
            });
        }
    };

    push_run(board.run_through(first, axis), axis);
    let cross = axis.perpendicular();
    for &cell in new_cells {
        push_run(board.run_through(cell, cross), cross);
    }
    words
}

/// Whether a tile at `coord` would join an existing letter along `axis`
fn joins_run(board: &Board, coord: Coord, axis: Axis) -> bool {
    [axis.backward(), axis.forward()]
        .iter()
        .filter_map(|&d| coord.step(d))
        .any(|n| board.is_occupied(n))
}
