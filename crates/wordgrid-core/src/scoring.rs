//! Move scoring.
//!
//! Scoring is a pure function of the formed words, the newly placed tiles and
//! the post-placement board. Premium squares only count under new tiles.

use crate::board::{Board, TilePlacement};
use crate::coord::Coord;
use crate::player::RACK_SIZE;
use crate::tile::Tile;
use crate::validator::FormedWord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Bonus for playing a full rack in one move
pub const BINGO_BONUS: u32 = 50;

/// Points earned by one formed word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub points: u32,
}

/// Full breakdown of a move's points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MoveScore {
    pub words: Vec<WordScore>,
    pub bingo_bonus: u32,
    pub total: u32,
}

impl MoveScore {
    pub fn is_bingo(&self) -> bool {
        self.bingo_bonus > 0
    }
}

/// Score a validated move.
///
/// Each word sums its letter values, with letter premiums applied to new
/// tiles only, then is multiplied by the highest word premium among its new
/// tiles. Words sharing a new tile are each scored in full.
pub fn score_move(words: &[FormedWord], placed: &[TilePlacement], board: &Board) -> MoveScore {
    let new_cells: HashSet<Coord> = placed.iter().map(|p| p.coord).collect();

    let words: Vec<WordScore> = words
        .iter()
        .map(|w| WordScore {
            word: w.text.clone(),
            points: score_word(w, &new_cells, board),
        })
        .collect();

    let bingo_bonus = if placed.len() >= RACK_SIZE {
        BINGO_BONUS
    } else {
        0
    };
    let total = words.iter().map(|w| w.points).sum::<u32>() + bingo_bonus;

    MoveScore {
        words,
        bingo_bonus,
        total,
    }
}

fn score_word(word: &FormedWord, new_cells: &HashSet<Coord>, board: &Board) -> u32 {
    let mut sum = 0;
    let mut word_multiplier = 1;

    for &cell in &word.cells {
        let Some(tile) = board.tile_at(cell) else {
            continue;
        };
        if new_cells.contains(&cell) {
            let premium = board.premium_at(cell);
            sum += tile.value() * premium.letter_multiplier();
            word_multiplier = word_multiplier.max(premium.word_multiplier());
        } else {
            sum += tile.value();
        }
    }
    sum * word_multiplier
}

/// Point value of tiles left on a rack
pub fn rack_value(rack: &[Tile]) -> u32 {
    rack.iter().map(Tile::value).sum()
}
