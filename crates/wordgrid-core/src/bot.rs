//! Bot players.
//!
//! Bots search for placements by trying dictionary words at every position
//! on the board and asking the engine's dry run which ones are legal:
//! - Easy: a random legal move among those found
//! - Hard: the highest scoring legal move found
//!
//! When no placement is found the bot exchanges its whole rack if the bag
//! allows it, and passes otherwise.

use crate::actions::GameAction;
use crate::board::Board;
use crate::coord::{Axis, BOARD_SIZE};
use crate::game::TurnEngine;
use crate::player::{PlayerId, RACK_SIZE};
use crate::tile::{Tile, TILE_KINDS};
use crate::validator::Placement;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dictionary words tried per turn unless overridden
pub const DEFAULT_MAX_CANDIDATES: usize = 400;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Hard,
}

/// A bot player that can decide on actions
pub struct Bot {
    pub player_id: PlayerId,
    pub difficulty: BotDifficulty,
    /// Upper bound on dictionary words tried per turn
    pub max_candidates: usize,
    rng: StdRng,
}

/// A legal placement and what it scores
struct Candidate {
    placements: Vec<Placement>,
    points: u32,
}

impl Bot {
    pub fn new(player_id: PlayerId, difficulty: BotDifficulty) -> Self {
        Self {
            player_id,
            difficulty,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player_id: PlayerId, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            player_id,
            difficulty,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Decide what to do on this bot's turn
    pub fn propose(&mut self, engine: &TurnEngine) -> GameAction {
        if engine.is_over() || engine.current_player() != self.player_id {
            return GameAction::Pass;
        }
        let rack: Vec<Tile> = engine
            .rack_of(self.player_id)
            .map(<[Tile]>::to_vec)
            .unwrap_or_default();

        let candidates = self.find_candidates(engine, &rack);
        debug!(
            player = self.player_id,
            found = candidates.len(),
            "Bot searched for moves"
        );

        let chosen = match self.difficulty {
            BotDifficulty::Easy => candidates.choose(&mut self.rng),
            BotDifficulty::Hard => best_candidate(&candidates),
        };
        if let Some(candidate) = chosen {
            return GameAction::PlaceTiles(candidate.placements.clone());
        }

        if !rack.is_empty() && engine.bag_remaining() >= RACK_SIZE {
            GameAction::Exchange(rack)
        } else {
            GameAction::Pass
        }
    }

    fn find_candidates(&mut self, engine: &TurnEngine, rack: &[Tile]) -> Vec<Candidate> {
        let mut words: Vec<&str> = engine
            .lexicon()
            .words()
            .filter(|w| (2..=BOARD_SIZE).contains(&w.len()))
            .collect();
        // Set iteration order varies between runs; sort so seeds reproduce
        words.sort_unstable();
        words.shuffle(&mut self.rng);
        words.truncate(self.max_candidates);

        let counts = rack_counts(rack);
        let board = engine.board();
        let mut found = Vec::new();

        for word in words {
            let letters: Vec<char> = word.chars().collect();
            for axis in Axis::BOTH {
                for line in 0..BOARD_SIZE {
                    for start in 0..=(BOARD_SIZE - letters.len()) {
                        let Some(placements) = fit_word(board, &letters, axis, line, start) else {
                            continue;
                        };
                        if !rack_covers(&counts, &placements) {
                            continue;
                        }
                        if let Ok(scored) = engine.check_move(&placements) {
                            found.push(Candidate {
                                placements,
                                points: scored.score.total,
                            });
                        }
                    }
                }
            }
        }
        found
    }
}

/// First candidate with the top score
fn best_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        if best.map_or(true, |b| candidate.points > b.points) {
            best = Some(candidate);
        }
    }
    best
}

/// Placements that spell `letters` along `line` from `start`, reusing letters
/// already on the board. `None` if the word clashes with the board, extends
/// into a neighbouring letter, or places nothing new.
fn fit_word(
    board: &Board,
    letters: &[char],
    axis: Axis,
    line: usize,
    start: usize,
) -> Option<Vec<Placement>> {
    let end = start + letters.len();
    if start > 0 && board.is_occupied(axis.at(line, start - 1)) {
        return None;
    }
    if end < BOARD_SIZE && board.is_occupied(axis.at(line, end)) {
        return None;
    }

    let mut placements = Vec::new();
    for (i, &letter) in letters.iter().enumerate() {
        let coord = axis.at(line, start + i);
        match board.tile_at(coord) {
            Some(tile) if tile.letter == letter => {}
            Some(_) => return None,
            None => placements.push(Placement::new(coord.row, coord.col, letter)),
        }
    }

    if placements.is_empty() || placements.len() > RACK_SIZE {
        None
    } else {
        Some(placements)
    }
}

fn rack_counts(rack: &[Tile]) -> [u32; TILE_KINDS] {
    let mut counts = [0; TILE_KINDS];
    for index in rack.iter().filter_map(Tile::index) {
        counts[index] += 1;
    }
    counts
}

/// Whether the rack can supply every letter, using blanks for shortfalls
fn rack_covers(counts: &[u32; TILE_KINDS], placements: &[Placement]) -> bool {
    let mut needed = [0u32; TILE_KINDS];
    for p in placements {
        match Tile::letter(p.letter).and_then(|tile| tile.index()) {
            Some(index) => needed[index] += 1,
            None => return false,
        }
    }

    let blank = TILE_KINDS - 1;
    let shortfall: u32 = (0..TILE_KINDS)
        .filter(|&i| i != blank)
        .map(|i| needed[i].saturating_sub(counts[i]))
        .sum();
    shortfall <= counts[blank]
}
