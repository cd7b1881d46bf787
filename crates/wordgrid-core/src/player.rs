//! Player state and rack management.
//!
//! This module contains:
//! - Player struct with name, rack and cumulative score
//! - Rack helpers for checking and removing tiles with multiplicity

use crate::scoring;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Maximum tiles a rack holds
pub const RACK_SIZE: usize = 7;

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID, also the seat / turn index
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Tiles in hand, in draw order
    pub rack: Vec<Tile>,
    /// Cumulative score
    pub score: u32,
}

impl Player {
    /// Create a new player with an empty rack
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            rack: Vec::with_capacity(RACK_SIZE),
            score: 0,
        }
    }

    pub fn rack_is_empty(&self) -> bool {
        self.rack.is_empty()
    }

    /// Sum of the point values left on the rack
    pub fn rack_value(&self) -> u32 {
        scoring::rack_value(&self.rack)
    }

    /// Remove tiles from the rack. Leaves the rack untouched and returns false
    /// if any tile is missing.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> bool {
        let mut pool = self.rack.clone();
        if !tiles.iter().all(|t| take_tile(&mut pool, *t)) {
            return false;
        }
        self.rack = pool;
        true
    }
}

/// Remove one copy of `tile` from `pool`, preserving the order of the rest
pub(crate) fn take_tile(pool: &mut Vec<Tile>, tile: Tile) -> bool {
    match pool.iter().position(|t| *t == tile) {
        Some(pos) => {
            pool.remove(pos);
            true
        }
        None => false,
    }
}
