//! Game actions and events.
//!
//! Actions are what a player (human or bot) asks the engine to do; events are
//! what the engine reports back so a presentation layer can re-render.

use crate::board::TilePlacement;
use crate::player::PlayerId;
use crate::scoring::WordScore;
use crate::tile::Tile;
use crate::validator::Placement;
use serde::{Deserialize, Serialize};

/// All possible turn actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Lay tiles on the board
    PlaceTiles(Vec<Placement>),
    /// Give up the turn
    Pass,
    /// Swap rack tiles for fresh ones from the bag
    Exchange(Vec<Tile>),
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The bag is empty and this player played out their rack
    RackEmptied { player: PlayerId },
    /// Every player took a scoreless turn in a row
    AllPassed,
}

/// Events emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TilesPlaced {
        player: PlayerId,
        tiles: Vec<TilePlacement>,
        words: Vec<WordScore>,
        points: u32,
        bingo: bool,
    },
    TilesDrawn {
        player: PlayerId,
        count: usize,
    },
    TurnPassed {
        player: PlayerId,
    },
    TilesExchanged {
        player: PlayerId,
        count: usize,
    },
    TurnChanged {
        player: PlayerId,
    },
    GameOver {
        reason: EndReason,
        final_scores: Vec<u32>,
    },
}
