//! Wordgrid - a crossword tile game engine
//!
//! This crate provides the core rules for a 2-4 player word placement game:
//! - Tiles, the tile bag and the 15x15 board with premium squares
//! - Move validation against the board, the rack and a dictionary
//! - Scoring with letter and word premiums and the full-rack bonus
//! - A turn engine that owns the game state and commits accepted moves
//! - Snapshots for saving and resuming games
//! - Bots that search the dictionary for playable words
//!
//! # Architecture
//!
//! The engine is synchronous and platform-agnostic. It can be compiled to:
//! - Native Rust for headless simulation
//! - WebAssembly for a browser front end (feature `wasm`)
//!
//! # Modules
//!
//! - [`tile`], [`bag`]: letters, point values and the draw pile
//! - [`coord`], [`premium`], [`board`]: board addressing, layout and cells
//! - [`lexicon`]: the word list
//! - [`validator`], [`scoring`]: move legality and points
//! - [`game`]: game state and the turn engine
//! - [`snapshot`]: save and load

pub mod actions;
pub mod bag;
pub mod board;
pub mod bot;
pub mod config;
pub mod coord;
pub mod game;
pub mod lexicon;
pub mod player;
pub mod premium;
pub mod scoring;
pub mod snapshot;
pub mod tile;
pub mod validator;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{EndReason, GameAction, GameEvent};
pub use bag::TileBag;
pub use board::{Board, TilePlacement};
pub use bot::{Bot, BotDifficulty};
pub use config::GameConfig;
pub use coord::{Axis, Coord, BOARD_SIZE, CENTER};
pub use game::{GameError, GamePhase, GameState, MoveOutcome, Rejection, ScoredMove, TurnEngine};
pub use lexicon::{Lexicon, LexiconError};
pub use player::{Player, PlayerId, RACK_SIZE};
pub use premium::{LayoutError, Premium, PremiumLayout};
pub use scoring::{score_move, MoveScore, WordScore};
pub use snapshot::{GameSnapshot, SnapshotError, SNAPSHOT_FORMAT_VERSION};
pub use tile::{PlacedTile, Tile};
pub use validator::{FormedWord, MoveValidator, Placement, ValidatedMove};
