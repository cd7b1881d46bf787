//! Game state machine.
//!
//! This module contains:
//! - The error taxonomy shared by validation and the engine
//! - `GameState`, the complete serializable state of a game
//! - `TurnEngine`, which owns the state and is the only thing that mutates it

use crate::actions::{EndReason, GameAction, GameEvent};
use crate::bag::TileBag;
use crate::board::{Board, TilePlacement};
use crate::config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
use crate::coord::Coord;
use crate::lexicon::{Lexicon, LexiconError};
use crate::player::{take_tile, Player, PlayerId, RACK_SIZE};
use crate::premium::PremiumLayout;
use crate::scoring::{score_move, MoveScore};
use crate::snapshot::{GameSnapshot, SnapshotError};
use crate::tile::Tile;
use crate::validator::{MoveValidator, Placement, ValidatedMove};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a move or action was refused. Recoverable: no state changes and the
/// player keeps the turn.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("No tiles placed")]
    EmptyPlacement,

    #[error("Cell {0} is off the board")]
    OutOfBounds(Coord),

    #[error("Cell {0} is used more than once")]
    DuplicateCell(Coord),

    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    #[error("Cell {0} is already occupied")]
    CellOccupied(Coord),

    #[error("Tiles must lie in a single row or column")]
    NotInLine,

    #[error("Tiles must form one unbroken line")]
    NotContiguous,

    #[error("First word must cover the center square")]
    MustCoverCenter,

    #[error("A move must form a word of at least two letters")]
    WordTooShort,

    #[error("Word must connect to letters already on the board")]
    NotAdjacent,

    #[error("Rack is missing tiles: {missing:?}")]
    TilesNotInRack { missing: Vec<char> },

    #[error("'{0}' is not in the dictionary")]
    InvalidWord(String),

    #[error("Not your turn")]
    NotYourTurn,

    #[error("No tiles chosen to exchange")]
    EmptyExchange,

    #[error("Exchanges need at least 7 tiles in the bag")]
    ExchangeNotAllowed,

    #[error("Game is over")]
    GameOver,
}

/// Errors returned by engine operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Move rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Fatal configuration fault
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error("A game needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),
}

impl GameError {
    /// True for recoverable gameplay rejections
    pub fn is_rejection(&self) -> bool {
        matches!(self, GameError::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            GameError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for this player to place, pass or exchange
    AwaitingMove { player: PlayerId },
    /// Terminal
    GameOver {
        reason: EndReason,
        final_scores: Vec<u32>,
    },
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players, in turn order
    pub players: Vec<Player>,
    /// Current player index
    pub current_player: PlayerId,
    /// Whether the opening move has been played
    pub first_move_done: bool,
    /// Every word formed by a committed move, in play order
    pub word_history: Vec<String>,
    /// Undrawn tiles
    pub bag: TileBag,
    /// Passes and exchanges since the last placed word
    pub scoreless_turns: u32,
    /// Turns taken so far (starts at 0)
    pub turn_number: u32,
    /// Current game phase
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game: fill the bag and deal racks in seat order
    pub fn new<R: Rng>(
        player_names: Vec<String>,
        layout: PremiumLayout,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let count = player_names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidPlayerCount(count));
        }

        let mut bag = TileBag::standard();
        let players: Vec<Player> = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let mut player = Player::new(i as PlayerId, name);
                player.rack = bag.draw(RACK_SIZE, rng);
                player
            })
            .collect();

        Ok(Self {
            board: Board::new(layout),
            players,
            current_player: 0,
            first_move_done: false,
            word_history: Vec::new(),
            bag,
            scoreless_turns: 0,
            turn_number: 0,
            phase: GamePhase::AwaitingMove { player: 0 },
        })
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// The player whose turn it is
    pub fn current(&self) -> Option<&Player> {
        self.get_player(self.current_player)
    }

    /// Check if the game is finished
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Final scores, once the game is over
    pub fn final_scores(&self) -> Option<&[u32]> {
        match &self.phase {
            GamePhase::GameOver { final_scores, .. } => Some(final_scores),
            GamePhase::AwaitingMove { .. } => None,
        }
    }

    /// Structural invariants a loaded state must satisfy
    pub fn check_invariants(&self) -> Result<(), String> {
        let count = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(format!("player count {} out of range", count));
        }
        if self.current_player as usize >= count {
            return Err(format!(
                "current player {} out of range for {} players",
                self.current_player, count
            ));
        }
        for (i, player) in self.players.iter().enumerate() {
            if player.id as usize != i {
                return Err(format!("player at seat {} has id {}", i, player.id));
            }
            if player.rack.len() > RACK_SIZE {
                return Err(format!(
                    "player {} holds {} tiles",
                    player.id,
                    player.rack.len()
                ));
            }
        }
        match &self.phase {
            GamePhase::AwaitingMove { player } if *player != self.current_player => Err(format!(
                "phase awaits player {} but current player is {}",
                player, self.current_player
            )),
            GamePhase::GameOver { final_scores, .. } if final_scores.len() != count => {
                Err("final scores do not match player count".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// What a committed move did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: PlayerId,
    pub tiles: Vec<TilePlacement>,
    pub score: MoveScore,
    /// Tiles drawn to refill the rack
    pub tiles_drawn: usize,
    /// Set when this move ended the game
    pub ended: Option<EndReason>,
}

/// A move that passed every check, with its score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub validated: ValidatedMove,
    pub score: MoveScore,
}

/// Owns the game state and is the only thing that mutates it
#[derive(Debug, Clone)]
pub struct TurnEngine {
    state: GameState,
    lexicon: Lexicon,
    rng: StdRng,
}

impl TurnEngine {
    /// Start a game. Draws are seeded from `config.seed`, or OS entropy.
    pub fn new(config: GameConfig, lexicon: Lexicon) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, lexicon, rng)
    }

    pub fn with_rng(config: GameConfig, lexicon: Lexicon, mut rng: StdRng) -> Result<Self, GameError> {
        let state = GameState::new(config.player_names, config.layout, &mut rng)?;
        info!(
            players = state.player_count(),
            bag = state.bag.remaining(),
            "Game started"
        );
        Ok(Self {
            state,
            lexicon,
            rng,
        })
    }

    /// Resume from an existing state
    pub fn from_state(state: GameState, lexicon: Lexicon, rng: StdRng) -> Self {
        Self {
            state,
            lexicon,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    pub fn rack_of(&self, player: PlayerId) -> Option<&[Tile]> {
        self.state.get_player(player).map(|p| p.rack.as_slice())
    }

    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.state.get_player(player).map(|p| p.score)
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Letters on the board by row, `None` for empty cells
    pub fn board_snapshot(&self) -> Vec<Vec<Option<char>>> {
        self.state.board.grid()
    }

    pub fn word_history(&self) -> &[String] {
        &self.state.word_history
    }

    pub fn bag_remaining(&self) -> usize {
        self.state.bag.remaining()
    }

    pub fn phase(&self) -> &GamePhase {
        &self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Validate and score a placement for the current player without
    /// committing it
    pub fn check_move(&self, placements: &[Placement]) -> Result<ScoredMove, GameError> {
        self.ensure_active()?;
        let rack = self.current_rack();
        let validated = MoveValidator::new(&self.state.board, rack, self.state.first_move_done)
            .validate(placements, &self.lexicon)?;

        let after = self.state.board.with_placements(&validated.tiles);
        let score = score_move(&validated.words, &validated.tiles, &after);
        Ok(ScoredMove { validated, score })
    }

    /// Play tiles for the current player
    pub fn submit_move(&mut self, placements: &[Placement]) -> Result<MoveOutcome, GameError> {
        let actor = self.state.current_player;
        match self.check_move(placements) {
            Ok(scored) => Ok(self.commit(scored)),
            Err(GameError::Rejected(reason)) => {
                warn!(player = actor, %reason, "Move rejected");
                Err(reason.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Give up the turn
    pub fn pass(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        debug!(player = self.state.current_player, "Turn passed");
        self.end_scoreless_turn();
        Ok(())
    }

    /// Return `tiles` to the bag and draw the same number of new ones.
    /// Returns the number of tiles swapped.
    pub fn exchange(&mut self, tiles: &[Tile]) -> Result<usize, GameError> {
        self.ensure_active()?;
        if tiles.is_empty() {
            return Err(Rejection::EmptyExchange.into());
        }
        if self.state.bag.remaining() < RACK_SIZE {
            return Err(Rejection::ExchangeNotAllowed.into());
        }

        let actor = self.state.current_player as usize;
        let player = &mut self.state.players[actor];
        if !player.remove_tiles(tiles) {
            let mut pool = player.rack.clone();
            let mut missing: Vec<char> = tiles
                .iter()
                .filter(|t| !take_tile(&mut pool, **t))
                .map(Tile::symbol)
                .collect();
            missing.sort_unstable();
            return Err(Rejection::TilesNotInRack { missing }.into());
        }

        // Draw before returning so the same tiles cannot come straight back
        let drawn = self.state.bag.draw(tiles.len(), &mut self.rng);
        player.rack.extend(drawn);
        self.state.bag.return_tiles(tiles);

        debug!(player = actor, count = tiles.len(), "Tiles exchanged");
        self.end_scoreless_turn();
        Ok(tiles.len())
    }

    /// Run an action on behalf of `player` and report what happened
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active()?;
        if player != self.state.current_player {
            return Err(Rejection::NotYourTurn.into());
        }

        let mut events = Vec::new();
        match action {
            GameAction::PlaceTiles(placements) => {
                let outcome = self.submit_move(&placements)?;
                events.push(GameEvent::TilesPlaced {
                    player,
                    tiles: outcome.tiles,
                    bingo: outcome.score.is_bingo(),
                    points: outcome.score.total,
                    words: outcome.score.words,
                });
                if outcome.tiles_drawn > 0 {
                    events.push(GameEvent::TilesDrawn {
                        player,
                        count: outcome.tiles_drawn,
                    });
                }
            }
            GameAction::Pass => {
                self.pass()?;
                events.push(GameEvent::TurnPassed { player });
            }
            GameAction::Exchange(tiles) => {
                let count = self.exchange(&tiles)?;
                events.push(GameEvent::TilesExchanged { player, count });
            }
        }

        match &self.state.phase {
            GamePhase::GameOver {
                reason,
                final_scores,
            } => events.push(GameEvent::GameOver {
                reason: *reason,
                final_scores: final_scores.clone(),
            }),
            GamePhase::AwaitingMove { player } => {
                events.push(GameEvent::TurnChanged { player: *player })
            }
        }
        Ok(events)
    }

    /// Capture the full state for saving
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.state.clone())
    }

    /// Replace the state with a snapshot's. Nothing changes if the snapshot
    /// fails validation.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), SnapshotError> {
        let state = snapshot.into_state()?;
        info!(turn = state.turn_number, "Game restored");
        self.state = state;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        self.snapshot().save(path)
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let snapshot = GameSnapshot::load(path)?;
        self.restore(snapshot)
    }

    fn ensure_active(&self) -> Result<(), Rejection> {
        if self.state.is_over() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    fn current_rack(&self) -> &[Tile] {
        self.state
            .current()
            .map(|p| p.rack.as_slice())
            .unwrap_or(&[])
    }

    fn commit(&mut self, scored: ScoredMove) -> MoveOutcome {
        let ScoredMove { validated, score } = scored;
        let actor = self.state.current_player;

        for placement in &validated.tiles {
            self.state.board.place(placement.coord, placement.tile);
        }

        let used = validated.rack_tiles();
        let player = &mut self.state.players[actor as usize];
        let removed = player.remove_tiles(&used);
        debug_assert!(removed, "validated move used tiles not on the rack");
        player.score += score.total;
        let tiles_drawn = self.state.bag.refill(&mut player.rack, &mut self.rng);
        let went_out = player.rack_is_empty();

        self.state
            .word_history
            .extend(validated.words.iter().map(|w| w.text.clone()));
        self.state.first_move_done = true;
        self.state.scoreless_turns = 0;
        self.state.turn_number += 1;

        debug!(
            player = actor,
            points = score.total,
            words = ?score.words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>(),
            drawn = tiles_drawn,
            "Move committed"
        );

        let ended = if went_out && self.state.bag.is_empty() {
            let reason = EndReason::RackEmptied { player: actor };
            self.finish(reason);
            Some(reason)
        } else {
            self.advance_turn();
            None
        };

        MoveOutcome {
            player: actor,
            tiles: validated.tiles,
            score,
            tiles_drawn,
            ended,
        }
    }

    fn end_scoreless_turn(&mut self) {
        self.state.scoreless_turns += 1;
        self.state.turn_number += 1;
        if self.state.scoreless_turns as usize >= self.state.player_count() {
            self.finish(EndReason::AllPassed);
        } else {
            self.advance_turn();
        }
    }

    fn advance_turn(&mut self) {
        let next = (self.state.current_player as usize + 1) % self.state.player_count();
        self.state.current_player = next as PlayerId;
        self.state.phase = GamePhase::AwaitingMove {
            player: self.state.current_player,
        };
    }

    /// Settle racks and enter the terminal phase
    fn finish(&mut self, reason: EndReason) {
        let leftover: u32 = self.state.players.iter().map(Player::rack_value).sum();
        let final_scores: Vec<u32> = self
            .state
            .players
            .iter()
            .map(|p| {
                let score = p.score.saturating_sub(p.rack_value());
                match reason {
                    EndReason::RackEmptied { player } if player == p.id => score + leftover,
                    _ => score,
                }
            })
            .collect();

        info!(?reason, scores = ?final_scores, "Game over");
        self.state.phase = GamePhase::GameOver {
            reason,
            final_scores,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i + 1)).collect()
    }

    #[test]
    fn test_new_game_deals_racks() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = GameState::new(names(4), PremiumLayout::standard(), &mut rng).unwrap();
        assert_eq!(game.player_count(), 4);
        for player in &game.players {
            assert_eq!(player.rack.len(), RACK_SIZE);
        }
        assert_eq!(game.bag.remaining(), 100 - 4 * RACK_SIZE);
        assert_eq!(game.phase, GamePhase::AwaitingMove { player: 0 });
        assert!(!game.first_move_done);
        assert_eq!(game.check_invariants(), Ok(()));
    }

    #[test]
    fn test_player_count_limits() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [0, 1, 5] {
            let err = GameState::new(names(n), PremiumLayout::standard(), &mut rng).unwrap_err();
            assert!(matches!(err, GameError::InvalidPlayerCount(c) if c == n));
        }
    }

    #[test]
    fn test_invariants_catch_bad_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = GameState::new(names(2), PremiumLayout::standard(), &mut rng).unwrap();
        game.current_player = 2;
        assert!(game.check_invariants().is_err());

        game.current_player = 1;
        assert!(game.check_invariants().is_err(), "phase still awaits player 0");

        game.phase = GamePhase::AwaitingMove { player: 1 };
        assert_eq!(game.check_invariants(), Ok(()));

        game.players[0].rack.push(crate::tile::Tile::Blank);
        assert!(game.check_invariants().is_err());
    }

    #[test]
    fn test_rejection_messages_are_distinct() {
        assert_eq!(
            Rejection::MustCoverCenter.to_string(),
            "First word must cover the center square"
        );
        assert_eq!(
            Rejection::InvalidWord("QXZ".into()).to_string(),
            "'QXZ' is not in the dictionary"
        );
        assert_ne!(
            Rejection::NotAdjacent.to_string(),
            Rejection::NotContiguous.to_string()
        );
    }

    #[test]
    fn test_game_error_classification() {
        let rejected: GameError = Rejection::NotYourTurn.into();
        assert!(rejected.is_rejection());
        assert_eq!(rejected.rejection(), Some(&Rejection::NotYourTurn));

        let fatal: GameError = LexiconError::NotLoaded.into();
        assert!(!fatal.is_rejection());
        assert!(fatal.rejection().is_none());
    }

    fn tiles(letters: &str) -> Vec<Tile> {
        letters.chars().map(|c| Tile::try_from(c).unwrap()).collect()
    }

    /// Two-player engine where player 0 holds `rack0` and player 1 `rack1`
    fn engine_with_racks(rack0: &str, rack1: &str) -> TurnEngine {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = GameState::new(names(2), PremiumLayout::standard(), &mut rng).unwrap();
        state.players[0].rack = tiles(rack0);
        state.players[1].rack = tiles(rack1);
        let lexicon = Lexicon::from_words(["cat", "cats", "at", "ta", "dog", "go"]);
        TurnEngine::from_state(state, lexicon, rng)
    }

    fn across(row: usize, col: usize, word: &str) -> Vec<Placement> {
        word.chars()
            .enumerate()
            .map(|(i, c)| Placement::new(row, col + i, c))
            .collect()
    }

    #[test]
    fn test_submit_move_commits() {
        let mut engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        let bag_before = engine.bag_remaining();

        let outcome = engine.submit_move(&across(7, 7, "CAT")).unwrap();
        assert_eq!(outcome.player, 0);
        assert_eq!(outcome.score.total, 10);
        assert_eq!(outcome.tiles_drawn, 3);
        assert_eq!(outcome.ended, None);

        assert_eq!(engine.score_of(0), Some(10));
        assert_eq!(engine.rack_of(0).unwrap().len(), RACK_SIZE);
        assert_eq!(engine.bag_remaining(), bag_before - 3);
        assert_eq!(engine.word_history(), ["CAT".to_string()]);
        assert_eq!(engine.board().letter_at(7, 8), Some('A'));
        assert!(engine.state().first_move_done);
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.phase(), &GamePhase::AwaitingMove { player: 1 });
    }

    #[test]
    fn test_short_rack_is_topped_up_to_full() {
        let mut engine = engine_with_racks("CATS", "DOGEEEE");
        let bag_before = engine.bag_remaining();

        let outcome = engine.submit_move(&across(7, 7, "CAT")).unwrap();
        assert_eq!(outcome.tiles_drawn, 6);
        assert_eq!(engine.rack_of(0).unwrap().len(), RACK_SIZE);
        assert_eq!(engine.bag_remaining(), bag_before - 6);
        assert!(engine.state().check_invariants().is_ok());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        let before = engine.state().clone();

        let err = engine.submit_move(&across(3, 3, "CAT")).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::MustCoverCenter));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_check_move_is_dry_run() {
        let engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        let before = engine.state().clone();
        let scored = engine.check_move(&across(7, 6, "CAT")).unwrap();
        assert_eq!(scored.score.total, 10);
        assert_eq!(scored.validated.words[0].text, "CAT");
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_all_pass_ends_game() {
        let mut engine = engine_with_racks("CAT", "QZ");
        engine.pass().unwrap();
        assert_eq!(engine.current_player(), 1);
        assert!(!engine.is_over());
        engine.pass().unwrap();

        assert!(engine.is_over());
        // CAT = 5, QZ = 20 subtracted from zero scores
        assert_eq!(
            engine.phase(),
            &GamePhase::GameOver {
                reason: EndReason::AllPassed,
                final_scores: vec![0, 0],
            }
        );
        let err = engine.pass().unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::GameOver));
        let err = engine.submit_move(&across(7, 7, "CAT")).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::GameOver));
    }

    #[test]
    fn test_placed_word_resets_scoreless_counter() {
        let mut engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        engine.pass().unwrap();
        assert_eq!(engine.state().scoreless_turns, 1);
        // A rejected move is not a turn
        engine.submit_move(&across(8, 7, "GO")).unwrap_err();
        assert_eq!(engine.state().scoreless_turns, 1);
        engine.pass().unwrap();
        assert!(engine.is_over());

        let mut engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        engine.pass().unwrap();
        engine.submit_move(&across(7, 6, "GO")).unwrap();
        assert_eq!(engine.state().scoreless_turns, 0);
        engine.pass().unwrap();
        assert!(!engine.is_over());
    }

    #[test]
    fn test_exchange_swaps_tiles() {
        let mut engine = engine_with_racks("QQXZCAT", "DOGEEEE");
        let bag_before = engine.bag_remaining();

        assert_eq!(engine.exchange(&tiles("QX")).unwrap(), 2);
        assert_eq!(engine.bag_remaining(), bag_before);
        assert_eq!(engine.rack_of(0).unwrap().len(), 7);
        assert_eq!(engine.state().scoreless_turns, 1);
        assert_eq!(engine.current_player(), 1);

        let err = engine.exchange(&tiles("ZZ")).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::TilesNotInRack { missing: vec!['Z', 'Z'] })
        );
        let err = engine.exchange(&[]).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::EmptyExchange));
    }

    #[test]
    fn test_exchange_needs_full_bag() {
        let mut engine = engine_with_racks("QQXZCAT", "DOGEEEE");
        let mut state = engine.state().clone();
        state.bag = TileBag::with_tiles(&[(Tile::Letter('E'), 6)]);
        engine = TurnEngine::from_state(state, engine.lexicon().clone(), StdRng::seed_from_u64(1));

        let err = engine.exchange(&tiles("Q")).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::ExchangeNotAllowed));
    }

    #[test]
    fn test_going_out_with_empty_bag_ends_game() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new(names(2), PremiumLayout::standard(), &mut rng).unwrap();
        state.bag = TileBag::empty();
        state.players[0].rack = tiles("CAT");
        state.players[0].score = 12;
        state.players[1].rack = tiles("QE");
        state.players[1].score = 30;
        let lexicon = Lexicon::from_words(["cat"]);
        let mut engine = TurnEngine::from_state(state, lexicon, rng);

        let events = engine.apply_action(0, GameAction::PlaceTiles(across(7, 7, "CAT"))).unwrap();
        let reason = EndReason::RackEmptied { player: 0 };
        // 12 + 10 for CAT + 11 left on the other rack; 30 - 11
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                reason,
                final_scores: vec![33, 19],
            })
        );
        assert!(engine.is_over());
        assert_eq!(engine.state().final_scores(), Some(&[33, 19][..]));
    }

    #[test]
    fn test_apply_action_checks_turn() {
        let mut engine = engine_with_racks("CATXYZQ", "DOGEEEE");
        let err = engine.apply_action(1, GameAction::Pass).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::NotYourTurn));

        let events = engine
            .apply_action(0, GameAction::PlaceTiles(across(7, 7, "CAT")))
            .unwrap();
        assert!(matches!(
            events[0],
            GameEvent::TilesPlaced { player: 0, points: 10, bingo: false, .. }
        ));
        assert_eq!(events[1], GameEvent::TilesDrawn { player: 0, count: 3 });
        assert_eq!(events[2], GameEvent::TurnChanged { player: 1 });

        let events = engine.apply_action(1, GameAction::Pass).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::TurnPassed { player: 1 },
                GameEvent::TurnChanged { player: 0 },
            ]
        );
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let config = GameConfig::new(["A", "B", "C"]).with_seed(42);
        let a = TurnEngine::new(config.clone(), Lexicon::new()).unwrap();
        let b = TurnEngine::new(config, Lexicon::new()).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_unloaded_lexicon_is_fatal() {
        let config = GameConfig::new(["A", "B"]).with_seed(1);
        let mut engine = TurnEngine::new(config, Lexicon::new()).unwrap();
        let mut state = engine.state().clone();
        state.players[0].rack = tiles("CAT");
        engine = TurnEngine::from_state(state, Lexicon::new(), StdRng::seed_from_u64(1));

        let err = engine.submit_move(&across(7, 7, "CAT")).unwrap_err();
        assert!(matches!(err, GameError::Lexicon(LexiconError::NotLoaded)));
        assert!(!err.is_rejection());
    }
}
