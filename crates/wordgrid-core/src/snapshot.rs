//! Saving and loading games.
//!
//! A snapshot is the full `GameState` plus a format version, stored as pretty
//! JSON. Loading validates the state before handing it back, so a bad file
//! never replaces a running game.

use crate::game::GameState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Bumped whenever the serialized layout of `GameState` changes
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid game state: {0}")]
    Invalid(String),
}

/// Serializable capture of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub format_version: u32,
    pub state: GameState,
}

impl GameSnapshot {
    pub fn new(state: GameState) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Only checks the JSON shape; see [`into_state`]
    ///
    /// [`into_state`]: GameSnapshot::into_state
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the version and state invariants
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.format_version,
                expected: SNAPSHOT_FORMAT_VERSION,
            });
        }
        self.state.check_invariants().map_err(SnapshotError::Invalid)?;
        self.state
            .board
            .layout()
            .validate()
            .map_err(|e| SnapshotError::Invalid(e.to_string()))?;
        if !self.state.first_move_done && !self.state.board.is_blank_board() {
            return Err(SnapshotError::Invalid(
                "tiles on the board before the first move".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and unwrap the state
    pub fn into_state(self) -> Result<GameState, SnapshotError> {
        self.validate()?;
        Ok(self.state)
    }

    /// Write to `path` through a temporary file so a crash never leaves a
    /// half-written snapshot behind
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let tmp = temp_path(path);

        fs::write(&tmp, json).map_err(|source| SnapshotError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), turn = self.state.turn_number, "Snapshot saved");
        Ok(())
    }

    /// Read and validate a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use crate::premium::PremiumLayout;
    use crate::tile::PlacedTile;
    use crate::coord::Coord;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        let mut rng = StdRng::seed_from_u64(11);
        GameState::new(
            vec!["Ann".to_string(), "Ben".to_string()],
            PremiumLayout::standard(),
            &mut rng,
        )
        .unwrap()
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "wordgrid-snapshot-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = GameSnapshot::new(state());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"format_version\": 1"));
        let parsed = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_file("save");
        let mut state = state();
        state.board.place(Coord::new(7, 7), PlacedTile::blank('Q'));
        state.first_move_done = true;
        let snapshot = GameSnapshot::new(state);

        snapshot.save(&path).unwrap();
        assert!(!temp_path(&path).exists());
        let loaded = GameSnapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unsupported_version() {
        let mut snapshot = GameSnapshot::new(state());
        snapshot.format_version = 99;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnsupportedVersion { found: 99, expected: 1 })
        ));
    }

    #[test]
    fn test_invalid_state_rejected() {
        let mut snapshot = GameSnapshot::new(state());
        snapshot.state.phase = GamePhase::AwaitingMove { player: 1 };
        assert!(matches!(snapshot.validate(), Err(SnapshotError::Invalid(_))));

        let mut snapshot = GameSnapshot::new(state());
        snapshot.state.board.place(Coord::new(0, 0), PlacedTile::new('A'));
        assert!(matches!(snapshot.validate(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameSnapshot::from_json("{\"format_version\": 1}"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = scratch_file("missing");
        let err = GameSnapshot::load(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
