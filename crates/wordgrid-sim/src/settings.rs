//! Environment configuration for the simulator.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("WORDGRID_DICT must point to a word list")]
    MissingDictionary,

    #[error("WORDGRID_SEED is not a number: {0}")]
    BadSeed(String),

    #[error("WORDGRID_PLAYERS needs 2 to 4 names, got {0}")]
    BadPlayers(usize),

    #[error("WORDGRID_CANDIDATES is not a number: {0}")]
    BadCandidates(String),
}

/// Simulator settings read from `WORDGRID_*` variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dictionary: PathBuf,
    pub players: Vec<String>,
    pub seed: Option<u64>,
    pub layout: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub max_candidates: Option<usize>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let dictionary = get("WORDGRID_DICT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(SettingsError::MissingDictionary)?;

        let players: Vec<String> = match get("WORDGRID_PLAYERS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => vec!["Bot 1".to_string(), "Bot 2".to_string()],
        };
        if !(2..=4).contains(&players.len()) {
            return Err(SettingsError::BadPlayers(players.len()));
        }

        let seed = get("WORDGRID_SEED")
            .map(|s| s.trim().parse().map_err(|_| SettingsError::BadSeed(s)))
            .transpose()?;
        let max_candidates = get("WORDGRID_CANDIDATES")
            .map(|s| s.trim().parse().map_err(|_| SettingsError::BadCandidates(s)))
            .transpose()?;

        Ok(Self {
            dictionary,
            players,
            seed,
            layout: get("WORDGRID_LAYOUT").map(PathBuf::from),
            save: get("WORDGRID_SAVE").map(PathBuf::from),
            max_candidates,
        })
    }
}
