//! Game setup options.

use crate::premium::PremiumLayout;
use serde::{Deserialize, Serialize};

/// Minimum and maximum seats at the table
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seat order is turn order
    pub player_names: Vec<String>,
    /// Seed for tile draws; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub layout: PremiumLayout,
}

impl GameConfig {
    pub fn new<S: Into<String>>(player_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            seed: None,
            layout: PremiumLayout::standard(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_layout(mut self, layout: PremiumLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }
}
