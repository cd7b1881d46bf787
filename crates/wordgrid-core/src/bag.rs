//! The tile bag: a finite multiset of undrawn tiles.

use crate::player::RACK_SIZE;
use crate::tile::{Tile, TILE_KINDS};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Remaining tile counts, indexed A..Z then blank.
///
/// The sum of counts is always the number of tiles left to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBag {
    counts: [u32; TILE_KINDS],
}

impl TileBag {
    /// An empty bag
    pub fn empty() -> Self {
        Self {
            counts: [0; TILE_KINDS],
        }
    }

    /// The standard 100-tile bag
    pub fn standard() -> Self {
        Self::with_tiles(&Tile::standard_distribution())
    }

    /// A bag holding exactly the given (tile, count) pairs
    pub fn with_tiles(tiles: &[(Tile, u32)]) -> Self {
        let mut bag = Self::empty();
        for &(tile, count) in tiles {
            if let Some(index) = tile.index() {
                bag.counts[index] += count;
            }
        }
        bag
    }

    /// Total tiles left
    pub fn remaining(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Copies of a tile kind still in the bag
    pub fn count_of(&self, tile: Tile) -> u32 {
        tile.index().map_or(0, |index| self.counts[index])
    }

    /// Draw up to `n` tiles, each uniformly at random over the remaining tiles.
    ///
    /// A kind with more copies left is proportionally more likely. Returns
    /// fewer than `n` once the bag runs dry.
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<Tile> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let total = self.remaining();
            if total == 0 {
                break;
            }

            let mut pick = rng.gen_range(0..total);
            for (index, count) in self.counts.iter_mut().enumerate() {
                let count_usize = *count as usize;
                if pick < count_usize {
                    *count -= 1;
                    drawn.push(Tile::from_index(index));
                    break;
                }
                pick -= count_usize;
            }
        }
        drawn
    }

    /// Top a rack back up to the rack size, or as close as the bag allows.
    ///
    /// Returns the number of tiles drawn.
    pub fn refill<R: Rng>(&mut self, rack: &mut Vec<Tile>, rng: &mut R) -> usize {
        let room = RACK_SIZE.saturating_sub(rack.len());
        let drawn = self.draw(room, rng);
        let count = drawn.len();
        rack.extend(drawn);
        count
    }

    /// Put tiles back (used by exchanges)
    pub fn return_tiles(&mut self, tiles: &[Tile]) {
        for index in tiles.iter().filter_map(Tile::index) {
            self.counts[index] += 1;
        }
    }

    /// (tile, count) pairs for every kind still present
    pub fn contents(&self) -> Vec<(Tile, u32)> {
        (0..TILE_KINDS)
            .map(Tile::from_index)
            .map(|tile| (tile, self.count_of(tile)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

impl Default for TileBag {
    fn default() -> Self {
        Self::standard()
    }
}
