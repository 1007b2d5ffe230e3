use serde::{Deserialize, Serialize};

use crate::*;

/// Out of every `MINE_MODULUS` hash buckets, `MINE_BUCKETS` hold a mine (16% density).
pub const MINE_MODULUS: u64 = 25;
pub const MINE_BUCKETS: u64 = 4;

// Domain tag, arbitrary but fixed. Changing it changes every saved board.
const MINE_DOMAIN: u64 = 0x1F5E_ED00_B0A2_D5EE;

/// SplitMix64 finalizer.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stable 64-bit hash of a seeded coordinate.
///
/// This is part of the snapshot contract: a saved board is only its seed plus the touched cells, so the
/// hash must produce the same value for the same inputs across builds and platforms.
#[inline]
pub fn cell_hash(seed: Seed, (x, y): Coord2) -> u64 {
    let h = splitmix64(MINE_DOMAIN ^ u64::from(seed));
    let h = splitmix64(h ^ x as u64);
    splitmix64(h ^ (y as u64).rotate_left(32))
}

pub fn is_mine(coords: Coord2, seed: Seed) -> bool {
    cell_hash(seed, coords) % MINE_MODULUS < MINE_BUCKETS
}

pub fn adjacent_mine_count(coords: Coord2, seed: Seed) -> u8 {
    NeighborIter::new(coords)
        .map(|pos| u8::from(is_mine(pos, seed)))
        .sum()
}

/// Source of mine placement for a board.
pub trait Minefield {
    fn contains_mine(&self, coords: Coord2) -> bool;

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords)
            .map(|pos| u8::from(self.contains_mine(pos)))
            .sum()
    }

    /// A cell that opens a fully empty region: no mine on it and none around it.
    fn is_clear_opening(&self, coords: Coord2) -> bool {
        !self.contains_mine(coords) && self.adjacent_mine_count(coords) == 0
    }
}

/// Mine placement derived from [`is_mine`], with no stored state besides the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededMinefield {
    seed: Seed,
}

impl SeededMinefield {
    pub const fn new(seed: Seed) -> Self {
        Self { seed }
    }

    /// Fresh seed from the thread-local generator.
    pub fn random() -> Self {
        Self::new(rand::random())
    }

    pub const fn seed(&self) -> Seed {
        self.seed
    }
}

impl Minefield for SeededMinefield {
    fn contains_mine(&self, coords: Coord2) -> bool {
        is_mine(coords, self.seed)
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        adjacent_mine_count(coords, self.seed)
    }
}
