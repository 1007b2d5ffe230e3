//! Procedural engine for an unbounded minesweeper board.
//!
//! Mines are never stored: [`is_mine`] derives them from a seed and a coordinate, so a [`Board`] only keeps
//! the cells a player has touched. [`Viewport`] maps a screen-sized window onto world coordinates and
//! [`snapshot`] saves and restores boards as JSON.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use cells::*;
pub use engine::*;
pub use error::*;
pub use minefield::*;
pub use score::*;
pub use types::*;
pub use viewport::*;

mod cell;
mod cells;
mod engine;
mod error;
mod minefield;
mod score;
pub mod snapshot;
mod types;
mod viewport;

/// Cascade depth reached by flood-fill before it stops expanding zero cells.
pub const DEFAULT_FLOOD_DEPTH_CAP: u32 = 100;

/// Steps the first click may be moved along before the safe-start search gives up.
pub const DEFAULT_MAX_START_SHIFT: u32 = 10_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub flood_depth_cap: u32,
    /// Cells the first reveal may move along +x looking for a clear opening. `0` reveals the first click
    /// where it lands, with no safe-start guarantee.
    pub max_start_shift: u32,
    pub flag_bonus: FlagBonus,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            flood_depth_cap: DEFAULT_FLOOD_DEPTH_CAP,
            max_start_shift: DEFAULT_MAX_START_SHIFT,
            flag_bonus: FlagBonus::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    GameOver,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            GameOver => true,
        }
    }
}
