use serde::{Deserialize, Serialize};

use crate::*;

/// How the running flag density is evaluated when awarding flag bonuses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagBonus {
    /// Density is the exact fraction of flags seen so far over stored cells.
    Tiered,
    /// Density is truncated by integer division, so it stays zero and every flag earns the top bonus.
    Truncated,
}

impl Default for FlagBonus {
    fn default() -> Self {
        Self::Tiered
    }
}

impl FlagBonus {
    /// Bonus for a flag met after `flags_seen` other flags, out of `total` stored cells.
    pub const fn bonus(self, flags_seen: u64, total: u64) -> u64 {
        if total == 0 {
            return 0;
        }

        match self {
            Self::Tiered => {
                if flags_seen * 100 < total * 5 {
                    5
                } else if flags_seen * 10 < total {
                    3
                } else if flags_seen * 5 < total {
                    1
                } else {
                    0
                }
            }
            Self::Truncated => {
                if flags_seen / total == 0 {
                    5
                } else {
                    0
                }
            }
        }
    }
}

/// Score of a stored-cell mapping, visited in insertion order.
///
/// `Revealed(0)` is worth 1, `Revealed(n)` is worth n, and each flag earns a bonus tiered by how many flags
/// were already counted.
pub fn tally(cells: &CellMap, flag_bonus: FlagBonus) -> u64 {
    let total = cells.len() as u64;
    let mut flags_seen = 0;
    let mut score = 0;

    for value in cells.values() {
        score += match value {
            CellValue::Revealed(0) => 1,
            CellValue::Revealed(count) => u64::from(count),
            CellValue::Flagged => {
                let bonus = flag_bonus.bonus(flags_seen, total);
                flags_seen += 1;
                bonus
            }
        };
    }

    score
}
