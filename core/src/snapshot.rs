//! Textual snapshots of a [`Board`].
//!
//! A snapshot is a JSON object:
//!
//! ```text
//! {"seed": 42, "offset": [-1, 0], "invsoffset": -1, "score": 30, "initclick": false,
//!  "cells": {"cell-1-0": 0, "cell-0-1": 1, "cell-7--3": 10}}
//! ```
//!
//! Cells keep the board's insertion order and store their numeric code (`0..=8` revealed, `10` flagged).
//! Anything that does not match this shape is rejected as [`GameError::CorruptSave`].

use core::fmt;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::*;

const CELL_KEY_PREFIX: &str = "cell-";

/// Snapshot key of a cell, `cell-<x>-<y>`.
pub fn cell_key((x, y): Coord2) -> String {
    format!("{CELL_KEY_PREFIX}{x}-{y}")
}

/// Inverse of [`cell_key`]. Only the canonical spelling is accepted.
pub fn parse_cell_key(key: &str) -> Option<Coord2> {
    let rest = key.strip_prefix(CELL_KEY_PREFIX)?;
    // skip the first character so a leading minus on x is not taken as the separator
    let split = rest.get(1..)?.find('-')? + 1;
    let x: Coord = rest[..split].parse().ok()?;
    let y: Coord = rest[split + 1..].parse().ok()?;

    (cell_key((x, y)) == key).then_some((x, y))
}

#[derive(Clone, Debug, PartialEq)]
struct CellEntries(CellMap);

impl Serialize for CellEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (coords, value) in self.0.iter() {
            map.serialize_entry(&cell_key(coords), &value)?;
        }
        map.end()
    }
}

struct CellEntriesVisitor;

impl<'de> Visitor<'de> for CellEntriesVisitor {
    type Value = CellEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of cell keys to cell codes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> core::result::Result<Self::Value, A::Error> {
        let mut cells = CellMap::new();
        while let Some(key) = access.next_key::<String>()? {
            let coords = parse_cell_key(&key)
                .ok_or_else(|| de::Error::custom(format!("invalid cell key {key:?}")))?;
            let value: CellValue = access.next_value()?;
            if cells.insert(coords, value).is_some() {
                return Err(de::Error::custom(format!("duplicate cell key {key:?}")));
            }
        }
        Ok(CellEntries(cells))
    }
}

impl<'de> Deserialize<'de> for CellEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CellEntriesVisitor)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    seed: Seed,
    offset: [Coord; 2],
    #[serde(rename = "invsoffset")]
    inverse_offset: Coord,
    score: u64,
    #[serde(rename = "initclick", default, skip_serializing_if = "Option::is_none")]
    first_click_pending: Option<bool>,
    cells: CellEntries,
}

impl Snapshot {
    pub fn of(board: &Board) -> Self {
        let (offset_x, offset_y) = board.offset();
        Self {
            seed: board.seed(),
            offset: [offset_x, offset_y],
            inverse_offset: board.inverse_offset(),
            score: board.score(),
            first_click_pending: Some(board.state().is_ready()),
            cells: CellEntries(board.cells().clone()),
        }
    }

    /// Rebuilds the board. Fails when a revealed cell disagrees with the seed's mine layout.
    pub fn into_board(self, config: BoardConfig) -> Result<Board> {
        let minefield = SeededMinefield::new(self.seed);
        let CellEntries(cells) = self.cells;
        for (coords, value) in cells.iter() {
            let CellValue::Revealed(count) = value else {
                continue;
            };
            if minefield.contains_mine(coords) || minefield.adjacent_mine_count(coords) != count {
                log::warn!(
                    "Corrupt snapshot: cell {:?} stored as {} under seed {}",
                    coords,
                    count,
                    self.seed
                );
                return Err(GameError::CorruptSave);
            }
        }

        let first_click_pending = self.first_click_pending.unwrap_or(cells.is_empty());
        let board = Board::restore(
            minefield,
            config,
            cells,
            (self.offset[0], self.offset[1]),
            self.inverse_offset,
            first_click_pending,
        );

        if board.score() != self.score {
            log::warn!(
                "Snapshot score {} does not match its cells, using {}",
                self.score,
                board.score()
            );
        }
        Ok(board)
    }
}

pub fn save(board: &Board) -> Result<Vec<u8>> {
    serde_json::to_vec(&Snapshot::of(board)).map_err(|err| {
        log::warn!("Could not encode snapshot: {}", err);
        GameError::EncodeFailed
    })
}

/// Parses a snapshot into a new board. Nothing is built unless the whole snapshot is valid, including every
/// revealed count.
pub fn load(bytes: &[u8], config: BoardConfig) -> Result<Board> {
    let snapshot: Snapshot = serde_json::from_slice(bytes).map_err(|err| {
        log::warn!("Corrupt snapshot: {}", err);
        GameError::CorruptSave
    })?;
    log::debug!(
        "Loaded snapshot with seed {} and {} cells",
        snapshot.seed,
        snapshot.cells.0.len()
    );
    snapshot.into_board(config)
}
