use std::collections::BTreeMap;
use hashbrown::HashMap;

use crate::*;

/// Sparse storage of touched cells, iterated in insertion order.
///
/// Overwriting an existing entry keeps its position, removing and inserting again moves it to the end. The
/// flag bonus in scoring depends on this order.
#[derive(Clone, Debug, Default)]
pub struct CellMap {
    index: HashMap<Coord2, u64>,
    entries: BTreeMap<u64, (Coord2, CellValue)>,
    next_seq: u64,
}

impl CellMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, coords: Coord2) -> Option<CellValue> {
        let seq = self.index.get(&coords)?;
        self.entries.get(seq).map(|&(_, value)| value)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.index.contains_key(&coords)
    }

    /// Stores `value`, returning the previous value if there was one.
    pub fn insert(&mut self, coords: Coord2, value: CellValue) -> Option<CellValue> {
        if let Some(&seq) = self.index.get(&coords) {
            return self
                .entries
                .insert(seq, (coords, value))
                .map(|(_, previous)| previous);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(coords, seq);
        self.entries.insert(seq, (coords, value));
        None
    }

    pub fn remove(&mut self, coords: Coord2) -> Option<CellValue> {
        let seq = self.index.remove(&coords)?;
        self.entries.remove(&seq).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellValue)> + '_ {
        self.entries.values().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = CellValue> + '_ {
        self.entries.values().map(|&(_, value)| value)
    }
}

/// Equal when the same entries are stored in the same order.
impl PartialEq for CellMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<(Coord2, CellValue)> for CellMap {
    fn from_iter<I: IntoIterator<Item = (Coord2, CellValue)>>(iter: I) -> Self {
        let mut cells = Self::new();
        for (coords, value) in iter {
            cells.insert(coords, value);
        }
        cells
    }
}
