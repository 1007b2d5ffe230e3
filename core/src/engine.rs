use hashbrown::HashSet;
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No cell revealed yet, the next reveal gets a safe start.
    Ready,
    Active,
    /// A mine was revealed, no more moves are accepted.
    Over,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One-step scroll of the visible window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pan {
    Up,
    Down,
    Left,
    Right,
}

impl Pan {
    /// Change applied to the visible offset.
    pub const fn delta(self) -> Coord2 {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (1, 0),
            Self::Right => (-1, 0),
        }
    }
}

/// State of one game: touched cells, score, and the offsets of the visible window.
#[derive(Clone, Debug, PartialEq)]
pub struct Board<F = SeededMinefield> {
    minefield: F,
    cells: CellMap,
    offset: Coord2,
    inverse_offset: Coord,
    score: u64,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    config: BoardConfig,
}

impl Board<SeededMinefield> {
    pub fn new(seed: Seed) -> Self {
        Self::with_config(SeededMinefield::new(seed), BoardConfig::default())
    }

    pub fn random(config: BoardConfig) -> Self {
        Self::with_config(SeededMinefield::random(), config)
    }

    pub fn seed(&self) -> Seed {
        self.minefield.seed()
    }
}

impl<F: Minefield> Board<F> {
    pub fn with_config(minefield: F, config: BoardConfig) -> Self {
        Self {
            minefield,
            cells: CellMap::new(),
            offset: (0, 0),
            inverse_offset: 0,
            score: 0,
            state: Default::default(),
            triggered_mine: None,
            config,
        }
    }

    /// Rebuilds a board from saved parts, recomputing the score.
    pub(crate) fn restore(
        minefield: F,
        config: BoardConfig,
        cells: CellMap,
        offset: Coord2,
        inverse_offset: Coord,
        first_click_pending: bool,
    ) -> Self {
        let mut board = Self {
            minefield,
            cells,
            offset,
            inverse_offset,
            score: 0,
            state: if first_click_pending {
                EngineState::Ready
            } else {
                EngineState::Active
            },
            triggered_mine: None,
            config,
        };
        board.recompute_score();
        board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn minefield(&self) -> &F {
        &self.minefield
    }

    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellValue> {
        self.cells.get(coords)
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.minefield.contains_mine(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Visible scroll offset, including any safe-start shift.
    pub fn offset(&self) -> Coord2 {
        self.offset
    }

    /// Cumulative x shift applied by the safe start, zero or negative.
    pub fn inverse_offset(&self) -> Coord {
        self.inverse_offset
    }

    /// Offset as shown to the player, with the safe-start shift taken out.
    pub fn apparent_offset(&self) -> Coord2 {
        (
            self.offset.0.saturating_sub(self.inverse_offset),
            self.offset.1,
        )
    }

    pub fn pan(&mut self, pan: Pan) {
        let (dx, dy) = pan.delta();
        self.offset = (
            self.offset.0.saturating_add(dx),
            self.offset.1.saturating_add(dy),
        );
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        self.check_not_finished()?;

        let outcome = match self.cells.get(coords) {
            None => {
                self.cells.insert(coords, CellValue::Flagged);
                Changed
            }
            Some(CellValue::Flagged) => {
                self.cells.remove(coords);
                Changed
            }
            Some(CellValue::Revealed(_)) => NoChange,
        };

        if outcome.has_update() {
            self.recompute_score();
        }
        Ok(outcome)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let coords = if self.state.is_ready() {
            self.settle_first_click(coords)
        } else {
            coords
        };

        if matches!(self.cells.get(coords), Some(CellValue::Revealed(_))) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.minefield.contains_mine(coords) {
            log::debug!("Revealed mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.state = EngineState::Over;
            return Ok(RevealOutcome::GameOver);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", opened, coords);
        self.recompute_score();
        Ok(RevealOutcome::Revealed)
    }

    /// Moves the first click along +x until it lands on a clear opening, shifting the visible offset with it
    /// so the clicked cell stays under the pointer. Returns the adjusted click.
    ///
    /// Cells stored before this point, such as flags placed ahead of the first reveal, keep their world
    /// coordinates and are drawn one column further left per shift.
    fn settle_first_click(&mut self, coords: Coord2) -> Coord2 {
        let (mut x, y) = coords;
        let mut shifts = 0;

        while !self.minefield.is_clear_opening((x, y)) {
            if shifts >= self.config.max_start_shift {
                log::warn!(
                    "No clear opening within {} cells of {:?}, starting anyway",
                    shifts,
                    coords
                );
                break;
            }
            let Some(next_x) = x.checked_add(1) else {
                log::warn!("Safe start ran out of coordinates at {:?}", (x, y));
                break;
            };
            x = next_x;
            self.offset.0 = self.offset.0.saturating_sub(1);
            self.inverse_offset = self.inverse_offset.saturating_sub(1);
            shifts += 1;
        }

        if shifts > 0 {
            log::debug!("Shifted first click by {} to {:?}", shifts, (x, y));
        }
        self.state = EngineState::Active;
        (x, y)
    }

    /// Reveals `origin` and cascades breadth-first from zero cells. A zero cell at depth `d` expands only
    /// while `d` is below the depth cap. Returns how many cells were opened.
    fn flood_reveal(&mut self, origin: Coord2) -> usize {
        let depth_cap = self.config.flood_depth_cap;
        let mut opened = 0;
        let mut queued: HashSet<Coord2> = HashSet::from([origin]);
        let mut to_visit = VecDeque::from([(origin, 0u32)]);

        while let Some((coords, depth)) = to_visit.pop_front() {
            if matches!(self.cells.get(coords), Some(CellValue::Revealed(_))) {
                continue;
            }

            if self.minefield.contains_mine(coords) {
                log::trace!("Flood skipped mine at {:?}", coords);
                continue;
            }

            let count = self.minefield.adjacent_mine_count(coords);
            self.cells.insert(coords, CellValue::Revealed(count));
            opened += 1;
            log::trace!("Flood opened {:?} at depth {}, mine count: {}", coords, depth, count);

            if count != 0 {
                continue;
            }

            if depth >= depth_cap {
                log::trace!("Flood depth cap reached at {:?}", coords);
                continue;
            }

            for pos in NeighborIter::new(coords) {
                if queued.insert(pos) {
                    to_visit.push_back((pos, depth + 1));
                }
            }
        }

        opened
    }

    fn recompute_score(&mut self) {
        self.score = tally(&self.cells, self.config.flag_bonus);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MineFree;

    impl Minefield for MineFree {
        fn contains_mine(&self, _coords: Coord2) -> bool {
            false
        }
    }

    struct AllMines;

    impl Minefield for AllMines {
        fn contains_mine(&self, _coords: Coord2) -> bool {
            true
        }
    }

    struct MinesAt(Vec<Coord2>);

    impl Minefield for MinesAt {
        fn contains_mine(&self, coords: Coord2) -> bool {
            self.0.contains(&coords)
        }
    }

    fn capped(flood_depth_cap: u32) -> BoardConfig {
        BoardConfig {
            flood_depth_cap,
            ..Default::default()
        }
    }

    #[test]
    fn seed_42_opens_after_shift_then_hits_mine() {
        let mut board = Board::new(42);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.inverse_offset(), -1);
        assert_eq!(board.offset(), (-1, 0));
        assert_eq!(board.apparent_offset(), (0, 0));
        assert_eq!(board.cell_at((1, 0)), Some(CellValue::Revealed(0)));
        assert_eq!(board.cells().len(), 24);
        assert_eq!(board.score(), 30);

        assert_eq!(board.reveal((-1, 1)).unwrap(), RevealOutcome::GameOver);
        assert_eq!(board.cell_at((-1, 1)), None);
        assert_eq!(board.state(), EngineState::Over);
        assert_eq!(board.triggered_mine(), Some((-1, 1)));
        assert_eq!(board.reveal((5, 5)), Err(GameError::AlreadyEnded));
        assert_eq!(board.toggle_flag((5, 5)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn first_reveal_always_opens_an_empty_region() {
        for seed in 0..300 {
            let start = (seed as Coord % 17 - 8, seed as Coord % 11 - 5);
            let mut board = Board::new(seed);

            assert_eq!(board.reveal(start).unwrap(), RevealOutcome::Revealed);

            let shift = -board.inverse_offset();
            let clicked = (start.0 + shift, start.1);
            assert_eq!(adjacent_mine_count(clicked, seed), 0, "seed {seed}");
            assert_eq!(board.cell_at(clicked), Some(CellValue::Revealed(0)));
            assert_eq!(board.offset(), (-shift, 0));
            assert_eq!(board.apparent_offset(), (0, 0));
        }
    }

    #[test]
    fn only_first_reveal_is_shifted() {
        let mut board = Board::new(42);
        board.reveal((0, 0)).unwrap();
        let offset = board.offset();

        assert_eq!(board.reveal((-1, 1)).unwrap(), RevealOutcome::GameOver);
        assert_eq!(board.offset(), offset);
        assert_eq!(board.inverse_offset(), -1);
    }

    #[test]
    fn flag_before_first_reveal_does_not_shift() {
        let mut board = Board::new(42);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.state(), EngineState::Ready);
        assert_eq!(board.inverse_offset(), 0);
    }

    #[test]
    fn early_flag_keeps_world_position_through_safe_start() {
        let viewport = Viewport::new(40, 20);
        let mut board = Board::new(42);
        board.toggle_flag((5, 5)).unwrap();
        let drawn_before = viewport.screen_at(board.offset(), (5, 5));

        board.reveal((0, 0)).unwrap();

        assert_eq!(board.inverse_offset(), -1);
        assert_eq!(board.cell_at((5, 5)), Some(CellValue::Flagged));
        assert_eq!(drawn_before, Some(ScreenPos { column: 24, row: 14 }));
        assert_eq!(
            viewport.screen_at(board.offset(), (5, 5)),
            Some(ScreenPos { column: 23, row: 14 })
        );
    }

    #[test]
    fn zero_start_shift_reveals_in_place() {
        let config = BoardConfig {
            max_start_shift: 0,
            ..Default::default()
        };
        let mut board = Board::with_config(SeededMinefield::new(42), config);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.inverse_offset(), 0);
        assert_eq!(board.offset(), (0, 0));
        assert_eq!(
            board.cell_at((0, 0)),
            Some(CellValue::Revealed(adjacent_mine_count((0, 0), 42)))
        );
        assert_eq!(board.cells().len(), 1);
    }

    #[test]
    fn safe_start_search_is_bounded() {
        let config = BoardConfig {
            max_start_shift: 3,
            ..Default::default()
        };
        let mut board = Board::with_config(AllMines, config);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::GameOver);
        assert_eq!(board.inverse_offset(), -3);
        assert_eq!(board.triggered_mine(), Some((3, 0)));
    }

    #[test]
    fn flood_fill_stops_at_depth_cap() {
        let mut board = Board::with_config(MineFree, BoardConfig::default());

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(board.cells().len(), 201 * 201);
        assert_eq!(board.cell_at((100, 0)), Some(CellValue::Revealed(0)));
        assert_eq!(board.cell_at((-100, 100)), Some(CellValue::Revealed(0)));
        assert_eq!(board.cell_at((101, 0)), None);
        assert_eq!(board.cell_at((0, -101)), None);
    }

    #[test]
    fn flood_fill_honors_configured_cap() {
        let mut board = Board::with_config(MineFree, capped(3));
        board.reveal((10, -10)).unwrap();

        assert_eq!(board.cells().len(), 7 * 7);
        assert_eq!(board.score(), 49);
    }

    #[test]
    fn revealing_revealed_cell_is_noop() {
        let mut board = Board::new(42);
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn flag_toggle_round_trip() {
        let mut board = Board::new(42);
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.toggle_flag((50, 50)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.cell_at((50, 50)), Some(CellValue::Flagged));
        assert_eq!(board.score(), before.score() + 5);

        assert_eq!(board.toggle_flag((50, 50)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.cell_at((50, 50)), None);
        assert_eq!(board.score(), before.score());
        assert_eq!(board, before);
    }

    #[test]
    fn cannot_flag_revealed_cell() {
        let mut board = Board::new(42);
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.toggle_flag((1, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_replaces_flag() {
        let mut board = Board::with_config(MinesAt(vec![(20, 21)]), capped(0));
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((20, 20)).unwrap();

        assert_eq!(board.reveal((20, 20)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.cell_at((20, 20)), Some(CellValue::Revealed(1)));
    }

    #[test]
    fn flagged_mine_still_explodes_when_revealed() {
        let mut board = Board::with_config(MinesAt(vec![(20, 20)]), capped(0));
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((20, 20)).unwrap();

        assert_eq!(board.reveal((20, 20)).unwrap(), RevealOutcome::GameOver);
        assert_eq!(board.cell_at((20, 20)), Some(CellValue::Flagged));
    }

    #[test]
    fn flood_fill_overwrites_flags_in_place() {
        let mut board = Board::with_config(MineFree, capped(1));
        board.toggle_flag((1, 1)).unwrap();
        board.reveal((0, 0)).unwrap();

        assert_eq!(board.cell_at((1, 1)), Some(CellValue::Revealed(0)));
        assert_eq!(board.cells().iter().next(), Some(((1, 1), CellValue::Revealed(0))));
        assert_eq!(board.cells().len(), 3 * 3);
    }

    #[test]
    fn flood_fill_never_stores_mines() {
        let mines = vec![(3, 0), (-4, 2)];
        let mut board = Board::with_config(MinesAt(mines.clone()), capped(10));
        board.reveal((0, -5)).unwrap();

        assert_eq!(board.state(), EngineState::Active);
        for mine in mines {
            assert_eq!(board.cell_at(mine), None);
        }
        assert_eq!(board.cell_at((2, 0)), Some(CellValue::Revealed(1)));
    }

    #[test]
    fn score_matches_tally_after_each_move() {
        let mut board = Board::new(7);
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((30, 30)).unwrap();
        board.toggle_flag((31, 30)).unwrap();

        assert_eq!(board.score(), tally(board.cells(), FlagBonus::Tiered));
    }

    #[test]
    fn pan_moves_visible_offset_only() {
        let mut board = Board::new(42);
        board.pan(Pan::Up);
        board.pan(Pan::Left);
        board.pan(Pan::Left);
        board.pan(Pan::Right);

        assert_eq!(board.offset(), (1, 1));
        assert_eq!(board.apparent_offset(), (1, 1));
        assert!(board.cells().is_empty());

        board.pan(Pan::Down);
        assert_eq!(board.offset(), (1, 0));
    }
}
