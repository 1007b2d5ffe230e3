use core::iter::FusedIterator;

use crate::*;

/// Terminal columns taken by one rendered cell.
pub const CELL_WIDTH: u16 = 2;

/// Position of a cell inside the window, counted from the top-left cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenPos {
    pub column: u16,
    pub row: u16,
}

/// Inclusive rectangle of world coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldRect {
    pub min: Coord2,
    pub max: Coord2,
}

impl WorldRect {
    pub fn contains(&self, (x, y): Coord2) -> bool {
        (self.min.0..=self.max.0).contains(&x) && (self.min.1..=self.max.1).contains(&y)
    }
}

/// Window of `width` x `height` cells centered on the board offset.
///
/// The window spans `(width - 1) / 2` cells on each side of the center column and `(height - 1) / 2` on each
/// side of the center row, so it always has an odd number of columns and rows that fits the given size. Rows
/// go top to bottom by ascending y, columns left to right by ascending x. Rendering and click mapping both
/// go through [`Viewport::bounds`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Viewport for a widget measured in terminal characters.
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns / CELL_WIDTH, rows)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cells on each side of the center column and row.
    pub fn half_extents(&self) -> (u16, u16) {
        ((self.width - 1) / 2, (self.height - 1) / 2)
    }

    /// Number of rendered columns and rows.
    pub fn cell_dims(&self) -> (u16, u16) {
        let (half_x, half_y) = self.half_extents();
        (2 * half_x + 1, 2 * half_y + 1)
    }

    pub fn bounds(&self, (offset_x, offset_y): Coord2) -> WorldRect {
        let (half_x, half_y) = self.half_extents();
        let (half_x, half_y) = (Coord::from(half_x), Coord::from(half_y));
        WorldRect {
            min: ((-half_x).saturating_sub(offset_x), (-half_y).saturating_sub(offset_y)),
            max: (half_x.saturating_sub(offset_x), half_y.saturating_sub(offset_y)),
        }
    }

    /// World coordinates of the cell at `pos`.
    pub fn world_at(&self, offset: Coord2, pos: ScreenPos) -> Result<Coord2> {
        let (columns, rows) = self.cell_dims();
        if pos.column >= columns || pos.row >= rows {
            return Err(GameError::InvalidCoordinateInput);
        }

        let bounds = self.bounds(offset);
        let x = bounds.min.0.checked_add(Coord::from(pos.column));
        let y = bounds.min.1.checked_add(Coord::from(pos.row));
        x.zip(y).ok_or(GameError::InvalidCoordinateInput)
    }

    /// World coordinates under a terminal character position inside the widget.
    pub fn world_at_char(&self, offset: Coord2, column: u16, row: u16) -> Result<Coord2> {
        self.world_at(
            offset,
            ScreenPos {
                column: column / CELL_WIDTH,
                row,
            },
        )
    }

    /// Position of a world cell inside the window, if it is visible.
    pub fn screen_at(&self, offset: Coord2, coords: Coord2) -> Option<ScreenPos> {
        let bounds = self.bounds(offset);
        if !bounds.contains(coords) {
            return None;
        }

        let column = coords.0.checked_sub(bounds.min.0)?;
        let row = coords.1.checked_sub(bounds.min.1)?;
        Some(ScreenPos {
            column: column.try_into().ok()?,
            row: row.try_into().ok()?,
        })
    }

    pub fn window<'a, F: Minefield>(&self, board: &'a Board<F>) -> Window<'a> {
        self.window_at(board.cells(), board.offset())
    }

    pub fn window_at<'a>(&self, cells: &'a CellMap, offset: Coord2) -> Window<'a> {
        let (columns, rows) = self.cell_dims();
        Window {
            cells,
            origin: self.bounds(offset).min,
            columns,
            rows,
            column: 0,
            row: 0,
        }
    }
}

/// Row-major render codes of a window, with [`RenderCode::EndOfLine`] closing each row.
///
/// Cloning restarts from the clone's position; the sequence only reads the cell map.
#[derive(Clone, Debug)]
pub struct Window<'a> {
    cells: &'a CellMap,
    origin: Coord2,
    columns: u16,
    rows: u16,
    column: u16,
    row: u16,
}

impl Window<'_> {
    fn remaining(&self) -> usize {
        if self.row >= self.rows {
            return 0;
        }
        let per_row = usize::from(self.columns) + 1;
        usize::from(self.rows - self.row) * per_row - usize::from(self.column)
    }
}

impl Iterator for Window<'_> {
    type Item = RenderCode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.rows {
            return None;
        }

        if self.column == self.columns {
            self.column = 0;
            self.row += 1;
            return Some(RenderCode::EndOfLine);
        }

        let coords = (
            self.origin.0.saturating_add(Coord::from(self.column)),
            self.origin.1.saturating_add(Coord::from(self.row)),
        );
        self.column += 1;
        Some(RenderCode::from(self.cells.get(coords)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Window<'_> {}

impl FusedIterator for Window<'_> {}
