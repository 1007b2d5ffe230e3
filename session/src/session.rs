use infisweep_core::snapshot;
use infisweep_core::{Board, Pan, RevealOutcome, SeededMinefield, Viewport, Window};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    /// Reveals the cell.
    Primary,
    /// Toggles a flag.
    Secondary,
}

/// Host input, already decoded from whatever toolkit the host uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Click at a terminal character position relative to the board widget.
    Click { column: u16, row: u16, button: Button },
    Pan(Pan),
    ToggleNumbers,
    Save,
    Load,
    NewGame,
    /// Board widget resized, in terminal characters.
    Resize { columns: u16, rows: u16 },
}

/// What an input did, so the host knows whether to repaint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Ignored,
    Updated,
    GameOver,
    Saved,
    Loaded,
    NoSaveFound,
    SaveFailed,
}

impl Signal {
    pub const fn needs_repaint(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    const fn notice(self) -> Option<&'static str> {
        match self {
            Self::Saved => Some("Saved!"),
            Self::Loaded => Some("Loaded!"),
            Self::NoSaveFound => Some("No save found!"),
            Self::SaveFailed => Some("Save failed!"),
            _ => None,
        }
    }
}

/// One live game as seen by a host: the board, the window onto it, and the save slot.
#[derive(Debug)]
pub struct Session<S = FileStore> {
    board: Board,
    viewport: Viewport,
    numbers_visible: bool,
    store: S,
    config: SessionConfig,
    notice: Option<&'static str>,
}

impl Session<FileStore> {
    /// Session saving to `config.save_path`, for a board widget of `columns` x `rows` characters.
    pub fn from_config(config: SessionConfig, columns: u16, rows: u16) -> Self {
        let store = FileStore::new(config.save_path.clone());
        Self::new(config, store, Viewport::from_terminal(columns, rows))
    }
}

impl<S: SaveStore> Session<S> {
    pub fn new(config: SessionConfig, store: S, viewport: Viewport) -> Self {
        let board = match config.seed {
            Some(seed) => Board::with_config(SeededMinefield::new(seed), config.board),
            None => Board::random(config.board),
        };
        log::debug!("New session with seed {}", board.seed());

        Self {
            board,
            viewport,
            numbers_visible: config.numbers_visible,
            store,
            config,
            notice: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn numbers_visible(&self) -> bool {
        self.numbers_visible
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn handle(&mut self, input: Input) -> Signal {
        let signal = match input {
            Input::Click {
                column,
                row,
                button,
            } => self.click(column, row, button),
            Input::Pan(pan) => {
                self.board.pan(pan);
                Signal::Updated
            }
            Input::ToggleNumbers => {
                self.numbers_visible = !self.numbers_visible;
                Signal::Updated
            }
            Input::Save => self.save(),
            Input::Load => self.load(),
            Input::NewGame => {
                self.board = Board::random(self.config.board);
                log::debug!("New game with seed {}", self.board.seed());
                Signal::Updated
            }
            Input::Resize { columns, rows } => {
                self.viewport = Viewport::from_terminal(columns, rows);
                Signal::Updated
            }
        };

        if signal.needs_repaint() {
            self.notice = signal.notice();
        }
        signal
    }

    /// Status line for the host's title bar.
    pub fn title(&self) -> String {
        if let Some(notice) = self.notice {
            format!("Infisweep - {}", notice)
        } else if self.board.is_finished() {
            "Infisweep - Game Over!".to_owned()
        } else {
            let (x, y) = self.board.apparent_offset();
            format!("Infisweep - ({}, {}) - Score: {}", x, y, self.board.score())
        }
    }

    pub fn window(&self) -> Window<'_> {
        self.viewport.window(&self.board)
    }

    /// Styles to paint, row by row, each row closed by an end-of-line entry.
    pub fn frame(&self) -> impl Iterator<Item = CellStyle> + '_ {
        let numbers_visible = self.numbers_visible;
        self.window().map(move |code| style_for(code, numbers_visible))
    }

    fn click(&mut self, column: u16, row: u16, button: Button) -> Signal {
        if self.board.is_finished() {
            return Signal::Ignored;
        }
        let Ok(coords) = self
            .viewport
            .world_at_char(self.board.offset(), column, row)
        else {
            return Signal::Ignored;
        };

        match button {
            Button::Primary => match self.board.reveal(coords) {
                Ok(RevealOutcome::Revealed) => Signal::Updated,
                Ok(RevealOutcome::GameOver) => Signal::GameOver,
                Ok(RevealOutcome::NoChange) | Err(_) => Signal::Ignored,
            },
            Button::Secondary => match self.board.toggle_flag(coords) {
                Ok(outcome) if outcome.has_update() => Signal::Updated,
                _ => Signal::Ignored,
            },
        }
    }

    fn save(&mut self) -> Signal {
        if self.board.is_finished() {
            return Signal::Ignored;
        }

        let written = snapshot::save(&self.board)
            .map_err(SessionError::from)
            .and_then(|bytes| Ok(self.store.write(&bytes)?));
        match written {
            Ok(()) => {
                log::debug!("Saved board with seed {}", self.board.seed());
                Signal::Saved
            }
            Err(err) => {
                log::warn!("Save failed: {}", err);
                Signal::SaveFailed
            }
        }
    }

    fn load(&mut self) -> Signal {
        match self.read_save() {
            Ok(Some(board)) => {
                log::debug!("Loaded board with seed {}", board.seed());
                self.board = board;
                Signal::Loaded
            }
            Ok(None) => Signal::NoSaveFound,
            Err(err) => {
                log::warn!("Ignoring unreadable save: {}", err);
                Signal::NoSaveFound
            }
        }
    }

    fn read_save(&self) -> Result<Option<Board>> {
        let Some(bytes) = self.store.read()? else {
            return Ok(None);
        };
        Ok(Some(snapshot::load(&bytes, self.config.board)?))
    }
}
