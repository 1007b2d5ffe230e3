use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Snapshot is corrupt or does not describe a board")]
    CorruptSave,
    #[error("Position does not map to a cell in the window")]
    InvalidCoordinateInput,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Could not encode snapshot")]
    EncodeFailed,
}

pub type Result<T> = core::result::Result<T, GameError>;
