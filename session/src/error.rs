use infisweep_core::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
