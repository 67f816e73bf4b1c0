use std::path::PathBuf;

/// Reasons a drop is rejected. A rejected drop never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameAlreadyOver,
}

/// A move list could not be replayed from the initial position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("move {index} (column {column}) rejected: {source}")]
pub struct ReplayError {
    pub index: usize,
    pub column: usize,
    pub source: MoveError,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
