use std::path::PathBuf;

use crate::game::Side;

/// Errors that can occur when loading or validating configuration.
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

    #[error("board size must be 4, 6, 8 or 10 (got {0})")]
    UnsupportedSize(usize),
}

/// A rejected disc placement. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("{side} cannot play ({row}, {col}): no discs would be flipped")]
    NoFlips { row: usize, col: usize, side: Side },

    #[error("the game is over")]
    GameOver,
}

/// Errors from the move search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{side} has no legal move")]
    NoLegalMove { side: Side },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error("no move to undo")]
    NoHistory,
}

/// Why a recorded move history could not be replayed.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(ConfigError),

    #[error("move {index} was recorded for the wrong side (expected {expected})")]
    WrongSide { index: usize, expected: Side },

    #[error("move {index} is illegal: {source}")]
    Illegal { index: usize, source: MoveError },

    #[error("move {index} flips differ from the recorded flips")]
    FlipMismatch { index: usize },
}

/// Errors that can occur while saving a game.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize game: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur while loading a saved game.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path} does not describe a valid game: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Errors from exporting the last search tree. Never fatal to the game.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no search has been recorded yet")]
    NoSearch,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors returned by the session command surface.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Undo(#[from] UndoError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("a computer move is still being searched")]
    SearchInProgress,

    #[error("no computer move is being searched")]
    NoSearchPending,

    #[error("search worker panicked")]
    WorkerPanicked,
}
