use thiserror::Error;

/// Rejections raised while staging a single tile; nothing is staged on failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StagingError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({row}, {col}) already holds a letter")]
    CellOccupied { row: usize, col: usize },
    #[error("letter '{0}' is not in hand")]
    TileNotInHand(char),
}

/// Reasons a pending move cannot be accepted; the pending move is kept
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no tiles have been placed")]
    EmptyMove,
    #[error("tiles must be placed in a single row or column")]
    NotColinear,
    #[error("placed tiles must be next to each other")]
    NotAdjacent,
    #[error("the first word must cover the centre cell")]
    MustCoverCenter,
    #[error("the move must touch a letter already on the board")]
    NotConnected,
    #[error("'{0}' is not in the dictionary")]
    WordNotInDictionary(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("the game is already over")]
    GameAlreadyOver,
}

/// Problems found while restoring a persisted record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("{what} must be a {expected}x{expected} grid")]
    BadDimensions { what: &'static str, expected: usize },
    #[error("cell ({row}, {col}) must hold at most one letter, got {value:?}")]
    BadCell { row: usize, col: usize, value: String },
    #[error("bonus code {0} is not between 0 and 4")]
    BadBonusCode(u8),
    #[error("a hand holds {0} tiles, more than 7")]
    HandTooLarge(usize),
    #[error("tile {0:?} must be a single letter")]
    BadTile(String),
    #[error("current player must be 1 or 2, got {0}")]
    BadPlayer(u8),
    #[error("pending placement at ({row}, {col}) is invalid")]
    BadPendingMove { row: usize, col: usize },
    #[error("the tile set holds no more {0:?} tiles than are already on view")]
    UnaccountedTile(char),
    #[error("only {available} unseen tiles remain but the bag should hold {expected}")]
    BagCountMismatch { expected: usize, available: usize },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("the tile bag is empty")]
pub struct BagEmpty;

/// Any failure an engine operation can report
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Staging(#[from] StagingError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError {
    /// Stable identifier hosts can branch on
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Staging(e) => match e {
                StagingError::OutOfBounds { .. } => "out_of_bounds",
                StagingError::CellOccupied { .. } => "cell_occupied",
                StagingError::TileNotInHand(_) => "tile_not_in_hand",
            },
            GameError::Validation(e) => match e {
                ValidationError::EmptyMove => "empty_move",
                ValidationError::NotColinear => "not_colinear",
                ValidationError::NotAdjacent => "not_adjacent",
                ValidationError::MustCoverCenter => "must_cover_center",
                ValidationError::NotConnected => "not_connected",
                ValidationError::WordNotInDictionary(_) => "word_not_in_dictionary",
            },
            GameError::Turn(e) => match e {
                TurnError::NotYourTurn => "not_your_turn",
                TurnError::GameAlreadyOver => "game_already_over",
            },
            GameError::State(_) => "invalid_state",
        }
    }
}
