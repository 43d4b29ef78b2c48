// Game engine modules

pub mod bag;
pub mod engine;
pub mod error;
pub mod grid;
pub mod opponent;
pub mod pending;
pub mod scorer;
pub mod state;
pub mod validator;

pub use bag::{Hand, TileBag};
pub use engine::{CommitOutcome, GameState, PassOutcome};
pub use error::{GameError, StagingError, StateError, TurnError, ValidationError};
pub use grid::{Board, Bonus, BonusLayout};
pub use opponent::{Opponent, OpponentMove, PassingOpponent, TurnOutcome};
pub use pending::{PendingMove, Placement};
pub use scorer::{MoveScore, Scorer, WordScore};
pub use validator::{FormedWord, ValidatedMove, WordValidator};
