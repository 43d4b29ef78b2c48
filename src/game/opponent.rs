use serde::Serialize;

use crate::{
    dictionary::WordOracle,
    game::{
        engine::{CommitOutcome, GameState, PassOutcome},
        error::{GameError, TurnError},
    },
    models::{Player, Position},
};

/// What the opponent decided to do with its turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentMove {
    Pass,
    Place(Vec<(Position, char)>),
}

/// Move generation for the computer side
pub trait Opponent: Send + Sync {
    fn choose_move(&self, game: &GameState, oracle: &dyn WordOracle) -> OpponentMove;
}

/// Always passes. There is no move search behind the computer side yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassingOpponent;

impl Opponent for PassingOpponent {
    fn choose_move(&self, _game: &GameState, _oracle: &dyn WordOracle) -> OpponentMove {
        OpponentMove::Pass
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TurnOutcome {
    Committed(CommitOutcome),
    Passed(PassOutcome),
}

impl TurnOutcome {
    pub fn game_over(&self) -> bool {
        match self {
            TurnOutcome::Committed(outcome) => outcome.game_over,
            TurnOutcome::Passed(outcome) => outcome.game_over,
        }
    }
}

impl GameState {
    /// Lets `opponent` play the computer's turn.
    ///
    /// A proposal that cannot be staged or committed turns into a pass.
    pub fn play_opponent_turn(
        &mut self,
        opponent: &dyn Opponent,
        oracle: &dyn WordOracle,
    ) -> Result<TurnOutcome, GameError> {
        if self.is_game_over() {
            return Err(TurnError::GameAlreadyOver.into());
        }
        if self.current_player() != Player::Ai {
            return Err(TurnError::NotYourTurn.into());
        }

        let placements = match opponent.choose_move(self, oracle) {
            OpponentMove::Pass => return self.pass(Player::Ai).map(TurnOutcome::Passed),
            OpponentMove::Place(placements) => placements,
        };

        self.clear_pending_move();
        let attempt = placements
            .iter()
            .try_for_each(|&(pos, letter)| {
                self.stage(Player::Ai, pos.row as i32, pos.col as i32, letter)
            })
            .and_then(|()| self.commit(Player::Ai, oracle));

        match attempt {
            Ok(outcome) => Ok(TurnOutcome::Committed(outcome)),
            Err(_) => {
                self.clear_pending_move();
                self.pass(Player::Ai).map(TurnOutcome::Passed)
            }
        }
    }
}
