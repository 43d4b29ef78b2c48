use rand::Rng;
use serde::Serialize;

use crate::{
    dictionary::WordOracle,
    game::{
        bag::{deal_initial_hands, Hand, TileBag},
        error::{GameError, StagingError, TurnError, ValidationError},
        grid::{Board, BonusLayout},
        pending::PendingMove,
        scorer::{MoveScore, Scorer},
        validator::WordValidator,
    },
    models::{Player, Position, TurnState},
    utils::letters::{normalize, TileSet},
};

/// Passes in a row that end the game
pub const PASSES_TO_END: u8 = 2;

/// What a successful commit did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub player: Player,
    pub score: MoveScore,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassOutcome {
    pub player: Player,
    pub consecutive_passes: u8,
    pub game_over: bool,
}

/// One game between the human and the opponent
///
/// Only `stage`, `clear_pending_move`, `commit` and `pass` mutate it, and
/// nothing changes once the game is over.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) tile_set: &'static TileSet,
    pub(super) board: Board,
    pub(super) bonuses: BonusLayout,
    pub(super) bag: TileBag,
    pub(super) human: Hand,
    pub(super) ai: Hand,
    pub(super) human_score: i32,
    pub(super) ai_score: i32,
    pub(super) current: Player,
    pub(super) first_move: bool,
    pub(super) consecutive_passes: u8,
    pub(super) game_over: bool,
    pub(super) pending: PendingMove,
}

impl GameState {
    /// Shuffles a full bag with `rng` and deals seven tiles to each side
    pub fn new<R: Rng + ?Sized>(tile_set: &'static TileSet, rng: &mut R) -> Self {
        let mut bag = TileBag::shuffled(tile_set, rng);
        let mut human = Hand::new();
        let mut ai = Hand::new();
        deal_initial_hands(&mut bag, &mut human, &mut ai);

        Self {
            tile_set,
            board: Board::empty(),
            bonuses: BonusLayout::standard(),
            bag,
            human,
            ai,
            human_score: 0,
            ai_score: 0,
            current: Player::Human,
            first_move: true,
            consecutive_passes: 0,
            game_over: false,
            pending: PendingMove::new(),
        }
    }

    pub fn tile_set(&self) -> &'static TileSet {
        self.tile_set
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bonuses(&self) -> &BonusLayout {
        &self.bonuses
    }

    pub fn bag_count(&self) -> usize {
        self.bag.len()
    }

    pub fn hand(&self, player: Player) -> &Hand {
        match player {
            Player::Human => &self.human,
            Player::Ai => &self.ai,
        }
    }

    pub fn score(&self, player: Player) -> i32 {
        match player {
            Player::Human => self.human_score,
            Player::Ai => self.ai_score,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pending_move(&self) -> &PendingMove {
        &self.pending
    }

    pub fn turn_state(&self) -> TurnState {
        match (self.game_over, self.current) {
            (true, _) => TurnState::GameOver,
            (false, Player::Human) => TurnState::WaitingHuman,
            (false, Player::Ai) => TurnState::WaitingAi,
        }
    }

    /// Higher final score; `None` while playing or on a tie
    pub fn winner(&self) -> Option<Player> {
        if !self.game_over || self.human_score == self.ai_score {
            return None;
        }
        if self.human_score > self.ai_score {
            Some(Player::Human)
        } else {
            Some(Player::Ai)
        }
    }

    /// Adds a tentative tile for `player`; the board itself is untouched
    pub fn stage(&mut self, player: Player, row: i32, col: i32, letter: char) -> Result<(), GameError> {
        self.ensure_turn(player)?;

        let pos = Position::checked(row, col).ok_or(StagingError::OutOfBounds { row, col })?;
        if self.board.is_occupied(pos) || self.pending.contains(pos) {
            return Err(StagingError::CellOccupied {
                row: pos.row,
                col: pos.col,
            }
            .into());
        }

        let letter = normalize(letter);
        let hand = self.hand(player);
        if hand.count(letter) <= self.pending.count(letter) {
            return Err(StagingError::TileNotInHand(letter).into());
        }
        let tile = hand
            .tiles()
            .iter()
            .copied()
            .find(|t| t.letter == letter)
            .ok_or(StagingError::TileNotInHand(letter))?;

        self.pending.push(pos, tile);
        Ok(())
    }

    pub fn clear_pending_move(&mut self) {
        self.pending.clear();
    }

    /// Checks the pending move and prices it without changing anything
    pub fn validate(&self, oracle: &dyn WordOracle) -> Result<MoveScore, ValidationError> {
        let validated =
            WordValidator::new(&self.board, self.first_move, oracle).validate(&self.pending)?;
        Ok(Scorer::score_move(&self.bonuses, &validated))
    }

    /// Applies the pending move for `player` and hands the turn over.
    ///
    /// A rejected move leaves the pending tiles in place for correction. Every
    /// staged tile must still be in the acting hand.
    pub fn commit(&mut self, player: Player, oracle: &dyn WordOracle) -> Result<CommitOutcome, GameError> {
        self.ensure_turn(player)?;

        let validated =
            WordValidator::new(&self.board, self.first_move, oracle).validate(&self.pending)?;
        let score = Scorer::score_move(&self.bonuses, &validated);

        let mut remaining = self.hand(player).clone();
        for placement in self.pending.placements() {
            let letter = placement.tile.letter;
            remaining
                .take(letter)
                .ok_or(StagingError::TileNotInHand(letter))?;
        }

        for placement in self.pending.placements() {
            self.board.place(placement.position, placement.tile);
        }
        remaining.replenish(&mut self.bag);
        match player {
            Player::Human => {
                self.human = remaining;
                self.human_score += score.total as i32;
            }
            Player::Ai => {
                self.ai = remaining;
                self.ai_score += score.total as i32;
            }
        }

        self.first_move = false;
        self.consecutive_passes = 0;
        self.pending.clear();
        self.current = player.other();

        tracing::debug!(
            player = ?player,
            points = score.total,
            words = ?score.words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>(),
            "Move committed"
        );

        let game_over = self.check_end();
        Ok(CommitOutcome {
            player,
            score,
            game_over,
        })
    }

    /// Gives up the turn; tiles staged by the passing side go back to its hand
    pub fn pass(&mut self, player: Player) -> Result<PassOutcome, GameError> {
        self.ensure_turn(player)?;

        self.pending.clear();
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);
        self.current = player.other();

        tracing::debug!(
            player = ?player,
            consecutive_passes = self.consecutive_passes,
            "Turn passed"
        );

        let game_over = self.check_end();
        Ok(PassOutcome {
            player,
            consecutive_passes: self.consecutive_passes,
            game_over,
        })
    }

    fn ensure_turn(&self, player: Player) -> Result<(), TurnError> {
        if self.game_over {
            return Err(TurnError::GameAlreadyOver);
        }
        if player != self.current {
            return Err(TurnError::NotYourTurn);
        }
        Ok(())
    }

    /// Ends the game when the bag and a hand are both empty, or after two passes in a row
    fn check_end(&mut self) -> bool {
        let out_of_tiles = self.bag.is_empty() && (self.human.is_empty() || self.ai.is_empty());
        if out_of_tiles || self.consecutive_passes >= PASSES_TO_END {
            self.game_over = true;
            self.finalize();
        }
        self.game_over
    }

    /// Each side loses what it still holds; a side that went out also gains the other's remainder
    fn finalize(&mut self) {
        let human_left = self.human.value() as i32;
        let ai_left = self.ai.value() as i32;

        self.human_score -= human_left;
        self.ai_score -= ai_left;

        match (self.human.is_empty(), self.ai.is_empty()) {
            (true, false) => self.human_score += ai_left,
            (false, true) => self.ai_score += human_left,
            _ => {}
        }

        tracing::debug!(
            human_score = self.human_score,
            ai_score = self.ai_score,
            "Game over"
        );
    }
}
