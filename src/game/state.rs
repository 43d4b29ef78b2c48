use rand::Rng;

use crate::{
    game::{
        bag::{Hand, TileBag},
        engine::GameState,
        error::StateError,
        grid::{Board, BonusLayout},
        pending::PendingMove,
    },
    models::{GameStateRecord, Player, Position, Tile, BOARD_SIZE, HAND_SIZE},
    utils::letters::TileSet,
};

impl GameState {
    /// Snapshot for persistence
    pub fn to_state(&self) -> GameStateRecord {
        GameStateRecord {
            board: self.board.to_rows(),
            bonus_cells: self.bonuses.to_codes(),
            player_tiles: self.human.letters(),
            ai_tiles: self.ai.letters(),
            player_score: self.human_score,
            ai_score: self.ai_score,
            current_player: self.current.number(),
            game_over: self.game_over,
            first_move: self.first_move,
            pending_move: self
                .pending
                .placements()
                .iter()
                .map(|p| (p.position.row, p.position.col, p.tile.letter.to_string()))
                .collect(),
            bag_count: self.bag.len(),
            consecutive_passes: self.consecutive_passes,
        }
    }

    /// Restores a game from a record.
    ///
    /// The record only says how many tiles the bag held, so the bag is refilled
    /// with that many tiles drawn at random from those not visible on the board
    /// or in either hand.
    pub fn from_state<R: Rng + ?Sized>(
        record: &GameStateRecord,
        tile_set: &'static TileSet,
        rng: &mut R,
    ) -> Result<GameState, StateError> {
        let board = restore_board(&record.board, tile_set)?;
        let bonuses = BonusLayout::from_codes(&record.bonus_cells)?;
        let human = restore_hand(&record.player_tiles, tile_set)?;
        let ai = restore_hand(&record.ai_tiles, tile_set)?;
        let current = Player::from_number(record.current_player)
            .ok_or(StateError::BadPlayer(record.current_player))?;

        let mut pending = PendingMove::new();
        for (row, col, letter) in &record.pending_move {
            let (row, col) = (*row, *col);
            if row >= BOARD_SIZE || col >= BOARD_SIZE {
                return Err(StateError::BadPendingMove { row, col });
            }
            let pos = Position::new(row, col);
            if board.is_occupied(pos) || pending.contains(pos) {
                return Err(StateError::BadPendingMove { row, col });
            }
            let tile = restore_tile(letter, tile_set)?;
            let hand = match current {
                Player::Human => &human,
                Player::Ai => &ai,
            };
            if hand.count(tile.letter) <= pending.count(tile.letter) {
                return Err(StateError::BadPendingMove { row, col });
            }
            pending.push(pos, tile);
        }

        let mut unseen = tile_set.full_bag();
        let visible = board
            .tiles()
            .map(|(_, tile)| tile)
            .chain(human.tiles().iter().copied())
            .chain(ai.tiles().iter().copied());
        for tile in visible {
            let idx = unseen
                .iter()
                .position(|t| t.letter == tile.letter)
                .ok_or(StateError::UnaccountedTile(tile.letter))?;
            unseen.swap_remove(idx);
        }
        if unseen.len() < record.bag_count {
            return Err(StateError::BagCountMismatch {
                expected: record.bag_count,
                available: unseen.len(),
            });
        }
        let bag = TileBag::sample(unseen, record.bag_count, rng);

        Ok(GameState {
            tile_set,
            board,
            bonuses,
            bag,
            human,
            ai,
            human_score: record.player_score,
            ai_score: record.ai_score,
            current,
            first_move: record.first_move,
            consecutive_passes: record.consecutive_passes,
            game_over: record.game_over,
            pending,
        })
    }
}

fn restore_tile(letter: &str, tile_set: &TileSet) -> Result<Tile, StateError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(tile_set.tile(c)),
        _ => Err(StateError::BadTile(letter.to_string())),
    }
}

fn restore_hand(letters: &[String], tile_set: &TileSet) -> Result<Hand, StateError> {
    if letters.len() > HAND_SIZE {
        return Err(StateError::HandTooLarge(letters.len()));
    }
    let tiles = letters
        .iter()
        .map(|letter| restore_tile(letter, tile_set))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Hand::from_tiles(tiles))
}

fn restore_board(rows: &[Vec<String>], tile_set: &TileSet) -> Result<Board, StateError> {
    if rows.len() != BOARD_SIZE || rows.iter().any(|r| r.len() != BOARD_SIZE) {
        return Err(StateError::BadDimensions {
            what: "board",
            expected: BOARD_SIZE,
        });
    }

    let mut board = Board::empty();
    for (row, cells) in rows.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (None, _) => {}
                (Some(c), None) => board.place(Position::new(row, col), tile_set.tile(c)),
                _ => {
                    return Err(StateError::BadCell {
                        row,
                        col,
                        value: value.clone(),
                    })
                }
            }
        }
    }
    Ok(board)
}
