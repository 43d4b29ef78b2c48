use std::collections::HashSet;

use serde::Serialize;

use crate::{
    dictionary::WordOracle,
    game::{error::ValidationError, grid::Board, pending::PendingMove},
    models::{Direction, Position, Tile, CENTER},
};

/// A word laid out on the board by a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormedWord {
    pub text: String,
    pub direction: Direction,
    pub cells: Vec<(Position, Tile)>,
}

impl FormedWord {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn span(&self) -> (Direction, Position, usize) {
        (self.direction, self.cells[0].0, self.cells.len())
    }
}

/// A pending move that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    pub direction: Direction,
    /// Primary word first, then crossing words in staging order
    pub words: Vec<FormedWord>,
    pub new_cells: HashSet<Position>,
}

impl ValidatedMove {
    pub fn tiles_placed(&self) -> usize {
        self.new_cells.len()
    }
}

pub struct WordValidator<'a> {
    board: &'a Board,
    first_move: bool,
    oracle: &'a dyn WordOracle,
}

impl<'a> WordValidator<'a> {
    pub fn new(board: &'a Board, first_move: bool, oracle: &'a dyn WordOracle) -> Self {
        Self {
            board,
            first_move,
            oracle,
        }
    }

    /// Runs the placement rules in order, then checks every formed word
    pub fn validate(&self, pending: &PendingMove) -> Result<ValidatedMove, ValidationError> {
        if pending.is_empty() {
            return Err(ValidationError::EmptyMove);
        }

        let positions: Vec<Position> = pending.positions().collect();
        let direction = Self::alignment(&positions)?;
        Self::check_contiguous(&positions, direction)?;

        if self.first_move {
            if !positions.contains(&CENTER) {
                return Err(ValidationError::MustCoverCenter);
            }
        } else if !positions.iter().any(|&pos| self.board.touches_letter(pos)) {
            return Err(ValidationError::NotConnected);
        }

        let words = Self::extract_words(self.board, pending, direction);
        if words.is_empty() {
            return Err(ValidationError::EmptyMove);
        }

        if let Some(word) = words.iter().find(|w| !self.is_valid_word(&w.text)) {
            return Err(ValidationError::WordNotInDictionary(word.text.clone()));
        }

        Ok(ValidatedMove {
            direction,
            words,
            new_cells: positions.into_iter().collect(),
        })
    }

    /// Check if word exists in dictionary
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.oracle.is_valid_word(word)
    }

    /// Shared row means horizontal, shared column vertical; a single tile counts as horizontal
    fn alignment(positions: &[Position]) -> Result<Direction, ValidationError> {
        let first = positions[0];
        if positions.iter().all(|p| p.row == first.row) {
            Ok(Direction::Horizontal)
        } else if positions.iter().all(|p| p.col == first.col) {
            Ok(Direction::Vertical)
        } else {
            Err(ValidationError::NotColinear)
        }
    }

    /// Only the new tiles are looked at; letters already on the board do not bridge gaps
    fn check_contiguous(positions: &[Position], direction: Direction) -> Result<(), ValidationError> {
        let mut along: Vec<usize> = positions.iter().map(|&p| direction.along(p)).collect();
        along.sort_unstable();

        if along.windows(2).all(|w| w[1] == w[0] + 1) {
            Ok(())
        } else {
            Err(ValidationError::NotAdjacent)
        }
    }

    /// Words formed once the pending tiles are laid over the board
    pub fn extract_words(board: &Board, pending: &PendingMove, direction: Direction) -> Vec<FormedWord> {
        let mut overlay = board.clone();
        for placement in pending.placements() {
            overlay.place(placement.position, placement.tile);
        }

        let primary = pending
            .positions()
            .find_map(|pos| Self::word_through(&overlay, pos, direction));

        let mut seen = HashSet::new();
        let mut crossing = Vec::new();
        for pos in pending.positions() {
            if let Some(word) = Self::word_through(&overlay, pos, direction.perp()) {
                if word.len() >= 2 && seen.insert(word.span()) {
                    crossing.push(word);
                }
            }
        }

        let mut words = Vec::with_capacity(crossing.len() + 1);
        if let Some(primary) = primary {
            // a lone letter only stands as a word when nothing else was formed
            if (primary.len() >= 2 || crossing.is_empty()) && seen.insert(primary.span()) {
                words.push(primary);
            }
        }
        words.extend(crossing);
        words
    }

    /// The run of letters along `direction` that covers `pos`
    fn word_through(board: &Board, pos: Position, direction: Direction) -> Option<FormedWord> {
        let fixed = direction.fixed(pos);
        let along = direction.along(pos);

        let (start, len) = board
            .runs(direction, fixed)
            .into_iter()
            .find(|&(start, len)| start <= along && along < start + len)?;

        let cells: Vec<(Position, Tile)> = (start..start + len)
            .filter_map(|i| {
                let cell = direction.at(fixed, i);
                board.get(cell).map(|tile| (cell, tile))
            })
            .collect();
        let text = cells.iter().map(|(_, tile)| tile.letter).collect();

        Some(FormedWord {
            text,
            direction,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dictionary::Dictionary, utils::letters::ENGLISH};

    fn stage(pending: &mut PendingMove, row: usize, col: usize, letter: char) {
        pending.push(Position::new(row, col), ENGLISH.tile(letter));
    }

    fn board_with(words: &[(usize, usize, Direction, &str)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, dir, text) in words {
            for (i, letter) in text.chars().enumerate() {
                let pos = match dir {
                    Direction::Horizontal => Position::new(row, col + i),
                    Direction::Vertical => Position::new(row + i, col),
                };
                if !board.is_occupied(pos) {
                    board.place(pos, ENGLISH.tile(letter));
                }
            }
        }
        board
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["CAT", "CATS", "AT", "TA", "AS", "TAB", "CAB", "BE", "ATE"])
    }

    fn texts(words: &[FormedWord]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_empty_move() {
        let board = Board::empty();
        let dict = dictionary();
        let validator = WordValidator::new(&board, true, &dict);
        assert_eq!(
            validator.validate(&PendingMove::new()),
            Err(ValidationError::EmptyMove)
        );
    }

    #[test]
    fn test_not_colinear() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 7, 'C');
        stage(&mut pending, 8, 8, 'A');

        let validator = WordValidator::new(&board, true, &dict);
        assert_eq!(validator.validate(&pending), Err(ValidationError::NotColinear));
    }

    #[test]
    fn test_gap_between_new_tiles() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 7, 'C');
        stage(&mut pending, 7, 9, 'T');

        let validator = WordValidator::new(&board, true, &dict);
        assert_eq!(validator.validate(&pending), Err(ValidationError::NotAdjacent));
    }

    #[test]
    fn test_existing_letter_does_not_bridge_a_gap() {
        let board = board_with(&[(7, 8, Direction::Horizontal, "A")]);
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 7, 'C');
        stage(&mut pending, 7, 9, 'T');

        let validator = WordValidator::new(&board, false, &dict);
        assert_eq!(validator.validate(&pending), Err(ValidationError::NotAdjacent));
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 6, 'C');
        stage(&mut pending, 7, 7, 'A');
        stage(&mut pending, 7, 8, 'T');
        let validator = WordValidator::new(&board, true, &dict);
        assert!(validator.validate(&pending).is_ok());

        let mut pending = PendingMove::new();
        stage(&mut pending, 3, 6, 'C');
        stage(&mut pending, 3, 7, 'A');
        stage(&mut pending, 3, 8, 'T');
        assert_eq!(
            validator.validate(&pending),
            Err(ValidationError::MustCoverCenter)
        );
    }

    #[test]
    fn test_later_move_must_touch_the_board() {
        let board = board_with(&[(7, 7, Direction::Horizontal, "CAT")]);
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 2, 2, 'A');
        stage(&mut pending, 2, 3, 'T');

        let validator = WordValidator::new(&board, false, &dict);
        assert_eq!(validator.validate(&pending), Err(ValidationError::NotConnected));
    }

    #[test]
    fn test_extension_forms_the_whole_run() {
        let board = board_with(&[(7, 7, Direction::Horizontal, "CAT")]);
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 10, 'S');

        let validator = WordValidator::new(&board, false, &dict);
        let validated = validator.validate(&pending).unwrap();
        assert_eq!(texts(&validated.words), vec!["CATS"]);
        assert_eq!(validated.tiles_placed(), 1);
    }

    #[test]
    fn test_single_tile_hook_uses_the_crossing_word() {
        let board = board_with(&[(7, 7, Direction::Horizontal, "CAT")]);
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 6, 8, 'T');

        let validator = WordValidator::new(&board, false, &dict);
        let validated = validator.validate(&pending).unwrap();
        assert_eq!(texts(&validated.words), vec!["TA"]);
        assert_eq!(validated.words[0].direction, Direction::Vertical);
    }

    #[test]
    fn test_crossing_words_are_collected() {
        // BE under the A and T of CAT also spells AB and TE downwards
        let board = board_with(&[(7, 7, Direction::Horizontal, "CAT")]);
        let dict = Dictionary::from_words(["CAT", "AB", "TE", "BE"]);
        let mut pending = PendingMove::new();
        stage(&mut pending, 8, 8, 'B');
        stage(&mut pending, 8, 9, 'E');

        let validator = WordValidator::new(&board, false, &dict);
        let validated = validator.validate(&pending).unwrap();
        assert_eq!(texts(&validated.words), vec!["BE", "AB", "TE"]);
        assert_eq!(validated.direction, Direction::Horizontal);
    }

    #[test]
    fn test_first_bad_word_is_reported() {
        let board = board_with(&[(7, 7, Direction::Horizontal, "CAT")]);
        let dict = Dictionary::from_words(["BE", "TE"]);
        let mut pending = PendingMove::new();
        stage(&mut pending, 8, 8, 'B');
        stage(&mut pending, 8, 9, 'E');

        let validator = WordValidator::new(&board, false, &dict);
        assert_eq!(
            validator.validate(&pending),
            Err(ValidationError::WordNotInDictionary("AB".into()))
        );
    }

    #[test]
    fn test_lone_tile_on_first_move_meets_the_dictionary() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 7, 'A');

        let validator = WordValidator::new(&board, true, &dict);
        assert_eq!(
            validator.validate(&pending),
            Err(ValidationError::WordNotInDictionary("A".into()))
        );
    }

    #[test]
    fn test_wildcard_stays_a_placeholder() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 7, 'C');
        stage(&mut pending, 7, 8, '*');
        stage(&mut pending, 7, 9, 'T');

        let validator = WordValidator::new(&board, true, &dict);
        assert_eq!(
            validator.validate(&pending),
            Err(ValidationError::WordNotInDictionary("C*T".into()))
        );
    }

    #[test]
    fn test_rejection_is_repeatable() {
        let board = Board::empty();
        let dict = dictionary();
        let mut pending = PendingMove::new();
        stage(&mut pending, 7, 6, 'C');
        stage(&mut pending, 7, 7, 'X');

        let validator = WordValidator::new(&board, true, &dict);
        let first = validator.validate(&pending);
        assert!(first.is_err());
        assert_eq!(validator.validate(&pending), first);
    }
}
