use std::collections::HashSet;

use serde::Serialize;

use crate::{
    game::{
        grid::BonusLayout,
        validator::{FormedWord, ValidatedMove},
    },
    models::{Position, HAND_SIZE},
};

/// Flat bonus for emptying a full hand in one move
pub const BINGO_BONUS: u32 = 50;

/// Points earned by one formed word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordScore {
    pub word: String,
    pub score: u32,
}

/// Result of scoring a whole move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveScore {
    pub words: Vec<WordScore>,
    pub bingo: bool,
    /// Sum of word scores plus the bingo bonus
    pub total: u32,
}

pub struct Scorer;

impl Scorer {
    /// Calculate the score of an accepted move.
    ///
    /// Scoring rules:
    /// - Each letter scores its face value; wildcards score nothing
    /// - DL/TL multiply a letter only when it was placed this turn
    /// - DW/TW under new tiles multiply the whole word, and compound (two DW give x4)
    /// - Letters already on the board count at face value
    /// - +50 flat when exactly seven tiles were placed (not multiplied)
    pub fn score_move(bonuses: &BonusLayout, validated: &ValidatedMove) -> MoveScore {
        let words: Vec<WordScore> = validated
            .words
            .iter()
            .map(|word| WordScore {
                word: word.text.clone(),
                score: Self::calculate_score(bonuses, word, &validated.new_cells),
            })
            .collect();

        let bingo = validated.tiles_placed() == HAND_SIZE;
        let total = words.iter().map(|w| w.score).sum::<u32>() + Self::bingo_bonus(bingo);

        MoveScore { words, bingo, total }
    }

    /// Score of a single word given which of its cells are new
    pub fn calculate_score(
        bonuses: &BonusLayout,
        word: &FormedWord,
        new_cells: &HashSet<Position>,
    ) -> u32 {
        let mut letter_score_total = 0;
        let mut word_multiplier = 1;

        for (pos, tile) in &word.cells {
            if new_cells.contains(pos) {
                let bonus = bonuses.at(*pos);
                letter_score_total += tile.value * bonus.letter_multiplier();
                word_multiplier *= bonus.word_multiplier();
            } else {
                letter_score_total += tile.value;
            }
        }

        letter_score_total * word_multiplier
    }

    fn bingo_bonus(bingo: bool) -> u32 {
        if bingo { BINGO_BONUS } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Direction, Tile},
        utils::letters::ENGLISH,
    };

    fn word(cells: &[(usize, usize, char)], direction: Direction) -> FormedWord {
        let cells: Vec<(Position, Tile)> = cells
            .iter()
            .map(|&(row, col, letter)| (Position::new(row, col), ENGLISH.tile(letter)))
            .collect();
        FormedWord {
            text: cells.iter().map(|(_, t)| t.letter).collect(),
            direction,
            cells,
        }
    }

    fn all_new(word: &FormedWord) -> HashSet<Position> {
        word.cells.iter().map(|(pos, _)| *pos).collect()
    }

    #[test]
    fn test_bingo_bonus() {
        assert_eq!(Scorer::bingo_bonus(false), 0);
        assert_eq!(Scorer::bingo_bonus(true), 50);
    }

    #[test]
    fn test_center_doubles_the_word() {
        let bonuses = BonusLayout::standard();
        let cat = word(&[(7, 7, 'C'), (7, 8, 'A'), (7, 9, 'T')], Direction::Horizontal);

        // C(3) + A(1) + T(1) = 5, x2 for the centre
        assert_eq!(Scorer::calculate_score(&bonuses, &cat, &all_new(&cat)), 10);
    }

    #[test]
    fn test_letter_bonus_only_for_new_tiles() {
        let bonuses = BonusLayout::standard();
        // (6, 6) is a DL cell
        let za = word(&[(6, 6, 'Z'), (6, 7, 'A')], Direction::Horizontal);

        let new_cells = all_new(&za);
        assert_eq!(Scorer::calculate_score(&bonuses, &za, &new_cells), 21);

        let only_a: HashSet<_> = [Position::new(6, 7)].into_iter().collect();
        assert_eq!(Scorer::calculate_score(&bonuses, &za, &only_a), 11);
    }

    #[test]
    fn test_word_bonuses_compound() {
        let bonuses = BonusLayout::standard();
        // (3, 3) and (3, 11) are both DW
        let letters = ['A', 'B', 'S', 'O', 'R', 'B', 'E', 'R', 'S'];
        let cells: Vec<(usize, usize, char)> = letters
            .iter()
            .enumerate()
            .map(|(i, &c)| (3, 3 + i, c))
            .collect();
        let long = word(&cells, Direction::Horizontal);

        // A1 B3 S1 O1 R1 B3 E1 R1 S1 = 13; the DL at (3, 7) under R adds 1 -> 14; x2 x2 = 56
        assert_eq!(Scorer::calculate_score(&bonuses, &long, &all_new(&long)), 56);
    }

    #[test]
    fn test_old_bonus_cells_are_spent() {
        let bonuses = BonusLayout::standard();
        let cats = word(
            &[(7, 7, 'C'), (7, 8, 'A'), (7, 9, 'T'), (7, 10, 'S')],
            Direction::Horizontal,
        );
        let only_s: HashSet<_> = [Position::new(7, 10)].into_iter().collect();

        assert_eq!(Scorer::calculate_score(&bonuses, &cats, &only_s), 6);
    }

    #[test]
    fn test_wildcard_scores_nothing_even_on_a_bonus() {
        let bonuses = BonusLayout::standard();
        let blank = word(&[(6, 6, '*'), (6, 7, 'A')], Direction::Horizontal);
        assert_eq!(Scorer::calculate_score(&bonuses, &blank, &all_new(&blank)), 1);
    }

    #[test]
    fn test_seven_tiles_earn_the_bingo() {
        let bonuses = BonusLayout::standard();
        let cells: Vec<(usize, usize, char)> = "RETAINS"
            .chars()
            .enumerate()
            .map(|(i, c)| (7, 3 + i, c))
            .collect();
        let retains = word(&cells, Direction::Horizontal);
        let validated = ValidatedMove {
            direction: Direction::Horizontal,
            new_cells: all_new(&retains),
            words: vec![retains],
        };

        let score = Scorer::score_move(&bonuses, &validated);
        assert!(score.bingo);
        // seven 1-point letters, (7, 3) is DL, centre DW: (7 + 1) * 2 + 50
        assert_eq!(score.total, 66);
        assert_eq!(score.words[0].score, 16);
    }
}
