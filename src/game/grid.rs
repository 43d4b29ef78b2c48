use crate::{
    game::error::StateError,
    models::{Direction, Position, Tile, BOARD_CELLS, BOARD_SIZE},
};

/// Committed letters, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Tile>; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        if pos.row >= BOARD_SIZE || pos.col >= BOARD_SIZE {
            return None;
        }
        self.cells[pos.index()]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Fills an empty cell. A filled cell keeps its letter.
    pub fn place(&mut self, pos: Position, tile: Tile) {
        let cell = &mut self.cells[pos.index()];
        debug_assert!(cell.is_none(), "cell {:?} written twice", pos);
        if cell.is_none() {
            *cell = Some(tile);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// True if any orthogonal neighbour of `pos` holds a letter
    pub fn touches_letter(&self, pos: Position) -> bool {
        pos.neighbours().any(|n| self.is_occupied(n))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|tile| (Position::new(i / BOARD_SIZE, i % BOARD_SIZE), tile))
        })
    }

    /// Maximal runs of filled cells on one line, as (start, length)
    pub fn runs(&self, dir: Direction, fixed: usize) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;

        for along in 0..BOARD_SIZE {
            match (self.is_occupied(dir.at(fixed, along)), start) {
                (true, None) => start = Some(along),
                (false, Some(s)) => {
                    runs.push((s, along - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, BOARD_SIZE - s));
        }

        runs
    }

    /// Letters as persisted: "" for empty cells
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| {
                        self.get(Position::new(row, col))
                            .map(|tile| tile.letter.to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

/// Score modifier printed on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bonus {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Bonus {
    pub fn code(self) -> u8 {
        match self {
            Bonus::None => 0,
            Bonus::DoubleLetter => 1,
            Bonus::TripleLetter => 2,
            Bonus::DoubleWord => 3,
            Bonus::TripleWord => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Bonus::None),
            1 => Some(Bonus::DoubleLetter),
            2 => Some(Bonus::TripleLetter),
            3 => Some(Bonus::DoubleWord),
            4 => Some(Bonus::TripleWord),
            _ => None,
        }
    }

    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }
}

/// Bonus cells of the board; never changes once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusLayout {
    cells: [Bonus; BOARD_CELLS],
}

impl Default for BonusLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl BonusLayout {
    /// The classic layout, symmetric around the centre
    pub fn standard() -> Self {
        let mut cells = [Bonus::None; BOARD_CELLS];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                cells[Position::new(row, col).index()] = Self::standard_bonus(row, col);
            }
        }
        Self { cells }
    }

    fn standard_bonus(row: usize, col: usize) -> Bonus {
        // distance from the centre line folds the board onto one quadrant
        let fold = |a: usize| a.abs_diff(BOARD_SIZE / 2);

        match (fold(row), fold(col)) {
            (7, 0) | (0, 7) | (7, 7) => Bonus::TripleWord,

            (1, 1) | (4, 0) | (0, 4) | (5, 1) | (1, 5) | (7, 4) | (4, 7) => Bonus::DoubleLetter,

            (2, 2) | (6, 2) | (2, 6) => Bonus::TripleLetter,

            (r, c) if r == c => Bonus::DoubleWord,

            _ => Bonus::None,
        }
    }

    /// Restores a persisted layout
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, StateError> {
        if rows.len() != BOARD_SIZE || rows.iter().any(|r| r.len() != BOARD_SIZE) {
            return Err(StateError::BadDimensions {
                what: "bonusCells",
                expected: BOARD_SIZE,
            });
        }

        let mut cells = [Bonus::None; BOARD_CELLS];
        for (row, codes) in rows.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                cells[Position::new(row, col).index()] =
                    Bonus::from_code(code).ok_or(StateError::BadBonusCode(code))?;
            }
        }
        Ok(Self { cells })
    }

    pub fn at(&self, pos: Position) -> Bonus {
        self.cells[pos.index()]
    }

    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| self.at(Position::new(row, col)).code())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CENTER;

    fn tile(letter: char) -> Tile {
        Tile { letter, value: 1 }
    }

    #[test]
    fn test_standard_layout_landmarks() {
        let layout = BonusLayout::standard();
        assert_eq!(layout.at(CENTER), Bonus::DoubleWord);
        assert_eq!(layout.at(Position::new(0, 0)), Bonus::TripleWord);
        assert_eq!(layout.at(Position::new(0, 7)), Bonus::TripleWord);
        assert_eq!(layout.at(Position::new(14, 14)), Bonus::TripleWord);
        assert_eq!(layout.at(Position::new(0, 3)), Bonus::DoubleLetter);
        assert_eq!(layout.at(Position::new(1, 5)), Bonus::TripleLetter);
        assert_eq!(layout.at(Position::new(5, 5)), Bonus::TripleLetter);
        assert_eq!(layout.at(Position::new(1, 1)), Bonus::DoubleWord);
        assert_eq!(layout.at(Position::new(7, 8)), Bonus::None);
    }

    #[test]
    fn test_standard_layout_counts() {
        let codes = BonusLayout::standard().to_codes();
        let count = |code: u8| codes.iter().flatten().filter(|&&c| c == code).count();
        assert_eq!(count(1), 24);
        assert_eq!(count(2), 12);
        assert_eq!(count(3), 17);
        assert_eq!(count(4), 8);
    }

    #[test]
    fn test_layout_codes_survive_a_reload() {
        let layout = BonusLayout::standard();
        assert_eq!(BonusLayout::from_codes(&layout.to_codes()), Ok(layout));
    }

    #[test]
    fn test_layout_rejects_unknown_codes() {
        let mut codes = BonusLayout::standard().to_codes();
        codes[3][3] = 9;
        assert_eq!(
            BonusLayout::from_codes(&codes),
            Err(StateError::BadBonusCode(9))
        );
        assert!(BonusLayout::from_codes(&codes[..14]).is_err());
    }

    #[test]
    fn test_out_of_range_reads_are_empty() {
        let board = Board::empty();
        assert_eq!(board.get(Position::new(15, 0)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::empty();
        board.place(CENTER, tile('A'));
        assert_eq!(board.get(CENTER).map(|t| t.letter), Some('A'));
        assert!(board.touches_letter(Position::new(7, 8)));
        assert!(!board.touches_letter(Position::new(9, 9)));
    }

    #[test]
    fn test_runs_split_on_gaps() {
        let mut board = Board::empty();
        for col in [0, 1, 4, 5, 6, 14] {
            board.place(Position::new(2, col), tile('X'));
        }
        assert_eq!(
            board.runs(Direction::Horizontal, 2),
            vec![(0, 2), (4, 3), (14, 1)]
        );
        assert!(board.runs(Direction::Vertical, 3).is_empty());
    }
}
