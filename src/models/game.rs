use serde::{Deserialize, Serialize};

/// Width and height of the board
pub const BOARD_SIZE: usize = 15;

/// Number of cells on the board
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Maximum number of tiles a hand holds
pub const HAND_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// The cell every first move must cover
pub const CENTER: Position = Position { row: 7, col: 7 };

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts signed caller input, rejecting anything off the board
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Row-major offset into a flat grid
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Orthogonal neighbours that lie on the board
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            (row + 1 < BOARD_SIZE).then(|| Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            (col + 1 < BOARD_SIZE).then(|| Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Axis a move is laid along
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn perp(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Coordinate that varies along this direction
    pub fn along(self, pos: Position) -> usize {
        match self {
            Self::Horizontal => pos.col,
            Self::Vertical => pos.row,
        }
    }

    /// Coordinate that stays fixed along this direction
    pub fn fixed(self, pos: Position) -> usize {
        self.perp().along(pos)
    }

    /// Position on line `fixed` at offset `along`
    pub fn at(self, fixed: usize, along: usize) -> Position {
        match self {
            Self::Horizontal => Position::new(fixed, along),
            Self::Vertical => Position::new(along, fixed),
        }
    }
}

/// The two sides of a game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Self::Human => Self::Ai,
            Self::Ai => Self::Human,
        }
    }

    /// Wire number used by persisted records
    pub fn number(self) -> u8 {
        match self {
            Self::Human => 1,
            Self::Ai => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Human),
            2 => Some(Self::Ai),
            _ => None,
        }
    }
}

/// Where the turn controller currently stands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    WaitingHuman,
    WaitingAi,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Tile {
    pub letter: char,
    pub value: u32,
}
