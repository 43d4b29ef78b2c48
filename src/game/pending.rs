use serde::{Deserialize, Serialize};

use crate::models::{Position, Tile};

/// One tentative tile on the board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Placement {
    pub position: Position,
    pub tile: Tile,
}

/// Tiles staged for the current turn, in staging order
///
/// Nothing here touches the board until the move is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMove {
    placements: Vec<Placement>,
}

impl PendingMove {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Position, tile: Tile) {
        self.placements.push(Placement { position, tile });
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn contains(&self, position: Position) -> bool {
        self.placements.iter().any(|p| p.position == position)
    }

    /// Staged copies of `letter`
    pub fn count(&self, letter: char) -> usize {
        self.placements.iter().filter(|p| p.tile.letter == letter).count()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.placements.iter().map(|p| p.position)
    }
}
