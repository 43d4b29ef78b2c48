use serde::{Deserialize, Serialize};

/// Serialized form of a game, handed to whatever persists sessions
///
/// Only the number of tiles left in the bag is kept, not which tiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateRecord {
    /// 15x15 letters, "" for an empty cell
    pub board: Vec<Vec<String>>,
    /// 15x15 bonus codes, 0 to 4
    pub bonus_cells: Vec<Vec<u8>>,
    pub player_tiles: Vec<String>,
    pub ai_tiles: Vec<String>,
    pub player_score: i32,
    pub ai_score: i32,
    /// 1 for the human, 2 for the opponent
    pub current_player: u8,
    pub game_over: bool,
    pub first_move: bool,
    /// [row, col, letter] triples
    pub pending_move: Vec<(usize, usize, String)>,
    pub bag_count: usize,
    #[serde(default)]
    pub consecutive_passes: u8,
}
