pub mod game;
pub mod state;

pub use game::{
    // Board geometry
    Direction, Position, BOARD_CELLS, BOARD_SIZE, CENTER, HAND_SIZE,
    // Turn bookkeeping
    Player, Tile, TurnState,
};
pub use state::GameStateRecord;
