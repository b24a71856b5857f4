pub mod board;
pub mod game;

pub use board::{CastlingRights, Color, LastMove};
pub use game::{GameEndReason, GameState};
