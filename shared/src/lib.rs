use chessbot_core::{
    engine::SearchStats,
    logic::{board::Color, game::GameEndReason},
};
use serde::{Deserialize, Serialize};

/// Messages a player sends over the socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    /// A move in standard algebraic notation, check suffixes optional.
    Move { san: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Sent once per connection, before anything else.
    Start {
        session_id: String,
        your_color: Color,
        fen: String,
    },
    /// The engine's reply.
    Move {
        san: String,
        fen: String,
        stats: SearchStats,
    },
    End {
        reason: GameEndReason,
        /// `None` for draws.
        winner: Option<Color>,
    },
    Error(String),
}
