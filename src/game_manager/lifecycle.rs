use crate::game_manager::{session::Session, AppState, Tx};
use chessbot_core::logic::game::GameState;
use shared::ServerMessage;
use std::sync::Arc;

impl AppState {
    pub fn add_player(self: &Arc<Self>, id: String, tx: Tx) {
        self.add_player_with_game(id, tx, GameState::new());
    }

    /// Opens a session on `game`. If the engine is the side to move it starts
    /// thinking right away.
    pub fn add_player_with_game(self: &Arc<Self>, id: String, tx: Tx, game: GameState) {
        let engine_color = self.config.engine_side.pick();
        let session = Session::new(tx, game, engine_color);
        tracing::info!(player_id = %id, engine_color = ?engine_color, "Session opened");

        session.send(ServerMessage::Start {
            session_id: id.clone(),
            your_color: engine_color.opposite(),
            fen: session.game.fen(),
        });
        let engine_first = session.engine_to_move();
        self.sessions.insert(id.clone(), session);

        if engine_first {
            self.start_engine_turn(&id);
        }
    }

    /// A search still running for this session finishes on its own and its
    /// result is dropped.
    pub fn remove_player(&self, id: &str) {
        if let Some((_, session)) = self.sessions.remove(id) {
            tracing::info!(
                player_id = %id,
                plies = session.game.plies_played(),
                searching = session.is_searching(),
                idle_secs = session.last_activity.elapsed().as_secs(),
                "Session closed"
            );
        }
    }
}
