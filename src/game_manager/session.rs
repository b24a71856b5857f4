use chessbot_core::logic::board::Color;
use chessbot_core::logic::game::GameState;
use chessbot_core::worker::SearchWorker;
use shared::ServerMessage;
use std::time::Instant;
use tokio::sync::mpsc;

pub type Tx = mpsc::UnboundedSender<ServerMessage>;

/// One human against the engine.
pub struct Session {
    pub tx: Tx,
    pub game: GameState,
    pub engine_color: Color,
    /// Taken while a search runs, so `None` means the engine is thinking.
    pub worker: Option<SearchWorker>,
    pub game_ended: bool,
    pub last_activity: Instant,
}

impl Session {
    pub fn new(tx: Tx, game: GameState, engine_color: Color) -> Self {
        Self {
            tx,
            game,
            engine_color,
            worker: Some(SearchWorker::new()),
            game_ended: false,
            last_activity: Instant::now(),
        }
    }

    pub const fn is_searching(&self) -> bool {
        self.worker.is_none()
    }

    pub fn engine_to_move(&self) -> bool {
        self.game.turn() == self.engine_color
    }

    pub fn send(&self, msg: ServerMessage) {
        if self.tx.send(msg).is_err() {
            tracing::debug!("Dropping message for closed connection");
        }
    }

    /// Checks the game for an end and tells the player. Returns whether the
    /// game is over.
    pub fn check_end(&mut self) -> bool {
        let Some(reason) = self.game.end_reason() else {
            return false;
        };
        self.game_ended = true;
        tracing::info!(reason = ?reason, plies = self.game.plies_played(), "Game ended");
        self.send(ServerMessage::End {
            reason,
            winner: self.game.winner(),
        });
        true
    }
}
