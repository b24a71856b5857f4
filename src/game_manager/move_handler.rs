use crate::game_manager::{AppState, Session};
use chessbot_core::engine::SearchPosition;
use chessbot_core::worker::{Input, Output, SearchWorker};
use shared::ServerMessage;
use std::sync::Arc;
use std::time::Instant;

impl AppState {
    pub fn handle_move(self: &Arc<Self>, player_id: &str, san: &str) {
        let Some(mut session) = self.sessions.get_mut(player_id) else {
            tracing::warn!(player_id = %player_id, "Move for unknown session");
            return;
        };

        if session.game_ended {
            session.send(ServerMessage::Error("the game is over".to_string()));
            return;
        }
        if session.is_searching() || session.engine_to_move() {
            session.send(ServerMessage::Error("wait for the engine's move".to_string()));
            return;
        }

        if let Err(e) = session.game.play_san(san) {
            tracing::debug!(player_id = %player_id, san = %san, error = %e, "Rejected move");
            session.send(ServerMessage::Error(e.to_string()));
            return;
        }
        session.last_activity = Instant::now();
        tracing::debug!(player_id = %player_id, san = %san, "Player moved");

        if session.check_end() {
            return;
        }
        drop(session);

        self.start_engine_turn(player_id);
    }

    /// Hands a snapshot of the game to a blocking search task. Does nothing
    /// if a search is already running for this session.
    pub(crate) fn start_engine_turn(self: &Arc<Self>, player_id: &str) {
        let (worker, input) = {
            let Some(mut session) = self.sessions.get_mut(player_id) else {
                return;
            };
            let Some(worker) = session.worker.take() else {
                return;
            };
            let input = Input::ComputeMove {
                game: session.game.clone(),
                own_color: session.engine_color,
                config: self.config.search.clone(),
            };
            (worker, input)
        };

        let state = Arc::clone(self);
        let player_id = player_id.to_string();
        tokio::spawn(async move {
            state.run_search(player_id, worker, input).await;
        });
    }

    async fn run_search(self: Arc<Self>, player_id: String, mut worker: SearchWorker, input: Input) {
        let permit = match Arc::clone(&self.search_slots).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(error = %e, "Search pool closed");
                self.finish_search(&player_id, worker, Err("engine unavailable".to_string()));
                return;
            }
        };

        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let result = worker.received(input);
            (worker, result)
        });

        let (worker, result) = match task.await {
            Ok((worker, result)) => (worker, result.map_err(|e| e.to_string())),
            Err(e) => {
                tracing::error!(player_id = %player_id, error = %e, "Search task failed");
                (SearchWorker::new(), Err(format!("search failed: {e}")))
            }
        };
        self.finish_search(&player_id, worker, result);
    }

    pub(super) fn finish_search(&self, player_id: &str, worker: SearchWorker, result: Result<Output, String>) {
        let Some(mut session) = self.sessions.get_mut(player_id) else {
            tracing::debug!(player_id = %player_id, "Session closed during search");
            return;
        };
        session.worker = Some(worker);

        match result {
            Ok(Output::MoveFound { san, fen, stats }) => {
                if let Err(e) = session.game.play_san(&san) {
                    tracing::error!(player_id = %player_id, san = %san, error = %e, "Engine move does not replay");
                    abandon_engine_turn(&mut session, format!("engine move {san}: {e}"));
                    return;
                }
                tracing::info!(
                    player_id = %player_id,
                    san = %san,
                    nodes = stats.nodes,
                    elapsed_secs = stats.elapsed_secs,
                    score = stats.score.best,
                    max_depth = ?stats.depth.map(|d| d.max),
                    time_cutoff = ?stats.time_cutoff_depth,
                    "Engine moved"
                );
                session.last_activity = Instant::now();
                session.send(ServerMessage::Move { san, fen, stats });
                session.check_end();
            }
            Err(message) => {
                tracing::warn!(player_id = %player_id, error = %message, "Search produced no move");
                abandon_engine_turn(&mut session, message);
            }
        }
    }
}

/// The engine owes a move it cannot deliver. Takes back the player's last
/// move so they can play again, or ends the game when the engine was to open
/// and there is nothing to take back.
fn abandon_engine_turn(session: &mut Session, message: String) {
    let player_moved_last = session
        .game
        .last_move()
        .is_some_and(|last| last.mover != session.engine_color);

    if player_moved_last {
        session.game.undo_move();
        session.send(ServerMessage::Error(format!(
            "{message}; your last move was taken back"
        )));
    } else {
        session.game_ended = true;
        tracing::info!(plies = session.game.plies_played(), "Game abandoned");
        session.send(ServerMessage::Error(format!("{message}; the game is over")));
    }
}
