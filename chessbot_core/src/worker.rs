use crate::engine::{run_adaptive, SearchConfig, SearchStats};
use crate::error::SearchResult;
use crate::logic::board::Color;
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

/// A search request. The game is a snapshot owned by the request, so the
/// caller's copy stays untouched while the search runs.
#[derive(Debug, Clone)]
pub enum Input {
    ComputeMove {
        game: GameState,
        own_color: Color,
        config: SearchConfig,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Output {
    MoveFound {
        san: String,
        /// Position after the move.
        fen: String,
        stats: SearchStats,
    },
}

/// Runs searches one request at a time.
#[derive(Debug, Default)]
pub struct SearchWorker {
    handled: u64,
}

impl SearchWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn handled(&self) -> u64 {
        self.handled
    }

    pub fn received(&mut self, msg: Input) -> SearchResult<Output> {
        match msg {
            Input::ComputeMove {
                game,
                own_color,
                config,
            } => {
                let before = game.clone();
                let mut game = game;
                let heuristic = config.heuristic;
                let report = run_adaptive(&mut game, own_color, &config, &heuristic)?;
                let san = before.san(&report.best_move);
                self.handled += 1;

                log::info!(
                    "search #{} for {own_color:?}: {san} in {:.3}s, {} nodes, score {}",
                    self.handled,
                    report.stats.elapsed_secs,
                    report.stats.nodes,
                    report.stats.score.best
                );

                Ok(Output::MoveFound {
                    san,
                    fen: game.fen(),
                    stats: report.stats,
                })
            }
        }
    }
}
