use crate::logic::board::Color;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod runner;
pub mod search;
pub mod shuffle;


pub use config::SearchConfig;
pub use eval::HeuristicVersion;
pub use runner::{run_adaptive, run_adaptive_with_rng, run_alpha_beta, run_greedy, run_minimax};

/// Signed evaluation, positive favours the engine's own color.
pub type Score = i32;

/// What the search needs from a rules engine.
///
/// Moves are applied and undone in place: every `apply_move` on a search
/// path is matched by exactly one `undo_move` before the frame returns.
pub trait SearchPosition {
    type Move: Clone;

    fn legal_moves(&self) -> Vec<Self::Move>;
    fn apply_move(&mut self, mv: &Self::Move);
    fn undo_move(&mut self);
    fn side_to_move(&self) -> Color;
    fn is_game_over(&self) -> bool;
    fn piece_count(&self) -> usize;
}

/// A stateless scoring function, `evaluate(position, own) > 0` when the
/// position is good for `own`.
pub trait Heuristic<P: ?Sized> {
    fn evaluate(&self, position: &P, own: Color) -> Score;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStats {
    /// Backed-up value of the chosen line.
    pub best: Score,
    pub before_apply: Score,
    pub after_apply: Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthStats {
    /// Deepest ply reached anywhere in the tree.
    pub max: u32,
    /// Ply at which the chosen line bottomed out.
    pub choice: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub elapsed_secs: f64,
    pub nodes: u64,
    pub score: ScoreStats,
    pub depth: Option<DepthStats>,
    /// Ply at which the hard time limit first forced a leaf.
    pub time_cutoff_depth: Option<u32>,
}

/// The move a search settled on. The position it was run against has
/// already been advanced by this move.
#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    pub best_move: M,
    pub stats: SearchStats,
}
