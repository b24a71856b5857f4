//! Error taxonomy of the search engine.
//!
//! Running out of time is not an error: the adaptive search records it in
//! its statistics and still returns a legal move.

use thiserror::Error;

/// Errors surfaced by the search entry points, the rules adapter and the
/// configuration loader.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The position has no legal move, or the game is already over.
    #[error("no legal move available: the game is already over")]
    NoLegalMoves,

    /// A fixed-depth search was asked to look zero plies ahead.
    #[error("search depth must be at least one ply")]
    InvalidDepth,

    /// The adaptive search configuration cannot drive a search.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// No evaluator is registered under this version number.
    #[error("unknown heuristic version {0}")]
    UnknownHeuristic(u8),

    /// The board snapshot could not be parsed or describes an illegal setup.
    #[error("invalid position snapshot: {0}")]
    InvalidFen(String),

    /// A move in algebraic notation is malformed or not legal here.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The JSON configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;
