//! Public search entry points.
//!
//! Each entry point checks its preconditions, times the search, applies the
//! chosen move to the position it was given and reports what happened. The
//! position is left advanced by one ply on success and untouched on error.

use crate::engine::config::SearchConfig;
use crate::engine::search::{greedy, AdaptiveSearch, AlphaBeta, Line, Minimax};
use crate::engine::{DepthStats, Heuristic, ScoreStats, SearchPosition, SearchReport, SearchStats};
use crate::error::{SearchError, SearchResult};
use crate::logic::board::Color;
use rand::Rng;
use std::time::{Duration, Instant};

pub fn run_minimax<P, H>(
    position: &mut P,
    own: Color,
    depth: u8,
    heuristic: &H,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    ensure_playable(position)?;
    if depth == 0 {
        return Err(SearchError::InvalidDepth);
    }

    let started = Instant::now();
    let line = Minimax::new(own, heuristic).search(position, depth);
    let elapsed = started.elapsed();

    log::debug!(
        "minimax depth {depth}: score {} after {} nodes",
        line.score,
        line.nodes
    );
    finish(position, own, heuristic, line, elapsed, false)
}

pub fn run_alpha_beta<P, H>(
    position: &mut P,
    own: Color,
    depth: u8,
    heuristic: &H,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    ensure_playable(position)?;
    if depth == 0 {
        return Err(SearchError::InvalidDepth);
    }

    let started = Instant::now();
    let line = AlphaBeta::new(own, heuristic).search(position, depth);
    let elapsed = started.elapsed();

    log::debug!(
        "alpha-beta depth {depth}: score {} after {} nodes",
        line.score,
        line.nodes
    );
    finish(position, own, heuristic, line, elapsed, false)
}

/// The production search: adaptive alpha-beta with the thread-local RNG
/// ordering moves.
pub fn run_adaptive<P, H>(
    position: &mut P,
    own: Color,
    config: &SearchConfig,
    heuristic: &H,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    run_adaptive_with_rng(position, own, config, heuristic, rand::thread_rng())
}

pub fn run_adaptive_with_rng<P, H, R>(
    position: &mut P,
    own: Color,
    config: &SearchConfig,
    heuristic: &H,
    rng: R,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
    R: Rng,
{
    ensure_playable(position)?;
    config.validate()?;

    let started = Instant::now();
    let line = AdaptiveSearch::new(own, heuristic, config, rng).search(position);
    let elapsed = started.elapsed();

    log::debug!(
        "adaptive search: score {} after {} nodes, depth {}/{} (choice/max), time cutoff {:?}",
        line.score,
        line.nodes,
        line.choice_depth,
        line.max_depth,
        line.time_cutoff
    );
    finish(position, own, heuristic, line, elapsed, true)
}

/// Scores every legal move one ply deep and keeps the best, the last one
/// on ties.
///
/// Unlike a plain next-move lookup this plays the chosen move on `position`,
/// the same as the other entry points. Pass a clone to only peek at it.
pub fn run_greedy<P, H>(
    position: &mut P,
    own: Color,
    heuristic: &H,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    ensure_playable(position)?;

    let started = Instant::now();
    let line = greedy(position, own, heuristic);
    let elapsed = started.elapsed();

    log::debug!("greedy: score {} over {} moves", line.score, line.nodes);
    finish(position, own, heuristic, line, elapsed, false)
}

fn ensure_playable<P: SearchPosition>(position: &P) -> SearchResult<()> {
    if position.is_game_over() || position.legal_moves().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(())
}

fn finish<P, H>(
    position: &mut P,
    own: Color,
    heuristic: &H,
    line: Line<P::Move>,
    elapsed: Duration,
    adaptive: bool,
) -> SearchResult<SearchReport<P::Move>>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    let best_move = line.best_move.ok_or(SearchError::NoLegalMoves)?;

    let before_apply = heuristic.evaluate(position, own);
    position.apply_move(&best_move);
    let after_apply = heuristic.evaluate(position, own);

    let stats = SearchStats {
        elapsed_secs: elapsed.as_secs_f64(),
        nodes: line.nodes,
        score: ScoreStats {
            best: line.score,
            before_apply,
            after_apply,
        },
        depth: adaptive.then_some(DepthStats {
            max: line.max_depth,
            choice: line.choice_depth,
        }),
        time_cutoff_depth: line.time_cutoff,
    };

    Ok(SearchReport { best_move, stats })
}
