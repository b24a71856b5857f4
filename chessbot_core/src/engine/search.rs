use crate::engine::config::SearchConfig;
use crate::engine::shuffle::shuffle_moves;
use crate::engine::{Heuristic, Score, SearchPosition};
use crate::logic::board::Color;
use rand::Rng;
use std::time::{Duration, Instant};

/// Result of searching one node: the move chosen there and its backed-up
/// score, plus bookkeeping for the whole subtree.
#[derive(Debug, Clone)]
pub struct Line<M> {
    pub best_move: Option<M>,
    pub score: Score,
    /// Moves examined in the subtree, leaves included.
    pub nodes: u64,
    pub max_depth: u32,
    pub choice_depth: u32,
    pub time_cutoff: Option<u32>,
}

impl<M> Line<M> {
    const fn new(ply: u32) -> Self {
        Self {
            best_move: None,
            score: 0,
            nodes: 0,
            max_depth: ply,
            choice_depth: 0,
            time_cutoff: None,
        }
    }

    /// The first examined move always takes the slot; later ones need a
    /// strictly better score, so ties go to the earlier move.
    fn improves(&self, maximizing: bool, score: Score) -> bool {
        self.best_move.is_none()
            || (maximizing && score > self.score)
            || (!maximizing && score < self.score)
    }
}

/// Fixed-depth minimax without pruning.
pub struct Minimax<'a, H: ?Sized> {
    own: Color,
    heuristic: &'a H,
}

impl<'a, H: ?Sized> Minimax<'a, H> {
    pub const fn new(own: Color, heuristic: &'a H) -> Self {
        Self { own, heuristic }
    }

    pub fn search<P>(&self, position: &mut P, depth: u8) -> Line<P::Move>
    where
        P: SearchPosition,
        H: Heuristic<P>,
    {
        let moves = position.legal_moves();
        let maximizing = position.side_to_move() == self.own;
        let remaining = depth.saturating_sub(1);
        let mut line = Line::new(0);

        for mv in moves {
            position.apply_move(&mv);
            let score = if remaining == 0 || position.is_game_over() {
                self.heuristic.evaluate(position, self.own)
            } else {
                let child = self.search(position, remaining);
                line.nodes += child.nodes;
                child.score
            };
            position.undo_move();
            line.nodes += 1;

            if line.improves(maximizing, score) {
                line.best_move = Some(mv);
                line.score = score;
            }
        }

        line
    }
}

/// Fixed-depth minimax with alpha-beta pruning. Picks the same move and
/// score as [`Minimax`] for the same inputs.
pub struct AlphaBeta<'a, H: ?Sized> {
    own: Color,
    heuristic: &'a H,
}

impl<'a, H: ?Sized> AlphaBeta<'a, H> {
    pub const fn new(own: Color, heuristic: &'a H) -> Self {
        Self { own, heuristic }
    }

    pub fn search<P>(&self, position: &mut P, depth: u8) -> Line<P::Move>
    where
        P: SearchPosition,
        H: Heuristic<P>,
    {
        self.alpha_beta(position, depth, Score::MIN, Score::MAX)
    }

    fn alpha_beta<P>(
        &self,
        position: &mut P,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Line<P::Move>
    where
        P: SearchPosition,
        H: Heuristic<P>,
    {
        let moves = position.legal_moves();
        let maximizing = position.side_to_move() == self.own;
        let remaining = depth.saturating_sub(1);
        let mut line = Line::new(0);

        for mv in moves {
            position.apply_move(&mv);
            let score = if remaining == 0 || position.is_game_over() {
                self.heuristic.evaluate(position, self.own)
            } else {
                let child = self.alpha_beta(position, remaining, alpha, beta);
                line.nodes += child.nodes;
                child.score
            };
            position.undo_move();
            line.nodes += 1;

            if line.improves(maximizing, score) {
                line.best_move = Some(mv);
                line.score = score;
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }

            if alpha >= beta {
                break;
            }
        }

        line
    }
}

/// Alpha-beta with shuffled move order, an endgame depth extension and a
/// wall-clock budget.
///
/// The remaining depth drops by one per ply, but stays put in positions with
/// few pieces while the low time threshold has not passed. Once the high
/// threshold passes, every node evaluates its children directly.
pub struct AdaptiveSearch<'a, H: ?Sized, R> {
    own: Color,
    heuristic: &'a H,
    depth_limit: u8,
    low_time: Duration,
    high_time: Duration,
    endgame_pieces: usize,
    started: Instant,
    rng: R,
}

impl<'a, H: ?Sized, R: Rng> AdaptiveSearch<'a, H, R> {
    pub fn new(own: Color, heuristic: &'a H, config: &SearchConfig, rng: R) -> Self {
        Self {
            own,
            heuristic,
            depth_limit: config.depth_limit,
            low_time: config.low_time_threshold(),
            high_time: config.high_time_threshold(),
            endgame_pieces: config.endgame_piece_threshold,
            started: Instant::now(),
            rng,
        }
    }

    pub fn search<P>(&mut self, position: &mut P) -> Line<P::Move>
    where
        P: SearchPosition,
        H: Heuristic<P>,
    {
        self.started = Instant::now();
        let depth = self.depth_limit;
        self.alpha_beta(position, depth, 1, Score::MIN, Score::MAX)
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn alpha_beta<P>(
        &mut self,
        position: &mut P,
        depth: u8,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Line<P::Move>
    where
        P: SearchPosition,
        H: Heuristic<P>,
    {
        let moves = shuffle_moves(position.legal_moves(), &mut self.rng);
        let maximizing = position.side_to_move() == self.own;

        let mut remaining = depth.saturating_sub(1);
        if position.piece_count() <= self.endgame_pieces && self.elapsed() < self.low_time {
            remaining += 1;
        }

        let mut line = Line::new(ply);

        for mv in moves {
            position.apply_move(&mv);
            let out_of_time = self.elapsed() >= self.high_time;

            let child = if remaining == 0 || position.is_game_over() || out_of_time {
                None
            } else {
                Some(self.alpha_beta(position, remaining, ply + 1, alpha, beta))
            };
            let score = child
                .as_ref()
                .map_or_else(|| self.heuristic.evaluate(position, self.own), |c| c.score);
            position.undo_move();
            line.nodes += 1;

            if line.improves(maximizing, score) {
                line.best_move = Some(mv);
                line.score = score;
                line.choice_depth = child.as_ref().map_or(ply, |c| c.choice_depth);
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }

            if let Some(child) = &child {
                line.nodes += child.nodes;
                line.max_depth = line.max_depth.max(child.max_depth);
                // The first cutoff reported below this node is kept.
                if line.time_cutoff.is_none() {
                    line.time_cutoff = child.time_cutoff;
                }
            }
            if line.time_cutoff.is_none() && out_of_time {
                line.time_cutoff = Some(ply);
            }

            if alpha >= beta {
                break;
            }
        }

        line
    }
}

/// One-ply search that keeps the last move among equally scored ones and
/// always maximizes for `own`.
pub fn greedy<P, H>(position: &mut P, own: Color, heuristic: &H) -> Line<P::Move>
where
    P: SearchPosition,
    H: Heuristic<P> + ?Sized,
{
    let mut line = Line::new(1);
    for mv in position.legal_moves() {
        position.apply_move(&mv);
        let score = heuristic.evaluate(position, own);
        position.undo_move();
        line.nodes += 1;

        if line.best_move.is_none() || score >= line.score {
            line.best_move = Some(mv);
            line.score = score;
        }
    }
    line
}
