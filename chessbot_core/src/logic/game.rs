use crate::engine::SearchPosition;
use crate::error::{SearchError, SearchResult};
use crate::logic::board::{king_destination, CastlingRights, Color, LastMove};
use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, CastlingSide, Chess, EnPassantMode, Move, Piece, Position, Square};

/// Why a game finished, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

#[derive(Debug, Clone)]
struct PlyRecord {
    before: Chess,
    mv: Move,
}

/// A chess game the search can mutate in place.
///
/// Every `apply_move` pushes the previous position, so `undo_move` restores
/// it exactly. The stack also feeds repetition detection and the last-move
/// queries used by the evaluators.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    position: Chess,
    history: Vec<PlyRecord>,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> SearchResult<Self> {
        let parsed = fen
            .trim()
            .parse::<Fen>()
            .map_err(|e| SearchError::InvalidFen(e.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| SearchError::InvalidFen(e.to_string()))?;
        Ok(Self {
            position,
            history: Vec::new(),
        })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub const fn position(&self) -> &Chess {
        &self.position
    }

    pub fn plies_played(&self) -> usize {
        self.history.len()
    }

    pub fn turn(&self) -> Color {
        self.position.turn().into()
    }

    pub fn in_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    pub fn is_fifty_move_rule(&self) -> bool {
        self.position.halfmoves() >= 100
    }

    /// The current position occurred at least twice before.
    ///
    /// Only plies since the last capture or pawn move can repeat, so the scan
    /// stops at the half-move clock.
    pub fn is_threefold_repetition(&self) -> bool {
        let reversible = usize::try_from(self.position.halfmoves()).unwrap_or(usize::MAX);
        let repeats = self
            .history
            .iter()
            .rev()
            .take(reversible)
            .filter(|ply| same_position(&ply.before, &self.position))
            .count();
        repeats >= 2
    }

    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_rule()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        if self.position.legal_moves().is_empty() {
            return Some(if self.in_check() {
                GameEndReason::Checkmate
            } else {
                GameEndReason::Stalemate
            });
        }
        if self.is_insufficient_material() {
            Some(GameEndReason::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            Some(GameEndReason::ThreefoldRepetition)
        } else if self.is_fifty_move_rule() {
            Some(GameEndReason::FiftyMoveRule)
        } else {
            None
        }
    }

    /// The side that delivered mate, `None` while the game goes on or ended
    /// in a draw.
    pub fn winner(&self) -> Option<Color> {
        self.is_checkmate().then(|| self.turn().opposite())
    }

    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        let castles = self.position.castles();
        CastlingRights {
            kingside: castles.has(color.into(), CastlingSide::KingSide),
            queenside: castles.has(color.into(), CastlingSide::QueenSide),
        }
    }

    /// The most recent ply, or `None` before any move was played on this
    /// state (a position loaded from a snapshot has no history).
    pub fn last_move(&self) -> Option<LastMove> {
        self.history.last().map(|ply| {
            let mover: Color = ply.before.turn().into();
            let castle = ply.mv.castling_side();
            let to = castle.map_or_else(|| ply.mv.to(), |side| king_destination(side, mover));
            LastMove { to, castle, mover }
        })
    }

    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let board = self.position.board();
        !board
            .attacks_to(square, by.into(), board.occupied())
            .is_empty()
    }

    pub fn occupant_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    pub fn occupants(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let board = self.position.board();
        board
            .occupied()
            .into_iter()
            .filter_map(move |square| board.piece_at(square).map(|piece| (square, piece)))
    }

    /// Standard algebraic notation with the `+` or `#` suffix the move earns.
    pub fn san(&self, mv: &Move) -> String {
        SanPlus::from_move(self.position.clone(), mv).to_string()
    }

    /// Resolves a move in standard algebraic notation against the current
    /// position. Check and mate suffixes are accepted.
    pub fn parse_san(&self, text: &str) -> SearchResult<Move> {
        let san = text
            .trim()
            .parse::<SanPlus>()
            .map_err(|e| SearchError::IllegalMove(format!("{text}: {e}")))?;
        san.san
            .to_move(&self.position)
            .map_err(|e| SearchError::IllegalMove(format!("{text}: {e}")))
    }

    pub fn play_san(&mut self, text: &str) -> SearchResult<Move> {
        if self.is_game_over() {
            return Err(SearchError::NoLegalMoves);
        }
        let mv = self.parse_san(text)?;
        self.apply_move(&mv);
        Ok(mv)
    }
}

fn same_position(a: &Chess, b: &Chess) -> bool {
    a.turn() == b.turn()
        && a.board() == b.board()
        && a.castles().castling_rights() == b.castles().castling_rights()
        && a.ep_square(EnPassantMode::Legal) == b.ep_square(EnPassantMode::Legal)
}

impl SearchPosition for GameState {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn apply_move(&mut self, mv: &Move) {
        debug_assert!(self.position.is_legal(mv), "illegal move applied: {mv:?}");
        let before = self.position.clone();
        self.position.play_unchecked(mv);
        self.history.push(PlyRecord {
            before,
            mv: mv.clone(),
        });
    }

    fn undo_move(&mut self) {
        if let Some(ply) = self.history.pop() {
            self.position = ply.before;
        } else {
            debug_assert!(false, "undo_move called without a matching apply_move");
        }
    }

    fn side_to_move(&self) -> Color {
        self.turn()
    }

    fn is_game_over(&self) -> bool {
        self.position.legal_moves().is_empty() || self.is_draw()
    }

    fn piece_count(&self) -> usize {
        self.position.board().occupied().count()
    }
}
