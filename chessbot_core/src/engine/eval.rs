use crate::engine::{Heuristic, Score};
use crate::error::SearchError;
use crate::logic::board::{Color, LastMove};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use shakmaty::Role;

// Piece Values
pub const VAL_PAWN: Score = 1;
pub const VAL_KNIGHT: Score = 3;
pub const VAL_BISHOP: Score = 3;
pub const VAL_ROOK: Score = 5;
pub const VAL_QUEEN: Score = 9;
pub const VAL_KING: Score = 200;

pub const CHECK_BONUS: Score = 100;
pub const CHECKMATE_BONUS: Score = 1000;
pub const DRAW_PENALTY: Score = 50;
pub const CASTLING_RIGHT_WEIGHT: Score = 25;
pub const CASTLED_BONUS: Score = 60;
pub const CASTLED_EXPOSED_PENALTY: Score = 70;

pub const fn piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => VAL_PAWN,
        Role::Knight => VAL_KNIGHT,
        Role::Bishop => VAL_BISHOP,
        Role::Rook => VAL_ROOK,
        Role::Queen => VAL_QUEEN,
        Role::King => VAL_KING,
    }
}

/// The evaluator family. Each version adds terms on top of the previous one.
///
/// - `V0`: material only.
/// - `V1`: check and checkmate.
/// - `V2`: draws and stalemates are penalised.
/// - `V3`: pieces left en prise, castling rights, castling safety and
///   checks that can be answered by capturing the checker.
///
/// `V3` reads the last played move. On a state with no history the
/// last-move terms are skipped, so it is only a complete evaluator once at
/// least one ply has been played on the state (always true inside a search).
///
/// The castling-safety penalty never fires: a legal castle cannot land the
/// king on a square the opponent attacks, so `V3` adds exactly
/// `CASTLED_BONUS` for every castle. The term stays so the scoring table
/// keeps its full shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeuristicVersion {
    V0,
    V1,
    V2,
    #[default]
    V3,
}

impl HeuristicVersion {
    pub const ALL: [Self; 4] = [Self::V0, Self::V1, Self::V2, Self::V3];
    pub const PRODUCTION: Self = Self::V3;

    pub fn from_index(index: u8) -> Result<Self, SearchError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(SearchError::UnknownHeuristic(index))
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }
}

impl TryFrom<u8> for HeuristicVersion {
    type Error = SearchError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<HeuristicVersion> for u8 {
    fn from(version: HeuristicVersion) -> Self {
        version.index()
    }
}

impl Heuristic<GameState> for HeuristicVersion {
    fn evaluate(&self, game: &GameState, own: Color) -> Score {
        match self {
            Self::V0 => material(game, own),
            Self::V1 => material(game, own) + check_terms(game, own),
            Self::V2 => material(game, own) + draw_penalty(game) + check_terms(game, own),
            Self::V3 => positional(game, own),
        }
    }
}

fn material(game: &GameState, own: Color) -> Score {
    game.occupants()
        .map(|(_, piece)| {
            let value = piece_value(piece.role);
            if Color::from(piece.color) == own {
                value
            } else {
                -value
            }
        })
        .sum()
}

fn check_terms(game: &GameState, own: Color) -> Score {
    let mover = game.turn();
    let mut score = 0;
    if game.in_check() {
        score += if mover == own { -CHECK_BONUS } else { CHECK_BONUS };
    }
    if game.is_checkmate() {
        score += if mover == own {
            -CHECKMATE_BONUS
        } else {
            CHECKMATE_BONUS
        };
    }
    score
}

fn draw_penalty(game: &GameState) -> Score {
    if game.is_draw() || game.is_stalemate() {
        -DRAW_PENALTY
    } else {
        0
    }
}

const fn right(held: bool) -> Score {
    if held {
        CASTLING_RIGHT_WEIGHT
    } else {
        0
    }
}

// Keep castling available. The second term pairs our kingside right with the
// opponent's queenside right; scores depend on that pairing.
fn castling_rights_term(game: &GameState, own: Color) -> Score {
    let own_rights = game.castling_rights(own);
    let opponent_rights = game.castling_rights(own.opposite());
    (right(own_rights.kingside) - right(opponent_rights.kingside))
        + (right(own_rights.kingside) - right(opponent_rights.queenside))
}

// Spending the rights on an actual castle is fine, unless the king lands on an
// attacked square. Castling legality already keeps the landing square safe.
fn castle_term(game: &GameState, own: Color) -> Score {
    let mover = game.turn();
    if mover == own {
        return 0;
    }
    match game.last_move().filter(LastMove::is_castle) {
        Some(castle) if game.is_square_attacked(castle.to, mover) => {
            CASTLED_BONUS - CASTLED_EXPOSED_PENALTY
        }
        Some(_) => CASTLED_BONUS,
        None => 0,
    }
}

fn positional(game: &GameState, own: Color) -> Score {
    let opponent = own.opposite();
    let mover = game.turn();
    let last = game.last_move();
    let mut score = 0;

    for (square, piece) in game.occupants() {
        let value = piece_value(piece.role);
        if Color::from(piece.color) == own {
            score += value;
            // Don't leave pieces en prise
            if game.is_square_attacked(square, opponent) {
                score -= value * 2;
            }
        } else {
            score -= value;
        }
    }

    score += castling_rights_term(game, own);
    score += castle_term(game, own);

    score += draw_penalty(game);

    if game.in_check() {
        score += if mover == own { -CHECK_BONUS } else { CHECK_BONUS };
        // A check the opponent answers by taking the checker is no check.
        if mover != own {
            if let Some(last) = last {
                if game.is_square_attacked(last.to, mover) {
                    let checker = game
                        .occupant_at(last.to)
                        .map_or(0, |piece| piece_value(piece.role));
                    score -= CHECK_BONUS + checker;
                }
            }
        }
    }

    if game.is_checkmate() {
        score += if mover == own {
            -CHECKMATE_BONUS
        } else {
            CHECKMATE_BONUS
        };
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SearchPosition;
    use shakmaty::Move;

    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    fn eval(version: HeuristicVersion, game: &GameState, own: Color) -> Score {
        version.evaluate(game, own)
    }

    #[test]
    fn test_start_position_is_balanced() {
        let game = GameState::new();
        for version in [HeuristicVersion::V0, HeuristicVersion::V1, HeuristicVersion::V2] {
            assert_eq!(eval(version, &game, Color::White), 0);
            assert_eq!(eval(version, &game, Color::Black), 0);
        }
        // Nothing is attacked and all four rights are held.
        assert_eq!(eval(HeuristicVersion::V3, &game, Color::Black), 0);
    }

    #[test]
    fn test_material_sign_follows_own_color() {
        // White is a queen up.
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(eval(HeuristicVersion::V0, &game, Color::White), VAL_QUEEN);
        assert_eq!(eval(HeuristicVersion::V0, &game, Color::Black), -VAL_QUEEN);
    }

    #[test]
    fn test_checkmate_bonus_sign() {
        let game = GameState::from_fen(FOOLS_MATE).unwrap();
        let material_black = eval(HeuristicVersion::V0, &game, Color::Black);
        let material_white = eval(HeuristicVersion::V0, &game, Color::White);
        for version in [HeuristicVersion::V1, HeuristicVersion::V2, HeuristicVersion::V3] {
            // Black just delivered mate.
            assert!(eval(version, &game, Color::Black) - material_black >= CHECKMATE_BONUS);
            // White is mated on its own move.
            assert!(eval(version, &game, Color::White) - material_white <= -CHECKMATE_BONUS);
        }
        assert_eq!(
            eval(HeuristicVersion::V1, &game, Color::Black),
            material_black + CHECK_BONUS + CHECKMATE_BONUS
        );
    }

    #[test]
    fn test_draw_penalty_applies_from_v2() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let material = eval(HeuristicVersion::V0, &game, Color::White);
        assert_eq!(eval(HeuristicVersion::V1, &game, Color::White), material);
        assert_eq!(
            eval(HeuristicVersion::V2, &game, Color::White),
            material - DRAW_PENALTY
        );
    }

    #[test]
    fn test_v3_penalises_hanging_pieces() {
        // Black knight on e5 attacked by the white pawn on d4.
        let game = GameState::from_fen("4k3/8/8/4n3/3P4/8/8/4K3 b - - 0 1").unwrap();
        let material = eval(HeuristicVersion::V0, &game, Color::Black);
        assert_eq!(
            eval(HeuristicVersion::V3, &game, Color::Black),
            material - 2 * VAL_KNIGHT
        );
    }

    #[test]
    fn test_v3_castling_rights_pairing() {
        // Black keeps only the kingside right, white keeps only the queenside right.
        let game = GameState::from_fen("r3k2r/p6p/8/8/8/8/P6P/R3K2R w Qk - 0 1").unwrap();
        let material = eval(HeuristicVersion::V0, &game, Color::Black);
        // (+25 - 0) + (+25 - 25): the second term weighs our kingside right
        // against their queenside right. A side-by-side pairing would give 0.
        assert_eq!(
            eval(HeuristicVersion::V3, &game, Color::Black),
            material + CASTLING_RIGHT_WEIGHT
        );

        let kingside = GameState::from_fen("r3k2r/p6p/8/8/8/8/P6P/R3K2R w Kk - 0 1").unwrap();
        assert_eq!(
            eval(HeuristicVersion::V3, &kingside, Color::Black),
            material + CASTLING_RIGHT_WEIGHT
        );
        let none = GameState::from_fen("r3k2r/p6p/8/8/8/8/P6P/R3K2R w k - 0 1").unwrap();
        assert_eq!(
            eval(HeuristicVersion::V3, &none, Color::Black),
            material + 2 * CASTLING_RIGHT_WEIGHT
        );
    }

    #[test]
    fn test_v3_rewards_own_castle() {
        let mut game =
            GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b k - 0 1").unwrap();
        let before = eval(HeuristicVersion::V3, &game, Color::Black);
        let mv = game.parse_san("O-O").unwrap();
        game.apply_move(&mv);
        // Both kingside terms are gone, the castle itself is rewarded.
        assert_eq!(
            eval(HeuristicVersion::V3, &game, Color::Black),
            before - 2 * CASTLING_RIGHT_WEIGHT + CASTLED_BONUS
        );
        // Seen from white it is black who castled, so there is no bonus.
        assert_eq!(eval(HeuristicVersion::V3, &game, Color::White), 0);
    }

    #[test]
    fn test_v3_castle_penalty_never_fires() {
        // Pawn walls keep every piece unattacked, so only the castling terms move.
        let walled = [
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1",
        ];
        // Enemy pieces bearing on the squares around the castled king.
        let contested = [
            "r3k2r/8/8/8/8/n7/8/R3K2R w KQkq - 0 1",
            "r3k2r/8/8/8/8/8/6b1/R3K2R w KQkq - 0 1",
            "r3k2r/6B1/8/N7/8/8/8/R3K2R b KQkq - 0 1",
        ];

        let mut castles = 0;
        for fen in walled.iter().chain(&contested) {
            let start = GameState::from_fen(fen).unwrap();
            let own = start.turn();
            for mv in start.legal_moves().into_iter().filter(Move::is_castle) {
                let mut game = start.clone();
                game.apply_move(&mv);
                let landed = game.last_move().unwrap().to;
                assert!(!game.is_square_attacked(landed, game.turn()), "{fen} {mv:?}");
                assert_eq!(castle_term(&game, own), CASTLED_BONUS, "{fen} {mv:?}");
                assert_eq!(castle_term(&game, own.opposite()), 0);

                if walled.contains(fen) {
                    let rights_change =
                        castling_rights_term(&game, own) - castling_rights_term(&start, own);
                    assert_eq!(
                        eval(HeuristicVersion::V3, &game, own),
                        eval(HeuristicVersion::V3, &start, own) + CASTLED_BONUS + rights_change,
                        "{fen} {mv:?}"
                    );
                }
                castles += 1;
            }
        }
        // Both wings in the walled positions and past the a3 knight, the
        // queenside only where a bishop covers the f-file square.
        assert_eq!(castles, 8);
    }

    #[test]
    fn test_v3_check_that_loses_the_checker() {
        // The queen checks from f2, next to the white king, with no defender.
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4q3/6K1 b - - 0 1").unwrap();
        let mv = game.parse_san("Qf2+").unwrap();
        game.apply_move(&mv);
        assert!(game.in_check());
        let material = eval(HeuristicVersion::V0, &game, Color::Black);
        // -18 for the hanging queen, +100 for the check, -(100 + 9) because
        // the king can take the checker.
        assert_eq!(
            eval(HeuristicVersion::V3, &game, Color::Black),
            material - 2 * VAL_QUEEN + CHECK_BONUS - (CHECK_BONUS + VAL_QUEEN)
        );
    }

    #[test]
    fn test_version_index_roundtrip() {
        for version in HeuristicVersion::ALL {
            assert_eq!(HeuristicVersion::from_index(version.index()).unwrap(), version);
        }
        assert!(matches!(
            HeuristicVersion::from_index(4),
            Err(SearchError::UnknownHeuristic(4))
        ));
        assert_eq!(HeuristicVersion::default(), HeuristicVersion::PRODUCTION);
        assert_eq!(serde_json::to_string(&HeuristicVersion::V2).unwrap(), "2");
        assert!(serde_json::from_str::<HeuristicVersion>("9").is_err());
    }
}
