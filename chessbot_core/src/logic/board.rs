use serde::{Deserialize, Serialize};
use shakmaty::{CastlingSide, Square};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Self::White,
            shakmaty::Color::Black => Self::Black,
        }
    }
}

impl From<Color> for shakmaty::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            other => Err(format!("unknown color '{other}'")),
        }
    }
}

/// Castling rights still held by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

/// What the evaluator needs to know about the most recent ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    /// Destination square. For castling this is where the king landed.
    pub to: Square,
    pub castle: Option<CastlingSide>,
    pub mover: Color,
}

impl LastMove {
    pub const fn is_castle(&self) -> bool {
        self.castle.is_some()
    }
}

pub(crate) const fn king_destination(side: CastlingSide, mover: Color) -> Square {
    match (side, mover) {
        (CastlingSide::KingSide, Color::White) => Square::G1,
        (CastlingSide::QueenSide, Color::White) => Square::C1,
        (CastlingSide::KingSide, Color::Black) => Square::G8,
        (CastlingSide::QueenSide, Color::Black) => Square::C8,
    }
}
