#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

#[repr(u8)]
#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[repr(u8)]
#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank the side's pieces start on (0-indexed)
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Rank delta of a pawn push
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

/// Contents of an occupied square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub side: Side,
    pub piece: Piece,
}

impl ColoredPiece {
    pub const fn new(side: Side, piece: Piece) -> Self {
        Self { side, piece }
    }
}

/// "Left" (a-file rook) is queenside, "right" (h-file rook) is kingside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wing {
    Kingside,
    Queenside,
}

/// Castle permissions, one bit per side and wing.
/// 1 = white kingside, 2 = white queenside, 4 = black kingside, 8 = black queenside.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CastleRights(pub u8);

impl CastleRights {
    pub const ALL: CastleRights = CastleRights(0b1111);
    pub const NONE: CastleRights = CastleRights(0);

    const fn bit(side: Side, wing: Wing) -> u8 {
        let shift = match (side, wing) {
            (Side::White, Wing::Kingside) => 0,
            (Side::White, Wing::Queenside) => 1,
            (Side::Black, Wing::Kingside) => 2,
            (Side::Black, Wing::Queenside) => 3,
        };
        1 << shift
    }

    pub fn has(self, side: Side, wing: Wing) -> bool {
        self.0 & Self::bit(side, wing) != 0
    }

    /// True while `side` holds at least one of its two rights
    pub fn any(self, side: Side) -> bool {
        self.has(side, Wing::Kingside) || self.has(side, Wing::Queenside)
    }

    pub fn set(&mut self, side: Side, wing: Wing, value: bool) {
        if value {
            self.0 |= Self::bit(side, wing);
        } else {
            self.0 &= !Self::bit(side, wing);
        }
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::ALL
    }
}

/// A move plus everything needed to take it back.
///
/// Flags are only meaningful against the position the move was generated from:
/// an en-passant capture removes a pawn that is not on `to`, and the castle
/// snapshot records the rights as they stood before the move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Kind of the piece standing on `to` before the move
    pub captured: Option<Piece>,
    /// Moving piece is a king or rook that still carried castle rights
    pub first_move: bool,
    /// Castle rights before this move, restored on take-back of a first move
    pub castle_before: CastleRights,
    pub promotion: bool,
    pub double_step: bool,
    pub en_passant: bool,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    /// Side to move has no legal moves and its king is attacked. Holds the winner.
    Checkmate(Side),
    Stalemate,
}
