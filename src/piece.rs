use crate::types::{ColoredPiece, Piece, Side};

impl Piece {
    /// Material value used by the evaluator
    pub const fn value(self) -> i32 {
        match self {
            Piece::Pawn => 1,
            Piece::Knight => 3,
            Piece::Bishop => 3,
            Piece::Rook => 5,
            Piece::Queen => 9,
            Piece::King => 100,
        }
    }

    pub fn iter() -> impl Iterator<Item = Piece> {
        [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ]
        .into_iter()
    }

    /// FEN letter, upper case
    pub const fn symbol(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }
}

impl ColoredPiece {
    /// FEN letter: upper case for white, lower case for black
    pub fn symbol(self) -> char {
        match self.side {
            Side::White => self.piece.symbol(),
            Side::Black => self.piece.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<ColoredPiece> {
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };

        let piece = Piece::iter().find(|piece| piece.symbol() == symbol.to_ascii_uppercase())?;

        Some(ColoredPiece::new(side, piece))
    }
}
