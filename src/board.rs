use std::fmt;

use crate::{
    constants::{BACK_RANK, NUM_FILES, NUM_RANKS, NUM_SQUARES},
    types::{ColoredPiece, Piece, Side, Square},
};

/// 64 cells indexed rank * 8 + file, A1 = 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    pub value: [Option<ColoredPiece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard initial layout
    pub fn new() -> Self {
        let mut board = Self::empty();

        for side in [Side::White, Side::Black] {
            let home = side.home_rank() as i8;
            let pawn_rank = home + side.forward();

            for (file, piece) in (0i8..).zip(BACK_RANK) {
                if let Some(square) = Square::from_coords(file, home) {
                    board.add_piece(side, piece, square);
                }
                if let Some(square) = Square::from_coords(file, pawn_rank) {
                    board.add_piece(side, Piece::Pawn, square);
                }
            }
        }

        board
    }

    pub fn empty() -> Self {
        Self {
            value: [None; NUM_SQUARES],
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<ColoredPiece> {
        self.value[square as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.value[square as usize].is_none()
    }

    /// True when `square` holds a piece belonging to `side`
    #[inline]
    pub fn is_side(&self, square: Square, side: Side) -> bool {
        matches!(self.value[square as usize], Some(occupant) if occupant.side == side)
    }

    /// Places a piece, replacing whatever stood there
    pub fn add_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.value[square as usize] = Some(ColoredPiece::new(side, piece));
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<ColoredPiece> {
        self.value[square as usize].take()
    }

    /// Moves the occupant of `from` onto `to`, discarding anything on `to`
    pub fn update_piece(&mut self, from: Square, to: Square) {
        self.value[to as usize] = self.value[from as usize].take();
    }

    pub fn piece_count(&self) -> usize {
        self.value.iter().flatten().count()
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        Square::iter().find(|&square| {
            self.get(square) == Some(ColoredPiece::new(side, Piece::King))
        })
    }

    /// Occupied squares and their pieces, in index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::iter().filter_map(|square| self.get(square).map(|occupant| (square, occupant)))
    }
}

/// Rank 8 at the top, white pieces upper case
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..NUM_RANKS).rev() {
            write!(f, "{}  ", rank + 1)?;

            for file in 0..NUM_FILES {
                let symbol = Square::from_coords(file as i8, rank as i8)
                    .and_then(|square| self.get(square))
                    .map_or('.', |occupant| occupant.symbol());

                write!(f, " {}", symbol)?;
            }

            writeln!(f)?;
        }

        write!(f, "\n    a b c d e f g h")
    }
}
