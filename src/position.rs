use std::fmt;

use crate::{
    board::Board,
    constants::{KINGSIDE_ROOK_FILE, MAX_HISTORY, NUM_FILES, NUM_RANKS, QUEENSIDE_ROOK_FILE},
    error::EngineError,
    types::{CastleRights, ColoredPiece, Move, Piece, Side, Square, Wing},
};

/// The live game state. Mutated in place by `apply`/`undo` in strict stack order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side: Side,
    pub castle: CastleRights,
    /// Applied moves, most recent last. Only the top entry matters for en passant.
    pub history: Vec<Move>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard initial layout, white to move, all castle rights
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            side: Side::White,
            castle: CastleRights::ALL,
            history: Vec::with_capacity(MAX_HISTORY),
        }
    }

    /// Empty board without castle rights, for building test fixtures
    pub fn empty(side: Side) -> Self {
        Self {
            board: Board::empty(),
            side,
            castle: CastleRights::NONE,
            history: Vec::with_capacity(MAX_HISTORY),
        }
    }

    /// Loads the placement, side-to-move and castling fields of a FEN string.
    /// The en-passant, halfmove and fullmove fields are accepted and ignored:
    /// en-passant eligibility only ever comes from the move history.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen(format!("missing placement: {fen}")))?;

        let mut position = Position::empty(Side::White);
        let ranks: Vec<&str> = placement.split('/').collect();

        if ranks.len() != NUM_RANKS {
            return Err(EngineError::InvalidFen(format!(
                "expected {NUM_RANKS} ranks, found {}",
                ranks.len()
            )));
        }

        for (index, rank_text) in ranks.iter().enumerate() {
            let rank = (NUM_RANKS - 1 - index) as i8;
            let mut file: i8 = 0;

            for symbol in rank_text.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    file += skip as i8;
                    continue;
                }

                let occupant = ColoredPiece::from_symbol(symbol).ok_or_else(|| {
                    EngineError::InvalidFen(format!("unknown piece '{symbol}'"))
                })?;
                let square = Square::from_coords(file, rank).ok_or_else(|| {
                    EngineError::InvalidFen(format!("rank {} is too long", rank + 1))
                })?;

                position
                    .board
                    .add_piece(occupant.side, occupant.piece, square);
                file += 1;
            }

            if file != NUM_FILES as i8 {
                return Err(EngineError::InvalidFen(format!(
                    "rank {} covers {file} files",
                    rank + 1
                )));
            }
        }

        position.side = match fields.next() {
            Some("w") => Side::White,
            Some("b") => Side::Black,
            other => {
                return Err(EngineError::InvalidFen(format!(
                    "invalid side to move: {other:?}"
                )));
            }
        };

        if let Some(castling) = fields.next() {
            for symbol in castling.chars() {
                match symbol {
                    'K' => position.castle.set(Side::White, Wing::Kingside, true),
                    'Q' => position.castle.set(Side::White, Wing::Queenside, true),
                    'k' => position.castle.set(Side::Black, Wing::Kingside, true),
                    'q' => position.castle.set(Side::Black, Wing::Queenside, true),
                    '-' => {}
                    _ => {
                        return Err(EngineError::InvalidFen(format!(
                            "invalid castling field: {castling}"
                        )));
                    }
                }
            }
        }

        Ok(position)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Square of the pawn an en-passant move removes: beside the mover, on the file it lands on
    fn en_passant_victim(move_: &Move) -> Square {
        Square::from_coords(move_.to.file() as i8, move_.from.rank() as i8)
            .expect("en-passant victim square lies on the board")
    }

    /// Rook start and end squares of a castle whose king travels `from` -> `to`
    fn castle_rook_squares(move_: &Move) -> (Square, Square) {
        let rank = move_.to.rank() as i8;

        let (rook_from, rook_to) = if move_.to.file() == KINGSIDE_ROOK_FILE - 1 {
            (KINGSIDE_ROOK_FILE as i8, KINGSIDE_ROOK_FILE as i8 - 2)
        } else {
            (QUEENSIDE_ROOK_FILE as i8, move_.to.file() as i8 + 1)
        };

        (
            Square::from_coords(rook_from, rank).expect("castle rook square lies on the board"),
            Square::from_coords(rook_to, rank).expect("castle rook square lies on the board"),
        )
    }

    /// Plays a move generated from this exact position.
    ///
    /// Panics if `from` is empty: moves are only ever produced by the generator.
    pub fn apply(&mut self, move_: Move) {
        let moving = self
            .board
            .get(move_.from)
            .unwrap_or_else(|| panic!("apply: no piece on {}", move_.from));

        self.side = self.side.opponent();
        self.history.push(move_);

        self.board.update_piece(move_.from, move_.to);

        match moving.piece {
            Piece::Pawn if move_.en_passant => {
                self.board.remove_piece(Self::en_passant_victim(&move_));
            }
            Piece::Pawn if move_.promotion => {
                self.board.add_piece(moving.side, Piece::Queen, move_.to);
            }
            Piece::King if move_.is_castle_distance() => {
                let (rook_from, rook_to) = Self::castle_rook_squares(&move_);
                self.board.update_piece(rook_from, rook_to);
            }
            _ => {}
        }

        if move_.first_move {
            match moving.piece {
                Piece::King => {
                    self.castle.set(moving.side, Wing::Kingside, false);
                    self.castle.set(moving.side, Wing::Queenside, false);
                }
                Piece::Rook if move_.from.file() == KINGSIDE_ROOK_FILE => {
                    self.castle.set(moving.side, Wing::Kingside, false);
                }
                Piece::Rook => {
                    self.castle.set(moving.side, Wing::Queenside, false);
                }
                _ => {}
            }
        }
    }

    /// Takes back the most recent move. Returns `None` when the history is empty.
    pub fn undo(&mut self) -> Option<Move> {
        let move_ = self.history.pop()?;

        self.side = self.side.opponent();

        let moved = self
            .board
            .remove_piece(move_.to)
            .expect("undo: destination of the last move is empty");

        let restored = if move_.promotion {
            ColoredPiece::new(moved.side, Piece::Pawn)
        } else {
            moved
        };

        self.board
            .add_piece(restored.side, restored.piece, move_.from);

        if let Some(captured) = move_.captured {
            self.board
                .add_piece(moved.side.opponent(), captured, move_.to);
        }

        if move_.en_passant {
            self.board.add_piece(
                moved.side.opponent(),
                Piece::Pawn,
                Self::en_passant_victim(&move_),
            );
        }

        if restored.piece == Piece::King && move_.is_castle_distance() {
            let (rook_from, rook_to) = Self::castle_rook_squares(&move_);
            self.board.update_piece(rook_to, rook_from);
        }

        if move_.first_move {
            self.castle = move_.castle_before;
        }

        Some(move_)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;

        match self.side {
            Side::White => write!(f, "White to move"),
            Side::Black => write!(f, "Black to move"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STARTING_FEN;

    #[test]
    fn starting_fen_matches_initial_position() {
        assert_eq!(Position::from_fen(STARTING_FEN).unwrap(), Position::new());
    }

    #[test]
    fn fen_with_black_to_move_and_partial_rights() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();

        assert_eq!(position.side, Side::Black);
        assert!(position.castle.has(Side::White, Wing::Kingside));
        assert!(!position.castle.has(Side::White, Wing::Queenside));
        assert!(!position.castle.has(Side::Black, Wing::Kingside));
        assert!(position.castle.has(Side::Black, Wing::Queenside));
        assert_eq!(position.board.piece_count(), 6);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/7x w - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w Z - 0 1").is_err());
    }

    #[test]
    fn undo_on_fresh_position_does_nothing() {
        let mut position = Position::new();

        assert_eq!(position.undo(), None);
        assert_eq!(position, Position::new());
    }
}
