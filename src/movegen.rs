use std::ops::ControlFlow;

use crate::{
    constants::{
        BISHOP_DIRECTIONS, KING_FILE, KING_OFFSETS, KINGSIDE_ROOK_FILE, KNIGHT_OFFSETS,
        QUEEN_DIRECTIONS, QUEENSIDE_ROOK_FILE, ROOK_DIRECTIONS,
    },
    error::EngineError,
    position::Position,
    types::{ColoredPiece, GameResult, Move, Piece, Side, Square, Wing},
};

/// Visitor return value: `Break` stops the enumeration.
pub type Flow = ControlFlow<()>;

impl Position {
    /// Hands `move_` to the visitor, after a legality check when `full_check` is set.
    /// The visitor receives the position and must leave it as it found it.
    fn emit<F>(&mut self, move_: Move, full_check: bool, visitor: &mut F) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        if full_check && !self.is_move_fully_legal(move_) {
            return ControlFlow::Continue(());
        }

        visitor(self, move_)
    }

    /// Emits a move onto `to` when it is empty or holds an enemy; skips own pieces.
    /// Returns `None` when `to` is occupied so sliders know to stop.
    fn emit_step<F>(
        &mut self,
        template: Move,
        mover: Side,
        full_check: bool,
        visitor: &mut F,
    ) -> Option<Flow>
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        match self.board.get(template.to) {
            None => Some(self.emit(template, full_check, visitor)),
            Some(occupant) if occupant.side != mover => {
                let capture = Move {
                    captured: Some(occupant.piece),
                    ..template
                };
                let flow = self.emit(capture, full_check, visitor);

                // Stop the ray either way, but keep the visitor's verdict
                match flow {
                    ControlFlow::Break(()) => Some(flow),
                    ControlFlow::Continue(()) => None,
                }
            }
            Some(_) => None,
        }
    }

    fn generate_slider_moves<F>(
        &mut self,
        from: Square,
        mover: Side,
        directions: &[(i8, i8)],
        template: Move,
        full_check: bool,
        visitor: &mut F,
    ) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        for &(file_delta, rank_delta) in directions {
            let mut current = from;

            while let Some(to) = current.offset(file_delta, rank_delta) {
                match self.emit_step(Move { to, ..template }, mover, full_check, visitor) {
                    Some(flow) => flow?,
                    None => break,
                }

                current = to;
            }
        }

        ControlFlow::Continue(())
    }

    fn generate_step_moves<F>(
        &mut self,
        from: Square,
        mover: Side,
        offsets: &[(i8, i8)],
        template: Move,
        full_check: bool,
        visitor: &mut F,
    ) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        for &(file_delta, rank_delta) in offsets {
            if let Some(to) = from.offset(file_delta, rank_delta) {
                if let Some(ControlFlow::Break(())) =
                    self.emit_step(Move { to, ..template }, mover, full_check, visitor)
                {
                    return ControlFlow::Break(());
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn generate_pawn_moves<F>(
        &mut self,
        from: Square,
        mover: Side,
        full_check: bool,
        visitor: &mut F,
    ) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        let forward = mover.forward();
        let start_rank = mover.home_rank() as i8 + forward;
        let last_rank = mover.opponent().home_rank();
        // Rank a pawn stands on when it may capture en passant
        let en_passant_rank = mover.opponent().home_rank() as i8 - 3 * forward;

        let Some(one_step) = from.offset(0, forward) else {
            return ControlFlow::Continue(());
        };
        let promotion = one_step.rank() == last_rank;

        if self.board.is_empty(one_step) {
            self.emit(
                Move {
                    promotion,
                    ..Move::quiet(from, one_step)
                },
                full_check,
                visitor,
            )?;

            if from.rank() as i8 == start_rank {
                if let Some(two_step) = from.offset(0, 2 * forward) {
                    if self.board.is_empty(two_step) {
                        self.emit(
                            Move {
                                double_step: true,
                                ..Move::quiet(from, two_step)
                            },
                            full_check,
                            visitor,
                        )?;
                    }
                }
            }
        }

        for file_delta in [-1, 1] {
            let Some(to) = from.offset(file_delta, forward) else {
                continue;
            };

            if let Some(occupant) = self.board.get(to) {
                if occupant.side != mover {
                    self.emit(
                        Move {
                            captured: Some(occupant.piece),
                            promotion,
                            ..Move::quiet(from, to)
                        },
                        full_check,
                        visitor,
                    )?;
                }
            }
        }

        if let Some(&last) = self.last_move() {
            if last.double_step
                && from.rank() as i8 == en_passant_rank
                && last.to.rank() == from.rank()
                && last.to.file().abs_diff(from.file()) == 1
            {
                if let Some(to) = Square::from_coords(last.to.file() as i8, from.rank() as i8 + forward)
                {
                    self.emit(
                        Move {
                            en_passant: true,
                            ..Move::quiet(from, to)
                        },
                        full_check,
                        visitor,
                    )?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn generate_king_moves<F>(
        &mut self,
        from: Square,
        mover: Side,
        full_check: bool,
        visitor: &mut F,
    ) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        let castle = self.castle;
        let template = Move {
            first_move: castle.any(mover),
            castle_before: castle,
            ..Move::quiet(from, from)
        };

        self.generate_step_moves(from, mover, &KING_OFFSETS, template, full_check, visitor)?;

        // Castling is only considered when the caller wants fully legal moves
        if !full_check {
            return ControlFlow::Continue(());
        }

        let rank = from.rank() as i8;
        let on_rank = |file: u8| {
            Square::from_coords(file as i8, rank).expect("castle squares lie on the board")
        };
        let own_rook = Some(ColoredPiece::new(mover, Piece::Rook));

        if castle.has(mover, Wing::Kingside)
            && self.board.get(on_rank(KINGSIDE_ROOK_FILE)) == own_rook
            && self.board.is_empty(on_rank(KINGSIDE_ROOK_FILE - 2))
            && self.board.is_empty(on_rank(KINGSIDE_ROOK_FILE - 1))
        {
            let guarded = [
                on_rank(KING_FILE),
                on_rank(KING_FILE + 1),
                on_rank(KING_FILE + 2),
            ];

            if !self.any_destination_in(mover.opponent(), &guarded) {
                self.emit(
                    Move {
                        to: on_rank(KING_FILE + 2),
                        ..template
                    },
                    full_check,
                    visitor,
                )?;
            }
        }

        if castle.has(mover, Wing::Queenside)
            && self.board.get(on_rank(QUEENSIDE_ROOK_FILE)) == own_rook
            && (QUEENSIDE_ROOK_FILE + 1..KING_FILE).all(|file| self.board.is_empty(on_rank(file)))
        {
            let guarded = [
                on_rank(QUEENSIDE_ROOK_FILE + 1),
                on_rank(QUEENSIDE_ROOK_FILE + 2),
                on_rank(QUEENSIDE_ROOK_FILE + 3),
                on_rank(KING_FILE),
            ];

            if !self.any_destination_in(mover.opponent(), &guarded) {
                // Both the two-step and the three-step king destination are offered
                for file in [KING_FILE - 2, KING_FILE - 3] {
                    self.emit(
                        Move {
                            to: on_rank(file),
                            ..template
                        },
                        full_check,
                        visitor,
                    )?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Every pseudo-legal move of the piece on `square`, handed to `visitor` until it breaks.
    ///
    /// With `full_check`, castling is considered and each move is first verified not to
    /// leave the mover's king capturable. Returns `Break` when the visitor stopped early.
    pub fn for_each_piece_move<F>(&mut self, square: Square, full_check: bool, visitor: &mut F) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        let Some(ColoredPiece { side: mover, piece }) = self.board.get(square) else {
            return ControlFlow::Continue(());
        };

        match piece {
            Piece::Pawn => self.generate_pawn_moves(square, mover, full_check, visitor),
            Piece::Knight => self.generate_step_moves(
                square,
                mover,
                &KNIGHT_OFFSETS,
                Move::quiet(square, square),
                full_check,
                visitor,
            ),
            Piece::Bishop => self.generate_slider_moves(
                square,
                mover,
                &BISHOP_DIRECTIONS,
                Move::quiet(square, square),
                full_check,
                visitor,
            ),
            Piece::Rook => {
                let castle = self.castle;
                // Stricter than the file alone: only the corner rook may clear its right
                let home = square.rank() == mover.home_rank();
                let first_move = home
                    && ((square.file() == KINGSIDE_ROOK_FILE && castle.has(mover, Wing::Kingside))
                        || (square.file() == QUEENSIDE_ROOK_FILE
                            && castle.has(mover, Wing::Queenside)));

                let template = Move {
                    first_move,
                    castle_before: castle,
                    ..Move::quiet(square, square)
                };

                self.generate_slider_moves(
                    square,
                    mover,
                    &ROOK_DIRECTIONS,
                    template,
                    full_check,
                    visitor,
                )
            }
            Piece::Queen => self.generate_slider_moves(
                square,
                mover,
                &QUEEN_DIRECTIONS,
                Move::quiet(square, square),
                full_check,
                visitor,
            ),
            Piece::King => self.generate_king_moves(square, mover, full_check, visitor),
        }
    }

    /// `for_each_piece_move` over every piece of `side`, in square index order.
    pub fn for_each_side_move<F>(&mut self, side: Side, full_check: bool, visitor: &mut F) -> Flow
    where
        F: FnMut(&mut Position, Move) -> Flow,
    {
        for square in Square::iter() {
            if self.board.is_side(square, side) {
                self.for_each_piece_move(square, full_check, visitor)?;
            }
        }

        ControlFlow::Continue(())
    }

    /// Whether any pseudo-legal move of `side` lands on one of `squares`
    pub fn any_destination_in(&mut self, side: Side, squares: &[Square]) -> bool {
        self.for_each_side_move(side, false, &mut |_: &mut Position, move_: Move| {
            if squares.contains(&move_.to) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Whether any pseudo-legal move of the opponent would capture `side`'s king
    pub fn is_in_check(&mut self, side: Side) -> bool {
        self.for_each_side_move(side.opponent(), false, &mut |_: &mut Position, move_: Move| {
            if move_.captured == Some(Piece::King) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Plays `move_`, looks for an opposing king capture, takes it back.
    /// Never leaves the position changed.
    pub fn is_move_fully_legal(&mut self, move_: Move) -> bool {
        let Some(mover) = self.board.get(move_.from).map(|occupant| occupant.side) else {
            return false;
        };

        self.apply(move_);
        let exposed = self.is_in_check(mover);
        self.undo();

        !exposed
    }

    /// Fully legal moves of the side to move
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut moves = Vec::new();
        let side = self.side;

        let _ = self.for_each_side_move(side, true, &mut |_: &mut Position, move_: Move| {
            moves.push(move_);
            ControlFlow::Continue(())
        });

        moves
    }

    /// Pseudo-legal moves of `side`, castling excluded
    pub fn pseudo_legal_moves(&mut self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();

        let _ = self.for_each_side_move(side, false, &mut |_: &mut Position, move_: Move| {
            moves.push(move_);
            ControlFlow::Continue(())
        });

        moves
    }

    /// Fully legal moves of the piece on `square`
    pub fn legal_moves_from(&mut self, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();

        let _ = self.for_each_piece_move(square, true, &mut |_: &mut Position, move_: Move| {
            moves.push(move_);
            ControlFlow::Continue(())
        });

        moves
    }

    /// Resolves two squares into the flagged legal move of the side to move.
    /// `None` means the request is illegal; the position is never changed.
    pub fn find_legal_move(&mut self, from: Square, to: Square) -> Option<Move> {
        if !self.board.is_side(from, self.side) {
            return None;
        }

        let mut found = None;

        let _ = self.for_each_piece_move(from, true, &mut |_: &mut Position, move_: Move| {
            if move_.to == to {
                found = Some(move_);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        found
    }

    /// Parses move text such as "e2e4", applies it if legal and returns the flagged move
    pub fn play_move_str(&mut self, move_str: &str) -> Result<Move, EngineError> {
        let (from, to) = Move::squares_from_uci_string(move_str)?;

        let move_ = self
            .find_legal_move(from, to)
            .ok_or_else(|| EngineError::IllegalMove(move_str.trim().to_string()))?;

        self.apply(move_);
        Ok(move_)
    }

    pub fn has_legal_move(&mut self) -> bool {
        let side = self.side;

        self.for_each_side_move(side, true, &mut |_: &mut Position, _: Move| {
            ControlFlow::Break(())
        })
        .is_break()
    }

    /// No fifty-move or repetition rule is modelled.
    pub fn game_result(&mut self) -> GameResult {
        if self.has_legal_move() {
            return GameResult::InProgress;
        }

        let side = self.side;

        if self.is_in_check(side) {
            GameResult::Checkmate(side.opponent())
        } else {
            GameResult::Stalemate
        }
    }
}
