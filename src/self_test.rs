//! Apply/undo consistency checks.
//!
//! Search relies on `undo` restoring a position exactly, so these walk the move tree,
//! compare against snapshots and report the first move that breaks the round trip.
//! A failure is an engine defect, never an input error.

use std::ops::ControlFlow;

use log::warn;
use thiserror::Error;

use crate::{
    board::Board,
    position::Position,
    types::{CastleRights, Move, Side},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("board differs after taking back {move_} with {depth} plies left")]
    Board { move_: Move, depth: u32 },

    #[error("castle rights {found:#06b} after taking back {move_}, expected {expected:#06b}")]
    CastleRights {
        move_: Move,
        expected: u8,
        found: u8,
    },

    #[error("side to move or history differs after taking back {move_}")]
    Bookkeeping { move_: Move },
}

struct Snapshot {
    board: Board,
    castle: CastleRights,
    side: Side,
    history_len: usize,
}

impl Snapshot {
    fn take(position: &Position) -> Self {
        Self {
            board: position.board,
            castle: position.castle,
            side: position.side,
            history_len: position.history.len(),
        }
    }

    /// Compares and, on mismatch, puts the snapshot back so callers can continue
    fn verify(&self, position: &mut Position, move_: Move, depth: u32) -> Result<(), ConsistencyError> {
        let error = if position.board != self.board {
            Some(ConsistencyError::Board { move_, depth })
        } else if position.castle != self.castle {
            Some(ConsistencyError::CastleRights {
                move_,
                expected: self.castle.0,
                found: position.castle.0,
            })
        } else if position.side != self.side || position.history.len() != self.history_len {
            Some(ConsistencyError::Bookkeeping { move_ })
        } else {
            None
        };

        match error {
            Some(error) => {
                warn!("{error}\n{}", position.board);
                position.board = self.board;
                position.castle = self.castle;
                position.side = self.side;
                position.history.truncate(self.history_len);
                Err(error)
            }
            None => Ok(()),
        }
    }
}

/// Applies `move_`, recursively checks every legal reply down to `depth` more plies,
/// takes `move_` back and checks the position is exactly as before.
pub fn full_test(position: &mut Position, move_: Move, depth: u32) -> Result<(), ConsistencyError> {
    let snapshot = Snapshot::take(position);

    position.apply(move_);

    let mut failure = None;

    if depth > 0 {
        let side = position.side;

        let _ = position.for_each_side_move(side, true, &mut |position: &mut Position, reply: Move| {
            match full_test(position, reply, depth - 1) {
                Ok(()) => ControlFlow::Continue(()),
                Err(error) => {
                    failure = Some(error);
                    ControlFlow::Break(())
                }
            }
        });
    }

    position.undo();

    let restored = snapshot.verify(position, move_, depth);

    match failure {
        Some(error) => Err(error),
        None => restored,
    }
}

/// One-ply check: every legal move of the side to move is applied and taken back.
pub fn round_trip_all(position: &mut Position) -> Result<(), ConsistencyError> {
    for move_ in position.legal_moves() {
        full_test(position, move_, 0)?;
    }

    Ok(())
}

/// `full_test` for every legal root move
pub fn full_test_all(position: &mut Position, depth: u32) -> Result<(), ConsistencyError> {
    for move_ in position.legal_moves() {
        full_test(position, move_, depth)?;
    }

    Ok(())
}
