use crate::{
    constants::{CENTER_FILE, CENTER_RANK, EARLY_STAGE_PIECE_COUNT},
    position::Position,
    types::{Piece, Side, Square},
};

/// Half the Manhattan distance from d5, rounded down
fn king_center_distance(square: Square) -> i32 {
    ((square.file().abs_diff(CENTER_FILE) + square.rank().abs_diff(CENTER_RANK)) / 2) as i32
}

impl Position {
    /// Static score from white's point of view: material plus king placement.
    ///
    /// While more than `EARLY_STAGE_PIECE_COUNT` pieces remain a king is rewarded for
    /// staying away from the center; afterwards it is rewarded for centralizing.
    pub fn evaluate(&self) -> i32 {
        let is_early_stage = self.board.piece_count() > EARLY_STAGE_PIECE_COUNT;

        self.board
            .pieces()
            .map(|(square, occupant)| {
                let mut value = occupant.piece.value();

                if occupant.piece == Piece::King {
                    if is_early_stage {
                        value += king_center_distance(square);
                    } else {
                        value -= king_center_distance(square);
                    }
                }

                match occupant.side {
                    Side::White => value,
                    Side::Black => -value,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_distance_is_halved_and_floored() {
        assert_eq!(king_center_distance(Square::D5), 0);
        assert_eq!(king_center_distance(Square::D4), 0);
        assert_eq!(king_center_distance(Square::E1), 2);
        assert_eq!(king_center_distance(Square::E8), 2);
        assert_eq!(king_center_distance(Square::H8), 3);
        assert_eq!(king_center_distance(Square::A1), 3);
        assert_eq!(king_center_distance(Square::H1), 4);
        assert_eq!(king_center_distance(Square::A8), 3);
    }
}
