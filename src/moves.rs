use std::fmt;

use crate::{
    error::EngineError,
    types::{CastleRights, Move, Square},
};

impl Move {
    /// A plain relocation with no flags set
    pub fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
            first_move: false,
            castle_before: CastleRights::NONE,
            promotion: false,
            double_step: false,
            en_passant: false,
        }
    }

    /// Captures include en passant, whose victim is not on `to`
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some() || self.en_passant
    }

    /// Horizontal king distance greater than one marks a castle
    pub fn is_castle_distance(&self) -> bool {
        self.from.file().abs_diff(self.to.file()) > 1
    }

    /// Parse a move string (e.g. "e2e4", "e2 e4") into its source and destination squares.
    /// Flags are not derivable from text; look the pair up in the legal moves of a position.
    pub fn squares_from_uci_string(move_str: &str) -> Result<(Square, Square), EngineError> {
        let compact: String = move_str.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.len() != 4 || !compact.is_ascii() {
            return Err(EngineError::InvalidMoveString(move_str.to_string()));
        }

        let from = compact[0..2]
            .parse::<Square>()
            .map_err(|_| EngineError::InvalidMoveString(move_str.to_string()))?;
        let to = compact[2..4]
            .parse::<Square>()
            .map_err(|_| EngineError::InvalidMoveString(move_str.to_string()))?;

        Ok((from, to))
    }
}

/// UCI-style text, e.g. "e2e4", "e7e8q"
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;

        if self.promotion {
            write!(f, "q")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_and_spaced_moves() {
        assert_eq!(
            Move::squares_from_uci_string("e2e4").unwrap(),
            (Square::E2, Square::E4)
        );
        assert_eq!(
            Move::squares_from_uci_string("b1 c3").unwrap(),
            (Square::B1, Square::C3)
        );
        assert!(Move::squares_from_uci_string("e2").is_err());
        assert!(Move::squares_from_uci_string("z2e4").is_err());
    }

    #[test]
    fn displays_promotion_suffix() {
        let mut move_ = Move::quiet(Square::E7, Square::E8);
        assert_eq!(move_.to_string(), "e7e8");

        move_.promotion = true;
        assert_eq!(move_.to_string(), "e7e8q");
    }
}
