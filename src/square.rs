use std::{fmt, str::FromStr};

use crate::{
    constants::{NUM_FILES, NUM_RANKS},
    error::EngineError,
    types::Square,
};

impl Square {
    #[rustfmt::skip]
    pub fn iter() -> impl Iterator<Item = Square> {
        [
            Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
            Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
            Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
            Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
            Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
            Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
            Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
            Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
        ].into_iter()
    }

    /// 0-indexed (0-7)
    pub fn rank(self) -> u8 {
        self as u8 / NUM_FILES as u8
    }
    /// 0-indexed (0-7)
    pub fn file(self) -> u8 {
        (self as u8) % (NUM_FILES as u8)
    }

    /// Square at the given file and rank, or `None` when off the board.
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        if !(0..NUM_FILES as i8).contains(&file) || !(0..NUM_RANKS as i8).contains(&rank) {
            return None;
        }

        Square::try_from((rank * NUM_FILES as i8 + file) as u8).ok()
    }

    /// Step `file_delta`/`rank_delta` away from this square.
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        Square::from_coords(self.file() as i8 + file_delta, self.rank() as i8 + rank_delta)
    }
}

impl TryFrom<u8> for Square {
    type Error = &'static str;

    /// Converts from a number representing the square index
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 63 {
            return Err("Square index out of range (must be 0-63)");
        }

        // SAFETY: We've verified value is in range 0-63, which matches our enum variants
        Ok(unsafe { std::mem::transmute::<u8, Square>(value) })
    }
}

impl FromStr for Square {
    type Err = EngineError;

    /// Parses algebraic coordinates such as "e4"
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = text.as_bytes();

        if bytes.len() != 2
            || !(b'a'..=b'h').contains(&bytes[0])
            || !(b'1'..=b'8').contains(&bytes[1])
        {
            return Err(EngineError::InvalidSquare(text.to_string()));
        }

        Square::from_coords((bytes[0] - b'a') as i8, (bytes[1] - b'1') as i8)
            .ok_or_else(|| EngineError::InvalidSquare(text.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}
