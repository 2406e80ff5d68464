use crate::types::Piece;

/// NOTE: 1 ply = one move by a single player

pub const NUM_SQUARES: usize = 64;
pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;

/// Initial capacity of the move history. Sufficient for any realistic game.
pub const MAX_HISTORY: usize = 512;

/// Default search depth (in ply). Quiet moves consume two, captures one.
pub const DEFAULT_SEARCH_DEPTH: i32 = 4;

/// More pieces than this on the board means the game is still in its early stage.
pub const EARLY_STAGE_PIECE_COUNT: usize = 24;

/// File and rank the king-placement term measures distance from (d5).
pub const CENTER_FILE: u8 = 3;
pub const CENTER_RANK: u8 = 4;

pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
pub const KING_FILE: u8 = 4;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Piece order along each side's home rank, a-file first
pub const BACK_RANK: [Piece; NUM_FILES] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// (file, rank) deltas
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
];
