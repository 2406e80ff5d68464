use thiserror::Error;

/// Errors raised while turning text into engine inputs.
///
/// Move generation, evaluation and search are total over a valid position and
/// never produce these.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move string: {0}")]
    InvalidMoveString(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no legal moves in position (checkmate or stalemate)")]
    NoLegalMoves,

    #[cfg(feature = "api")]
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
