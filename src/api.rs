#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Engine, SearchSettings},
    error::EngineError,
    position::Position,
    types::GameResult,
};

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub depth: Option<i32>,
    pub seed: Option<u64>,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,             // The best move in UCI format (e.g., e2e4)
    pub evaluation: i32,               // Minimax score, positive favours white
    pub depth: i32,                    // Search depth used
    pub evaluated: u64,                // Leaf evaluations performed
    pub legal_moves: Vec<String>,      // Every legal move of the side to move
    pub result_after_move: GameResult, // Game status once the best move is played
}

/// Main entry point for API consumers
/// Analyzes a position and returns the best move
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse, EngineError> {
    let defaults = SearchSettings::default();
    let mut engine = Engine::new(SearchSettings {
        depth: request.depth.unwrap_or(defaults.depth),
        seed: request.seed,
    });

    let mut position = Position::from_fen(&request.fen)?;

    let legal_moves: Vec<String> = position
        .legal_moves()
        .iter()
        .map(|move_| move_.to_string())
        .collect();

    let result = engine
        .choose_best_move(&mut position)
        .ok_or(EngineError::NoLegalMoves)?;

    position.apply(result.best_move);
    let result_after_move = position.game_result();
    position.undo();

    Ok(AnalyzeResponse {
        best_move: result.best_move.to_string(),
        evaluation: result.evaluation,
        depth: result.depth,
        evaluated: result.evaluated,
        legal_moves,
        result_after_move,
    })
}

/// Simpler interface with just FEN and depth
pub fn get_best_move(fen: &str, depth: i32) -> Result<AnalyzeResponse, EngineError> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        depth: Some(depth),
        seed: None,
    })
}

/// JSON in, JSON out
#[cfg(feature = "api")]
pub fn analyze_json(request_json: &str) -> Result<String, EngineError> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;
    let response = analyze_position(request)?;

    Ok(serde_json::to_string(&response)?)
}
