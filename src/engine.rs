use std::ops::ControlFlow;

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::DEFAULT_SEARCH_DEPTH,
    position::Position,
    types::{Move, Side},
};

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Plies to search. A quiet move consumes two, a capture one.
    pub depth: i32,
    /// Seed for the tie-break generator. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Minimax score of `best_move`, from white's point of view
    pub evaluation: i32,
    pub depth: i32,
    /// Leaf evaluations performed by this search
    pub evaluated: u64,
}

/// Search session: settings, the tie-break generator and the evaluation counter.
/// The position it searches is borrowed per call and restored before returning.
pub struct Engine {
    pub settings: SearchSettings,
    rng: StdRng,
    evaluated: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(SearchSettings::default())
    }
}

impl Engine {
    pub fn new(settings: SearchSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            settings,
            rng,
            evaluated: 0,
        }
    }

    pub fn with_depth(depth: i32, seed: Option<u64>) -> Self {
        Engine::new(SearchSettings { depth, seed })
    }

    /// Leaf evaluations since the last root search began
    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    pub fn evaluate(&mut self, position: &Position) -> i32 {
        self.evaluated += 1;
        position.evaluate()
    }

    /// Minimax with alpha-beta pruning over the fully legal moves of the side to move.
    ///
    /// The move that led here buys an extra ply when it was a capture: quiet moves drop
    /// one ply before the children are searched at `depth - 1`. A side with no legal
    /// replies scores the worst value for itself, `i32::MIN` or `i32::MAX`.
    pub fn search(
        &mut self,
        position: &mut Position,
        mut depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        if depth <= 0 {
            return self.evaluate(position);
        }

        if !position.last_move().is_some_and(Move::is_capture) {
            depth -= 1;
        }

        let side = position.side;
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

        let _ = position.for_each_side_move(side, true, &mut |position: &mut Position, move_: Move| {
            position.apply(move_);
            let score = self.search(position, depth - 1, !is_maximizing, alpha, beta);
            position.undo();

            if is_maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        best
    }

    /// Score of every root move at `depth`, in generation order
    pub fn score_root_moves(&mut self, position: &mut Position, depth: i32) -> Vec<(Move, i32)> {
        let child_is_maximizing = position.side != Side::White;

        position
            .legal_moves()
            .into_iter()
            .map(|move_| {
                position.apply(move_);
                let score = self.search(position, depth, child_is_maximizing, i32::MIN, i32::MAX);
                position.undo();
                (move_, score)
            })
            .collect()
    }

    pub fn choose_best_move(&mut self, position: &mut Position) -> Option<SearchResult> {
        self.choose_best_move_at_depth(position, self.settings.depth)
    }

    /// Picks the best root move for the side to move: highest score for white, lowest
    /// for black. Equal scores are resolved by reservoir sampling, so each tied move
    /// is equally likely to be chosen. Returns `None` without legal moves.
    pub fn choose_best_move_at_depth(
        &mut self,
        position: &mut Position,
        depth: i32,
    ) -> Option<SearchResult> {
        let side = position.side;
        let is_better = |score: i32, best: i32| match side {
            Side::White => score > best,
            Side::Black => score < best,
        };

        self.evaluated = 0;

        let mut best: Option<(Move, i32)> = None;
        let mut ties: u32 = 0;

        let _ = position.for_each_side_move(side, true, &mut |position: &mut Position, move_: Move| {
            position.apply(move_);
            let score = self.search(position, depth, side == Side::Black, i32::MIN, i32::MAX);
            position.undo();

            debug!("root move {} scored {}", move_, score);

            match best {
                Some((_, best_score)) if score == best_score => {
                    ties += 1;
                    if self.rng.gen_range(0..ties) == 0 {
                        best = Some((move_, score));
                    }
                }
                Some((_, best_score)) if !is_better(score, best_score) => {}
                _ => {
                    best = Some((move_, score));
                    ties = 1;
                }
            }

            ControlFlow::Continue(())
        });

        let (best_move, evaluation) = best?;

        info!(
            "depth {} evaluated {} boards, best move {} with score {}",
            depth, self.evaluated, best_move, evaluation
        );

        Some(SearchResult {
            best_move,
            evaluation,
            depth,
            evaluated: self.evaluated,
        })
    }
}
