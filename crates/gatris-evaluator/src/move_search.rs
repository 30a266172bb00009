//! Greedy one-piece search over every drop of the active piece.
//!
//! For each rotation (in catalog order) and each column from the left edge
//! to the last column the rotation fits in, the piece is dropped from row 0
//! until the next row down would collide, locked into a copy of the grid and
//! scored. The strictly highest score wins, so among equal scores the first
//! enumerated placement (lowest rotation, then lowest column) is kept.

use gatris_engine::{BitGrid, BoardConfig, GameModel, Placement};

use crate::{PlacementEvaluator, Weights};

/// A placement together with the score the evaluator gave it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    pub placement: Placement,
    pub score: f64,
}

/// Move search with its own evaluator and candidate buffer.
///
/// One searcher serves a whole game; nothing is allocated per move.
#[derive(Debug, Clone)]
pub struct MoveSearcher {
    evaluator: PlacementEvaluator,
    candidate: BitGrid,
}

impl MoveSearcher {
    #[must_use]
    pub fn new(config: BoardConfig, weights: Weights) -> Self {
        Self {
            evaluator: PlacementEvaluator::new(config, weights),
            candidate: BitGrid::new(config),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        self.evaluator.weights()
    }

    /// Finds the best placement of the model's active piece.
    ///
    /// Returns `None` only when no candidate scores above negative infinity
    /// (for example with NaN weights).
    pub fn best_move<S>(&mut self, model: &GameModel<S>) -> Option<ScoredPlacement> {
        let kind = model.current_piece();
        let width = model.grid().width();
        let mut best_score = f64::NEG_INFINITY;
        let mut best = None;

        for (rotation, shape) in kind.rotations().iter().enumerate() {
            for x in 0..=width - shape.width() {
                let y = model.landing_row(x, rotation);

                self.candidate.copy_from(model.grid());
                self.candidate.fill_shape(x, y, shape);
                let score = self.evaluator.evaluate(&self.candidate, shape, y);

                if score > best_score {
                    best_score = score;
                    best = Some(ScoredPlacement {
                        placement: Placement { x, y, rotation },
                        score,
                    });
                }
            }
        }

        best
    }
}
