//! Scoring a single hypothetical placement.
//!
//! The evaluator receives the grid as it would look right after the piece is
//! locked (not yet melted), melts it into a scratch grid, measures the result
//! with [`BoardMetrics`] and combines the six feature values linearly:
//!
//! ```text
//! score = w0·landing_height + w1·melted_lines + w2·row_transitions
//!       + w3·column_transitions + w4·holes + w5·well_sums
//! ```
//!
//! Weights are unnormalized and may be negative.

use gatris_engine::{BitGrid, BoardConfig, RotationShape};

use crate::{Feature, Weights, board_metrics::BoardMetrics, weights::WEIGHT_COUNT};

/// Feature values of one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementFeatures {
    pub landing_height: f64,
    pub melted_lines: usize,
    pub metrics: BoardMetrics,
}

impl PlacementFeatures {
    /// Measures `placed`, a grid holding a freshly locked `shape` whose top
    /// row is at `y`.
    ///
    /// `scratch` receives the melted grid and is fully overwritten.
    #[must_use]
    pub fn analyze(
        placed: &BitGrid,
        shape: &RotationShape,
        y: usize,
        scratch: &mut BitGrid,
    ) -> Self {
        let melted_lines = placed.compact_into(scratch);
        Self {
            landing_height: landing_height(placed.height(), shape, y),
            melted_lines,
            metrics: BoardMetrics::from_grid(scratch),
        }
    }

    /// Feature values in [`Feature::ALL`] order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn values(&self) -> [f64; WEIGHT_COUNT] {
        let mut values = [0.0; WEIGHT_COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = match feature {
                Feature::LandingHeight => self.landing_height,
                Feature::MeltedLines => self.melted_lines as f64,
                Feature::RowTransitions => self.metrics.row_transitions as f64,
                Feature::ColumnTransitions => self.metrics.column_transitions as f64,
                Feature::Holes => self.metrics.holes as f64,
                Feature::WellSums => self.metrics.well_sums as f64,
            };
        }
        values
    }
}

/// Vertical centre of a piece whose bounding box top is at row `y`, measured
/// from the bottom of a grid `height` rows tall.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn landing_height(height: usize, shape: &RotationShape, y: usize) -> f64 {
    let bottom_gap = height - (y + shape.height());
    bottom_gap as f64 + (shape.height() - 1) as f64 / 2.0
}

/// Linear placement scorer with a reusable melt buffer.
///
/// [`Self::evaluate`] depends only on its arguments and the weights: the
/// scratch grid is rewritten from scratch on every call.
#[derive(Debug, Clone)]
pub struct PlacementEvaluator {
    weights: Weights,
    scratch: BitGrid,
}

impl PlacementEvaluator {
    #[must_use]
    pub fn new(config: BoardConfig, weights: Weights) -> Self {
        Self {
            weights,
            scratch: BitGrid::new(config),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Scores `placed`, the grid right after `shape` was locked with its top
    /// row at `y`. Higher is better.
    pub fn evaluate(&mut self, placed: &BitGrid, shape: &RotationShape, y: usize) -> f64 {
        let features = PlacementFeatures::analyze(placed, shape, y, &mut self.scratch);
        self.weights.dot(&features.values())
    }
}
