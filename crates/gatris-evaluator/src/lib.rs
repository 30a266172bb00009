//! Heuristic move selection for the simulated game.
//!
//! Three layers, each built on the one below:
//!
//! ```text
//! Game runner (play a whole game, count lines)
//!     ↓ uses
//! Move search (try every drop of the active piece, keep the best)
//!     ↓ uses
//! Placement evaluator (melt, measure, weighted sum)
//! ```
//!
//! - [`weights`] - the six-feature [`Weights`] vector and its [`Feature`] names
//! - [`board_metrics`] - row/column transitions, holes and wells of a grid
//! - [`placement_evaluator`] - scores one hypothetical placement
//! - [`move_search`] - greedy search over rotations and columns
//! - [`game_runner`] - plays a game to top-out or a placement cap
//!
//! # Example
//!
//! ```
//! use gatris_engine::{BagSupply, BoardConfig, PieceSeed};
//! use gatris_evaluator::{Weights, run_game};
//!
//! let supply = BagSupply::with_seed(PieceSeed::new(42));
//! let lines = run_game(BoardConfig::default(), supply, &Weights::REFERENCE, 100);
//! assert!(lines > 0);
//! ```

pub use self::{
    board_metrics::BoardMetrics,
    game_runner::{GameOutcome, continue_game, play_game, run_game},
    move_search::{MoveSearcher, ScoredPlacement},
    placement_evaluator::{PlacementEvaluator, PlacementFeatures},
    weights::{Feature, WEIGHT_COUNT, WeightCountError, Weights},
};

pub mod board_metrics;
pub mod game_runner;
pub mod move_search;
pub mod placement_evaluator;
pub mod weights;
