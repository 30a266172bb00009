//! Bitboard Tetris simulation used for heuristic weight training.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - immutable and low-level data: the tetromino catalog
//!   ([`PieceKind`], [`RotationShape`]), the row-bitmask grid ([`BitGrid`]) and
//!   its dimensions ([`BoardConfig`]).
//! - [`engine`] - the stateful parts: piece supplies ([`PieceSupply`] and its
//!   bag, uniform and LCG strategies) and the [`GameModel`] state machine that
//!   performs collision testing, placement and line melting.
//!
//! # Example
//!
//! ```
//! use gatris_engine::{BagSupply, BoardConfig, GameModel, PieceSeed};
//!
//! let mut model = GameModel::new(BoardConfig::default(), BagSupply::with_seed(PieceSeed::new(7)));
//!
//! // Drop the spawned piece straight down and lock it.
//! while model.try_move(gatris_engine::Direction::Down) {}
//! model.save();
//! let melted = model.try_melt();
//! assert_eq!(melted, 0);
//! assert!(model.is_in_game());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A raw piece index that does not name one of the seven tetrominoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece index {index} is outside 0..=6")]
pub struct InvalidPieceIndex {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardConfigError {
    #[display("board width {width} is outside {MIN_BOARD_WIDTH}..={MAX_BOARD_WIDTH}")]
    Width { width: usize },
    #[display("board height {height} is outside {MIN_BOARD_HEIGHT}..={MAX_BOARD_HEIGHT}")]
    Height { height: usize },
}
