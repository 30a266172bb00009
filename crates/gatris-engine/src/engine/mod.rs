//! Stateful game simulation.
//!
//! - [`PieceSupply`] - where pieces come from: [`BagSupply`] (7-bag),
//!   [`UniformSupply`] and [`LcgSupply`], or any of them at runtime through
//!   [`AnyPieceSupply`]
//! - [`GameModel`] - grid plus active piece, with collision testing,
//!   placement, line melting and spawning
//!
//! A game driven by a search strategy looks like this:
//!
//! 1. Create a [`GameModel`] with a freshly seeded supply
//! 2. Pick a [`Placement`] for the active piece and apply it
//! 3. [`GameModel::save`] the piece, then [`GameModel::try_melt`] while still
//!    in game
//! 4. [`GameModel::spawn_next`] and repeat until the game ends
//!
//! # Example
//!
//! ```
//! use gatris_engine::{BoardConfig, GameModel, Placement, PieceSeed, PieceSupplyKind};
//!
//! let supply = PieceSupplyKind::Uniform.build(PieceSeed::new(1));
//! let mut model = GameModel::new(BoardConfig::default(), supply);
//!
//! let y = model.landing_row(0, 0);
//! model.set_placement(Placement { x: 0, y, rotation: 0 });
//! model.save();
//! if model.is_in_game() {
//!     model.try_melt();
//!     model.spawn_next();
//! }
//! assert_eq!(model.placement_count(), 1);
//! ```

pub use self::{game_model::*, piece_supply::*};

mod game_model;
mod piece_supply;
