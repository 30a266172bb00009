pub use self::{bit_grid::*, board_config::*, piece::*};

pub(crate) mod bit_grid;
pub(crate) mod board_config;
pub(crate) mod piece;
