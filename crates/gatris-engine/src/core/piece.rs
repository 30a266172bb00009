use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::InvalidPieceIndex;

/// One rotation state of a tetromino, stored as row bitmasks inside its
/// bounding box.
///
/// Bit `i` of a row is set when column `i` (counted from the left edge of the
/// bounding box) is occupied. Every row value is below `1 << width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationShape {
    rows: &'static [u32],
    width: usize,
}

impl RotationShape {
    const fn new(rows: &'static [u32], width: usize) -> Self {
        Self { rows, width }
    }

    /// Row bitmasks from the top of the bounding box down.
    #[must_use]
    pub const fn rows(&self) -> &'static [u32] {
        self.rows
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn row(&self, h: usize) -> u32 {
        self.rows[h]
    }
}

/// The seven tetromino kinds.
///
/// The discriminant is the catalog index handed out by piece supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// O-piece.
    O = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// Z-piece.
    Z = 5,
    /// S-piece.
    S = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl TryFrom<usize> for PieceKind {
    type Error = InvalidPieceIndex;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidPieceIndex { index })
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns every rotation state of this piece, in rotation order.
    #[must_use]
    pub const fn rotations(self) -> &'static [RotationShape] {
        ROTATIONS[self as usize]
    }

    /// Returns a single rotation state.
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not below `self.rotations().len()`.
    #[inline]
    #[must_use]
    pub fn rotation(self, rotation: usize) -> &'static RotationShape {
        &self.rotations()[rotation]
    }
}

const I_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b1, 0b1, 0b1, 0b1], 1),
    RotationShape::new(&[0b1111], 4),
];

const T_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b010, 0b111], 3),
    RotationShape::new(&[0b10, 0b11, 0b10], 2),
    RotationShape::new(&[0b111, 0b010], 3),
    RotationShape::new(&[0b01, 0b11, 0b01], 2),
];

const O_ROTATIONS: &[RotationShape] = &[RotationShape::new(&[0b11, 0b11], 2)];

const L_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b10, 0b10, 0b11], 2),
    RotationShape::new(&[0b111, 0b100], 3),
    RotationShape::new(&[0b11, 0b01, 0b01], 2),
    RotationShape::new(&[0b001, 0b111], 3),
];

const J_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b111, 0b001], 3),
    RotationShape::new(&[0b01, 0b01, 0b11], 2),
    RotationShape::new(&[0b100, 0b111], 3),
    RotationShape::new(&[0b11, 0b10, 0b10], 2),
];

const Z_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b110, 0b011], 3),
    RotationShape::new(&[0b01, 0b11, 0b10], 2),
];

const S_ROTATIONS: &[RotationShape] = &[
    RotationShape::new(&[0b011, 0b110], 3),
    RotationShape::new(&[0b10, 0b11, 0b01], 2),
];

const ROTATIONS: [&[RotationShape]; PieceKind::LEN] = [
    I_ROTATIONS,
    T_ROTATIONS,
    O_ROTATIONS,
    L_ROTATIONS,
    J_ROTATIONS,
    Z_ROTATIONS,
    S_ROTATIONS,
];
