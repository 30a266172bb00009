use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// Source of the pieces a game spawns.
///
/// Every supply owns its own generator, so one instance per simulated game is
/// all the isolation concurrent workers need.
pub trait PieceSupply: Send {
    /// Returns the next piece to spawn.
    fn next_piece(&mut self) -> PieceKind;
}

impl<S> PieceSupply for &mut S
where
    S: PieceSupply + ?Sized,
{
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}

impl<S> PieceSupply for Box<S>
where
    S: PieceSupply + ?Sized,
{
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}

/// Seed for deterministic piece generation.
///
/// The same seed always produces the same piece sequence for a given
/// [`PieceSupplyKind`].
///
/// # Example
///
/// ```
/// use gatris_engine::{BagSupply, PieceSeed, PieceSupply as _};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut first = BagSupply::with_seed(seed);
/// let mut second = BagSupply::with_seed(seed);
/// for _ in 0..14 {
///     assert_eq!(first.next_piece(), second.next_piece());
/// }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct PieceSeed(u64);

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        PieceSeed(rng.random())
    }
}

impl PieceSeed {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// 7-bag randomizer.
///
/// When the bag runs dry it is refilled with one copy of each of the seven
/// kinds and shuffled, so every aligned window of seven draws is a
/// permutation of the catalog.
#[derive(Debug, Clone)]
pub struct BagSupply {
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl BagSupply {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.value()),
            bag: ArrayVec::new(),
        }
    }
}

impl PieceSupply for BagSupply {
    fn next_piece(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            let mut new_bag = PieceKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
        self.bag.pop().expect("Piece bag should never be empty")
    }
}

/// Independent uniform draw on every call.
#[derive(Debug, Clone)]
pub struct UniformSupply {
    rng: Pcg32,
}

impl UniformSupply {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.value()),
        }
    }
}

impl PieceSupply for UniformSupply {
    fn next_piece(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// The POSIX reference `rand()` linear congruential generator.
///
/// Produces the same piece sequence as `srand(seed); rand() % 7` with the
/// sample implementation from the POSIX standard, so game lengths can be
/// compared with other implementations of the same trainer.
#[derive(Debug, Clone)]
pub struct LcgSupply {
    state: u32,
}

impl LcgSupply {
    const MULTIPLIER: u32 = 1_103_515_245;
    const INCREMENT: u32 = 12_345;

    /// Seeds the generator with the low 32 bits of `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        #[expect(clippy::cast_possible_truncation)]
        let state = seed.value() as u32;
        Self { state }
    }

    /// Advances the generator and returns the next value in `0..=32767`.
    pub fn next_value(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state >> 16) & 0x7fff
    }
}

impl PieceSupply for LcgSupply {
    fn next_piece(&mut self) -> PieceKind {
        let index = self.next_value() as usize % PieceKind::LEN;
        PieceKind::ALL[index]
    }
}

/// Selects a piece supply strategy by name.
///
/// Parsing is case-insensitive (`bag`, `uniform`, `lcg`).
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr,
)]
pub enum PieceSupplyKind {
    #[default]
    #[display("bag")]
    Bag,
    #[display("uniform")]
    Uniform,
    #[display("lcg")]
    Lcg,
}

impl PieceSupplyKind {
    #[must_use]
    pub fn build(self, seed: PieceSeed) -> AnyPieceSupply {
        match self {
            PieceSupplyKind::Bag => AnyPieceSupply::Bag(BagSupply::with_seed(seed)),
            PieceSupplyKind::Uniform => AnyPieceSupply::Uniform(UniformSupply::with_seed(seed)),
            PieceSupplyKind::Lcg => AnyPieceSupply::Lcg(LcgSupply::with_seed(seed)),
        }
    }
}

/// Any of the built-in supplies, chosen at runtime.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum AnyPieceSupply {
    Bag(BagSupply),
    Uniform(UniformSupply),
    Lcg(LcgSupply),
}

impl PieceSupply for AnyPieceSupply {
    fn next_piece(&mut self) -> PieceKind {
        match self {
            AnyPieceSupply::Bag(supply) => supply.next_piece(),
            AnyPieceSupply::Uniform(supply) => supply.next_piece(),
            AnyPieceSupply::Lcg(supply) => supply.next_piece(),
        }
    }
}
