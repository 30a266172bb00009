//! Weight vector operators for the genetic algorithm.
//!
//! These are the building blocks [`PopulationEvolver`](crate::genetic::PopulationEvolver)
//! uses to create and breed individuals.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] draws every gene uniformly from `[-1, 1]`
//! - **Crossover**: [`single_point_crossover`] joins a prefix of one parent
//!   with the suffix of the other
//! - **Copy**: [`copy_either`] clones one of the parents with equal odds
//! - **Mutation**: [`mutate`] adds uniform noise to a random subset of genes
//!
//! Genes are never clamped or normalized: the move search only compares
//! scores, but negative weights are how penalties are expressed.

use gatris_evaluator::{WEIGHT_COUNT, Weights};
use rand::Rng;

/// Generates a weight vector with every gene uniform in `[-1, 1]`.
pub fn random<R>(rng: &mut R) -> Weights
where
    R: Rng + ?Sized,
{
    Weights::new(std::array::from_fn(|_| rng.random_range(-1.0..=1.0)))
}

/// Single-point crossover.
///
/// A split point `k` is drawn uniformly from `1..WEIGHT_COUNT`, so both
/// parents always contribute at least one gene. The child takes genes
/// `[0, k)` from `p1` and `[k, WEIGHT_COUNT)` from `p2`.
///
/// # Example
///
/// ```
/// use gatris_evaluator::Weights;
/// use gatris_training::weights;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let p1 = Weights::new([1.0; 6]);
/// let p2 = Weights::new([2.0; 6]);
/// let child = weights::single_point_crossover(&p1, &p2, &mut StdRng::seed_from_u64(0));
/// let genes = child.as_array();
/// assert_eq!(genes[0], 1.0);
/// assert_eq!(genes[5], 2.0);
/// ```
pub fn single_point_crossover<R>(p1: &Weights, p2: &Weights, rng: &mut R) -> Weights
where
    R: Rng + ?Sized,
{
    let split = rng.random_range(1..WEIGHT_COUNT);
    crossover_at(p1, p2, split)
}

fn crossover_at(p1: &Weights, p2: &Weights, split: usize) -> Weights {
    let mut child = *p1;
    child.as_array_mut()[split..].copy_from_slice(&p2.as_array()[split..]);
    child
}

/// Returns a copy of `p1` or `p2`, each with probability one half.
pub fn copy_either<R>(p1: &Weights, p2: &Weights, rng: &mut R) -> Weights
where
    R: Rng + ?Sized,
{
    if rng.random_bool(0.5) { *p1 } else { *p2 }
}

/// Mutates genes in place.
///
/// Each gene independently, with probability `rate`, gets a value drawn
/// uniformly from `[-magnitude, magnitude]` added to it.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]` or `magnitude` is negative or not
/// finite. [`GeneticParams::validate`](crate::GeneticParams::validate)
/// rejects such values up front.
pub fn mutate<R>(weights: &mut Weights, rate: f64, magnitude: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for w in weights.as_array_mut() {
        if rng.random_bool(rate) {
            *w += rng.random_range(-magnitude..=magnitude);
        }
    }
}
