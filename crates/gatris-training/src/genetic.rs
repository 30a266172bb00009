//! Genetic algorithm over heuristic weight vectors.
//!
//! # Algorithm Overview
//!
//! Each generation goes through the following steps:
//!
//! 1. **Evaluate Fitness** - Every individual plays its fitness games (see
//!    [`fitness`](crate::fitness)) and gets the mean lines cleared
//! 2. **Elite Selection** - The `floor(elitism_rate × N)` fittest individuals
//!    are copied unchanged into the next generation
//! 3. **Roulette Selection** - Two parents are drawn with probability
//!    proportional to fitness
//! 4. **Breeding** - With probability `crossover_rate` the child is a
//!    single-point crossover of the parents, otherwise a copy of one of them
//! 5. **Mutation** - Each gene of the child is perturbed with probability
//!    `mutation_rate`
//!
//! # Roulette Weights
//!
//! Fitness values are turned into selection weights before sampling:
//!
//! - if the lowest fitness is negative, every value is shifted up by its
//!   magnitude
//! - if all weights are then zero, every individual gets weight 1
//!
//! A draw `r` is uniform in `[0, total)` and the first individual whose
//! cumulative weight exceeds `r` is chosen. Rounding can leave `r` past the
//! last cumulative sum; the last individual with a positive weight is chosen
//! then.

use std::cmp::Ordering;

use gatris_evaluator::Weights;
use gatris_stats::descriptive::DescriptiveStats;
use rand::Rng;

use crate::{
    GeneticParams,
    fitness::{FitnessEvaluator, FitnessJob},
    weights,
};

/// Fitness of an individual that has not been evaluated yet.
pub const UNEVALUATED_FITNESS: f64 = f64::MIN;

/// A candidate weight vector and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: Weights,
    fitness: f64,
}

impl Individual {
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            fitness: UNEVALUATED_FITNESS,
        }
    }

    /// An individual with every gene uniform in `[-1, 1]`.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(weights::random(rng))
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Mean lines cleared, or [`UNEVALUATED_FITNESS`].
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

/// One generation of individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    #[must_use]
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// `count` random individuals.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new((0..count).map(|_| Individual::random(rng)).collect())
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Plays the fitness games of every individual and stores the results.
    ///
    /// Seeds for all games are drawn from `rng` up front, in population
    /// order; the order of individuals is left unchanged.
    pub fn evaluate_fitness<R>(&mut self, evaluator: &FitnessEvaluator, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let jobs = self
            .individuals
            .iter()
            .map(|ind| FitnessJob {
                weights: ind.weights,
                seeds: evaluator.draw_seeds(rng),
            })
            .collect();
        let fitness = evaluator.evaluate_all(jobs);
        for (ind, fitness) in self.individuals.iter_mut().zip(fitness) {
            ind.fitness = fitness;
        }
    }

    /// The fittest individual; the first one wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().reduce(|best, ind| {
            if ind.fitness > best.fitness {
                ind
            } else {
                best
            }
        })
    }

    /// Fitness distribution of the population, `None` if it is empty.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

/// Breeds the next generation from an evaluated one.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Individuals copied unchanged, fittest first.
    pub elite_count: usize,
    /// Probability of breeding by crossover rather than copying a parent.
    pub crossover_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Bound of the uniform mutation noise.
    pub mutation_magnitude: f64,
}

impl PopulationEvolver {
    #[must_use]
    pub fn from_params(params: &GeneticParams) -> Self {
        Self {
            elite_count: params.elite_count(),
            crossover_rate: params.crossover_rate,
            mutation_rate: params.mutation_rate,
            mutation_magnitude: params.mutation_magnitude,
        }
    }

    /// Creates a population of the same size as `population`.
    ///
    /// The elites come first, sorted by fitness descending (ties keep their
    /// population order), followed by bred children. Children start
    /// unevaluated; elites keep their fitness until the next evaluation.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let individuals = &population.individuals;
        let size = individuals.len();
        let mut next = Vec::with_capacity(size);
        if size == 0 {
            return Population::new(next);
        }

        let mut ranked: Vec<&Individual> = individuals.iter().collect();
        ranked.sort_by(|a, b| compare_fitness(a, b));
        next.extend(ranked.into_iter().take(self.elite_count).cloned());

        let selection_weights = roulette_weights(individuals.iter().map(Individual::fitness));
        while next.len() < size {
            let p1 = &individuals[roulette_select(&selection_weights, rng)];
            let p2 = &individuals[roulette_select(&selection_weights, rng)];

            let mut child = if rng.random_bool(self.crossover_rate) {
                weights::single_point_crossover(&p1.weights, &p2.weights, rng)
            } else {
                weights::copy_either(&p1.weights, &p2.weights, rng)
            };
            weights::mutate(
                &mut child,
                self.mutation_rate,
                self.mutation_magnitude,
                rng,
            );
            next.push(Individual::new(child));
        }

        Population::new(next)
    }
}

/// Turns fitness values into non-negative roulette weights.
///
/// Negative fitness shifts every weight up by the magnitude of the lowest
/// value, and an all-zero result becomes uniform.
#[must_use]
pub fn roulette_weights<I>(fitness: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut weights: Vec<f64> = fitness.into_iter().collect();
    let min = weights
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .unwrap_or(0.0);
    if min < 0.0 {
        for w in &mut weights {
            *w -= min;
        }
    }
    if weights.iter().sum::<f64>() == 0.0 {
        weights.fill(1.0);
    }
    weights
}

/// Draws an index with probability proportional to its weight.
///
/// # Panics
///
/// Panics if `weights` is empty or has no positive entry. Weights produced by
/// [`roulette_weights`] from a non-empty population always have one.
pub fn roulette_select<R>(weights: &[f64], rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let total: f64 = weights.iter().sum();
    let mut r = rng.random::<f64>() * total;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if r < w {
            return i;
        }
        r -= w;
        last_positive = Some(i);
    }
    last_positive.expect("roulette needs at least one positive weight")
}

/// Orders individuals fittest first.
#[must_use]
pub fn compare_fitness(a: &Individual, b: &Individual) -> Ordering {
    b.fitness.total_cmp(&a.fitness)
}

#[cfg(test)]
mod tests {
    use gatris_engine::BoardConfig;
    use gatris_evaluator::WEIGHT_COUNT;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn with_fitness(fitness: &[f64]) -> Population {
        Population::new(
            fitness
                .iter()
                .enumerate()
                .map(|(i, &fitness)| {
                    #[expect(clippy::cast_precision_loss)]
                    let gene = i as f64;
                    Individual {
                        weights: Weights::new([gene; WEIGHT_COUNT]),
                        fitness,
                    }
                })
                .collect(),
        )
    }

    fn evolver(elite_count: usize) -> PopulationEvolver {
        PopulationEvolver {
            elite_count,
            crossover_rate: 0.8,
            mutation_rate: 0.25,
            mutation_magnitude: 0.4,
        }
    }

    #[test]
    fn test_roulette_weights_shift_negative() {
        assert_eq!(roulette_weights([-2.0, 0.0, 3.0]), vec![0.0, 2.0, 5.0]);
        assert_eq!(roulette_weights([1.0, 3.0]), vec![1.0, 3.0]);
    }

    #[test]
    fn test_roulette_weights_uniform_when_all_zero() {
        assert_eq!(roulette_weights([0.0, 0.0, 0.0]), vec![1.0, 1.0, 1.0]);
        assert_eq!(roulette_weights([-4.0, -4.0]), vec![1.0, 1.0]);
        assert!(roulette_weights(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_roulette_frequency_follows_weights() {
        let weights = [1.0, 0.0, 3.0];
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0; 3];
        for _ in 0..40_000 {
            counts[roulette_select(&weights, &mut rng)] += 1;
        }
        assert_eq!(counts[1], 0);
        // expected 10_000 vs 30_000
        assert!((9_000..11_000).contains(&counts[0]), "{counts:?}");
        assert!((29_000..31_000).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn test_roulette_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..1000 {
            assert_eq!(roulette_select(&[0.0, 0.0, 2.0, 0.0], &mut rng), 2);
        }
    }

    #[test]
    fn test_best_prefers_first_on_ties() {
        let population = with_fitness(&[1.0, 5.0, 5.0, 2.0]);
        let best = population.best().unwrap();
        assert_eq!(best.fitness(), 5.0);
        assert_eq!(best.weights().as_array()[0], 1.0);
        assert!(Population::new(vec![]).best().is_none());
    }

    #[test]
    fn test_new_individual_is_unevaluated() {
        let mut rng = StdRng::seed_from_u64(13);
        let population = Population::random(5, &mut rng);
        assert_eq!(population.len(), 5);
        assert!(
            population
                .individuals()
                .iter()
                .all(|ind| ind.fitness() == UNEVALUATED_FITNESS)
        );
    }

    #[test]
    fn test_evolve_keeps_size_and_elites() {
        let population = with_fitness(&[3.0, 9.0, 1.0, 7.0, 5.0, 0.0, 2.0, 4.0, 8.0, 6.0]);
        let mut rng = StdRng::seed_from_u64(14);
        let next = evolver(3).evolve(&population, &mut rng);

        assert_eq!(next.len(), population.len());
        let elites: Vec<f64> = next.individuals()[..3]
            .iter()
            .map(Individual::fitness)
            .collect();
        assert_eq!(elites, vec![9.0, 8.0, 7.0]);
        assert_eq!(next.individuals()[0], population.individuals()[1]);
        assert!(
            next.individuals()[3..]
                .iter()
                .all(|ind| ind.fitness() == UNEVALUATED_FITNESS)
        );
    }

    #[test]
    fn test_evolve_elites_are_stable_on_ties() {
        let population = with_fitness(&[1.0, 4.0, 4.0, 4.0]);
        let mut rng = StdRng::seed_from_u64(15);
        let next = evolver(2).evolve(&population, &mut rng);
        assert_eq!(next.individuals()[0], population.individuals()[1]);
        assert_eq!(next.individuals()[1], population.individuals()[2]);
    }

    #[test]
    fn test_evolve_without_variation_copies_parents() {
        let population = with_fitness(&[1.0, 2.0, 3.0, 4.0]);
        let evolver = PopulationEvolver {
            elite_count: 0,
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            mutation_magnitude: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(16);
        let next = evolver.evolve(&population, &mut rng);
        for child in next.individuals() {
            assert!(
                population
                    .individuals()
                    .iter()
                    .any(|parent| parent.weights() == child.weights())
            );
        }
    }

    #[test]
    fn test_evolve_all_elites() {
        let population = with_fitness(&[2.0, 1.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(17);
        let next = evolver(3).evolve(&population, &mut rng);
        let fitness: Vec<f64> = next.individuals().iter().map(Individual::fitness).collect();
        assert_eq!(fitness, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_evaluate_fitness_fills_every_individual() {
        let mut rng = StdRng::seed_from_u64(18);
        let mut population = Population::random(4, &mut rng);
        let evaluator = FitnessEvaluator::new(BoardConfig::default(), 50, 2, 2);
        population.evaluate_fitness(&evaluator, &mut rng);
        let stats = population.compute_fitness_stats().unwrap();
        assert_eq!(stats.count, 4);
        assert!(stats.min >= 0.0);
        // 50 pieces are at most 20 full rows
        assert!(stats.max <= 20.0);
    }

    #[test]
    fn test_compare_fitness_sorts_descending() {
        let population = with_fitness(&[1.0, 3.0, 2.0]);
        let mut individuals = population.individuals().to_vec();
        individuals.sort_by(compare_fitness);
        let fitness: Vec<f64> = individuals.iter().map(Individual::fitness).collect();
        assert_eq!(fitness, vec![3.0, 2.0, 1.0]);
    }
}
