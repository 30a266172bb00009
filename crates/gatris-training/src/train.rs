//! The generation loop.

use std::time::{Duration, Instant};

use gatris_evaluator::Weights;
use gatris_stats::descriptive::DescriptiveStats;
use rand::Rng;

use crate::{
    GeneticParams, ParamsError,
    fitness::FitnessEvaluator,
    genetic::{Individual, Population, PopulationEvolver},
};

/// Summary of one evaluated generation, taken before it is bred.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation number.
    pub generation: usize,
    pub best_fitness: f64,
    pub best_weights: Weights,
    pub fitness_stats: DescriptiveStats,
    /// Wall time spent evaluating and breeding this generation.
    pub elapsed: Duration,
}

/// Best individual of the re-evaluated final population.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub best: Individual,
    pub final_stats: DescriptiveStats,
    pub generations: usize,
    pub elapsed: Duration,
}

/// Runs the genetic optimizer with validated parameters.
///
/// All randomness (initial genes, game seeds, selection, breeding) comes
/// from the single RNG the trainer owns, so seeding it reproduces a run.
#[derive(Debug)]
pub struct Trainer<R> {
    params: GeneticParams,
    rng: R,
}

impl<R> Trainer<R>
where
    R: Rng,
{
    pub fn new(params: GeneticParams, rng: R) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Evolves `params.generations` generations, calling `on_generation`
    /// after each one is evaluated, then evaluates the final population
    /// once more and returns its best individual.
    pub fn run<F>(mut self, mut on_generation: F) -> TrainingOutcome
    where
        F: FnMut(&GenerationReport),
    {
        let params = self.params;
        let evaluator = FitnessEvaluator::from_params(&params);
        let evolver = PopulationEvolver::from_params(&params);
        let rng = &mut self.rng;

        tracing::info!(
            population_size = params.population_size,
            generations = params.generations,
            elite_count = evolver.elite_count,
            games_per_individual = params.games_per_individual,
            placement_cap = params.placement_cap,
            workers = params.workers,
            "starting training"
        );

        let training_start = Instant::now();
        let mut population = Population::random(params.population_size, rng);
        for generation in 1..=params.generations {
            let start = Instant::now();
            population.evaluate_fitness(&evaluator, rng);
            let (best, fitness_stats) = summarize(&population);
            let best = best.clone();
            population = evolver.evolve(&population, rng);

            let report = GenerationReport {
                generation,
                best_fitness: best.fitness(),
                best_weights: *best.weights(),
                fitness_stats,
                elapsed: start.elapsed(),
            };
            tracing::info!(
                generation,
                best_fitness = report.best_fitness,
                mean_fitness = report.fitness_stats.mean,
                elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
                "generation evaluated"
            );
            tracing::debug!(best_weights = %report.best_weights, "generation best");
            on_generation(&report);
        }

        population.evaluate_fitness(&evaluator, rng);
        let (best, final_stats) = summarize(&population);
        let outcome = TrainingOutcome {
            best: best.clone(),
            final_stats,
            generations: params.generations,
            elapsed: training_start.elapsed(),
        };
        tracing::info!(
            final_fitness = outcome.best.fitness(),
            weights = %outcome.best.weights(),
            "training finished"
        );
        outcome
    }
}

fn summarize(population: &Population) -> (&Individual, DescriptiveStats) {
    let best = population
        .best()
        .expect("validated population should not be empty");
    let stats = population
        .compute_fitness_stats()
        .expect("validated population should not be empty");
    (best, stats)
}
