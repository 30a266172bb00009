use std::{num::NonZeroUsize, thread};

use gatris_engine::BoardConfig;
use serde::{Deserialize, Serialize};

/// Optimizer tunables that cannot describe a valid run.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("generation count must be at least 1")]
    NoGenerations,
    #[display("games per individual must be at least 1")]
    NoGames,
    #[display("worker count must be at least 1")]
    NoWorkers,
    #[display("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[display("mutation magnitude must be finite and non-negative, got {value}")]
    MutationMagnitude { value: f64 },
}

/// Tunables of the genetic optimizer.
///
/// # Example
///
/// ```
/// use gatris_training::GeneticParams;
///
/// let params = GeneticParams {
///     population_size: 20,
///     generations: 5,
///     ..GeneticParams::default()
/// };
/// params.validate().unwrap();
/// assert_eq!(params.elite_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    /// Individuals per generation (N).
    pub population_size: usize,
    /// Generations to evolve before the final evaluation.
    pub generations: usize,
    /// Probability that a child is bred by single-point crossover instead of
    /// copying one parent.
    pub crossover_rate: f64,
    /// Fraction of the population carried over unchanged; the elite count is
    /// `floor(elitism_rate × N)`.
    pub elitism_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Mutations add a uniform value from `[-magnitude, magnitude]`.
    pub mutation_magnitude: f64,
    /// Independent games whose mean lines cleared is an individual's fitness.
    pub games_per_individual: usize,
    /// Maximum placements per game.
    pub placement_cap: usize,
    pub board: BoardConfig,
    /// Fitness worker threads.
    pub workers: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 128,
            generations: 100,
            crossover_rate: 0.8,
            elitism_rate: 0.1,
            mutation_rate: 0.25,
            mutation_magnitude: 0.4,
            games_per_individual: 2,
            placement_cap: 10_000_000,
            board: BoardConfig::default(),
            workers: default_workers(),
        }
    }
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(ParamsError::NoGenerations);
        }
        if self.games_per_individual == 0 {
            return Err(ParamsError::NoGames);
        }
        if self.workers == 0 {
            return Err(ParamsError::NoWorkers);
        }
        for (name, value) in [
            ("crossover rate", self.crossover_rate),
            ("elitism rate", self.elitism_rate),
            ("mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::Probability { name, value });
            }
        }
        if !(self.mutation_magnitude.is_finite() && self.mutation_magnitude >= 0.0) {
            return Err(ParamsError::MutationMagnitude {
                value: self.mutation_magnitude,
            });
        }
        Ok(())
    }

    /// Number of individuals copied unchanged into the next generation.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn elite_count(&self) -> usize {
        let elites = (self.elitism_rate * self.population_size as f64).floor() as usize;
        elites.min(self.population_size)
    }
}

/// Available hardware parallelism, or 1 if it cannot be determined.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GeneticParams::default();
        params.validate().unwrap();
        assert_eq!(params.population_size, 128);
        assert_eq!(params.elite_count(), 12);
        assert!(params.workers >= 1);
    }

    #[test]
    fn test_elite_count_floors() {
        let mut params = GeneticParams {
            population_size: 10,
            elitism_rate: 0.25,
            ..GeneticParams::default()
        };
        assert_eq!(params.elite_count(), 2);
        params.elitism_rate = 0.0;
        assert_eq!(params.elite_count(), 0);
        params.elitism_rate = 1.0;
        assert_eq!(params.elite_count(), 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = GeneticParams::default();
        let cases = [
            (
                GeneticParams {
                    population_size: 0,
                    ..base
                },
                ParamsError::EmptyPopulation,
            ),
            (
                GeneticParams {
                    generations: 0,
                    ..base
                },
                ParamsError::NoGenerations,
            ),
            (
                GeneticParams {
                    games_per_individual: 0,
                    ..base
                },
                ParamsError::NoGames,
            ),
            (GeneticParams { workers: 0, ..base }, ParamsError::NoWorkers),
            (
                GeneticParams {
                    mutation_rate: 1.5,
                    ..base
                },
                ParamsError::Probability {
                    name: "mutation rate",
                    value: 1.5,
                },
            ),
            (
                GeneticParams {
                    mutation_magnitude: -0.1,
                    ..base
                },
                ParamsError::MutationMagnitude { value: -0.1 },
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate(), Err(expected));
        }
    }

    #[test]
    fn test_nan_probability_is_rejected() {
        let params = GeneticParams {
            crossover_rate: f64::NAN,
            ..GeneticParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::Probability {
                name: "crossover rate",
                ..
            })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = GeneticParams {
            workers: 3,
            ..GeneticParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""board":{"width":10,"height":20}"#));
        let back: GeneticParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
