//! Genetic tuning of the heuristic weights used by `gatris-evaluator`.
//!
//! # How Training Works
//!
//! 1. **Population** - Create individuals with random weights in `[-1, 1]`
//! 2. **Evaluation** - Each individual plays a few 7-bag games with the greedy
//!    move search; its fitness is the mean number of lines cleared
//! 3. **Selection** - Keep the elites, pick parents by fitness-proportional
//!    roulette
//! 4. **Reproduction** - Single-point crossover or a plain copy, then uniform
//!    mutation
//! 5. **Repeat** - After the last generation the final population is
//!    evaluated once more and its best individual is the result
//!
//! # Architecture
//!
//! ```text
//! Trainer (train)
//!     ↓ breeds with
//! PopulationEvolver (genetic) ── operators (weights)
//!     ↓ scores with
//! FitnessEvaluator (fitness) ── worker pool
//!     ↓ plays
//! run_game (gatris-evaluator)
//! ```
//!
//! # Example
//!
//! ```
//! use gatris_training::{GeneticParams, Trainer};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let params = GeneticParams {
//!     population_size: 4,
//!     generations: 2,
//!     placement_cap: 30,
//!     workers: 2,
//!     ..GeneticParams::default()
//! };
//! let trainer = Trainer::new(params, StdRng::seed_from_u64(42)).unwrap();
//! let outcome = trainer.run(|report| {
//!     println!("generation {}: {}", report.generation, report.best_fitness);
//! });
//! assert_eq!(outcome.generations, 2);
//! ```

pub use self::{
    params::{GeneticParams, ParamsError},
    train::{GenerationReport, Trainer, TrainingOutcome},
};

pub mod fitness;
pub mod genetic;
pub mod params;
pub mod train;
pub mod weights;
