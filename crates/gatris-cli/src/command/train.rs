use std::path::PathBuf;

use anyhow::Context as _;
use gatris_engine::BoardConfig;
use gatris_training::{GenerationReport, GeneticParams, Trainer};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::{model::WeightsModel, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Individuals per generation [default: 128]
    #[arg(long)]
    population: Option<usize>,
    /// Generations to evolve [default: 100]
    #[arg(long)]
    generations: Option<usize>,
    /// Probability of breeding by crossover [default: 0.8]
    #[arg(long)]
    crossover_rate: Option<f64>,
    /// Fraction of the population kept unchanged [default: 0.1]
    #[arg(long)]
    elitism_rate: Option<f64>,
    /// Per-gene mutation probability [default: 0.25]
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Bound of the uniform mutation noise [default: 0.4]
    #[arg(long)]
    mutation_magnitude: Option<f64>,
    /// Games averaged into each fitness value [default: 2]
    #[arg(long)]
    games: Option<usize>,
    /// Maximum pieces placed per game [default: 10000000]
    #[arg(long)]
    placement_cap: Option<usize>,
    /// Board width [default: 10]
    #[arg(long)]
    width: Option<usize>,
    /// Board height [default: 20]
    #[arg(long)]
    height: Option<usize>,
    /// Fitness worker threads [default: available parallelism]
    #[arg(long)]
    workers: Option<usize>,
    /// Seed of the optimizer's random number generator [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Name stored in the saved model
    #[arg(long, default_value = "gatris")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn to_params(&self) -> anyhow::Result<GeneticParams> {
        let defaults = GeneticParams::default();
        let board = BoardConfig::new(
            self.width.unwrap_or(defaults.board.width()),
            self.height.unwrap_or(defaults.board.height()),
        )?;
        let params = GeneticParams {
            population_size: self.population.unwrap_or(defaults.population_size),
            generations: self.generations.unwrap_or(defaults.generations),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            elitism_rate: self.elitism_rate.unwrap_or(defaults.elitism_rate),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            mutation_magnitude: self
                .mutation_magnitude
                .unwrap_or(defaults.mutation_magnitude),
            games_per_individual: self.games.unwrap_or(defaults.games_per_individual),
            placement_cap: self.placement_cap.unwrap_or(defaults.placement_cap),
            board,
            workers: self.workers.unwrap_or(defaults.workers),
        };
        params.validate()?;
        Ok(params)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let params = arg.to_params()?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(seed, "seeding optimizer");

    let trainer = Trainer::new(params, StdRng::seed_from_u64(seed))?;
    let outcome = trainer.run(print_generation);

    eprintln!();
    eprintln!("Final evaluation:");
    eprintln!("  Fitness: {:.3}", outcome.best.fitness());
    eprintln!("  Weights: {}", outcome.best.weights());
    eprintln!("  Elapsed: {:.1?}", outcome.elapsed);

    let model = WeightsModel::from_outcome(arg.name.clone(), params.board, &outcome);
    util::save_json(&model, arg.output.as_deref())
        .context("Failed to save trained model")?;
    Ok(())
}

fn print_generation(report: &GenerationReport) {
    let stats = &report.fitness_stats;
    eprintln!("Generation #{}:", report.generation);
    eprintln!(
        "  Fitness: best {:.3}, mean {:.3}, std dev {:.3}, min {:.3}",
        report.best_fitness, stats.mean, stats.std_dev, stats.min
    );
    eprintln!("  Weights: {}", report.best_weights);
    eprintln!("  Elapsed: {:.1?}", report.elapsed);
}
