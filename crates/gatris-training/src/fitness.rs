//! Fitness evaluation on a fixed pool of worker threads.
//!
//! An individual's fitness is the mean number of lines cleared over
//! [`GeneticParams::games_per_individual`] games, each played from its own
//! 7-bag seed. Seeds are drawn by the optimizer before any game starts, so a
//! run is reproducible from the optimizer's RNG alone regardless of how the
//! work is scheduled across workers.
//!
//! Jobs are fed to the workers through a queue and results come back tagged
//! with the index of the job that produced them; they are written back into
//! job order once every result has been received.

use std::thread;

use gatris_engine::{BagSupply, BoardConfig, PieceSeed};
use gatris_evaluator::{Weights, run_game};
use rand::Rng;

use crate::GeneticParams;

/// Weights to score and the seeds of the games to score them on.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessJob {
    pub weights: Weights,
    pub seeds: Vec<PieceSeed>,
}

/// Plays the fitness games of whole populations.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    board: BoardConfig,
    placement_cap: usize,
    games_per_individual: usize,
    workers: usize,
}

impl FitnessEvaluator {
    #[must_use]
    pub fn new(
        board: BoardConfig,
        placement_cap: usize,
        games_per_individual: usize,
        workers: usize,
    ) -> Self {
        Self {
            board,
            placement_cap,
            games_per_individual,
            workers,
        }
    }

    #[must_use]
    pub fn from_params(params: &GeneticParams) -> Self {
        Self::new(
            params.board,
            params.placement_cap,
            params.games_per_individual,
            params.workers,
        )
    }

    #[must_use]
    pub fn games_per_individual(&self) -> usize {
        self.games_per_individual
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Draws one piece seed per fitness game.
    pub fn draw_seeds<R>(&self, rng: &mut R) -> Vec<PieceSeed>
    where
        R: Rng + ?Sized,
    {
        (0..self.games_per_individual).map(|_| rng.random()).collect()
    }

    /// Mean lines cleared by `weights` over one game per seed.
    ///
    /// Returns `0.0` when `seeds` is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness(&self, weights: &Weights, seeds: &[PieceSeed]) -> f64 {
        if seeds.is_empty() {
            return 0.0;
        }
        let total: usize = seeds
            .iter()
            .map(|&seed| {
                run_game(
                    self.board,
                    BagSupply::with_seed(seed),
                    weights,
                    self.placement_cap,
                )
            })
            .sum();
        total as f64 / seeds.len() as f64
    }

    /// Scores every job in parallel. `result[i]` is the fitness of `jobs[i]`.
    #[must_use]
    pub fn evaluate_all(&self, jobs: Vec<FitnessJob>) -> Vec<f64> {
        evaluate_parallel(jobs, self.workers, |job| {
            self.fitness(&job.weights, &job.seeds)
        })
    }
}

/// Runs `f` over `jobs` on up to `workers` threads.
///
/// The returned vector has one entry per job, in job order. At least one and
/// at most `jobs.len()` workers are started.
///
/// # Panics
///
/// Panics if `f` panics on any job.
pub fn evaluate_parallel<J, F>(jobs: Vec<J>, workers: usize, f: F) -> Vec<f64>
where
    J: Send,
    F: Fn(J) -> f64 + Sync,
{
    let job_count = jobs.len();
    if job_count == 0 {
        return vec![];
    }
    let workers = workers.clamp(1, job_count);
    tracing::debug!(job_count, workers, "starting fitness workers");

    let (job_tx, job_rx) = crossbeam_channel::bounded(job_count);
    let (result_tx, result_rx) = crossbeam_channel::bounded(job_count);
    for job in jobs.into_iter().enumerate() {
        job_tx
            .send(job)
            .expect("job queue should have room for every job");
    }
    drop(job_tx);

    let mut results = vec![0.0; job_count];
    thread::scope(|s| {
        let f = &f;
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move || {
                while let Ok((index, job)) = job_rx.recv() {
                    if result_tx.send((index, f(job))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        for _ in 0..job_count {
            let (index, fitness) = result_rx
                .recv()
                .expect("fitness worker stopped before finishing its jobs");
            results[index] = fitness;
        }
    });
    results
}
