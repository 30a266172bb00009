use std::{path::PathBuf, time::Instant};

use gatris_engine::{BoardConfig, GameModel, PieceSeed, PieceSupplyKind};
use gatris_evaluator::{Weights, continue_game};

use crate::{model::WeightsModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct VerifyArg {
    /// Model file written by `train`; the built-in weights are used otherwise
    #[arg(long)]
    model: Option<PathBuf>,
    /// Piece supply: bag, uniform or lcg
    #[arg(long, default_value = "uniform")]
    supply: PieceSupplyKind,
    /// Piece supply seed
    #[arg(long, default_value = "12345")]
    seed: PieceSeed,
    /// Maximum pieces to place
    #[arg(long, default_value_t = 1_000_000)]
    limit: usize,
}

pub(crate) fn run(arg: &VerifyArg) -> anyhow::Result<()> {
    let (board, weights) = match &arg.model {
        Some(path) => {
            let model: WeightsModel = util::read_json_file("model", path)?;
            tracing::info!(name = %model.name, path = %path.display(), "loaded model");
            (model.board, model.to_weights()?)
        }
        None => (BoardConfig::default(), Weights::REFERENCE),
    };
    tracing::info!(
        supply = %arg.supply,
        seed = %arg.seed,
        limit = arg.limit,
        %weights,
        "verifying"
    );

    let start = Instant::now();
    let mut game = GameModel::new(board, arg.supply.build(arg.seed));
    let outcome = continue_game(&mut game, &weights, arg.limit);
    let elapsed = start.elapsed();
    tracing::debug!("final board:\n{}", game.grid());

    println!("Pieces placed: {}", outcome.placements);
    println!("Lines cleared: {}", outcome.lines_cleared);
    println!("Game over:     {}", outcome.game_over);
    println!("Elapsed:       {elapsed:.3?}");
    Ok(())
}
