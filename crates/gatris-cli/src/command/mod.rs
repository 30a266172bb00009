use clap::{Parser, Subcommand};

use self::{train::TrainArg, verify::VerifyArg};

mod train;
mod verify;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Tune heuristic weights with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Play one reproducible game with fixed weights
    Verify(#[clap(flatten)] VerifyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Verify(arg) => verify::run(&arg)?,
    }
    Ok(())
}
