use clap::{Parser, Subcommand};

use self::{replay::ReplayArg, score::ScoreArg, simulate::SimulateArg};
use crate::util;

mod replay;
mod score;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log engine transitions (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a scripted round against a content file
    Replay(#[clap(flatten)] ReplayArg),
    /// Play many rounds with a simulated player
    Simulate(#[clap(flatten)] SimulateArg),
    /// Compute cognitive metrics for a session report
    Score(#[clap(flatten)] ScoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    match args.mode {
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
    }
    Ok(())
}
