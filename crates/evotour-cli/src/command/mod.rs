use clap::{Parser, Subcommand};

use self::{check::CheckArg, solve::SolveArg};

mod check;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run the genetic algorithm on a distance matrix
    Solve(#[clap(flatten)] SolveArg),
    /// Validate an externally supplied route and measure its tour length
    Check(#[clap(flatten)] CheckArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match &args.mode {
        Mode::Solve(arg) => solve::run(arg)?,
        Mode::Check(arg) => check::run(arg)?,
    }
    Ok(())
}
