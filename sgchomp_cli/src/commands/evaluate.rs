use crate::commands::StrategyArg;
use anyhow::{Result, anyhow};
use sgchomp::short::impartial::{
    games::chomp::Chomp, transposition_table::ParallelTranspositionTable,
};
use clap::Parser;
use std::str::FromStr;

/// Evaluate single position
#[derive(Parser, Debug)]
pub struct Args {
    /// Position to evaluate, row lengths starting from the bottom row, e.g. `3,2`
    #[arg(long)]
    position: String,

    /// How to walk the game graph
    #[arg(long, value_enum, default_value_t = StrategyArg::Recursive)]
    strategy: StrategyArg,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let position = Chomp::from_str(&args.position)
        .map_err(|err| anyhow!("Could not parse position '{}': {}", args.position, err))?;

    let tt = ParallelTranspositionTable::new();
    let value = position.sprague_grundy_value_with(args.strategy.into(), &tt);

    println!("Position: {}", position);
    println!("Sprague-Grundy value: {}", value);
    println!("Outcome: {}", if value.is_zero() { "P" } else { "N" });
    println!("Cached positions: {}", tt.len());

    Ok(())
}
