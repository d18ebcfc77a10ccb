use crate::commands::StrategyArg;
use anyhow::{Context, Result, bail};
use clap::Parser;
use sgchomp::{
    numeric::nimber::Nimber,
    short::impartial::{games::chomp::Chomp, transposition_table::ParallelTranspositionTable},
};

/// Boards with known Sprague-Grundy values, bottom row first
const KNOWN_VALUES: &[(&[u32], u32)] = &[
    (&[1], 0),
    (&[0], 0),
    (&[2, 1], 0),
    (&[3, 2], 0),
    (&[1, 1], 1),
    (&[2], 1),
    (&[3], 2),
    (&[2, 2], 2),
    (&[3, 1], 3),
    (&[3, 3], 4),
    (&[5, 5, 5, 5, 5], 6),
];

/// Check Sprague-Grundy values of boards with known values
#[derive(Parser, Debug)]
pub struct Args {
    /// How to walk the game graph
    #[arg(long, value_enum, default_value_t = StrategyArg::Recursive)]
    strategy: StrategyArg,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let mut failed = 0;
    for (rows, expected) in KNOWN_VALUES {
        let position = Chomp::new(rows.to_vec())
            .with_context(|| format!("Known board {:?} is not a staircase", rows))?;
        let expected = Nimber::new(*expected);

        let tt = ParallelTranspositionTable::new();
        let actual = position.sprague_grundy_value_with(args.strategy.into(), &tt);
        log::info!("{} = {}, {} positions cached", position, actual, tt.len());

        if actual == expected {
            println!("Passed: {} = {}", position, actual);
        } else {
            failed += 1;
            println!("Failed: {} = {}, expected {}", position, actual, expected);
        }
    }

    if failed > 0 {
        bail!("{} of {} boards failed", failed, KNOWN_VALUES.len());
    }

    Ok(())
}
