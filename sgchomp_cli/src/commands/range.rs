use crate::{commands::StrategyArg, io::FileOrStdout};
use anyhow::{Context, Result};
use clap::{self, Parser, ValueEnum};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sgchomp::{
    numeric::nimber::Nimber,
    short::impartial::{games::chomp::Chomp, transposition_table::ParallelTranspositionTable},
};
use std::io::{BufWriter, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameValueFilter {
    None,
    Zero,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: Chomp,
    sprague_grundy: Nimber,
}

/// Evaluate all Chomp boards up to a given size.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Largest number of rows
    #[arg(long, default_value_t = 3)]
    max_rows: usize,

    /// Largest length of the bottom row
    #[arg(long, default_value_t = 4)]
    max_width: u32,

    #[arg(long, value_enum, default_value_t = GameValueFilter::None)]
    filter: GameValueFilter,

    /// How to walk the game graph
    #[arg(long, value_enum, default_value_t = StrategyArg::Recursive)]
    strategy: StrategyArg,

    /// Output path, `-` for stdout
    #[arg(long, default_value_t = FileOrStdout::Stdout)]
    output: FileOrStdout,
}

/// Every staircase with `row_count` rows and bottom row of length `1..=max_width`
fn staircases(row_count: usize, max_width: u32) -> impl Iterator<Item = Chomp> {
    (0..=max_width)
        .combinations_with_replacement(row_count)
        .filter(|ascending| ascending.last().is_some_and(|&width| width > 0))
        .map(|mut ascending| {
            ascending.reverse();
            Chomp::new_unchecked(ascending)
        })
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let mut w = BufWriter::new(
        args.output
            .create()
            .with_context(|| format!("Could not create file '{}'", args.output))?,
    );

    // Positions of different sizes never collide, one table serves the whole range
    let tt = ParallelTranspositionTable::new();
    for row_count in 1..=args.max_rows {
        for position in staircases(row_count, args.max_width) {
            let sprague_grundy = position.sprague_grundy_value_with(args.strategy.into(), &tt);

            let keep = match args.filter {
                GameValueFilter::None => true,
                GameValueFilter::Zero => sprague_grundy.is_zero(),
            };
            if keep {
                let report = Report {
                    position,
                    sprague_grundy,
                };
                serde_json::to_writer(&mut w, &report)
                    .with_context(|| format!("Could not write to file '{}'", args.output))?;
                writeln!(w)
                    .with_context(|| format!("Could not write to file '{}'", args.output))?;
            }
        }
        log::info!("Finished boards with {} rows, {} positions cached", row_count, tt.len());
    }
    w.flush()
        .with_context(|| format!("Could not write to file '{}'", args.output))?;

    Ok(())
}

#[test]
fn all_staircases() {
    assert_eq!(
        staircases(2, 2)
            .map(|chomp| chomp.to_string())
            .collect::<Vec<_>>(),
        ["Chomp[1, 0]", "Chomp[2, 0]", "Chomp[1, 1]", "Chomp[2, 1]", "Chomp[2, 2]"]
    );
    assert_eq!(staircases(3, 4).count(), 34);
    assert!(staircases(3, 4).all(|chomp| Chomp::new(chomp.rows().to_vec()).is_ok()));
}
