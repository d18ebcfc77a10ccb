use crate::commands::*;
use anyhow::{Context, Result};
use clap::{self, Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod commands;
mod io;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    Evaluate(evaluate::Args),
    Range(range::Args),
    Verify(verify::Args),
}

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Messages above this level are printed to stderr
    #[arg(long, global = true, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(
        args.log_level,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Could not initialize logger")?;

    match args.command {
        Command::Evaluate(args) => evaluate::run(args),
        Command::Range(args) => range::run(args),
        Command::Verify(args) => verify::run(args),
    }
}
