use clap::ValueEnum;
use sgchomp::short::impartial::solver::Strategy;

pub mod evaluate;
pub mod range;
pub mod verify;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Recursive,
    Worklist,
    Parallel,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Recursive => Strategy::Recursive,
            StrategyArg::Worklist => Strategy::Worklist,
            StrategyArg::Parallel => Strategy::Parallel,
        }
    }
}
