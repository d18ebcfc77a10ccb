//! Concrete impartial games

pub mod chomp;
