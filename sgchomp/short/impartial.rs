//! Impartial games, where both players have the same moves

pub mod games;
pub mod impartial_game;
pub mod solver;
pub mod transposition_table;
